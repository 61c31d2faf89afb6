//! Benchmark universes for starmap queries.
//!
//! - [`dense_universe`]: a square block of fully named sectors with a
//!   deterministic scatter of worlds
//! - [`world_name`]: the deterministic world names, for search benchmarks

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use starmap_catalog::{Route, Sector, Universe, World};
use starmap_core::{HexPosition, SectorIndex, SectorOffset, SECTOR_HEIGHT, SECTOR_WIDTH};

/// Milieu tag of every sector built here.
pub const MILIEU: &str = "M1105";

const SYLLABLES: [&str; 12] = [
    "ar", "bel", "cor", "dra", "en", "fal", "gor", "hal", "ir", "jen", "kal", "lor",
];

/// Deterministic name for world number `i`.
pub fn world_name(i: u64) -> String {
    let a = SYLLABLES[(i % 12) as usize];
    let b = SYLLABLES[((i / 12) % 12) as usize];
    let c = SYLLABLES[((i / 144) % 12) as usize];
    let mut name = format!("{a}{b}{c}");
    if let Some(first) = name.get_mut(..1) {
        first.make_ascii_uppercase();
    }
    format!("{name}-{i}")
}

/// `side × side` sectors centred on the origin, each hex holding a world
/// with probability roughly `density_percent / 100`.
///
/// Placement uses a fixed multiplicative hash of the hex, so the same
/// arguments always produce the same universe. A world is linked by a
/// route to the previous world placed in its sector when the two touch.
pub fn dense_universe(side: i32, density_percent: u64) -> Universe {
    let half = side / 2;
    let mut builder = Universe::builder();
    let mut counter = 0u64;
    for sy in -half..side - half {
        for sx in -half..side - half {
            let index = SectorIndex::new(sx, sy);
            let name = format!("Sector {sx}:{sy}");
            let subsectors: Vec<String> = (0..16).map(|i| format!("{name} / {i}")).collect();
            let mut worlds = Vec::new();
            let mut routes = Vec::new();
            let mut previous: Option<HexPosition> = None;
            for oy in 1..=SECTOR_HEIGHT {
                for ox in 1..=SECTOR_WIDTH {
                    let hex = HexPosition::from_sector(index, SectorOffset::new(ox, oy));
                    if scatter(hex) % 100 >= density_percent {
                        continue;
                    }
                    let subsector = &subsectors[hex.subsector_index()];
                    worlds.push(
                        World::new(world_name(counter), hex).with_location(&name, subsector),
                    );
                    counter += 1;
                    if let Some(prev) = previous.filter(|p| p.distance(hex) == 1) {
                        routes.push(Route::new(prev, hex));
                    }
                    previous = Some(hex);
                }
            }
            let sector = Sector::new(&name, index, MILIEU, subsectors)
                .expect("16 subsector names")
                .with_worlds(worlds)
                .with_routes(routes);
            builder = builder.sector(sector);
        }
    }
    builder.build().expect("default configuration is valid")
}

fn scatter(hex: HexPosition) -> u64 {
    let x = u64::from(hex.x as u32);
    let y = u64::from(hex.y as u32);
    (x.wrapping_mul(6364136223846793005) ^ y.wrapping_mul(1442695040888963407)) >> 33
}
