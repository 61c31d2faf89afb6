//! Sector fixtures and universe builders for starmap development.
//!
//! [`SectorFixture`] assembles a [`Sector`] from short hex strings so tests
//! can describe a map in a few lines. Worlds get their sector and
//! subsector names filled in from the fixture.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use starmap_catalog::{Allegiance, Route, Sector, Universe, World};
use starmap_core::{HexPosition, SectorIndex, SectorOffset, SUBSECTORS_PER_SECTOR};

/// Milieu used by fixtures unless overridden.
pub const DEFAULT_MILIEU: &str = "M1105";

/// Milieu tag conventionally used as the placeholder in tests.
pub const PLACEHOLDER_MILIEU: &str = "M0";

/// Absolute position of a 4-digit `XXYY` offset in sector `(x, y)`.
///
/// # Panics
///
/// Panics if `offset` is not a valid in-sector offset.
pub fn hex_in(x: i32, y: i32, offset: &str) -> HexPosition {
    let offset: SectorOffset = offset
        .parse()
        .unwrap_or_else(|e| panic!("bad fixture offset {offset:?}: {e}"));
    HexPosition::from_sector(SectorIndex::new(x, y), offset)
}

/// Builder for a test [`Sector`].
#[derive(Clone, Debug)]
pub struct SectorFixture {
    name: String,
    index: SectorIndex,
    milieu: String,
    subsector_names: Vec<String>,
    alternate_names: Vec<String>,
    abbreviation: Option<String>,
    worlds: Vec<(String, HexPosition, Option<Allegiance>)>,
    routes: Vec<Route>,
}

/// Start a fixture for sector `name` at grid position `(x, y)`.
///
/// Subsectors are named `"<name> A"` through `"<name> P"`.
pub fn sector(name: &str, x: i32, y: i32) -> SectorFixture {
    let subsector_names = (0..SUBSECTORS_PER_SECTOR)
        .map(|i| format!("{name} {}", (b'A' + i as u8) as char))
        .collect();
    SectorFixture {
        name: name.to_string(),
        index: SectorIndex::new(x, y),
        milieu: DEFAULT_MILIEU.to_string(),
        subsector_names,
        alternate_names: Vec::new(),
        abbreviation: None,
        worlds: Vec::new(),
        routes: Vec::new(),
    }
}

impl SectorFixture {
    pub fn milieu(mut self, milieu: &str) -> Self {
        self.milieu = milieu.to_string();
        self
    }

    /// Rename subsector `index` (row-major, `0..16`).
    pub fn subsector(mut self, index: usize, name: &str) -> Self {
        self.subsector_names[index] = name.to_string();
        self
    }

    pub fn alternate_name(mut self, name: &str) -> Self {
        self.alternate_names.push(name.to_string());
        self
    }

    pub fn abbreviation(mut self, abbreviation: &str) -> Self {
        self.abbreviation = Some(abbreviation.to_string());
        self
    }

    /// Add a world at 4-digit offset `hex` inside this sector.
    pub fn world(mut self, name: &str, hex: &str) -> Self {
        let pos = self.position(hex);
        self.worlds.push((name.to_string(), pos, None));
        self
    }

    /// Add a world at an absolute position inside this sector.
    pub fn world_at(mut self, name: &str, pos: HexPosition) -> Self {
        self.worlds.push((name.to_string(), pos, None));
        self
    }

    /// Add a world at offset `hex` that belongs to `allegiance`.
    pub fn world_with_allegiance(
        mut self,
        name: &str,
        hex: &str,
        allegiance: Allegiance,
    ) -> Self {
        let pos = self.position(hex);
        self.worlds.push((name.to_string(), pos, Some(allegiance)));
        self
    }

    /// Add a route between two offsets inside this sector.
    pub fn route(mut self, from: &str, to: &str) -> Self {
        let route = Route::new(self.position(from), self.position(to));
        self.routes.push(route);
        self
    }

    /// Add a route from an offset in this sector to any absolute hex.
    pub fn route_to(mut self, from: &str, to: HexPosition) -> Self {
        let route = Route::new(self.position(from), to);
        self.routes.push(route);
        self
    }

    /// Absolute position of offset `hex` in this sector.
    pub fn position(&self, hex: &str) -> HexPosition {
        hex_in(self.index.x, self.index.y, hex)
    }

    pub fn index(&self) -> SectorIndex {
        self.index
    }

    pub fn build(self) -> Sector {
        let subsector_names = self.subsector_names.clone();
        let worlds: Vec<World> = self
            .worlds
            .into_iter()
            .map(|(name, pos, allegiance)| {
                let subsector = &subsector_names[pos.subsector_index()];
                let world =
                    World::new(name, pos).with_location(self.name.clone(), subsector.clone());
                match allegiance {
                    Some(a) => world.with_allegiance(a),
                    None => world,
                }
            })
            .collect();
        let mut sector = Sector::new(self.name, self.index, self.milieu, self.subsector_names)
            .expect("fixture always supplies 16 subsectors")
            .with_worlds(worlds)
            .with_routes(self.routes);
        for alt in self.alternate_names {
            sector = sector.with_alternate_name(alt);
        }
        if let Some(abbr) = self.abbreviation {
            sector = sector.with_abbreviation(abbr);
        }
        sector
    }
}

/// Build a universe from fixtures with no placeholder.
pub fn universe(sectors: impl IntoIterator<Item = SectorFixture>) -> Universe {
    Universe::builder()
        .sectors(sectors.into_iter().map(SectorFixture::build))
        .build()
        .expect("fixture universe is valid")
}

/// Build a universe from fixtures with `placeholder` as the placeholder milieu.
pub fn universe_with_placeholder(
    sectors: impl IntoIterator<Item = SectorFixture>,
    placeholder: &str,
) -> Universe {
    Universe::builder()
        .sectors(sectors.into_iter().map(SectorFixture::build))
        .placeholder(placeholder)
        .build()
        .expect("fixture universe is valid")
}

/// A sector with a world in every hex within `radius` of offset `center`.
///
/// World names are their 4-digit offsets.
pub fn filled_disk(name: &str, x: i32, y: i32, center: &str, radius: i32) -> SectorFixture {
    let mut fixture = sector(name, x, y);
    let c = fixture.position(center);
    for dx in -radius..=radius {
        for dy in -2 * radius..=2 * radius {
            let pos = HexPosition::new(c.x + dx, c.y + dy);
            if c.distance(pos) <= radius && pos.sector_index() == fixture.index {
                let label = pos.sector_offset().to_string();
                fixture = fixture.world_at(&label, pos);
            }
        }
    }
    fixture
}
