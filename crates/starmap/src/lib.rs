//! Starmap: spatial and name queries over a hex-grid star map.
//!
//! This is the top-level facade crate that re-exports the public API of
//! the starmap sub-crates. Most users only need this one dependency.
//!
//! # Quick start
//!
//! ```rust
//! use starmap::prelude::*;
//!
//! let core = SectorIndex::new(0, 0);
//! let terra = HexPosition::from_sector(core, SectorOffset::new(5, 5));
//! let names = (b'A'..=b'P').map(|c| format!("Core {}", c as char));
//! let sector = Sector::new("Core", core, "M1105", names)
//!     .unwrap()
//!     .with_worlds([World::new("Terra", terra).with_location("Core", "Core A")]);
//!
//! let universe = Universe::builder().sector(sector).build().unwrap();
//! let view = Overlay::new(&universe, "M1105", true);
//!
//! assert_eq!(view.parse_location("Core 0505").unwrap(), terra);
//! assert_eq!(view.canonical_hex_name(terra), "Terra (Core A)");
//! assert_eq!(view.worlds_in_radius(terra, 2, None).count(), 1);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`core`] | `starmap-core` | Hex and sector coordinates, edges, location errors |
//! | [`catalog`] | `starmap-catalog` | Records, per-milieu indices, `Universe`, configuration |
//! | [`query`] | `starmap-query` | `Overlay` and every query built on it |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Coordinates and grid geometry (`starmap-core`).
///
/// Sector and hex addressing, the six [`core::HexEdge`]s, and hex
/// distance.
pub use starmap_core as core;

/// Records and lookup indices (`starmap-catalog`).
///
/// Build a [`catalog::Universe`] from [`catalog::Sector`] records; each
/// milieu gets its own [`catalog::MilieuCatalog`].
pub use starmap_catalog as catalog;

/// Queries (`starmap-query`).
///
/// Every operation is a method on [`query::Overlay`].
pub use starmap_query as query;

/// Common imports for typical starmap usage.
///
/// ```rust
/// use starmap::prelude::*;
/// ```
pub mod prelude {
    // Geometry
    pub use starmap_core::{HexEdge, HexPosition, SectorIndex, SectorOffset};

    // Records and catalogs
    pub use starmap_catalog::{
        Allegiance, Main, MilieuCatalog, Route, Sector, Subsector, SubsectorRef, Universe,
        UniverseConfig, World,
    };

    // Errors
    pub use starmap_catalog::{CatalogError, ConfigError};
    pub use starmap_core::LocationError;

    // Queries
    pub use starmap_query::{Filter, Flood, HexesInRadius, Overlay};
}
