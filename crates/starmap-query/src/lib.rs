//! Queries over a starmap [`Universe`](starmap_catalog::Universe).
//!
//! All queries go through an [`Overlay`]: a view of one milieu that may
//! borrow whole sectors from the placeholder milieu where the viewed milieu
//! has none. Build one per call site with [`Overlay::new`]; it is `Copy`
//! and holds only references.
//!
//! | Module | Operations |
//! |--------|------------|
//! | [`overlay`] | single-hex and by-name lookup with placeholder fallback |
//! | [`location`] | [`Overlay::parse_location`], [`Overlay::format_location`], [`Overlay::canonical_hex_name`] |
//! | [`area`] | rectangles, radius, [`Flood`], [`Overlay::main_at`] |
//! | [`search`] | [`Overlay::search_worlds`], [`Overlay::search_subsectors`], [`Overlay::search_sectors`] |
//!
//! ```
//! use starmap_catalog::{Sector, Universe, World};
//! use starmap_core::{HexPosition, SectorIndex, SectorOffset};
//! use starmap_query::Overlay;
//!
//! let core = SectorIndex::new(0, 0);
//! let terra = HexPosition::from_sector(core, SectorOffset::new(5, 5));
//! let subsectors = (b'A'..=b'P').map(|c| format!("Core {}", c as char));
//! let sector = Sector::new("Core", core, "M1105", subsectors)
//!     .unwrap()
//!     .with_worlds([World::new("Terra", terra).with_location("Core", "Core A")]);
//! let universe = Universe::builder().sector(sector).build().unwrap();
//!
//! let view = Overlay::new(&universe, "M1105", true);
//! assert_eq!(view.format_location(terra), "Core 0505");
//! assert_eq!(view.parse_location("Core 0505").unwrap(), terra);
//! let found: Vec<_> = view.search_worlds("Ter*", 0).iter().map(|w| w.name()).collect();
//! assert_eq!(found, ["Terra"]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod area;
pub mod location;
pub mod overlay;
pub mod search;

pub use area::{Filter, Flood, HexesInRadius};
pub use overlay::Overlay;
