//! Core types for starmap catalogs.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the hex grid geometry shared by the whole workspace: absolute and
//! sector-relative coordinates, the six hex edges, and the location
//! error type.
//!
//! # Grid layout
//!
//! The galaxy is an unbounded grid of hexes with vertical columns.
//! Columns alternate vertical offset: a column whose 1-based in-sector
//! offset is odd sits half a hex higher than its neighbours. Sectors tile
//! the grid in [`SECTOR_WIDTH`] × [`SECTOR_HEIGHT`] blocks, each split into
//! a 4×4 grid of subsectors.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod coord;
pub mod edge;
pub mod error;

pub use coord::{
    HexPosition, SectorIndex, SectorOffset, HORZ_SUBSECTORS_PER_SECTOR, SECTOR_HEIGHT,
    SECTOR_WIDTH, SUBSECTORS_PER_SECTOR, SUBSECTOR_HEIGHT, SUBSECTOR_WIDTH,
    VERT_SUBSECTORS_PER_SECTOR,
};
pub use edge::HexEdge;
pub use error::LocationError;
