//! Error types for record construction.

use std::error::Error;
use std::fmt;

/// Errors arising while assembling catalog records.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// A sector was not given exactly 16 subsectors.
    MalformedSectorGeometry {
        /// Name of the offending sector.
        sector: String,
        /// Number of subsectors supplied.
        subsectors: usize,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedSectorGeometry { sector, subsectors } => write!(
                f,
                "sector '{sector}' has {subsectors} subsectors, expected {}",
                starmap_core::SUBSECTORS_PER_SECTOR
            ),
        }
    }
}

impl Error for CatalogError {}
