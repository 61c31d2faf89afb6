//! The six edges of a hex in a vertical-column grid.

use std::fmt;

/// One of the six edges shared between adjacent hexes.
///
/// Columns are vertical, so every hex has a north and a south neighbour in
/// its own column and two neighbours in each adjacent column. Which rows
/// those side neighbours occupy depends on column parity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HexEdge {
    /// Same column, one row up.
    North,
    /// Next column, upper neighbour.
    NorthEast,
    /// Next column, lower neighbour.
    SouthEast,
    /// Same column, one row down.
    South,
    /// Previous column, lower neighbour.
    SouthWest,
    /// Previous column, upper neighbour.
    NorthWest,
}

impl HexEdge {
    /// All edges, clockwise from north.
    pub const ALL: [HexEdge; 6] = [
        Self::North,
        Self::NorthEast,
        Self::SouthEast,
        Self::South,
        Self::SouthWest,
        Self::NorthWest,
    ];

    /// The edge facing back from the neighbour across this one.
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::NorthEast => Self::SouthWest,
            Self::SouthEast => Self::NorthWest,
            Self::South => Self::North,
            Self::SouthWest => Self::NorthEast,
            Self::NorthWest => Self::SouthEast,
        }
    }

    /// `(dx, dy)` to the neighbour across this edge.
    ///
    /// `low_column` is true when the hex's column sits half a hex below
    /// its neighbouring columns.
    pub fn offset(self, low_column: bool) -> (i32, i32) {
        // Side neighbours share the hex's row on one side and the row
        // above (high column) or below (low column) on the other.
        let (upper, lower) = if low_column { (0, 1) } else { (-1, 0) };
        match self {
            Self::North => (0, -1),
            Self::NorthEast => (1, upper),
            Self::SouthEast => (1, lower),
            Self::South => (0, 1),
            Self::SouthWest => (-1, lower),
            Self::NorthWest => (-1, upper),
        }
    }
}

impl fmt::Display for HexEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::North => "N",
            Self::NorthEast => "NE",
            Self::SouthEast => "SE",
            Self::South => "S",
            Self::SouthWest => "SW",
            Self::NorthWest => "NW",
        };
        f.write_str(name)
    }
}
