//! Absolute and sector-relative hex coordinates.
//!
//! A hex can be addressed two ways:
//!
//! - [`HexPosition`]: absolute `(x, y)` on the unbounded grid.
//! - `(SectorIndex, SectorOffset)`: the sector containing the hex plus a
//!   1-based offset inside it, the form shown to users as `"Core 0505"`.
//!
//! The two forms are lossless and mutually inverse. Sector `(0, 0)` offset
//! `0101` is absolute `(0, 0)`.

use crate::edge::HexEdge;
use crate::error::LocationError;
use std::fmt;
use std::str::FromStr;

/// Hexes per sector along x.
pub const SECTOR_WIDTH: i32 = 32;
/// Hexes per sector along y.
pub const SECTOR_HEIGHT: i32 = 40;
/// Hexes per subsector along x.
pub const SUBSECTOR_WIDTH: i32 = 8;
/// Hexes per subsector along y.
pub const SUBSECTOR_HEIGHT: i32 = 10;
/// Subsectors across one sector.
pub const HORZ_SUBSECTORS_PER_SECTOR: i32 = SECTOR_WIDTH / SUBSECTOR_WIDTH;
/// Subsectors down one sector.
pub const VERT_SUBSECTORS_PER_SECTOR: i32 = SECTOR_HEIGHT / SUBSECTOR_HEIGHT;
/// Subsectors in one sector.
pub const SUBSECTORS_PER_SECTOR: usize =
    (HORZ_SUBSECTORS_PER_SECTOR * VERT_SUBSECTORS_PER_SECTOR) as usize;

/// Position of a sector in the sector grid.
///
/// Displays as the synthetic `"x:y"` token used when a sector has no name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectorIndex {
    /// Sector column.
    pub x: i32,
    /// Sector row.
    pub y: i32,
}

impl SectorIndex {
    /// Create a sector index.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Absolute position of offset `0101` in this sector.
    pub fn origin(self) -> HexPosition {
        HexPosition::from_sector(self, SectorOffset::new(1, 1))
    }

    /// Absolute position of offset `3240` in this sector.
    pub fn extent(self) -> HexPosition {
        HexPosition::from_sector(self, SectorOffset::new(SECTOR_WIDTH, SECTOR_HEIGHT))
    }
}

impl fmt::Display for SectorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.x, self.y)
    }
}

impl FromStr for SectorIndex {
    type Err = LocationError;

    /// Parse the synthetic `"x:y"` token.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s.split_once(':').ok_or_else(|| LocationError::invalid(s))?;
        let x = x.trim().parse().map_err(|_| LocationError::invalid(s))?;
        let y = y.trim().parse().map_err(|_| LocationError::invalid(s))?;
        Ok(Self { x, y })
    }
}

/// 1-based hex offset inside a sector.
///
/// Valid offsets have `x` in `[1, SECTOR_WIDTH]` and `y` in
/// `[1, SECTOR_HEIGHT]`. Displays as the 4-digit `XXYY` form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SectorOffset {
    /// Column, 1-based.
    pub x: i32,
    /// Row, 1-based.
    pub y: i32,
}

impl SectorOffset {
    /// Create an offset. Not validated; see [`is_valid`](Self::is_valid).
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Whether the offset lies inside a sector.
    pub fn is_valid(self) -> bool {
        (1..=SECTOR_WIDTH).contains(&self.x) && (1..=SECTOR_HEIGHT).contains(&self.y)
    }

    /// Index in `[0, 16)` of the subsector containing this offset.
    ///
    /// Row-major across the 4×4 subsector grid. Only meaningful for
    /// valid offsets.
    pub fn subsector_index(self) -> usize {
        let col = (self.x - 1).div_euclid(SUBSECTOR_WIDTH);
        let row = (self.y - 1).div_euclid(SUBSECTOR_HEIGHT);
        (row * HORZ_SUBSECTORS_PER_SECTOR + col) as usize
    }
}

impl fmt::Display for SectorOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}", self.x, self.y)
    }
}

impl FromStr for SectorOffset {
    type Err = LocationError;

    /// Parse exactly four ASCII digits, rejecting offsets outside a sector.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 4 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(LocationError::invalid(s));
        }
        let x = s[..2].parse().map_err(|_| LocationError::invalid(s))?;
        let y = s[2..].parse().map_err(|_| LocationError::invalid(s))?;
        let offset = Self { x, y };
        if offset.is_valid() {
            Ok(offset)
        } else {
            Err(LocationError::invalid(s))
        }
    }
}

/// Absolute hex coordinate on the unbounded grid.
///
/// Columns with even `x` sit half a hex higher than columns with odd `x`
/// (they hold the odd 1-based in-sector columns).
///
/// # Examples
///
/// ```
/// use starmap_core::{HexPosition, SectorIndex, SectorOffset};
///
/// let hex = HexPosition::from_sector(SectorIndex::new(-1, 2), SectorOffset::new(19, 10));
/// assert_eq!(hex, HexPosition::new(-14, 89));
/// assert_eq!(hex.to_sector(), (SectorIndex::new(-1, 2), SectorOffset::new(19, 10)));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexPosition {
    /// Absolute column.
    pub x: i32,
    /// Absolute row.
    pub y: i32,
}

impl HexPosition {
    /// Create an absolute position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Absolute position of `offset` within `sector`.
    pub fn from_sector(sector: SectorIndex, offset: SectorOffset) -> Self {
        Self {
            x: sector.x * SECTOR_WIDTH + offset.x - 1,
            y: sector.y * SECTOR_HEIGHT + offset.y - 1,
        }
    }

    /// Like [`from_sector`](Self::from_sector), but `None` when the
    /// position falls outside the `i32` grid.
    pub fn checked_from_sector(sector: SectorIndex, offset: SectorOffset) -> Option<Self> {
        let x = sector.x.checked_mul(SECTOR_WIDTH)?.checked_add(offset.x - 1)?;
        let y = sector.y.checked_mul(SECTOR_HEIGHT)?.checked_add(offset.y - 1)?;
        Some(Self { x, y })
    }

    /// Split into the containing sector and the 1-based offset inside it.
    pub fn to_sector(self) -> (SectorIndex, SectorOffset) {
        let sector = self.sector_index();
        let offset = SectorOffset {
            x: self.x.rem_euclid(SECTOR_WIDTH) + 1,
            y: self.y.rem_euclid(SECTOR_HEIGHT) + 1,
        };
        (sector, offset)
    }

    /// The sector containing this hex.
    pub fn sector_index(self) -> SectorIndex {
        SectorIndex {
            x: self.x.div_euclid(SECTOR_WIDTH),
            y: self.y.div_euclid(SECTOR_HEIGHT),
        }
    }

    /// The 1-based offset of this hex inside its sector.
    pub fn sector_offset(self) -> SectorOffset {
        self.to_sector().1
    }

    /// Index in `[0, 16)` of the subsector containing this hex.
    pub fn subsector_index(self) -> usize {
        self.sector_offset().subsector_index()
    }

    /// Whether this column sits half a hex lower than its neighbours.
    pub fn is_low_column(self) -> bool {
        is_low_column(self.x)
    }

    /// The adjacent hex across `edge`.
    pub fn neighbour(self, edge: HexEdge) -> Self {
        let (dx, dy) = edge.offset(self.is_low_column());
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// All six adjacent hexes in [`HexEdge::ALL`] order.
    pub fn neighbours(self) -> [Self; 6] {
        HexEdge::ALL.map(|edge| self.neighbour(edge))
    }

    /// Number of hex steps between two positions.
    pub fn distance(self, other: Self) -> i32 {
        let (aq, ar) = self.axial();
        let (bq, br) = other.axial();
        let dq = (aq - bq).abs();
        let dr = (ar - br).abs();
        let ds = ((aq + ar) - (bq + br)).abs();
        dq.max(dr).max(ds)
    }

    /// Axial `(q, r)` form of this offset-column coordinate.
    fn axial(self) -> (i32, i32) {
        let q = self.x;
        let r = self.y - (self.x - (self.x & 1)) / 2;
        (q, r)
    }
}

impl fmt::Display for HexPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Whether absolute column `x` sits half a hex lower than its neighbours.
pub fn is_low_column(x: i32) -> bool {
    x.rem_euclid(2) == 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hex(x: i32, y: i32) -> HexPosition {
        HexPosition::new(x, y)
    }

    #[test]
    fn origin_of_sector_zero() {
        let h = HexPosition::from_sector(SectorIndex::new(0, 0), SectorOffset::new(1, 1));
        assert_eq!(h, hex(0, 0));
        assert_eq!(SectorIndex::new(0, 0).extent(), hex(31, 39));
    }

    #[test]
    fn negative_positions_split_into_negative_sectors() {
        let (sector, offset) = hex(-1, -1).to_sector();
        assert_eq!(sector, SectorIndex::new(-1, -1));
        assert_eq!(offset, SectorOffset::new(32, 40));
        assert_eq!(hex(-32, -40).sector_index(), SectorIndex::new(-1, -1));
        assert_eq!(hex(-33, 0).sector_index(), SectorIndex::new(-2, 0));
    }

    #[test]
    fn subsector_index_corners() {
        assert_eq!(SectorOffset::new(1, 1).subsector_index(), 0);
        assert_eq!(SectorOffset::new(8, 10).subsector_index(), 0);
        assert_eq!(SectorOffset::new(9, 1).subsector_index(), 1);
        assert_eq!(SectorOffset::new(32, 1).subsector_index(), 3);
        assert_eq!(SectorOffset::new(1, 11).subsector_index(), 4);
        assert_eq!(SectorOffset::new(19, 10).subsector_index(), 2);
        assert_eq!(SectorOffset::new(32, 40).subsector_index(), 15);
    }

    #[test]
    fn offset_display_is_four_digits() {
        assert_eq!(SectorOffset::new(5, 5).to_string(), "0505");
        assert_eq!(SectorOffset::new(32, 40).to_string(), "3240");
    }

    #[test]
    fn offset_parse_rejects_out_of_sector() {
        assert_eq!("1910".parse::<SectorOffset>(), Ok(SectorOffset::new(19, 10)));
        assert!("0000".parse::<SectorOffset>().is_err());
        assert!("3301".parse::<SectorOffset>().is_err());
        assert!("0141".parse::<SectorOffset>().is_err());
        assert!("101".parse::<SectorOffset>().is_err());
        assert!("1a10".parse::<SectorOffset>().is_err());
    }

    #[test]
    fn sector_index_token_round_trip() {
        let idx = SectorIndex::new(-3, 12);
        assert_eq!(idx.to_string(), "-3:12");
        assert_eq!("-3:12".parse::<SectorIndex>(), Ok(idx));
        assert!("Core".parse::<SectorIndex>().is_err());
        assert!("1:x".parse::<SectorIndex>().is_err());
    }

    #[test]
    fn checked_from_sector_rejects_overflow() {
        let offset = SectorOffset::new(1, 1);
        assert_eq!(
            HexPosition::checked_from_sector(SectorIndex::new(-1, 2), SectorOffset::new(19, 10)),
            Some(hex(-14, 89))
        );
        assert_eq!(HexPosition::checked_from_sector(SectorIndex::new(99_999_999, 0), offset), None);
        assert_eq!(HexPosition::checked_from_sector(SectorIndex::new(0, i32::MIN), offset), None);
        let last = SectorIndex::new(i32::MAX / SECTOR_WIDTH, 0);
        assert!(HexPosition::checked_from_sector(last, offset).is_some());
    }

    #[test]
    fn column_parity() {
        assert!(!hex(0, 0).is_low_column());
        assert!(hex(1, 0).is_low_column());
        assert!(hex(-1, 0).is_low_column());
        assert!(!hex(-2, 0).is_low_column());
    }

    #[test]
    fn distance_to_neighbours_is_one() {
        for center in [hex(0, 0), hex(1, 0), hex(-1, 5), hex(-4, -7)] {
            for n in center.neighbours() {
                assert_eq!(center.distance(n), 1, "{center} -> {n}");
            }
        }
    }

    #[test]
    fn distance_along_column_and_row() {
        assert_eq!(hex(0, 0).distance(hex(0, 5)), 5);
        // Zig-zagging across a row gains half a hex per column.
        assert_eq!(hex(0, 0).distance(hex(4, 0)), 4);
        assert_eq!(hex(0, 0).distance(hex(4, 2)), 4);
        assert_eq!(hex(0, 0).distance(hex(4, 3)), 5);
    }

    proptest! {
        #[test]
        fn sector_round_trip(
            sx in -100i32..100, sy in -100i32..100,
            ox in 1i32..=SECTOR_WIDTH, oy in 1i32..=SECTOR_HEIGHT,
        ) {
            let sector = SectorIndex::new(sx, sy);
            let offset = SectorOffset::new(ox, oy);
            let hex = HexPosition::from_sector(sector, offset);
            prop_assert_eq!(hex.to_sector(), (sector, offset));
            prop_assert_eq!(hex.sector_index(), sector);
        }

        #[test]
        fn absolute_round_trip(x in -10_000i32..10_000, y in -10_000i32..10_000) {
            let hex = HexPosition::new(x, y);
            let (sector, offset) = hex.to_sector();
            prop_assert!(offset.is_valid());
            prop_assert_eq!(HexPosition::from_sector(sector, offset), hex);
        }

        #[test]
        fn distance_is_metric(
            ax in -50i32..50, ay in -50i32..50,
            bx in -50i32..50, by in -50i32..50,
            cx in -50i32..50, cy in -50i32..50,
        ) {
            let (a, b, c) = (hex(ax, ay), hex(bx, by), hex(cx, cy));
            prop_assert_eq!(a.distance(a), 0);
            prop_assert_eq!(a.distance(b), b.distance(a));
            prop_assert!(a.distance(c) <= a.distance(b) + b.distance(c));
        }
    }
}
