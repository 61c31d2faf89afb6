//! Location strings: parsing user input and formatting hexes for display.
//!
//! Accepted grammars, first match wins:
//!
//! 1. Sector-hex: `"<sector> <XXYY>"` with an optional trailing
//!    `"(<subsector>)"` that is parsed and ignored. The sector may be a
//!    canonical name, an alternate name or abbreviation, a subsector name
//!    (resolving to its owner), or the synthetic `"x:y"` token produced by
//!    [`Overlay::format_location`] for unnamed sectors. An unresolvable
//!    name falls through to the numeric grammars.
//! 2. Absolute pair: `"(x, y)"`, `"x, y"` or `"x y"`.
//! 3. Relative quad: `"sx, sy, ox, oy"` with 0-based offsets, rejected
//!    unless `0 <= ox < 32` and `0 <= oy < 40`.

use crate::overlay::Overlay;
use regex::Regex;
use starmap_core::{
    HexPosition, LocationError, SectorIndex, SectorOffset, SECTOR_HEIGHT, SECTOR_WIDTH,
};
use std::sync::LazyLock;

static SECTOR_HEX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<sector>.+?)\s+(?P<hex>\d{4})(?:\s*\((?P<subsector>[^()]*)\))?$")
        .expect("sector-hex pattern compiles")
});

static ABSOLUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\(?\s*(?P<x>[-+]?\d+)(?:\s*,\s*|\s+)(?P<y>[-+]?\d+)\s*\)?$")
        .expect("absolute pair pattern compiles")
});

static RELATIVE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^\(?\s*(?P<sx>[-+]?\d+)(?:\s*,\s*|\s+)(?P<sy>[-+]?\d+)(?:\s*,\s*|\s+)(?P<ox>[-+]?\d+)(?:\s*,\s*|\s+)(?P<oy>[-+]?\d+)\s*\)?$",
    )
    .expect("relative quad pattern compiles")
});

impl<'u> Overlay<'u> {
    /// Parse a location string into an absolute hex.
    ///
    /// Returns [`LocationError::InvalidLocationString`] when no grammar
    /// matches, including for an empty or all-whitespace string.
    pub fn parse_location(&self, text: &str) -> Result<HexPosition, LocationError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(LocationError::invalid(text));
        }
        self.parse_sector_hex(text)
            .or_else(|| parse_absolute(text))
            .or_else(|| parse_relative(text))
            .ok_or_else(|| LocationError::invalid(text))
    }

    fn parse_sector_hex(&self, text: &str) -> Option<HexPosition> {
        let caps = SECTOR_HEX_RE.captures(text)?;
        let offset: SectorOffset = caps["hex"].parse().ok()?;
        let name = caps["sector"].trim();
        let index = match self.find_sector(name) {
            Some(sector) => sector.index(),
            None => name.parse::<SectorIndex>().ok()?,
        };
        HexPosition::checked_from_sector(index, offset)
    }

    /// Format `hex` as `"<sector> <XXYY>"`.
    ///
    /// Unknown sectors use the synthetic `"x:y"` token, which
    /// [`parse_location`](Self::parse_location) accepts back.
    pub fn format_location(&self, hex: HexPosition) -> String {
        let (index, offset) = hex.to_sector();
        match self.sector_at(index) {
            Some(sector) => format!("{} {offset}", sector.name()),
            None => format!("{index} {offset}"),
        }
    }

    /// Best human-readable name for `hex`.
    ///
    /// The world's subsector-qualified name if a world is there; otherwise
    /// the sector-hex string with the subsector in parentheses; otherwise
    /// the raw `"(x, y)"` coordinates.
    pub fn canonical_hex_name(&self, hex: HexPosition) -> String {
        if let Some(world) = self.world_at(hex) {
            return world.display_name();
        }
        let Some(sector) = self.sector_at(hex.sector_index()) else {
            return hex.to_string();
        };
        let location = format!("{} {}", sector.name(), hex.sector_offset());
        match sector.subsector_at(hex) {
            Some(sub) if !sub.name().is_empty() => format!("{location} ({})", sub.name()),
            _ => location,
        }
    }
}

fn parse_absolute(text: &str) -> Option<HexPosition> {
    let caps = ABSOLUTE_RE.captures(text)?;
    let x = caps["x"].parse().ok()?;
    let y = caps["y"].parse().ok()?;
    Some(HexPosition::new(x, y))
}

fn parse_relative(text: &str) -> Option<HexPosition> {
    let caps = RELATIVE_RE.captures(text)?;
    let sx = caps["sx"].parse().ok()?;
    let sy = caps["sy"].parse().ok()?;
    let ox: i32 = caps["ox"].parse().ok()?;
    let oy: i32 = caps["oy"].parse().ok()?;
    if !(0..SECTOR_WIDTH).contains(&ox) || !(0..SECTOR_HEIGHT).contains(&oy) {
        return None;
    }
    HexPosition::checked_from_sector(
        SectorIndex::new(sx, sy),
        SectorOffset::new(ox + 1, oy + 1),
    )
}
