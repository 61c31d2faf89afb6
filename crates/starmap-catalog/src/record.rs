//! Sector, subsector, world, route and allegiance records.
//!
//! Records are parsed and validated upstream and handed over fully formed.
//! They are immutable once built; catalogs share them through [`Arc`].

use crate::error::CatalogError;
use starmap_core::{
    HexPosition, SectorIndex, SectorOffset, HORZ_SUBSECTORS_PER_SECTOR, SUBSECTORS_PER_SECTOR,
    SUBSECTOR_HEIGHT, SUBSECTOR_WIDTH,
};
use std::sync::Arc;

/// Political allegiance of a world, deduplicated per milieu by code.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Allegiance {
    code: String,
    name: String,
}

impl Allegiance {
    /// Create an allegiance.
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }

    /// Short unique code, e.g. `"ImDd"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A world occupying one hex.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct World {
    name: String,
    position: HexPosition,
    sector_name: String,
    subsector_name: String,
    allegiance: Option<Allegiance>,
}

impl World {
    /// Create a world at `position` with no sector or subsector names.
    pub fn new(name: impl Into<String>, position: HexPosition) -> Self {
        Self {
            name: name.into(),
            position,
            sector_name: String::new(),
            subsector_name: String::new(),
            allegiance: None,
        }
    }

    /// Set the owning sector and subsector names.
    pub fn with_location(
        mut self,
        sector_name: impl Into<String>,
        subsector_name: impl Into<String>,
    ) -> Self {
        self.sector_name = sector_name.into();
        self.subsector_name = subsector_name.into();
        self
    }

    /// Set the allegiance.
    pub fn with_allegiance(mut self, allegiance: Allegiance) -> Self {
        self.allegiance = Some(allegiance);
        self
    }

    /// World name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Absolute position.
    pub fn position(&self) -> HexPosition {
        self.position
    }

    /// Name of the owning sector.
    pub fn sector_name(&self) -> &str {
        &self.sector_name
    }

    /// Name of the owning subsector. May be empty.
    pub fn subsector_name(&self) -> &str {
        &self.subsector_name
    }

    /// Allegiance, if any.
    pub fn allegiance(&self) -> Option<&Allegiance> {
        self.allegiance.as_ref()
    }

    /// Name qualified by subsector, e.g. `"Regina (Regina)"`.
    pub fn display_name(&self) -> String {
        if self.subsector_name.is_empty() {
            self.name.clone()
        } else {
            format!("{} ({})", self.name, self.subsector_name)
        }
    }

    /// Case-folded `name/subsector/sector`, the ordering used by search.
    pub fn sort_key(&self) -> String {
        fold_name(&format!(
            "{}/{}/{}",
            self.name, self.subsector_name, self.sector_name
        ))
    }
}

/// A route between two hexes, possibly in different or unknown sectors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Route {
    start: HexPosition,
    end: HexPosition,
}

impl Route {
    /// Create a route.
    pub fn new(start: HexPosition, end: HexPosition) -> Self {
        Self { start, end }
    }

    /// First endpoint.
    pub fn start(&self) -> HexPosition {
        self.start
    }

    /// Second endpoint.
    pub fn end(&self) -> HexPosition {
        self.end
    }

    /// Whether either endpoint is `hex`.
    pub fn touches(&self, hex: HexPosition) -> bool {
        self.start == hex || self.end == hex
    }
}

/// One of the 16 fixed subsectors of a sector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Subsector {
    name: String,
    sector: SectorIndex,
    index: usize,
}

impl Subsector {
    /// Subsector name. May be empty for unnamed subsectors.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the owning sector.
    pub fn sector(&self) -> SectorIndex {
        self.sector
    }

    /// Position in the 4×4 grid, row-major, in `[0, 16)`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Absolute position of the subsector's top-left hex.
    pub fn origin(&self) -> HexPosition {
        let col = self.index as i32 % HORZ_SUBSECTORS_PER_SECTOR;
        let row = self.index as i32 / HORZ_SUBSECTORS_PER_SECTOR;
        HexPosition::from_sector(
            self.sector,
            SectorOffset::new(col * SUBSECTOR_WIDTH + 1, row * SUBSECTOR_HEIGHT + 1),
        )
    }

    /// Absolute position of the subsector's bottom-right hex.
    pub fn extent(&self) -> HexPosition {
        let origin = self.origin();
        HexPosition::new(
            origin.x + SUBSECTOR_WIDTH - 1,
            origin.y + SUBSECTOR_HEIGHT - 1,
        )
    }

    /// Whether `hex` lies inside this subsector.
    pub fn contains(&self, hex: HexPosition) -> bool {
        hex.sector_index() == self.sector && hex.subsector_index() == self.index
    }
}

/// A 32×40 block of hexes with its subsectors, worlds and routes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sector {
    name: String,
    alternate_names: Vec<String>,
    abbreviation: Option<String>,
    index: SectorIndex,
    milieu: String,
    subsectors: [Subsector; SUBSECTORS_PER_SECTOR],
    worlds: Vec<Arc<World>>,
    routes: Vec<Arc<Route>>,
}

impl Sector {
    /// Create a sector with no worlds or routes.
    ///
    /// `subsector_names` is in row-major 4×4 grid order and must hold
    /// exactly 16 names; otherwise returns
    /// [`CatalogError::MalformedSectorGeometry`].
    pub fn new<I, S>(
        name: impl Into<String>,
        index: SectorIndex,
        milieu: impl Into<String>,
        subsector_names: I,
    ) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let subsectors: Vec<Subsector> = subsector_names
            .into_iter()
            .enumerate()
            .map(|(i, n)| Subsector {
                name: n.into(),
                sector: index,
                index: i,
            })
            .collect();
        let subsectors = <[Subsector; SUBSECTORS_PER_SECTOR]>::try_from(subsectors).map_err(
            |given| CatalogError::MalformedSectorGeometry {
                sector: name.clone(),
                subsectors: given.len(),
            },
        )?;
        Ok(Self {
            name,
            alternate_names: Vec::new(),
            abbreviation: None,
            index,
            milieu: milieu.into(),
            subsectors,
            worlds: Vec::new(),
            routes: Vec::new(),
        })
    }

    /// Add an alternate name.
    pub fn with_alternate_name(mut self, name: impl Into<String>) -> Self {
        self.alternate_names.push(name.into());
        self
    }

    /// Set the abbreviation.
    pub fn with_abbreviation(mut self, abbreviation: impl Into<String>) -> Self {
        self.abbreviation = Some(abbreviation.into());
        self
    }

    /// Append worlds.
    pub fn with_worlds(mut self, worlds: impl IntoIterator<Item = World>) -> Self {
        self.worlds.extend(worlds.into_iter().map(Arc::new));
        self
    }

    /// Append routes.
    pub fn with_routes(mut self, routes: impl IntoIterator<Item = Route>) -> Self {
        self.routes.extend(routes.into_iter().map(Arc::new));
        self
    }

    /// Canonical name, case preserved.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Alternate names in declaration order.
    pub fn alternate_names(&self) -> &[String] {
        &self.alternate_names
    }

    /// Abbreviation, if any.
    pub fn abbreviation(&self) -> Option<&str> {
        self.abbreviation.as_deref()
    }

    /// Alternate names followed by the abbreviation.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.alternate_names
            .iter()
            .map(String::as_str)
            .chain(self.abbreviation.as_deref())
    }

    /// Position in the sector grid.
    pub fn index(&self) -> SectorIndex {
        self.index
    }

    /// Milieu tag this sector belongs to.
    pub fn milieu(&self) -> &str {
        &self.milieu
    }

    /// All 16 subsectors in row-major grid order.
    pub fn subsectors(&self) -> &[Subsector; SUBSECTORS_PER_SECTOR] {
        &self.subsectors
    }

    /// Subsector at grid index `index`, if in `[0, 16)`.
    pub fn subsector(&self, index: usize) -> Option<&Subsector> {
        self.subsectors.get(index)
    }

    /// Subsector containing `hex`, if `hex` is in this sector.
    pub fn subsector_at(&self, hex: HexPosition) -> Option<&Subsector> {
        if !self.contains(hex) {
            return None;
        }
        self.subsector(hex.subsector_index())
    }

    /// Whether `hex` lies inside this sector.
    pub fn contains(&self, hex: HexPosition) -> bool {
        hex.sector_index() == self.index
    }

    /// Worlds in declaration order.
    pub fn worlds(&self) -> &[Arc<World>] {
        &self.worlds
    }

    /// Worlds positioned inside subsector `index`.
    pub fn worlds_in_subsector(&self, index: usize) -> impl Iterator<Item = &Arc<World>> {
        let sector = self.index;
        self.worlds.iter().filter(move |w| {
            let pos = w.position();
            pos.sector_index() == sector && pos.subsector_index() == index
        })
    }

    /// Routes in declaration order.
    pub fn routes(&self) -> &[Arc<Route>] {
        &self.routes
    }
}

/// Case-fold a name for lookup keys and sort keys.
pub fn fold_name(name: &str) -> String {
    name.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(prefix: &str, n: usize) -> Vec<String> {
        (0..n).map(|i| format!("{prefix} {i}")).collect()
    }

    #[test]
    fn sector_requires_sixteen_subsectors() {
        let err = Sector::new("Core", SectorIndex::new(0, 0), "M1105", names("S", 15)).unwrap_err();
        assert_eq!(
            err,
            CatalogError::MalformedSectorGeometry {
                sector: "Core".into(),
                subsectors: 15
            }
        );
        assert!(Sector::new("Core", SectorIndex::new(0, 0), "M1105", names("S", 17)).is_err());
        let ok = Sector::new("Core", SectorIndex::new(0, 0), "M1105", names("S", 16)).unwrap();
        assert_eq!(ok.subsectors().len(), 16);
        assert_eq!(ok.subsector(15).unwrap().name(), "S 15");
    }

    #[test]
    fn subsector_bounds() {
        let s = Sector::new("Core", SectorIndex::new(1, -1), "M1105", names("S", 16)).unwrap();
        let first = s.subsector(0).unwrap();
        assert_eq!(first.origin(), SectorIndex::new(1, -1).origin());
        let last = s.subsector(15).unwrap();
        assert_eq!(last.extent(), SectorIndex::new(1, -1).extent());
        let c = s.subsector(2).unwrap();
        let hex = HexPosition::from_sector(s.index(), SectorOffset::new(19, 10));
        assert!(c.contains(hex));
        assert_eq!(s.subsector_at(hex), Some(c));
        assert_eq!(c.origin().sector_offset(), SectorOffset::new(17, 1));
        assert_eq!(c.extent().sector_offset(), SectorOffset::new(24, 10));
    }

    #[test]
    fn worlds_in_subsector_filters_by_position() {
        let idx = SectorIndex::new(0, 0);
        let s = Sector::new("Core", idx, "M1105", names("S", 16))
            .unwrap()
            .with_worlds([
                World::new("A", HexPosition::from_sector(idx, SectorOffset::new(1, 1))),
                World::new("B", HexPosition::from_sector(idx, SectorOffset::new(9, 1))),
                World::new("C", HexPosition::from_sector(idx, SectorOffset::new(8, 10))),
            ]);
        let in_a: Vec<&str> = s.worlds_in_subsector(0).map(|w| w.name()).collect();
        assert_eq!(in_a, ["A", "C"]);
    }

    #[test]
    fn aliases_include_abbreviation_last() {
        let s = Sector::new("Spinward Marches", SectorIndex::new(-4, -1), "M1105", names("S", 16))
            .unwrap()
            .with_alternate_name("Marches")
            .with_abbreviation("Spin");
        let aliases: Vec<&str> = s.aliases().collect();
        assert_eq!(aliases, ["Marches", "Spin"]);
    }

    #[test]
    fn world_display_and_sort_key() {
        let w = World::new("Regina", HexPosition::new(0, 0))
            .with_location("Spinward Marches", "Regina");
        assert_eq!(w.display_name(), "Regina (Regina)");
        assert_eq!(w.sort_key(), "regina/regina/spinward marches");
        let bare = World::new("Nowhere", HexPosition::new(0, 0));
        assert_eq!(bare.display_name(), "Nowhere");
    }
}
