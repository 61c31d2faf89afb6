//! Per-milieu lookup indices.
//!
//! [`MilieuCatalog::build`] consumes one milieu's sectors in a single pass
//! and populates every index up front. After construction the catalog is
//! read-only apart from its [`MainCache`].
//!
//! Duplicate canonical sector names, sector indices and world positions are
//! not validated: the last record wins. Alternate names, abbreviations and
//! subsector names may be shared, so they map to ordered lists and
//! first-match lookups follow insertion order.

use crate::main_cache::MainCache;
use crate::record::{fold_name, Allegiance, Route, Sector, Subsector, World};
use indexmap::IndexMap;
use smallvec::SmallVec;
use starmap_core::{HexPosition, SectorIndex};
use std::collections::HashMap;
use std::sync::Arc;

/// A subsector together with its owning sector.
#[derive(Clone, Copy, Debug)]
pub struct SubsectorRef<'a> {
    sector: &'a Arc<Sector>,
    subsector: &'a Subsector,
}

impl<'a> SubsectorRef<'a> {
    /// Pair `sector` with its subsector at grid index `index`.
    pub fn new(sector: &'a Arc<Sector>, index: usize) -> Option<Self> {
        let subsector = sector.subsector(index)?;
        Some(Self { sector, subsector })
    }

    /// The owning sector.
    pub fn sector(&self) -> &'a Arc<Sector> {
        self.sector
    }

    /// The subsector itself.
    pub fn subsector(&self) -> &'a Subsector {
        self.subsector
    }

    /// Subsector name.
    pub fn name(&self) -> &'a str {
        self.subsector.name()
    }

    /// Case-folded `name/sector`, the ordering used by search.
    pub fn sort_key(&self) -> String {
        fold_name(&format!("{}/{}", self.subsector.name(), self.sector.name()))
    }

    /// Whether both refer to the same subsector of the same sector record.
    pub fn same_as(&self, other: &SubsectorRef<'_>) -> bool {
        Arc::ptr_eq(self.sector, other.sector) && self.subsector.index() == other.subsector.index()
    }
}

/// Every subsector of `sector`, in grid order.
pub fn subsectors_of(sector: &Arc<Sector>) -> impl Iterator<Item = SubsectorRef<'_>> {
    sector
        .subsectors()
        .iter()
        .map(move |subsector| SubsectorRef { sector, subsector })
}

/// Lookup indices for one milieu.
#[derive(Debug)]
pub struct MilieuCatalog {
    milieu: String,
    sectors_by_name: HashMap<String, Arc<Sector>>,
    sectors_by_alias: HashMap<String, SmallVec<[Arc<Sector>; 1]>>,
    subsectors_by_name: HashMap<String, Vec<(Arc<Sector>, usize)>>,
    sectors_by_index: IndexMap<SectorIndex, Arc<Sector>>,
    worlds: HashMap<HexPosition, Arc<World>>,
    routes: HashMap<HexPosition, SmallVec<[Arc<Route>; 2]>>,
    allegiances: IndexMap<String, Allegiance>,
    mains: MainCache,
}

impl MilieuCatalog {
    /// Build all indices for `milieu` from its sectors.
    ///
    /// O(worlds + routes + 16 × sectors).
    pub fn build(milieu: impl Into<String>, sectors: impl IntoIterator<Item = Sector>) -> Self {
        let mut catalog = Self {
            milieu: milieu.into(),
            sectors_by_name: HashMap::new(),
            sectors_by_alias: HashMap::new(),
            subsectors_by_name: HashMap::new(),
            sectors_by_index: IndexMap::new(),
            worlds: HashMap::new(),
            routes: HashMap::new(),
            allegiances: IndexMap::new(),
            mains: MainCache::new(),
        };
        let mut route_count = 0usize;

        for sector in sectors {
            let sector = Arc::new(sector);
            catalog
                .sectors_by_name
                .insert(fold_name(sector.name()), Arc::clone(&sector));
            for alias in sector.aliases() {
                catalog
                    .sectors_by_alias
                    .entry(fold_name(alias))
                    .or_default()
                    .push(Arc::clone(&sector));
            }
            for subsector in sector.subsectors() {
                catalog
                    .subsectors_by_name
                    .entry(fold_name(subsector.name()))
                    .or_default()
                    .push((Arc::clone(&sector), subsector.index()));
            }
            for world in sector.worlds() {
                catalog.worlds.insert(world.position(), Arc::clone(world));
                if let Some(allegiance) = world.allegiance() {
                    catalog
                        .allegiances
                        .entry(allegiance.code().to_string())
                        .or_insert_with(|| allegiance.clone());
                }
            }
            for route in sector.routes() {
                route_count += 1;
                catalog
                    .routes
                    .entry(route.start())
                    .or_default()
                    .push(Arc::clone(route));
                if route.end() != route.start() {
                    catalog
                        .routes
                        .entry(route.end())
                        .or_default()
                        .push(Arc::clone(route));
                }
            }
            catalog.sectors_by_index.insert(sector.index(), sector);
        }

        tracing::debug!(
            target: "starmap::catalog",
            milieu = %catalog.milieu,
            sectors = catalog.sectors_by_index.len(),
            worlds = catalog.worlds.len(),
            routes = route_count,
            allegiances = catalog.allegiances.len(),
            "milieu catalog built"
        );
        catalog
    }

    /// Milieu tag.
    pub fn milieu(&self) -> &str {
        &self.milieu
    }

    /// Sector whose canonical name matches, case-insensitively.
    pub fn sector_by_name(&self, name: &str) -> Option<&Arc<Sector>> {
        self.sectors_by_name.get(&fold_name(name))
    }

    /// Sectors with a matching alternate name or abbreviation, in
    /// insertion order.
    pub fn sectors_by_alias(&self, name: &str) -> &[Arc<Sector>] {
        self.sectors_by_alias
            .get(&fold_name(name))
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    /// Subsectors with a matching name, in insertion order.
    pub fn subsectors_by_name(&self, name: &str) -> impl Iterator<Item = SubsectorRef<'_>> {
        self.subsectors_by_name
            .get(&fold_name(name))
            .into_iter()
            .flatten()
            .filter_map(|(sector, index)| SubsectorRef::new(sector, *index))
    }

    /// Every subsector of every sector, in sector insertion order.
    pub fn subsectors(&self) -> impl Iterator<Item = SubsectorRef<'_>> {
        self.sectors().flat_map(subsectors_of)
    }

    /// Resolve a user-supplied sector name.
    ///
    /// Tries the canonical name, then the first alternate name or
    /// abbreviation, then the owner of the first subsector with that name.
    pub fn find_sector(&self, name: &str) -> Option<&Arc<Sector>> {
        self.sector_by_name(name)
            .or_else(|| self.sectors_by_alias(name).first())
            .or_else(|| self.subsectors_by_name(name).next().map(|r| r.sector()))
    }

    /// Sector at grid position `index`.
    pub fn sector_at(&self, index: SectorIndex) -> Option<&Arc<Sector>> {
        self.sectors_by_index.get(&index)
    }

    /// Whether any sector occupies grid position `index`.
    pub fn has_sector(&self, index: SectorIndex) -> bool {
        self.sectors_by_index.contains_key(&index)
    }

    /// Sector owning `subsector`.
    pub fn sector_of(&self, subsector: &Subsector) -> Option<&Arc<Sector>> {
        self.sector_at(subsector.sector())
    }

    /// All sectors in insertion order.
    pub fn sectors(&self) -> impl Iterator<Item = &Arc<Sector>> {
        self.sectors_by_index.values()
    }

    /// World at absolute position `hex`.
    pub fn world_at(&self, hex: HexPosition) -> Option<&Arc<World>> {
        self.worlds.get(&hex)
    }

    /// Routes with an endpoint at `hex`.
    pub fn routes_at(&self, hex: HexPosition) -> &[Arc<Route>] {
        self.routes
            .get(&hex)
            .map(|v| v.as_slice())
            .unwrap_or_default()
    }

    /// Allegiance with the given code.
    pub fn allegiance(&self, code: &str) -> Option<&Allegiance> {
        self.allegiances.get(code)
    }

    /// Distinct allegiances in first-seen order.
    pub fn allegiances(&self) -> impl Iterator<Item = &Allegiance> {
        self.allegiances.values()
    }

    /// Number of sectors.
    pub fn sector_count(&self) -> usize {
        self.sectors_by_index.len()
    }

    /// Number of distinct world positions.
    pub fn world_count(&self) -> usize {
        self.worlds.len()
    }

    /// Memoized mains for this milieu.
    pub fn mains(&self) -> &MainCache {
        &self.mains
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmap_core::SectorOffset;

    fn sector(name: &str, x: i32, y: i32) -> Sector {
        let subs: Vec<String> = (0..16).map(|i| format!("{name} {i}")).collect();
        Sector::new(name, SectorIndex::new(x, y), "M1105", subs).unwrap()
    }

    fn at(x: i32, y: i32, ox: i32, oy: i32) -> HexPosition {
        HexPosition::from_sector(SectorIndex::new(x, y), SectorOffset::new(ox, oy))
    }

    #[test]
    fn names_are_case_insensitive() {
        let cat = MilieuCatalog::build("M1105", [sector("Spinward Marches", -4, -1)]);
        assert!(cat.sector_by_name("spinward marches").is_some());
        assert!(cat.sector_by_name("SPINWARD MARCHES").is_some());
        assert!(cat.sector_by_name("Marches").is_none());
        assert_eq!(cat.milieu(), "M1105");
    }

    #[test]
    fn subsectors_iterate_in_sector_order() {
        let cat = MilieuCatalog::build("M1105", [sector("Core", 0, 0), sector("Fornast", 1, 0)]);
        let all: Vec<SubsectorRef<'_>> = cat.subsectors().collect();
        assert_eq!(all.len(), 32);
        assert_eq!(all[0].name(), "Core 0");
        assert_eq!(all[16].name(), "Fornast 0");
        assert_eq!(all[17].sort_key(), "fornast 1/fornast");
        assert!(all[3].same_as(&all[3]));
        assert!(!all[3].same_as(&all[4]));
    }

    #[test]
    fn alias_lists_keep_insertion_order() {
        let a = sector("Alpha", 0, 0).with_alternate_name("Shared");
        let b = sector("Beta", 1, 0).with_abbreviation("shared");
        let cat = MilieuCatalog::build("M1105", [a, b]);
        let names: Vec<&str> = cat.sectors_by_alias("SHARED").iter().map(|s| s.name()).collect();
        assert_eq!(names, ["Alpha", "Beta"]);
        assert_eq!(cat.find_sector("shared").unwrap().name(), "Alpha");
        assert!(cat.sectors_by_alias("nothing").is_empty());
    }

    #[test]
    fn find_sector_falls_back_to_subsector_owner() {
        let cat = MilieuCatalog::build("M1105", [sector("Core", 0, 0), sector("Fornast", 1, 0)]);
        assert_eq!(cat.find_sector("fornast 3").unwrap().name(), "Fornast");
        assert_eq!(cat.find_sector("Core").unwrap().name(), "Core");
        assert!(cat.find_sector("Nowhere").is_none());
        let sub = cat.subsectors_by_name("Core 5").next().unwrap();
        assert_eq!(sub.subsector().index(), 5);
        assert_eq!(sub.sector().name(), "Core");
        assert_eq!(cat.sector_of(sub.subsector()).unwrap().name(), "Core");
    }

    #[test]
    fn every_subsector_is_indexed() {
        let cat = MilieuCatalog::build("M1105", [sector("Core", 0, 0)]);
        for i in 0..16 {
            let refs: Vec<SubsectorRef<'_>> =
                cat.subsectors_by_name(&format!("core {i}")).collect();
            assert_eq!(refs.len(), 1);
            assert_eq!(refs[0].subsector().index(), i);
        }
    }

    #[test]
    fn worlds_indexed_by_position() {
        let s = sector("Core", 0, 0).with_worlds([
            World::new("Terra", at(0, 0, 5, 5)),
            World::new("Luna", at(0, 0, 5, 6)),
        ]);
        let cat = MilieuCatalog::build("M1105", [s]);
        assert_eq!(cat.world_at(at(0, 0, 5, 5)).unwrap().name(), "Terra");
        assert_eq!(cat.world_at(at(0, 0, 5, 6)).unwrap().name(), "Luna");
        assert!(cat.world_at(at(0, 0, 5, 7)).is_none());
        assert_eq!(cat.world_count(), 2);
    }

    #[test]
    fn duplicate_positions_last_write_wins() {
        let s = sector("Core", 0, 0).with_worlds([
            World::new("First", at(0, 0, 1, 1)),
            World::new("Second", at(0, 0, 1, 1)),
        ]);
        let cat = MilieuCatalog::build("M1105", [s]);
        assert_eq!(cat.world_at(at(0, 0, 1, 1)).unwrap().name(), "Second");
        assert_eq!(cat.world_count(), 1);
    }

    #[test]
    fn duplicate_canonical_names_last_write_wins() {
        let cat = MilieuCatalog::build("M1105", [sector("Core", 0, 0), sector("core", 5, 5)]);
        assert_eq!(cat.sector_by_name("CORE").unwrap().index(), SectorIndex::new(5, 5));
        assert_eq!(cat.sector_count(), 2);
    }

    #[test]
    fn routes_indexed_under_both_endpoints() {
        let a = at(0, 0, 1, 1);
        let b = at(1, 0, 1, 1);
        let s = sector("Core", 0, 0).with_routes([Route::new(a, b), Route::new(a, a)]);
        let cat = MilieuCatalog::build("M1105", [s]);
        assert_eq!(cat.routes_at(a).len(), 2);
        assert_eq!(cat.routes_at(b).len(), 1);
        assert!(cat.routes_at(b)[0].touches(a));
        assert!(cat.routes_at(at(0, 0, 2, 2)).is_empty());
    }

    #[test]
    fn allegiances_deduplicated_by_code() {
        let im = Allegiance::new("ImDd", "Third Imperium, Domain of Deneb");
        let s = sector("Core", 0, 0).with_worlds([
            World::new("A", at(0, 0, 1, 1)).with_allegiance(im.clone()),
            World::new("B", at(0, 0, 1, 2)).with_allegiance(Allegiance::new("ImDd", "Other")),
            World::new("C", at(0, 0, 1, 3)).with_allegiance(Allegiance::new("Zh", "Zhodani")),
        ]);
        let cat = MilieuCatalog::build("M1105", [s]);
        assert_eq!(cat.allegiance("ImDd"), Some(&im));
        let codes: Vec<&str> = cat.allegiances().map(Allegiance::code).collect();
        assert_eq!(codes, ["ImDd", "Zh"]);
    }
}
