//! Current-then-placeholder resolution.
//!
//! An [`Overlay`] pairs the catalog of the queried milieu with the
//! placeholder catalog. The placeholder answers only for sectors the
//! current milieu does not define at all: if the current milieu has a
//! sector at a grid position, the placeholder is never consulted for any
//! hex in it, even one with no world. Resolution is one hop; placeholder
//! catalogs are never themselves overlaid.
//!
//! Every query in this crate is a method on [`Overlay`], so all of them
//! apply the same per-sector rule.

use starmap_catalog::{
    subsectors_of, Allegiance, MilieuCatalog, Route, Sector, SubsectorRef, Universe, World,
};
use starmap_core::{HexPosition, SectorIndex};
use std::sync::Arc;

/// A read-only view of one milieu with optional placeholder fallback.
///
/// Cheap to copy. An overlay for a milieu that was never loaded answers
/// every lookup with "not found".
#[derive(Clone, Copy, Debug)]
pub struct Overlay<'u> {
    current: Option<&'u MilieuCatalog>,
    fallback: Option<&'u MilieuCatalog>,
    include_placeholders: bool,
    min_main_worlds: usize,
}

impl<'u> Overlay<'u> {
    /// View `milieu` in `universe`.
    ///
    /// When `include_placeholders` is set and a placeholder milieu distinct
    /// from `milieu` is configured, it fills sectors `milieu` lacks.
    pub fn new(universe: &'u Universe, milieu: &str, include_placeholders: bool) -> Self {
        let current = universe.catalog(milieu);
        if current.is_none() {
            tracing::trace!(target: "starmap::overlay", milieu, "unknown milieu");
        }
        let fallback = current
            .and(universe.placeholder())
            .filter(|p| p.milieu() != milieu);
        Self {
            current,
            fallback,
            include_placeholders,
            min_main_worlds: universe.config().min_main_worlds,
        }
    }

    /// The same view with placeholder fallback switched on or off.
    pub fn with_placeholders(self, include_placeholders: bool) -> Self {
        Self {
            include_placeholders,
            ..self
        }
    }

    /// Catalog of the queried milieu.
    pub fn current(&self) -> Option<&'u MilieuCatalog> {
        self.current
    }

    /// Placeholder catalog, if fallback is active for this view.
    pub fn placeholder(&self) -> Option<&'u MilieuCatalog> {
        if self.include_placeholders {
            self.fallback
        } else {
            None
        }
    }

    /// Whether placeholder fallback is active.
    pub fn includes_placeholders(&self) -> bool {
        self.include_placeholders
    }

    /// Smallest cluster that counts as a main.
    pub fn min_main_worlds(&self) -> usize {
        self.min_main_worlds
    }

    /// Whether the current milieu defines sector `index`.
    fn covered(&self, index: SectorIndex) -> bool {
        self.current.is_some_and(|c| c.has_sector(index))
    }

    /// The catalog that answers for hexes in sector `index`.
    pub fn catalog_for(&self, index: SectorIndex) -> Option<&'u MilieuCatalog> {
        let current = self.current?;
        if current.has_sector(index) {
            return Some(current);
        }
        self.placeholder().filter(|p| p.has_sector(index))
    }

    /// Sector at grid position `index`.
    pub fn sector_at(&self, index: SectorIndex) -> Option<&'u Arc<Sector>> {
        self.catalog_for(index)?.sector_at(index)
    }

    /// World at `hex`.
    pub fn world_at(&self, hex: HexPosition) -> Option<&'u Arc<World>> {
        self.catalog_for(hex.sector_index())?.world_at(hex)
    }

    /// Routes with an endpoint at `hex`.
    ///
    /// Routes may end in sectors no catalog defines; those are answered
    /// from the current milieu.
    pub fn routes_at(&self, hex: HexPosition) -> &'u [Arc<Route>] {
        match self.catalog_for(hex.sector_index()).or(self.current) {
            Some(catalog) => catalog.routes_at(hex),
            None => &[],
        }
    }

    /// Allegiance by code, current milieu first.
    pub fn allegiance(&self, code: &str) -> Option<&'u Allegiance> {
        let current = self.current?;
        current
            .allegiance(code)
            .or_else(|| self.placeholder()?.allegiance(code))
    }

    /// Resolve a user-supplied sector name.
    ///
    /// Canonical name, then alternate name or abbreviation, then owning
    /// sector of a same-named subsector. The placeholder is searched only
    /// when the current milieu has no match, and only for sectors the
    /// current milieu does not cover.
    pub fn find_sector(&self, name: &str) -> Option<&'u Arc<Sector>> {
        let current = self.current?;
        if let Some(sector) = current.find_sector(name) {
            return Some(sector);
        }
        let found = self
            .placeholder()?
            .find_sector(name)
            .filter(|s| !current.has_sector(s.index()));
        if found.is_some() {
            tracing::trace!(
                target: "starmap::overlay",
                name,
                "sector name resolved from placeholder"
            );
        }
        found
    }

    /// Sectors whose canonical name or alias equals `name`.
    ///
    /// Canonical matches come first, then aliases, current milieu before
    /// placeholder.
    pub fn sectors_named(&self, name: &str) -> Vec<&'u Arc<Sector>> {
        let mut out: Vec<&'u Arc<Sector>> = Vec::new();
        for catalog in self.catalogs() {
            let hits = catalog
                .sector_by_name(name)
                .into_iter()
                .chain(catalog.sectors_by_alias(name));
            for sector in hits {
                if self.visible(catalog, sector) && !out.iter().any(|s| Arc::ptr_eq(s, sector)) {
                    out.push(sector);
                }
            }
        }
        out
    }

    /// Subsectors whose name equals `name`, current milieu first.
    pub fn subsectors_named(&self, name: &str) -> Vec<SubsectorRef<'u>> {
        self.catalogs()
            .flat_map(|catalog| {
                catalog
                    .subsectors_by_name(name)
                    .filter(move |r| self.visible(catalog, r.sector()))
            })
            .collect()
    }

    /// Every visible sector: the current milieu's, then placeholder
    /// sectors at positions the current milieu leaves empty.
    pub fn sectors(&self) -> impl Iterator<Item = &'u Arc<Sector>> + 'u {
        let overlay = *self;
        self.current
            .into_iter()
            .flat_map(MilieuCatalog::sectors)
            .chain(
                self.placeholder()
                    .into_iter()
                    .flat_map(MilieuCatalog::sectors)
                    .filter(move |s| !overlay.covered(s.index())),
            )
    }

    /// Every subsector of every visible sector.
    pub fn subsectors(&self) -> impl Iterator<Item = SubsectorRef<'u>> + 'u {
        self.sectors().flat_map(subsectors_of)
    }

    /// Current catalog then placeholder catalog, when present.
    fn catalogs(&self) -> impl Iterator<Item = &'u MilieuCatalog> {
        self.current.into_iter().chain(self.placeholder())
    }

    /// Whether `sector`, found in `catalog`, is visible through this view.
    fn visible(&self, catalog: &MilieuCatalog, sector: &Sector) -> bool {
        match self.current {
            Some(current) if std::ptr::eq(current, catalog) => true,
            _ => !self.covered(sector.index()),
        }
    }
}
