//! The set of milieu catalogs, built once at startup.
//!
//! A [`Universe`] is constructed explicitly and passed to whoever needs it;
//! there is no process-wide instance. It is `Send + Sync` and read-only
//! after [`UniverseBuilder::build`] apart from each catalog's main cache.

use crate::catalog::MilieuCatalog;
use crate::config::{ConfigError, UniverseConfig};
use crate::record::Sector;
use indexmap::IndexMap;

/// Immutable mapping from milieu tag to [`MilieuCatalog`].
#[derive(Debug)]
pub struct Universe {
    catalogs: IndexMap<String, MilieuCatalog>,
    config: UniverseConfig,
}

impl Universe {
    /// Start collecting sectors for a new universe.
    pub fn builder() -> UniverseBuilder {
        UniverseBuilder::default()
    }

    /// Catalog for `milieu`, or `None` if it was never loaded.
    pub fn catalog(&self, milieu: &str) -> Option<&MilieuCatalog> {
        self.catalogs.get(milieu)
    }

    /// Tag of the placeholder milieu, if configured.
    pub fn placeholder_milieu(&self) -> Option<&str> {
        self.config.placeholder_milieu.as_deref()
    }

    /// Catalog of the placeholder milieu, if configured.
    pub fn placeholder(&self) -> Option<&MilieuCatalog> {
        self.placeholder_milieu().and_then(|m| self.catalog(m))
    }

    /// Loaded milieu tags in the order they were first seen.
    pub fn milieus(&self) -> impl Iterator<Item = &str> {
        self.catalogs.keys().map(String::as_str)
    }

    /// The configuration this universe was built with.
    pub fn config(&self) -> &UniverseConfig {
        &self.config
    }
}

/// Collects sectors for all milieus, then builds every catalog at once.
///
/// Sectors are grouped by their own [`Sector::milieu`] tag.
#[derive(Debug, Default)]
pub struct UniverseBuilder {
    config: UniverseConfig,
    sectors: IndexMap<String, Vec<Sector>>,
}

impl UniverseBuilder {
    /// Replace the whole configuration.
    pub fn config(mut self, config: UniverseConfig) -> Self {
        self.config = config;
        self
    }

    /// Designate the placeholder milieu.
    pub fn placeholder(mut self, milieu: impl Into<String>) -> Self {
        self.config.placeholder_milieu = Some(milieu.into());
        self
    }

    /// Set the minimum main size.
    pub fn min_main_worlds(mut self, n: usize) -> Self {
        self.config.min_main_worlds = n;
        self
    }

    /// Add one sector.
    pub fn sector(mut self, sector: Sector) -> Self {
        self.sectors
            .entry(sector.milieu().to_string())
            .or_default()
            .push(sector);
        self
    }

    /// Add many sectors.
    pub fn sectors(self, sectors: impl IntoIterator<Item = Sector>) -> Self {
        sectors.into_iter().fold(self, Self::sector)
    }

    /// Validate the configuration and build every catalog.
    pub fn build(self) -> Result<Universe, ConfigError> {
        self.config.validate()?;
        if let Some(placeholder) = &self.config.placeholder_milieu {
            if !self.sectors.contains_key(placeholder) {
                return Err(ConfigError::UnknownPlaceholder {
                    milieu: placeholder.clone(),
                });
            }
        }
        let catalogs: IndexMap<String, MilieuCatalog> = self
            .sectors
            .into_iter()
            .map(|(milieu, sectors)| {
                let catalog = MilieuCatalog::build(milieu.clone(), sectors);
                (milieu, catalog)
            })
            .collect();
        tracing::debug!(
            target: "starmap::universe",
            milieus = catalogs.len(),
            placeholder = ?self.config.placeholder_milieu,
            "universe built"
        );
        Ok(Universe {
            catalogs,
            config: self.config,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmap_core::SectorIndex;

    fn sector(name: &str, milieu: &str, x: i32) -> Sector {
        let subs: Vec<String> = (0..16).map(|i| format!("{name} {i}")).collect();
        Sector::new(name, SectorIndex::new(x, 0), milieu, subs).unwrap()
    }

    #[test]
    fn sectors_grouped_by_milieu() {
        let u = Universe::builder()
            .sector(sector("Core", "M1105", 0))
            .sector(sector("Core", "M0", 0))
            .sector(sector("Fornast", "M1105", 1))
            .build()
            .unwrap();
        let milieus: Vec<&str> = u.milieus().collect();
        assert_eq!(milieus, ["M1105", "M0"]);
        assert_eq!(u.catalog("M1105").unwrap().sector_count(), 2);
        assert_eq!(u.catalog("M0").unwrap().sector_count(), 1);
        assert!(u.catalog("M1900").is_none());
        assert!(u.placeholder().is_none());
    }

    #[test]
    fn placeholder_must_be_loaded() {
        let err = Universe::builder()
            .sector(sector("Core", "M1105", 0))
            .placeholder("M0")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownPlaceholder {
                milieu: "M0".into()
            }
        );
    }

    #[test]
    fn placeholder_resolves_to_catalog() {
        let u = Universe::builder()
            .sectors([sector("Core", "M1105", 0), sector("Core", "M0", 0)])
            .placeholder("M0")
            .build()
            .unwrap();
        assert_eq!(u.placeholder_milieu(), Some("M0"));
        assert_eq!(u.placeholder().unwrap().milieu(), "M0");
    }

    #[test]
    fn invalid_config_rejected_before_building() {
        let err = Universe::builder()
            .sector(sector("Core", "M1105", 0))
            .min_main_worlds(0)
            .build()
            .unwrap_err();
        assert_eq!(err, ConfigError::MainSizeTooSmall { configured: 0 });
    }

    #[test]
    fn universe_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Universe>();
    }
}
