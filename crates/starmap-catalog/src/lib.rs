//! Records and per-milieu lookup indices for starmap.
//!
//! Sector, subsector, world and route records arrive fully parsed. This
//! crate indexes them once per milieu ([`MilieuCatalog`]) and groups the
//! catalogs into a [`Universe`] with an optional placeholder milieu.
//!
//! # Indices
//!
//! Each catalog answers, in O(1) expected time: sector by canonical name,
//! sectors by alternate name or abbreviation, subsectors by name (with the
//! owning sector), sector by grid position, world by hex, routes by hex,
//! and allegiance by code. Mains (clusters of adjacent worlds) are
//! memoized lazily in a [`MainCache`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod config;
pub mod error;
pub mod main_cache;
pub mod record;
pub mod universe;

pub use catalog::{subsectors_of, MilieuCatalog, SubsectorRef};
pub use config::{ConfigError, UniverseConfig};
pub use error::CatalogError;
pub use main_cache::{Main, MainCache, MIN_MAIN_WORLDS};
pub use record::{fold_name, Allegiance, Route, Sector, Subsector, World};
pub use universe::{Universe, UniverseBuilder};
