//! Memoized clusters of adjacent worlds ("mains").
//!
//! A [`Main`] is computed on demand by a flood fill and then cached under
//! the hex of every member world, so a lookup from any member is O(1).
//! Computation is deterministic: two readers racing to fill the same
//! entries write identical values, so last-write-wins is harmless. The
//! map itself sits behind a [`RwLock`] so concurrent writers can never
//! corrupt it.

use crate::record::World;
use starmap_core::HexPosition;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Default minimum number of worlds that form a main.
pub const MIN_MAIN_WORLDS: usize = 5;

/// A cluster of worlds mutually reachable through hex adjacency.
#[derive(Clone, Debug)]
pub struct Main {
    worlds: Vec<Arc<World>>,
}

impl Main {
    /// Create a main from its member worlds, in discovery order.
    pub fn new(worlds: Vec<Arc<World>>) -> Self {
        Self { worlds }
    }

    /// Member worlds in discovery order.
    pub fn worlds(&self) -> &[Arc<World>] {
        &self.worlds
    }

    /// Number of member worlds.
    pub fn len(&self) -> usize {
        self.worlds.len()
    }

    /// Always `false` for a main built by a flood fill.
    pub fn is_empty(&self) -> bool {
        self.worlds.is_empty()
    }

    /// Whether a member world sits at `hex`.
    pub fn contains(&self, hex: HexPosition) -> bool {
        self.worlds.iter().any(|w| w.position() == hex)
    }
}

/// Hex → [`Main`] memo table.
///
/// Only positive results are stored; a hex with no main is recomputed on
/// every lookup.
#[derive(Debug, Default)]
pub struct MainCache {
    entries: RwLock<HashMap<HexPosition, Arc<Main>>>,
}

impl MainCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached main containing `hex`, if one has been computed.
    pub fn get(&self, hex: HexPosition) -> Option<Arc<Main>> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        entries.get(&hex).cloned()
    }

    /// Cache `main` under the hex of every member world.
    pub fn insert(&self, main: Arc<Main>) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        for world in main.worlds() {
            entries.insert(world.position(), Arc::clone(&main));
        }
        tracing::trace!(
            target: "starmap::main_cache",
            worlds = main.len(),
            cached_hexes = entries.len(),
            "main cached"
        );
    }

    /// Number of cached hexes.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing has been cached yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
