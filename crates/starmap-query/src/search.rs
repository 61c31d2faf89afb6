//! Ranked name search over sectors, subsectors and worlds.
//!
//! Queries are case-insensitive globs. Unless a query already ends in
//! `*`, it is also tried with `*` appended, so `"Reg"` finds `"Regina"`.
//! A query that does not compile as a glob matches nothing.

use crate::overlay::Overlay;
use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;
use starmap_catalog::{fold_name, Sector, SubsectorRef, World};
use std::collections::HashSet;
use std::sync::{Arc, LazyLock};

static HINTED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>.*?\S)\s*\((?P<hint>[^()]*\S[^()]*)\)$")
        .expect("hint pattern compiles")
});

/// A compiled query: the glob itself and, if needed, its `*`-suffixed form.
#[derive(Debug)]
struct NamePattern {
    exact: GlobMatcher,
    prefix: Option<GlobMatcher>,
}

impl NamePattern {
    fn new(query: &str) -> Option<Self> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let exact = compile(query)?;
        let prefix = if query.ends_with('*') {
            None
        } else {
            Some(compile(&format!("{query}*"))?)
        };
        Some(Self { exact, prefix })
    }

    fn is_match(&self, name: &str) -> bool {
        self.exact.is_match(name) || self.prefix.as_ref().is_some_and(|p| p.is_match(name))
    }
}

fn compile(pattern: &str) -> Option<GlobMatcher> {
    match GlobBuilder::new(pattern)
        .case_insensitive(true)
        .literal_separator(false)
        .build()
    {
        Ok(glob) => Some(glob.compile_matcher()),
        Err(err) => {
            tracing::debug!(target: "starmap::search", pattern, %err, "unusable search pattern");
            None
        }
    }
}

/// Sort by key, then keep at most `cap` entries (`0` keeps all).
fn rank<T>(mut items: Vec<T>, cap: usize, key: impl FnMut(&T) -> String) -> Vec<T> {
    items.sort_by_cached_key(key);
    if cap > 0 {
        items.truncate(cap);
    }
    items
}

impl<'u> Overlay<'u> {
    /// Sectors whose name or an alternate name matches `query`, sorted by
    /// name and capped at `cap` (`0` for no cap).
    pub fn search_sectors(&self, query: &str, cap: usize) -> Vec<&'u Arc<Sector>> {
        let Some(pattern) = NamePattern::new(query) else {
            return Vec::new();
        };
        let hits: Vec<&'u Arc<Sector>> = self
            .sectors()
            .filter(|s| {
                pattern.is_match(s.name())
                    || s.alternate_names().iter().any(|alt| pattern.is_match(alt))
            })
            .collect();
        rank(hits, cap, |s| fold_name(s.name()))
    }

    /// Named subsectors matching `query`, sorted by `name/sector` and
    /// capped at `cap` (`0` for no cap).
    pub fn search_subsectors(&self, query: &str, cap: usize) -> Vec<SubsectorRef<'u>> {
        let Some(pattern) = NamePattern::new(query) else {
            return Vec::new();
        };
        let hits: Vec<SubsectorRef<'u>> = self
            .subsectors()
            .filter(|r| !r.name().is_empty() && pattern.is_match(r.name()))
            .collect();
        rank(hits, cap, SubsectorRef::sort_key)
    }

    /// Worlds matching `query`, most specific first.
    ///
    /// 1. A query naming a location with a world on it returns just that
    ///    world.
    /// 2. `"<name> (<hint>)"` restricts matching to worlds in the sectors
    ///    or subsectors called `<hint>`. An unknown hint is ignored and the
    ///    whole query is matched instead.
    /// 3. Worlds whose own name matches, sorted by `name/subsector/sector`.
    /// 4. Then worlds of matching subsectors, sorted the same way.
    /// 5. Then worlds of matching sectors.
    ///
    /// Later tiers only append worlds not already listed. At most `cap`
    /// worlds are returned (`0` for no cap).
    pub fn search_worlds(&self, query: &str, cap: usize) -> Vec<&'u Arc<World>> {
        let query = query.trim();
        if let Some(world) = self
            .parse_location(query)
            .ok()
            .and_then(|hex| self.world_at(hex))
        {
            return vec![world];
        }

        let (text, hits) = self.match_world_names(query);
        let mut ranked = Ranked::new(cap);
        ranked.extend(hits);
        if ranked.is_full() {
            return ranked.into_inner();
        }

        let from_subsectors = self
            .search_subsectors(text, 0)
            .into_iter()
            .flat_map(|r| r.sector().worlds_in_subsector(r.subsector().index()))
            .filter(|w| self.shows(w))
            .collect();
        ranked.extend(from_subsectors);
        if ranked.is_full() {
            return ranked.into_inner();
        }

        let from_sectors = self
            .search_sectors(text, 0)
            .into_iter()
            .flat_map(|s| s.worlds())
            .filter(|w| self.shows(w))
            .collect();
        ranked.extend(from_sectors);
        ranked.into_inner()
    }

    /// Resolve any `(<hint>)` suffix and match world names. Returns the
    /// text later tiers should match along with the name hits.
    fn match_world_names<'q>(&self, query: &'q str) -> (&'q str, Vec<&'u Arc<World>>) {
        if let Some(caps) = HINTED_RE.captures(query) {
            let (Some(name), Some(hint)) = (caps.name("name"), caps.name("hint")) else {
                return (query, self.worlds_matching(query, self.all_worlds()));
            };
            let (name, hint) = (name.as_str(), hint.as_str().trim());
            let sectors = self.sectors_named(hint);
            let subsectors = self.subsectors_named(hint);
            if !sectors.is_empty() || !subsectors.is_empty() {
                let scoped = sectors
                    .into_iter()
                    .flat_map(|s| s.worlds())
                    .chain(
                        subsectors
                            .into_iter()
                            .flat_map(|r| r.sector().worlds_in_subsector(r.subsector().index())),
                    );
                return (name, self.worlds_matching(name, scoped));
            }
        }
        (query, self.worlds_matching(query, self.all_worlds()))
    }

    fn worlds_matching(
        &self,
        query: &str,
        candidates: impl Iterator<Item = &'u Arc<World>>,
    ) -> Vec<&'u Arc<World>> {
        let Some(pattern) = NamePattern::new(query) else {
            return Vec::new();
        };
        let mut seen = HashSet::new();
        candidates
            .filter(|w| self.shows(w) && pattern.is_match(w.name()))
            .filter(|w| seen.insert(Arc::as_ptr(*w)))
            .collect()
    }

    fn all_worlds(&self) -> impl Iterator<Item = &'u Arc<World>> + 'u {
        self.sectors().flat_map(|s| s.worlds())
    }

    /// Whether `world` is the one this view resolves at its position.
    fn shows(&self, world: &Arc<World>) -> bool {
        self.world_at(world.position())
            .is_some_and(|w| Arc::ptr_eq(w, world))
    }
}

/// Accumulates tiers of world results, each tier sorted on its own.
struct Ranked<'u> {
    cap: usize,
    out: Vec<&'u Arc<World>>,
    seen: HashSet<*const World>,
}

impl<'u> Ranked<'u> {
    fn new(cap: usize) -> Self {
        Self {
            cap,
            out: Vec::new(),
            seen: HashSet::new(),
        }
    }

    fn is_full(&self) -> bool {
        self.cap > 0 && self.out.len() >= self.cap
    }

    /// Append one tier, skipping worlds already present.
    fn extend(&mut self, tier: Vec<&'u Arc<World>>) {
        let fresh: Vec<_> = tier
            .into_iter()
            .filter(|w| self.seen.insert(Arc::as_ptr(*w)))
            .collect();
        for world in rank(fresh, 0, |w| w.sort_key()) {
            if self.is_full() {
                break;
            }
            self.out.push(world);
        }
    }

    fn into_inner(self) -> Vec<&'u Arc<World>> {
        self.out
    }
}
