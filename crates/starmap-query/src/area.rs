//! Spatial queries: rectangles, hex radii, flood fills and mains.
//!
//! Every query resolves positions through the [`Overlay`], so the
//! per-sector placeholder rule applies to each hex visited. Results are
//! lazy iterators that may be dropped at any point.

use crate::overlay::Overlay;
use starmap_catalog::{subsectors_of, Main, Sector, SubsectorRef, World};
use starmap_core::{HexPosition, SectorIndex};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Optional predicate narrowing a query's results.
pub type Filter<'f, T> = Option<&'f dyn Fn(&T) -> bool>;

fn passes<T>(filter: Filter<'_, T>, item: &T) -> bool {
    filter.is_none_or(|f| f(item))
}

/// Component-wise minimum and maximum of two corners.
fn corners(a: HexPosition, b: HexPosition) -> (HexPosition, HexPosition) {
    (
        HexPosition::new(a.x.min(b.x), a.y.min(b.y)),
        HexPosition::new(a.x.max(b.x), a.y.max(b.y)),
    )
}

/// Row-major walk over the inclusive rectangle `lo..=hi`.
fn grid(lo: (i32, i32), hi: (i32, i32)) -> impl Iterator<Item = (i32, i32)> {
    (lo.1..=hi.1).flat_map(move |y| (lo.0..=hi.0).map(move |x| (x, y)))
}

impl<'u> Overlay<'u> {
    /// Sectors overlapping the hex rectangle spanned by `a` and `b`.
    ///
    /// Corners may be given in any order. Sectors come out row by row.
    pub fn sectors_in_area<'f>(
        &self,
        a: HexPosition,
        b: HexPosition,
        filter: Filter<'f, Sector>,
    ) -> impl Iterator<Item = &'u Arc<Sector>> + 'f
    where
        'u: 'f,
    {
        let overlay = *self;
        let (lo, hi) = corners(a, b);
        let (lo, hi) = (lo.sector_index(), hi.sector_index());
        grid((lo.x, lo.y), (hi.x, hi.y))
            .filter_map(move |(x, y)| overlay.sector_at(SectorIndex::new(x, y)))
            .filter(move |&s| passes(filter, &**s))
    }

    /// Subsectors whose hex bounds intersect the rectangle spanned by `a`
    /// and `b`.
    pub fn subsectors_in_area<'f>(
        &self,
        a: HexPosition,
        b: HexPosition,
        filter: Filter<'f, SubsectorRef<'u>>,
    ) -> impl Iterator<Item = SubsectorRef<'u>> + 'f
    where
        'u: 'f,
    {
        let (lo, hi) = corners(a, b);
        self.sectors_in_area(lo, hi, None)
            .flat_map(subsectors_of)
            .filter(move |r| {
                let (origin, extent) = (r.subsector().origin(), r.subsector().extent());
                origin.x <= hi.x && extent.x >= lo.x && origin.y <= hi.y && extent.y >= lo.y
            })
            .filter(move |r| passes(filter, r))
    }

    /// Worlds in the hex rectangle spanned by `a` and `b`, row by row.
    pub fn worlds_in_area<'f>(
        &self,
        a: HexPosition,
        b: HexPosition,
        filter: Filter<'f, World>,
    ) -> impl Iterator<Item = &'u Arc<World>> + 'f
    where
        'u: 'f,
    {
        let overlay = *self;
        let (lo, hi) = corners(a, b);
        grid((lo.x, lo.y), (hi.x, hi.y))
            .filter_map(move |(x, y)| overlay.world_at(HexPosition::new(x, y)))
            .filter(move |&w| passes(filter, &**w))
    }

    /// Worlds within `radius` hex steps of `center`, column by column.
    pub fn worlds_in_radius<'f>(
        &self,
        center: HexPosition,
        radius: u32,
        filter: Filter<'f, World>,
    ) -> impl Iterator<Item = &'u Arc<World>> + 'f
    where
        'u: 'f,
    {
        let overlay = *self;
        HexesInRadius::new(center, radius)
            .filter_map(move |hex| overlay.world_at(hex))
            .filter(move |&w| passes(filter, &**w))
    }

    /// Worlds connected to `start` through chains of adjacent worlds.
    ///
    /// See [`Flood`] for traversal order and how `filter` prunes.
    pub fn flood<'f>(&self, start: HexPosition, filter: Filter<'f, World>) -> Flood<'u, 'f> {
        Flood::new(*self, start, filter)
    }

    /// The main containing the world at `hex`, if any.
    ///
    /// Mains are computed with placeholder fallback enabled regardless of
    /// this view's setting, and memoized in the current milieu's catalog
    /// under every member hex. Clusters smaller than
    /// [`min_main_worlds`](Self::min_main_worlds) are not mains and are
    /// recomputed on each call.
    pub fn main_at(&self, hex: HexPosition) -> Option<Arc<Main>> {
        let current = self.current()?;
        if let Some(main) = current.mains().get(hex) {
            return Some(main);
        }
        let worlds: Vec<Arc<World>> = self
            .with_placeholders(true)
            .flood(hex, None)
            .cloned()
            .collect();
        if worlds.len() < self.min_main_worlds() {
            return None;
        }
        let main = Arc::new(Main::new(worlds));
        current.mains().insert(Arc::clone(&main));
        Some(main)
    }
}

/// Hexes within a fixed step distance of a centre.
///
/// Walks columns left to right keeping a running `[start, finish]` row
/// band. The band is `2r + 1` tall in the centre column and loses one row
/// per column outward; which end loses it depends on whether the column
/// entered is high or low. Positions outside the `i32` grid are skipped.
#[derive(Clone, Debug)]
pub struct HexesInRadius {
    center_x: i64,
    x: i64,
    last_x: i64,
    y: i64,
    start: i64,
    finish: i64,
}

fn low_column(x: i64) -> bool {
    x.rem_euclid(2) == 1
}

impl HexesInRadius {
    /// All hexes at most `radius` steps from `center`.
    pub fn new(center: HexPosition, radius: u32) -> Self {
        let r = i64::from(radius);
        let (cx, cy) = (i64::from(center.x), i64::from(center.y));
        let (mut start, mut finish) = (cy - r, cy + r);
        for x in (cx - r..cx).rev() {
            if low_column(x) {
                finish -= 1;
            } else {
                start += 1;
            }
        }
        Self {
            center_x: cx,
            x: cx - r,
            last_x: cx + r,
            y: start,
            start,
            finish,
        }
    }

    fn next_column(&mut self) {
        let x = self.x;
        if x < self.center_x {
            // Stepping back towards the centre undoes the step into `x`.
            if low_column(x) {
                self.finish += 1;
            } else {
                self.start -= 1;
            }
        } else if low_column(x + 1) {
            self.finish -= 1;
        } else {
            self.start += 1;
        }
        self.x += 1;
        self.y = self.start;
    }
}

impl Iterator for HexesInRadius {
    type Item = HexPosition;

    fn next(&mut self) -> Option<HexPosition> {
        loop {
            if self.x > self.last_x {
                return None;
            }
            if self.y > self.finish {
                self.next_column();
                continue;
            }
            let y = self.y;
            self.y += 1;
            if let (Ok(x), Ok(y)) = (i32::try_from(self.x), i32::try_from(y)) {
                return Some(HexPosition::new(x, y));
            }
        }
    }
}

/// Breadth-first walk over adjacent worlds.
///
/// Only hexes that hold a world and pass the filter are yielded, and only
/// those are expanded; a world rejected by the filter therefore also cuts
/// off whatever lies beyond it. The start hex comes first (if it
/// qualifies), then neighbours in first-in first-out order. Each hex is
/// examined at most once.
pub struct Flood<'u, 'f> {
    overlay: Overlay<'u>,
    filter: Filter<'f, World>,
    queue: VecDeque<HexPosition>,
    visited: HashSet<HexPosition>,
}

impl<'u, 'f> Flood<'u, 'f> {
    fn new(overlay: Overlay<'u>, start: HexPosition, filter: Filter<'f, World>) -> Self {
        Self {
            overlay,
            filter,
            queue: VecDeque::from([start]),
            visited: HashSet::from([start]),
        }
    }

    /// Number of distinct hexes examined or queued so far.
    pub fn visited(&self) -> usize {
        self.visited.len()
    }
}

impl<'u> Iterator for Flood<'u, '_> {
    type Item = &'u Arc<World>;

    fn next(&mut self) -> Option<&'u Arc<World>> {
        while let Some(hex) = self.queue.pop_front() {
            let Some(world) = self.overlay.world_at(hex) else {
                continue;
            };
            if !passes(self.filter, &**world) {
                continue;
            }
            for next in hex.neighbours() {
                if self.visited.insert(next) {
                    self.queue.push_back(next);
                }
            }
            return Some(world);
        }
        None
    }
}

impl std::fmt::Debug for Flood<'_, '_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flood")
            .field("queued", &self.queue.len())
            .field("visited", &self.visited.len())
            .field("filtered", &self.filter.is_some())
            .finish()
    }
}
