//! Proximity graph between particles.
//!
//! Brute force tests all n(n-1)/2 pairs, which is fine at the reference
//! scale (150 particles, 11,175 pairs per frame) but grows quadratically.
//! The grid variant buckets points into cells one threshold wide so each
//! point only visits its 3x3 neighbourhood. Both produce the same edges in
//! the same `(a, b)` order.

use fnv::FnvHashMap;
use glam::Vec2;
use smallvec::SmallVec;

use crate::config::NeighborSearch;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
    pub distance: f32,
    pub alpha: f32,
}

/// Alpha of an edge of length `distance`: `(1 - d/threshold) * peak` strictly
/// inside the threshold, `None` at or beyond it.
#[inline]
pub fn edge_alpha(distance: f32, threshold: f32, peak: f32) -> Option<f32> {
    if distance.is_finite() && distance >= 0.0 && distance < threshold {
        Some((1.0 - distance / threshold) * peak)
    } else {
        None
    }
}

type Cell = (i32, i32);

#[derive(Debug, Default)]
pub struct ConnectionGraph {
    edges: Vec<Edge>,
    cells: FnvHashMap<Cell, SmallVec<[usize; 8]>>,
}

impl ConnectionGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn rebuild(&mut self, points: &[Vec2], threshold: f32, peak: f32, search: NeighborSearch) {
        self.edges.clear();
        if threshold <= 0.0 || !threshold.is_finite() {
            return;
        }
        match search {
            NeighborSearch::BruteForce => self.brute_force(points, threshold, peak),
            NeighborSearch::Grid => self.grid(points, threshold, peak),
        }
    }

    fn brute_force(&mut self, points: &[Vec2], threshold: f32, peak: f32) {
        for (i, &pa) in points.iter().enumerate() {
            for (j, &pb) in points.iter().enumerate().skip(i + 1) {
                self.push_if_close(i, j, pa, pb, threshold, peak);
            }
        }
    }

    fn grid(&mut self, points: &[Vec2], threshold: f32, peak: f32) {
        self.cells.clear();
        for (i, p) in points.iter().enumerate() {
            self.cells.entry(cell_of(*p, threshold)).or_default().push(i);
        }
        let cells = std::mem::take(&mut self.cells);
        for (i, &pa) in points.iter().enumerate() {
            let (cx, cy) = cell_of(pa, threshold);
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let key = (cx.saturating_add(dx), cy.saturating_add(dy));
                    let Some(bucket) = cells.get(&key) else {
                        continue;
                    };
                    for &j in bucket.iter().filter(|&&j| j > i) {
                        self.push_if_close(i, j, pa, points[j], threshold, peak);
                    }
                }
            }
        }
        self.cells = cells;
        self.edges.sort_unstable_by_key(|e| (e.a, e.b));
    }

    #[inline]
    fn push_if_close(&mut self, a: usize, b: usize, pa: Vec2, pb: Vec2, threshold: f32, peak: f32) {
        let distance = (pa - pb).length();
        if let Some(alpha) = edge_alpha(distance, threshold, peak) {
            self.edges.push(Edge {
                a,
                b,
                distance,
                alpha,
            });
        }
    }
}

#[inline]
fn cell_of(p: Vec2, size: f32) -> Cell {
    ((p.x / size).floor() as i32, (p.y / size).floor() as i32)
}
