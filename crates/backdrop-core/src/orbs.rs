//! Parallax orb layer: large blurred shapes drifting against smoothed pointer
//! motion.

use glam::Vec2;
use smallvec::SmallVec;

use crate::config::SpringParams;
use crate::spring::SpringTracker;
use crate::state::{PointerState, Viewport};

/// Direction an orb drifts relative to the pointer on one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Drift {
    /// `[0, extent] -> [-drift, drift]`
    Forward,
    /// `[0, extent] -> [drift, -drift]`
    Inverted,
}

/// Placement of an orb along one axis as a percentage of the viewport,
/// measured from the start (left/top) or the end (right/bottom) edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    Start(f32),
    End(f32),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrbSpec {
    pub horizontal: Anchor,
    pub vertical: Anchor,
    pub diameter_px: f32,
    pub blur_px: f32,
    pub opacity: f32,
    /// Index into the theme's orb palette.
    pub palette_index: usize,
    pub drift: (Drift, Drift),
}

impl OrbSpec {
    /// The three orbs of the reference layout.
    pub fn reference_set() -> [OrbSpec; 3] {
        [
            OrbSpec {
                horizontal: Anchor::Start(5.0),
                vertical: Anchor::Start(10.0),
                diameter_px: 600.0,
                blur_px: 120.0,
                opacity: 0.2,
                palette_index: 0,
                drift: (Drift::Forward, Drift::Forward),
            },
            OrbSpec {
                horizontal: Anchor::End(2.0),
                vertical: Anchor::End(5.0),
                diameter_px: 700.0,
                blur_px: 150.0,
                opacity: 0.2,
                palette_index: 1,
                drift: (Drift::Inverted, Drift::Inverted),
            },
            OrbSpec {
                horizontal: Anchor::End(30.0),
                vertical: Anchor::Start(40.0),
                diameter_px: 400.0,
                blur_px: 100.0,
                opacity: 0.1,
                palette_index: 2,
                drift: (Drift::Forward, Drift::Inverted),
            },
        ]
    }
}

/// Linear remap of `v` from `[in_lo, in_hi]` to `[out_lo, out_hi]`, saturating
/// outside the input range. A degenerate input range maps to the midpoint.
pub fn remap_clamped(v: f32, in_lo: f32, in_hi: f32, out_lo: f32, out_hi: f32) -> f32 {
    let span = in_hi - in_lo;
    if !span.is_finite() || span.abs() <= f32::EPSILON || !v.is_finite() {
        return (out_lo + out_hi) * 0.5;
    }
    let t = ((v - in_lo) / span).clamp(0.0, 1.0);
    out_lo + (out_hi - out_lo) * t
}

#[inline]
fn drift_offset(value: f32, extent: f32, drift: Drift, magnitude: f32) -> f32 {
    match drift {
        Drift::Forward => remap_clamped(value, 0.0, extent, -magnitude, magnitude),
        Drift::Inverted => remap_clamped(value, 0.0, extent, magnitude, -magnitude),
    }
}

pub type OrbOffsets = SmallVec<[Vec2; 4]>;

pub struct ParallaxOrbLayer {
    spring_x: SpringTracker,
    spring_y: SpringTracker,
    drift: f32,
    orbs: Vec<OrbSpec>,
}

impl ParallaxOrbLayer {
    pub fn new(orbs: Vec<OrbSpec>, spring: SpringParams, drift: f32) -> Self {
        Self {
            spring_x: SpringTracker::new(spring),
            spring_y: SpringTracker::new(spring),
            drift,
            orbs,
        }
    }

    pub fn orbs(&self) -> &[OrbSpec] {
        &self.orbs
    }

    pub fn springs(&self) -> (&SpringTracker, &SpringTracker) {
        (&self.spring_x, &self.spring_y)
    }

    /// Retarget both springs on the latest pointer position.
    pub fn track(&mut self, pointer: PointerState) {
        if let Some(p) = pointer.position() {
            self.spring_x.set_target(p.x);
            self.spring_y.set_target(p.y);
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.spring_x.step(dt);
        self.spring_y.step(dt);
    }

    pub fn is_settled(&self) -> bool {
        self.spring_x.is_settled() && self.spring_y.is_settled()
    }

    /// Offset in px for each orb, in declaration order.
    pub fn offsets(&self, viewport: Viewport) -> OrbOffsets {
        let sx = self.spring_x.value();
        let sy = self.spring_y.value();
        self.orbs
            .iter()
            .map(|orb| {
                Vec2::new(
                    drift_offset(sx, viewport.width, orb.drift.0, self.drift),
                    drift_offset(sy, viewport.height, orb.drift.1, self.drift),
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer() -> ParallaxOrbLayer {
        ParallaxOrbLayer::new(OrbSpec::reference_set().to_vec(), SpringParams::default(), 50.0)
    }

    fn settle(l: &mut ParallaxOrbLayer) {
        for _ in 0..600 {
            l.step(1.0 / 60.0);
        }
    }

    #[test]
    fn remap_endpoints_and_midpoint() {
        assert_eq!(remap_clamped(0.0, 0.0, 800.0, -50.0, 50.0), -50.0);
        assert_eq!(remap_clamped(800.0, 0.0, 800.0, -50.0, 50.0), 50.0);
        assert_eq!(remap_clamped(400.0, 0.0, 800.0, -50.0, 50.0), 0.0);
        assert_eq!(remap_clamped(400.0, 0.0, 800.0, 50.0, -50.0), 0.0);
    }

    #[test]
    fn remap_saturates_and_handles_empty_range() {
        assert_eq!(remap_clamped(-100.0, 0.0, 800.0, -50.0, 50.0), -50.0);
        assert_eq!(remap_clamped(1e6, 0.0, 800.0, -50.0, 50.0), 50.0);
        assert_eq!(remap_clamped(10.0, 0.0, 0.0, -50.0, 50.0), 0.0);
    }

    #[test]
    fn opposing_orbs_drift_in_opposite_directions() {
        let mut l = layer();
        let vp = Viewport::new(1000.0, 500.0);
        l.track(PointerState::At(Vec2::new(1000.0, 0.0)));
        settle(&mut l);
        let off = l.offsets(vp);
        assert_eq!(off.len(), 3);
        assert!((off[0].x - 50.0).abs() < 0.5);
        assert!((off[0].y + 50.0).abs() < 0.5);
        assert!((off[1].x + 50.0).abs() < 0.5);
        assert!((off[1].y - 50.0).abs() < 0.5);
        // third orb mixes forward x with inverted y
        assert!((off[2].x - 50.0).abs() < 0.5);
        assert!((off[2].y - 50.0).abs() < 0.5);
    }

    #[test]
    fn absent_pointer_leaves_targets_alone() {
        let mut l = layer();
        l.track(PointerState::Absent);
        l.step(1.0 / 60.0);
        assert!(l.is_settled());
        let off = l.offsets(Viewport::new(800.0, 600.0));
        assert_eq!(off[0], Vec2::new(-50.0, -50.0));
    }

    #[test]
    fn springs_lag_behind_the_pointer() {
        let mut l = layer();
        l.track(PointerState::At(Vec2::new(800.0, 600.0)));
        l.step(1.0 / 60.0);
        let (x, _) = l.springs();
        assert!(x.value() > 0.0 && x.value() < 800.0);
        assert!(!l.is_settled());
    }
}
