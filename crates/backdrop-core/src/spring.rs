//! Single-axis damped spring used to smooth pointer coordinates.

use crate::config::SpringParams;
use crate::constants::{SPRING_MAX_SUBSTEPS, SPRING_REST_DELTA};

/// Damped second-order integrator pulling `value` toward `target`.
///
/// Integration is semi-implicit Euler with unit mass:
/// `a = k (target - value) - c velocity`, then velocity, then value.
/// A frame longer than [`SpringParams::max_stable_step`] is split into equal
/// sub-steps (at most `SPRING_MAX_SUBSTEPS`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringTracker {
    value: f32,
    velocity: f32,
    target: f32,
    stiffness: f32,
    damping: f32,
    max_step: f32,
}

impl Default for SpringTracker {
    fn default() -> Self {
        Self::new(SpringParams::default())
    }
}

impl SpringTracker {
    pub fn new(params: SpringParams) -> Self {
        Self {
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
            stiffness: params.stiffness,
            damping: params.damping,
            max_step: params.max_stable_step(),
        }
    }

    #[inline]
    pub fn value(&self) -> f32 {
        self.value
    }

    #[inline]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    #[inline]
    pub fn set_target(&mut self, target: f32) {
        if target.is_finite() {
            self.target = target;
        }
    }

    /// Place the spring at rest on `value`.
    pub fn jump_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn step(&mut self, dt: f32) {
        if dt.is_nan() || dt <= 0.0 {
            return;
        }
        let n = (dt / self.max_step)
            .ceil()
            .clamp(1.0, SPRING_MAX_SUBSTEPS as f32) as u32;
        let h = dt / n as f32;
        for _ in 0..n {
            let accel = self.stiffness * (self.target - self.value) - self.damping * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
        }
        if !(self.value.is_finite() && self.velocity.is_finite()) {
            log::warn!("[spring] diverged at dt={dt}; resetting to target {}", self.target);
            self.jump_to(self.target);
        }
    }

    /// True once both the remaining distance and the speed are below the
    /// rest threshold.
    pub fn is_settled(&self) -> bool {
        (self.target - self.value).abs() < SPRING_REST_DELTA
            && self.velocity.abs() < SPRING_REST_DELTA
    }
}
