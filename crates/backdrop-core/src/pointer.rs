//! Raw pointer capture.

use glam::Vec2;

use crate::state::PointerState;

/// Holds the latest pointer position reported by the host.
///
/// Starts `Absent` and becomes present on the first finite event; it never
/// goes back to `Absent`.
#[derive(Clone, Debug, Default)]
pub struct PointerSource {
    state: PointerState,
}

impl PointerSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pointer-move in viewport coordinates. Non-finite coordinates
    /// are dropped. Returns true when the stored state changed.
    pub fn observe(&mut self, x: f32, y: f32) -> bool {
        if !(x.is_finite() && y.is_finite()) {
            return false;
        }
        let next = PointerState::At(Vec2::new(x, y));
        if next == self.state {
            return false;
        }
        if !self.state.is_present() {
            log::debug!("[pointer] first position ({x:.1}, {y:.1})");
        }
        self.state = next;
        true
    }

    #[inline]
    pub fn state(&self) -> PointerState {
        self.state
    }

    #[inline]
    pub fn x(&self) -> Option<f32> {
        self.state.position().map(|p| p.x)
    }

    #[inline]
    pub fn y(&self) -> Option<f32> {
        self.state.position().map(|p| p.y)
    }
}
