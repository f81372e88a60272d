//! Seams between the simulation and the environment hosting it.
//!
//! A host provides a frame scheduler and an event source. Both hand back
//! handles that the composer owns for as long as the background is mounted.

use crate::error::Result;
use crate::state::Viewport;

/// Invoked once per display refresh with the elapsed time in seconds.
pub type FrameCallback = Box<dyn FnMut(f32)>;
/// Invoked with the pointer position in viewport coordinates.
pub type PointerCallback = Box<dyn FnMut(f32, f32)>;
pub type ResizeCallback = Box<dyn FnMut(Viewport)>;

/// Cancellable per-frame loop.
pub trait FrameScheduler {
    type Handle;

    fn start(&mut self, callback: FrameCallback) -> Result<Self::Handle>;
    fn cancel(&mut self, handle: Self::Handle);
}

/// Pointer and resize notifications.
///
/// Dropping a subscription removes its listener.
pub trait EventSource {
    type Subscription;

    fn subscribe_pointer(&mut self, callback: PointerCallback) -> Result<Self::Subscription>;
    fn subscribe_resize(&mut self, callback: ResizeCallback) -> Result<Self::Subscription>;
}
