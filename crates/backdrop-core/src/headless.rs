//! In-process host used by the native runner and by tests: frames and events
//! are pushed by the caller instead of a windowing system.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::{BackdropError, Result};
use crate::host::{EventSource, FrameCallback, FrameScheduler, PointerCallback, ResizeCallback};
use crate::state::Viewport;

#[derive(Default)]
struct SchedulerSlot {
    callback: Option<FrameCallback>,
    next_id: u64,
    active: Option<u64>,
    refuse_start: bool,
}

/// Scheduler driven by explicit [`ManualScheduler::tick`] calls. Clones share
/// the same slot.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    slot: Rc<RefCell<SchedulerSlot>>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ManualFrameHandle(u64);

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// A scheduler whose `start` always fails.
    pub fn refusing() -> Self {
        let s = Self::default();
        s.slot.borrow_mut().refuse_start = true;
        s
    }

    pub fn is_running(&self) -> bool {
        self.slot.borrow().active.is_some()
    }

    /// Run one frame. Returns false when no loop is running.
    pub fn tick(&self, dt: f32) -> bool {
        let cb = self.slot.borrow_mut().callback.take();
        let Some(mut cb) = cb else {
            return false;
        };
        cb(dt);
        let mut slot = self.slot.borrow_mut();
        // the callback may have been cancelled while it ran
        if slot.active.is_some() && slot.callback.is_none() {
            slot.callback = Some(cb);
        }
        true
    }
}

impl FrameScheduler for ManualScheduler {
    type Handle = ManualFrameHandle;

    fn start(&mut self, callback: FrameCallback) -> Result<ManualFrameHandle> {
        let mut slot = self.slot.borrow_mut();
        if slot.refuse_start {
            return Err(BackdropError::Scheduler("scheduler refused to start".into()));
        }
        slot.next_id += 1;
        let id = slot.next_id;
        slot.active = Some(id);
        slot.callback = Some(callback);
        Ok(ManualFrameHandle(id))
    }

    fn cancel(&mut self, handle: ManualFrameHandle) {
        let mut slot = self.slot.borrow_mut();
        if slot.active == Some(handle.0) {
            slot.active = None;
            slot.callback = None;
        }
    }
}

#[derive(Default)]
struct Listeners {
    pointer: Vec<(u64, PointerCallback)>,
    resize: Vec<(u64, ResizeCallback)>,
    next_id: u64,
    refuse: Option<&'static str>,
}

/// Event source fed by [`ManualEvents::move_pointer`] and
/// [`ManualEvents::resize`]. Clones share the same listener lists.
#[derive(Clone, Default)]
pub struct ManualEvents {
    listeners: Rc<RefCell<Listeners>>,
}

/// Listener registration; removes itself on drop.
pub struct ManualSubscription {
    id: u64,
    listeners: Weak<RefCell<Listeners>>,
}

impl Drop for ManualSubscription {
    fn drop(&mut self) {
        if let Some(l) = self.listeners.upgrade() {
            let mut l = l.borrow_mut();
            l.pointer.retain(|(id, _)| *id != self.id);
            l.resize.retain(|(id, _)| *id != self.id);
        }
    }
}

impl ManualEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// An event source that fails to subscribe to `event` (`"pointer"` or
    /// `"resize"`).
    pub fn refusing(event: &'static str) -> Self {
        let s = Self::default();
        s.listeners.borrow_mut().refuse = Some(event);
        s
    }

    pub fn listener_count(&self) -> usize {
        let l = self.listeners.borrow();
        l.pointer.len() + l.resize.len()
    }

    pub fn move_pointer(&self, x: f32, y: f32) {
        for (_, cb) in self.listeners.borrow_mut().pointer.iter_mut() {
            cb(x, y);
        }
    }

    pub fn resize(&self, viewport: Viewport) {
        for (_, cb) in self.listeners.borrow_mut().resize.iter_mut() {
            cb(viewport);
        }
    }

    fn register(&mut self, event: &'static str) -> Result<u64> {
        let mut l = self.listeners.borrow_mut();
        if l.refuse == Some(event) {
            return Err(BackdropError::Subscribe {
                event,
                reason: "listener rejected".into(),
            });
        }
        l.next_id += 1;
        Ok(l.next_id)
    }

    fn subscription(&self, id: u64) -> ManualSubscription {
        ManualSubscription {
            id,
            listeners: Rc::downgrade(&self.listeners),
        }
    }
}

impl EventSource for ManualEvents {
    type Subscription = ManualSubscription;

    fn subscribe_pointer(&mut self, callback: PointerCallback) -> Result<ManualSubscription> {
        let id = self.register("pointer")?;
        self.listeners.borrow_mut().pointer.push((id, callback));
        Ok(self.subscription(id))
    }

    fn subscribe_resize(&mut self, callback: ResizeCallback) -> Result<ManualSubscription> {
        let id = self.register("resize")?;
        self.listeners.borrow_mut().resize.push((id, callback));
        Ok(self.subscription(id))
    }
}
