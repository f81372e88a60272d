use backdrop_core::{FrameCallback, FrameScheduler, Result as CoreResult, DEFAULT_FRAME_DT_SEC};
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` loop.
pub struct RafScheduler {
    window: web::Window,
}

/// Running loop: the self-rescheduling closure and the pending request id.
pub struct RafHandle {
    tick: TickSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl RafScheduler {
    pub fn new(window: web::Window) -> Self {
        Self { window }
    }
}

fn request(window: &web::Window, tick: &TickSlot, pending: &Cell<Option<i32>>) {
    if let Some(cb) = tick.borrow().as_ref() {
        match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
            Ok(id) => pending.set(Some(id)),
            Err(e) => {
                pending.set(None);
                log::error!("[frame] requestAnimationFrame failed: {:?}", e);
            }
        }
    }
}

impl FrameScheduler for RafScheduler {
    type Handle = RafHandle;

    fn start(&mut self, mut callback: FrameCallback) -> CoreResult<RafHandle> {
        let tick: TickSlot = Rc::new(RefCell::new(None));
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

        let tick_clone = tick.clone();
        let pending_clone = pending.clone();
        let window = self.window.clone();
        let mut last: Option<Instant> = None;
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_clone.set(None);
            let now = Instant::now();
            let dt = last
                .map(|t| (now - t).as_secs_f32())
                .unwrap_or(DEFAULT_FRAME_DT_SEC);
            last = Some(now);
            callback(dt);
            request(&window, &tick_clone, &pending_clone);
        }) as Box<dyn FnMut()>));

        request(&self.window, &tick, &pending);
        if pending.get().is_none() {
            tick.borrow_mut().take();
            return Err(backdrop_core::BackdropError::Scheduler(
                "requestAnimationFrame unavailable".into(),
            ));
        }
        log::info!("[frame] loop started");
        Ok(RafHandle { tick, pending })
    }

    fn cancel(&mut self, handle: RafHandle) {
        if let Some(id) = handle.pending.take() {
            _ = self.window.cancel_animation_frame(id);
        }
        // drops the closure and with it the cycle through `tick_clone`
        handle.tick.borrow_mut().take();
        log::info!("[frame] loop cancelled");
    }
}
