use backdrop_core::{
    BackdropError, EventSource, PointerCallback, ResizeCallback, Result as CoreResult,
};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom;

/// A DOM listener that is removed again when dropped.
pub struct ListenerGuard {
    target: web::EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

impl ListenerGuard {
    fn attach(
        target: &web::EventTarget,
        event: &'static str,
        closure: Closure<dyn FnMut(web::Event)>,
    ) -> CoreResult<Self> {
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| BackdropError::Subscribe {
                event,
                reason: format!("{:?}", e),
            })?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        _ = self.target.remove_event_listener_with_callback(
            self.event,
            self.closure.as_ref().unchecked_ref(),
        );
        log::debug!("[events] removed {} listener", self.event);
    }
}

/// Window-level pointer and resize events. The resize listener also keeps the
/// canvas backing store in step with the viewport before notifying.
pub struct WebEvents {
    window: web::Window,
    canvas: web::HtmlCanvasElement,
}

impl WebEvents {
    pub fn new(window: web::Window, canvas: web::HtmlCanvasElement) -> Self {
        Self { window, canvas }
    }
}

impl EventSource for WebEvents {
    type Subscription = ListenerGuard;

    fn subscribe_pointer(&mut self, mut callback: PointerCallback) -> CoreResult<ListenerGuard> {
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            if let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() {
                callback(mouse.client_x() as f32, mouse.client_y() as f32);
            }
        }) as Box<dyn FnMut(web::Event)>);
        ListenerGuard::attach(&self.window, "pointermove", closure)
    }

    fn subscribe_resize(&mut self, mut callback: ResizeCallback) -> CoreResult<ListenerGuard> {
        let window = self.window.clone();
        let canvas = self.canvas.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            let vp = dom::viewport_size(&window);
            dom::sync_canvas_backing_size(&canvas, vp);
            callback(vp);
        }) as Box<dyn FnMut(web::Event)>);
        ListenerGuard::attach(&self.window, "resize", closure)
    }
}
