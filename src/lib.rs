#![cfg(target_arch = "wasm32")]
use backdrop_core::{mount, BackdropConfig, BackgroundComposer, FrameOutput, MountedBackground};
use std::cell::{Cell, RefCell};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod canvas;
mod constants;
mod css;
mod dom;
mod events;
mod frame;
mod orb_layer;

use canvas::CanvasSurface;
use events::WebEvents;
use frame::RafScheduler;
use orb_layer::{OrbElements, StaticLayers};

type WebMount = MountedBackground<CanvasSurface, WebEvents, RafScheduler>;

/// A running background plus the DOM it put on the page.
struct WebBackdrop {
    background: WebMount,
    canvas: web::HtmlCanvasElement,
    orbs: Option<OrbElements>,
    layers: Option<StaticLayers>,
}

impl WebBackdrop {
    fn unmount(self) {
        self.background.unmount();
        dom::set_style(&self.canvas, "display", css::display(false));
        if let Some(orbs) = &self.orbs {
            orbs.remove();
        }
        if let Some(layers) = &self.layers {
            layers.remove();
        }
    }
}

thread_local! {
    static MOUNTED: RefCell<Option<WebBackdrop>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("backdrop-web starting");
    mount_backdrop();
    Ok(())
}

/// Mount the background if it is not already running. Any failure leaves the
/// page without the effect and is only logged.
#[wasm_bindgen]
pub fn mount_backdrop() {
    if MOUNTED.with(|m| m.borrow().is_some()) {
        return;
    }
    match init() {
        Ok(Some(mounted)) => MOUNTED.with(|m| *m.borrow_mut() = Some(mounted)),
        Ok(None) => {}
        Err(e) => log::error!("init error: {:?}", e),
    }
}

/// Stop the frame loop, remove all listeners and take the background off
/// the page.
#[wasm_bindgen]
pub fn unmount_backdrop() {
    let mounted = MOUNTED.with(|m| m.borrow_mut().take());
    if let Some(mounted) = mounted {
        mounted.unmount();
    }
}

fn init() -> anyhow::Result<Option<WebBackdrop>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = dom::element_or_create(&document, "canvas", constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;

    let overrides = dom::dataset_overrides(&canvas);
    let (config, rejected) =
        BackdropConfig::from_overrides_lossy(overrides.iter().map(|(k, v)| (*k, v.as_str())));
    for e in &rejected {
        log::warn!("[config] ignoring override: {e}");
    }
    log::info!(
        "[config] theme={:?} particles={} search={:?} overrides={}",
        config.theme,
        config.field.particle_count,
        config.field.neighbor_search,
        overrides.len()
    );

    let surface = match CanvasSurface::acquire(&canvas) {
        Ok(s) => s,
        Err(e) => {
            log::info!("[composer] {e}; running without background");
            return Ok(None);
        }
    };

    let viewport = dom::viewport_size(&window);
    dom::sync_canvas_backing_size(&canvas, viewport);
    for (prop, value) in [
        ("position", "fixed"),
        ("inset", "0"),
        ("width", "100%"),
        ("height", "100%"),
        ("pointer-events", "none"),
    ] {
        dom::set_style(&canvas, prop, value);
    }
    dom::set_style(&canvas, "z-index", &constants::CANVAS_Z_INDEX.to_string());

    let palette = config.theme.palette();
    let composer = BackgroundComposer::new(config, surface, viewport)?;
    let layers = StaticLayers::build(&document, &palette);
    if layers.is_none() {
        log::warn!("[layers] could not create grid and vignette");
    }
    let orbs = OrbElements::build(&document, composer.orbs().orbs(), &palette);
    if orbs.is_none() {
        log::warn!("[orbs] could not create orb elements");
    }

    let canvas_shown: Cell<Option<bool>> = Cell::new(None);
    let orbs_placed = Cell::new(false);
    let canvas_for_present = canvas.clone();
    let orbs_for_present = orbs.clone();
    let present = move |out: &FrameOutput| {
        if canvas_shown.get() != Some(out.field_visible) {
            dom::set_style(&canvas_for_present, "display", css::display(out.field_visible));
            canvas_shown.set(Some(out.field_visible));
        }
        if out.orbs_moving || !orbs_placed.get() {
            if let Some(orbs) = &orbs_for_present {
                orbs.apply(&out.orb_offsets);
            }
            orbs_placed.set(true);
        }
    };

    let mut events = WebEvents::new(window.clone(), canvas.clone());
    let background = mount(composer, &mut events, RafScheduler::new(window), present)?;
    Ok(Some(WebBackdrop {
        background,
        canvas,
        orbs,
        layers,
    }))
}
