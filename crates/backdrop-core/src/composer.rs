//! Top-level orchestration: one pointer source feeding the orb layer and the
//! particle field, plus the mount/unmount lifecycle against a host.

use std::cell::RefCell;
use std::rc::Rc;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::BackdropConfig;
use crate::error::Result;
use crate::host::{EventSource, FrameScheduler};
use crate::orbs::{OrbOffsets, OrbSpec, ParallaxOrbLayer};
use crate::particles::ParticleField;
use crate::pointer::PointerSource;
use crate::state::{FrameStats, PointerState, Viewport};
use crate::surface::Surface;

/// What a host needs to present after a frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameOutput {
    pub orb_offsets: OrbOffsets,
    /// False while the orb springs are at rest; hosts may skip restyling.
    pub orbs_moving: bool,
    /// False below the minimum viewport width; the field is not advanced.
    pub field_visible: bool,
    pub stats: FrameStats,
}

pub struct BackgroundComposer<S: Surface> {
    config: BackdropConfig,
    pointer: PointerSource,
    orbs: ParallaxOrbLayer,
    field: ParticleField,
    surface: S,
    viewport: Viewport,
    frames: u64,
}

impl<S: Surface> BackgroundComposer<S> {
    /// Build a composer over an already acquired surface and seed the
    /// particle field for `viewport`.
    pub fn new(config: BackdropConfig, surface: S, viewport: Viewport) -> Result<Self> {
        config.validate()?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let palette = config.theme.palette();
        let orbs = ParallaxOrbLayer::new(
            OrbSpec::reference_set().to_vec(),
            config.spring,
            config.orb_drift,
        );
        let mut field = ParticleField::new(config.field.clone(), palette, rng);
        field.initialize(viewport, config.field.particle_count);
        Ok(Self {
            config,
            pointer: PointerSource::new(),
            orbs,
            field,
            surface,
            viewport,
            frames: 0,
        })
    }

    pub fn config(&self) -> &BackdropConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn pointer(&self) -> PointerState {
        self.pointer.state()
    }

    pub fn orbs(&self) -> &ParallaxOrbLayer {
        &self.orbs
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field_visible(&self) -> bool {
        self.viewport.width >= self.config.min_field_viewport_width
    }

    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if self.pointer.observe(x, y) {
            self.orbs.track(self.pointer.state());
        }
    }

    /// Record the new viewport and rebuild the particle collection for it.
    pub fn on_resize(&mut self, viewport: Viewport) {
        log::debug!(
            "[composer] resize {:.0}x{:.0} -> {:.0}x{:.0}",
            self.viewport.width,
            self.viewport.height,
            viewport.width,
            viewport.height
        );
        self.viewport = viewport;
        self.field
            .initialize(viewport, self.config.field.particle_count);
    }

    /// Blank the surface and drop the particle collection.
    pub fn release(&mut self) {
        self.field.clear();
        self.surface.clear(self.viewport);
    }

    /// Step the orb springs by `dt` seconds (clamped) and advance the field by
    /// one frame.
    pub fn frame(&mut self, dt: f32) -> FrameOutput {
        let dt = if dt.is_finite() {
            dt.clamp(0.0, self.config.max_frame_dt)
        } else {
            0.0
        };
        self.frames += 1;
        let orbs_moving = !self.orbs.is_settled();
        self.orbs.step(dt);

        let field_visible = self.field_visible();
        let stats = if field_visible {
            self.field.advance(self.pointer.state(), &mut self.surface)
        } else {
            FrameStats::default()
        };

        FrameOutput {
            orb_offsets: self.orbs.offsets(self.viewport),
            orbs_moving,
            field_visible,
            stats,
        }
    }
}

/// A composer wired to a host. Dropping it (or calling
/// [`MountedBackground::unmount`]) stops the frame loop first, then removes
/// the event listeners and finally releases the composer's drawing.
pub struct MountedBackground<S, E, F>
where
    S: Surface,
    E: EventSource,
    F: FrameScheduler,
{
    composer: Rc<RefCell<BackgroundComposer<S>>>,
    scheduler: F,
    frame: Option<F::Handle>,
    subscriptions: Vec<E::Subscription>,
}

/// Subscribe to resize and pointer events, then start the frame loop.
///
/// `present` runs after every frame with the composer's output. If any step
/// fails, everything acquired so far is released before the error returns.
pub fn mount<S, E, F, P>(
    composer: BackgroundComposer<S>,
    events: &mut E,
    mut scheduler: F,
    mut present: P,
) -> Result<MountedBackground<S, E, F>>
where
    S: Surface + 'static,
    E: EventSource,
    F: FrameScheduler,
    P: FnMut(&FrameOutput) + 'static,
{
    let composer = Rc::new(RefCell::new(composer));
    let mut subscriptions = Vec::with_capacity(2);

    let c = composer.clone();
    subscriptions.push(events.subscribe_resize(Box::new(move |vp| {
        c.borrow_mut().on_resize(vp);
    }))?);

    let c = composer.clone();
    subscriptions.push(events.subscribe_pointer(Box::new(move |x, y| {
        c.borrow_mut().on_pointer_move(x, y);
    }))?);

    let c = composer.clone();
    let frame = scheduler.start(Box::new(move |dt| {
        let out = c.borrow_mut().frame(dt);
        present(&out);
    }))?;

    log::info!("[composer] mounted");
    Ok(MountedBackground {
        composer,
        scheduler,
        frame: Some(frame),
        subscriptions,
    })
}

impl<S, E, F> MountedBackground<S, E, F>
where
    S: Surface,
    E: EventSource,
    F: FrameScheduler,
{
    pub fn composer(&self) -> &Rc<RefCell<BackgroundComposer<S>>> {
        &self.composer
    }

    pub fn is_mounted(&self) -> bool {
        self.frame.is_some()
    }

    pub fn unmount(mut self) {
        self.teardown();
    }

    fn teardown(&mut self) {
        let Some(frame) = self.frame.take() else {
            return;
        };
        self.scheduler.cancel(frame);
        self.subscriptions.clear();
        match self.composer.try_borrow_mut() {
            Ok(mut c) => c.release(),
            Err(_) => log::warn!("[composer] busy during teardown; surface left as is"),
        }
        log::info!("[composer] unmounted");
    }
}

impl<S, E, F> Drop for MountedBackground<S, E, F>
where
    S: Surface,
    E: EventSource,
    F: FrameScheduler,
{
    fn drop(&mut self) {
        self.teardown();
    }
}
