//! Headless runner: drives the backdrop simulation with a recording surface,
//! a synthetic pointer path and a mid-run resize, and logs frame statistics.
//!
//! Environment:
//! - `BACKDROP_FRAMES` (default 600)
//! - `BACKDROP_WIDTH` / `BACKDROP_HEIGHT` (default 1280 x 720)
//! - `BACKDROP_<KEY>` for any config override, e.g. `BACKDROP_NEIGHBOR_SEARCH=grid`
//! - `RUST_LOG` for log filtering

use std::time::Instant;

use anyhow::Context;
use backdrop_core::headless::{ManualEvents, ManualScheduler};
use backdrop_core::{
    mount, BackdropConfig, BackgroundComposer, FrameStats, RecordingSurface, Viewport,
    DEFAULT_FRAME_DT_SEC,
};
use glam::Vec2;

fn env_or<T: std::str::FromStr>(name: &str, default: T) -> anyhow::Result<T> {
    match std::env::var(name) {
        Ok(v) => v
            .trim()
            .parse()
            .map_err(|_| anyhow::anyhow!("{name}: cannot parse {v:?}")),
        Err(_) => Ok(default),
    }
}

fn load_config() -> anyhow::Result<BackdropConfig> {
    let mut cfg = BackdropConfig::default();
    for key in BackdropConfig::KEYS {
        let var = format!("BACKDROP_{}", key.replace('-', "_").to_uppercase());
        if let Ok(value) = std::env::var(&var) {
            cfg.apply_override(key, &value)
                .with_context(|| format!("reading {var}"))?;
        }
    }
    cfg.validate()?;
    Ok(cfg)
}

/// Slow Lissajous sweep across the viewport.
fn pointer_path(frame: u32, vp: Viewport) -> Vec2 {
    let t = frame as f32 * DEFAULT_FRAME_DT_SEC;
    let c = vp.center();
    Vec2::new(
        c.x + (t * 0.7).sin() * vp.width * 0.4,
        c.y + (t * 1.1).cos() * vp.height * 0.4,
    )
}

#[derive(Default)]
struct Totals {
    frames: u64,
    edges: u64,
    pointer_edges: u64,
    attracted: u64,
    max_edges: usize,
}

impl Totals {
    fn add(&mut self, s: &FrameStats) {
        self.frames += 1;
        self.edges += s.edges as u64;
        self.pointer_edges += s.pointer_edges as u64;
        self.attracted += s.attracted as u64;
        self.max_edges = self.max_edges.max(s.edges);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let frames: u32 = env_or("BACKDROP_FRAMES", 600)?;
    let width: f32 = env_or("BACKDROP_WIDTH", 1280.0)?;
    let height: f32 = env_or("BACKDROP_HEIGHT", 720.0)?;
    let config = load_config()?;
    log::info!(
        "[sim] {} frames, {} particles, search {:?}",
        frames,
        config.field.particle_count,
        config.field.neighbor_search
    );

    let mut viewport = Viewport::new(width, height);
    let composer = BackgroundComposer::new(config, RecordingSurface::new(), viewport)?;

    let mut events = ManualEvents::new();
    let scheduler = ManualScheduler::new();
    let totals = std::rc::Rc::new(std::cell::RefCell::new(Totals::default()));
    let sink = totals.clone();
    let mounted = mount(composer, &mut events, scheduler.clone(), move |out| {
        sink.borrow_mut().add(&out.stats);
    })?;

    let started = Instant::now();
    for frame in 0..frames {
        if frame == frames / 2 {
            viewport = Viewport::new(height.max(1.0) * 1.5, width.max(1.0) * 0.75);
            log::info!(
                "[sim] resizing to {:.0}x{:.0}",
                viewport.width,
                viewport.height
            );
            events.resize(viewport);
        }
        let p = pointer_path(frame, viewport);
        events.move_pointer(p.x, p.y);
        scheduler.tick(DEFAULT_FRAME_DT_SEC);

        if frame > 0 && frame % 60 == 0 {
            let t = totals.borrow();
            log::info!(
                "[sim] frame {} avg edges {:.1} max {}",
                frame,
                t.edges as f64 / t.frames.max(1) as f64,
                t.max_edges
            );
        }
    }
    let elapsed = started.elapsed();
    mounted.unmount();

    let t = totals.borrow();
    let per_frame = elapsed.as_secs_f64() * 1000.0 / t.frames.max(1) as f64;
    println!(
        "frames={} avg_edges={:.1} max_edges={} avg_pointer_edges={:.1} avg_attracted={:.1} ms_per_frame={:.3}",
        t.frames,
        t.edges as f64 / t.frames.max(1) as f64,
        t.max_edges,
        t.pointer_edges as f64 / t.frames.max(1) as f64,
        t.attracted as f64 / t.frames.max(1) as f64,
        per_frame
    );
    Ok(())
}
