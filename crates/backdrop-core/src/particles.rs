//! The particle web: kinematics, boundary reflection, pointer attraction and
//! drawing of particles plus their connection graph.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::rngs::StdRng;
use rand::Rng;

use crate::config::FieldParams;
use crate::graph::{edge_alpha, ConnectionGraph};
use crate::state::{FrameStats, PointerState, Viewport};
use crate::surface::{Stroke, Surface};
use crate::theme::Palette;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    /// Displacement per frame.
    pub velocity: Vec2,
    pub base_size: f32,
    pub phase: f32,
    pub pulse_speed: f32,
}

impl Particle {
    /// Rendered radius: base size modulated by the pulse phase, floored.
    #[inline]
    pub fn radius(&self, amplitude: f32, min_radius: f32) -> f32 {
        (self.base_size + self.phase.sin() * amplitude).max(min_radius)
    }
}

/// Keep `pos` inside `[0, extent]` by mirroring any overshoot back across the
/// wall it crossed. Each mirror flips the velocity sign, so an odd number of
/// crossings reverses the component and an even number keeps it.
pub fn reflect_axis(pos: f32, vel: f32, extent: f32) -> (f32, f32) {
    if (0.0..=extent).contains(&pos) {
        return (pos, vel);
    }
    if extent <= 0.0 || !pos.is_finite() {
        // NaN.max(0.0) is 0.0
        let repaired = pos.max(0.0).min(extent.max(0.0));
        let vel = if vel.is_finite() { -vel } else { 0.0 };
        return (repaired, vel);
    }
    let period = 2.0 * extent;
    let folded = pos.rem_euclid(period);
    if folded > extent {
        ((period - folded).max(0.0), -vel)
    } else {
        (folded, vel)
    }
}

pub struct ParticleField {
    params: FieldParams,
    palette: Palette,
    viewport: Viewport,
    particles: Vec<Particle>,
    graph: ConnectionGraph,
    scratch: Vec<Vec2>,
    rng: StdRng,
    generation: u64,
}

impl ParticleField {
    pub fn new(params: FieldParams, palette: Palette, rng: StdRng) -> Self {
        Self {
            params,
            palette,
            viewport: Viewport::default(),
            particles: Vec::new(),
            graph: ConnectionGraph::new(),
            scratch: Vec::new(),
            rng,
            generation: 0,
        }
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    /// Number of times the collection has been rebuilt.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn graph(&self) -> &ConnectionGraph {
        &self.graph
    }

    /// Replace the whole collection with `count` fresh particles spread
    /// uniformly over `viewport`.
    pub fn initialize(&mut self, viewport: Viewport, count: usize) {
        self.viewport = viewport;
        let p = &self.params;
        let rng = &mut self.rng;
        let mut fresh = Vec::with_capacity(count);
        for _ in 0..count {
            fresh.push(Particle {
                position: Vec2::new(
                    rng.gen::<f32>() * viewport.width,
                    rng.gen::<f32>() * viewport.height,
                ),
                velocity: Vec2::new(
                    (rng.gen::<f32>() - 0.5) * 2.0 * p.max_initial_speed,
                    (rng.gen::<f32>() - 0.5) * 2.0 * p.max_initial_speed,
                ),
                base_size: lerp(p.base_size, rng.gen()),
                phase: rng.gen::<f32>() * TAU,
                pulse_speed: lerp(p.pulse_speed, rng.gen()),
            });
        }
        self.particles = fresh;
        self.generation += 1;
        log::info!(
            "[field] initialized {} particles in {:.0}x{:.0} (generation {})",
            count,
            viewport.width,
            viewport.height,
            self.generation
        );
    }

    /// Drop every particle and edge. The next [`ParticleField::initialize`]
    /// starts a new generation.
    pub fn clear(&mut self) {
        self.particles = Vec::new();
        self.scratch = Vec::new();
        self.graph = ConnectionGraph::new();
    }

    /// Draw one frame and advance the simulation by one step.
    ///
    /// Edges are drawn from the positions at the start of the frame; the
    /// particles are then moved and drawn on top.
    pub fn advance<S: Surface + ?Sized>(
        &mut self,
        pointer: PointerState,
        surface: &mut S,
    ) -> FrameStats {
        let vp = self.viewport;
        surface.clear(vp);

        let mut stats = FrameStats {
            particles: self.particles.len(),
            ..FrameStats::default()
        };

        self.scratch.clear();
        self.scratch.extend(self.particles.iter().map(|p| p.position));
        self.graph.rebuild(
            &self.scratch,
            self.params.connection_distance,
            self.params.edge_alpha,
            self.params.neighbor_search,
        );
        for e in self.graph.edges() {
            surface.line(self.scratch[e.a], self.scratch[e.b], self.stroke(e.alpha));
        }
        stats.edges = self.graph.edges().len();

        let mouse = pointer.position();
        if let Some(m) = mouse {
            let reach = self.params.pointer_link_distance();
            for &p in &self.scratch {
                let d = (m - p).length();
                if let Some(alpha) = edge_alpha(d, reach, self.params.pointer_edge_alpha) {
                    surface.line(m, p, self.stroke(alpha));
                    stats.pointer_edges += 1;
                }
            }
        }

        let params = &self.params;
        for p in self.particles.iter_mut() {
            if !p.velocity.is_finite() {
                p.velocity = Vec2::ZERO;
            }
            p.position += p.velocity;
            let (x, vx) = reflect_axis(p.position.x, p.velocity.x, vp.width);
            let (y, vy) = reflect_axis(p.position.y, p.velocity.y, vp.height);
            p.position = Vec2::new(x, y);
            p.velocity = Vec2::new(vx, vy);

            p.phase = (p.phase + p.pulse_speed) % TAU;
            let radius = p.radius(params.pulse_amplitude, params.min_radius);

            if let Some(m) = mouse {
                if apply_attraction(p, m, params) {
                    stats.attracted += 1;
                }
            }
            if let Some(cap) = params.max_speed {
                p.velocity = p.velocity.clamp_length_max(cap);
            }

            surface.disc(p.position, radius, self.palette.node);
        }

        stats
    }

    #[inline]
    fn stroke(&self, alpha: f32) -> Stroke {
        Stroke {
            color: self.palette.edge.with_alpha(alpha),
            width: self.params.edge_width,
        }
    }
}

/// Pull `p` toward the pointer when within range. Returns whether a force
/// was applied; a particle exactly on the pointer has no direction and gets
/// none.
fn apply_attraction(p: &mut Particle, pointer: Vec2, params: &FieldParams) -> bool {
    let delta = pointer - p.position;
    let d = delta.length();
    if d <= 0.0 || !d.is_finite() || d >= params.pointer_distance {
        return false;
    }
    let force = (params.pointer_distance - d) / params.pointer_distance;
    p.velocity += delta / d * force * params.attraction;
    true
}

#[inline]
fn lerp((lo, hi): (f32, f32), t: f32) -> f32 {
    lo + (hi - lo) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use crate::theme::Theme;
    use rand::SeedableRng;

    fn field(params: FieldParams) -> ParticleField {
        ParticleField::new(params, Theme::Dark.palette(), StdRng::seed_from_u64(11))
    }

    fn still(x: f32, y: f32) -> Particle {
        Particle {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            base_size: 1.5,
            phase: 0.0,
            pulse_speed: 0.04,
        }
    }

    #[test]
    fn reflect_mirrors_single_crossings() {
        assert_eq!(reflect_axis(-2.0, -1.0, 100.0), (2.0, 1.0));
        assert_eq!(reflect_axis(103.0, 4.0, 100.0), (97.0, -4.0));
        assert_eq!(reflect_axis(50.0, 4.0, 100.0), (50.0, 4.0));
        assert_eq!(reflect_axis(100.0, 4.0, 100.0), (100.0, 4.0));
    }

    #[test]
    fn reflect_folds_multiple_crossings() {
        // crossed the right wall then the left wall: back to moving right
        let (x, v) = reflect_axis(205.0, 300.0, 100.0);
        assert_eq!((x, v), (5.0, 300.0));
        // past the left wall and then the right one: moving left again
        assert_eq!(reflect_axis(-150.0, -300.0, 100.0), (50.0, -300.0));
    }

    #[test]
    fn reflect_repairs_degenerate_input() {
        assert_eq!(reflect_axis(f32::NAN, 1.0, 100.0).0, 0.0);
        assert_eq!(reflect_axis(f32::INFINITY, 1.0, 100.0).0, 100.0);
        assert_eq!(reflect_axis(5.0, 1.0, 0.0), (0.0, -1.0));
    }

    #[test]
    fn radius_pulses_and_is_floored() {
        let mut p = still(0.0, 0.0);
        p.base_size = 1.0;
        p.phase = 3.0 * std::f32::consts::FRAC_PI_2; // sin = -1
        assert!((p.radius(0.4, 0.5) - 0.6).abs() < 1e-5);
        p.base_size = 0.2;
        assert_eq!(p.radius(0.4, 0.5), 0.5);
    }

    #[test]
    fn initialize_samples_within_ranges() {
        let mut f = field(FieldParams::default());
        f.initialize(Viewport::new(640.0, 480.0), 500);
        for p in f.particles() {
            assert!(Viewport::new(640.0, 480.0).contains(p.position));
            assert!(p.velocity.x.abs() <= 0.2 && p.velocity.y.abs() <= 0.2);
            assert!(p.base_size >= 1.0 && p.base_size <= 2.5 + 1e-6);
            assert!(p.pulse_speed >= 0.03 && p.pulse_speed <= 0.05 + 1e-6);
            assert!((0.0..=TAU).contains(&p.phase));
        }
    }

    #[test]
    fn advance_draws_clear_edges_then_discs() {
        let mut f = field(FieldParams::default());
        f.initialize(Viewport::new(400.0, 400.0), 0);
        f.particles = vec![still(10.0, 10.0), still(60.0, 10.0), still(390.0, 390.0)];
        let mut s = RecordingSurface::new();
        let stats = f.advance(PointerState::Absent, &mut s);
        assert_eq!(stats.edges, 1);
        assert_eq!(stats.pointer_edges, 0);
        assert!(matches!(s.commands()[0], crate::surface::DrawCommand::Clear(_)));
        assert_eq!(s.lines().count(), 1);
        assert_eq!(s.discs().count(), 3);
        let (_, _, stroke) = s.lines().next().unwrap();
        assert!((stroke.color.a - (1.0 - 50.0 / 140.0) * 0.15).abs() < 1e-6);
        assert_eq!(stroke.width, 0.8);
    }

    #[test]
    fn coincident_pointer_applies_no_force() {
        let mut f = field(FieldParams::default());
        f.initialize(Viewport::new(400.0, 400.0), 0);
        f.particles = vec![still(100.0, 100.0)];
        let mut s = RecordingSurface::new();
        let stats = f.advance(PointerState::At(Vec2::new(100.0, 100.0)), &mut s);
        assert_eq!(stats.attracted, 0);
        assert_eq!(f.particles()[0].velocity, Vec2::ZERO);
        // still linked to the pointer at full strength
        assert_eq!(stats.pointer_edges, 1);
    }

    #[test]
    fn speed_cap_bounds_attraction() {
        let params = FieldParams {
            max_speed: Some(0.05),
            ..FieldParams::default()
        };
        let mut f = field(params);
        f.initialize(Viewport::new(400.0, 400.0), 0);
        f.particles = vec![still(150.0, 100.0)];
        let mut s = RecordingSurface::new();
        for _ in 0..500 {
            f.advance(PointerState::At(Vec2::new(100.0, 100.0)), &mut s);
            assert!(f.particles()[0].velocity.length() <= 0.05 + 1e-6);
        }
    }

    #[test]
    fn uncapped_attraction_accumulates() {
        let mut f = field(FieldParams::default());
        f.initialize(Viewport::new(400.0, 400.0), 0);
        f.particles = vec![still(150.0, 100.0)];
        let mut s = RecordingSurface::new();
        for _ in 0..10 {
            f.advance(PointerState::At(Vec2::new(100.0, 100.0)), &mut s);
        }
        // ten impulses of roughly 0.015 each, all toward the pointer
        assert!(f.particles()[0].velocity.x < -0.1);
    }
}
