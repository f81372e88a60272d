//! Runtime configuration for the backdrop.
//!
//! Defaults come from `constants.rs`. Frontends may override a subset of keys
//! from strings (canvas `data-*` attributes on the web, `BACKDROP_*`
//! environment variables natively) via [`BackdropConfig::apply_override`].

use std::str::FromStr;

use crate::constants::*;
use crate::error::{BackdropError, Result};
use crate::theme::Theme;

/// Strategy used to find particle pairs closer than the connection distance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NeighborSearch {
    /// Every pair is tested: n(n-1)/2 distance checks per frame.
    #[default]
    BruteForce,
    /// Uniform grid with cells one connection distance wide.
    Grid,
}

impl FromStr for NeighborSearch {
    type Err = BackdropError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "brute" | "brute-force" | "pairs" => Ok(NeighborSearch::BruteForce),
            "grid" => Ok(NeighborSearch::Grid),
            _ => Err(BackdropError::invalid(
                "neighbor-search",
                s,
                "expected `brute-force` or `grid`",
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct FieldParams {
    pub particle_count: usize,
    pub connection_distance: f32,
    pub pointer_link_factor: f32,
    pub pointer_distance: f32,
    pub attraction: f32,
    pub max_initial_speed: f32,
    /// Optional cap on particle speed. `None` keeps attraction unbounded.
    pub max_speed: Option<f32>,
    pub base_size: (f32, f32),
    pub pulse_speed: (f32, f32),
    pub pulse_amplitude: f32,
    pub min_radius: f32,
    pub edge_alpha: f32,
    pub pointer_edge_alpha: f32,
    pub edge_width: f32,
    pub neighbor_search: NeighborSearch,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            particle_count: PARTICLE_COUNT,
            connection_distance: CONNECTION_DISTANCE,
            pointer_link_factor: POINTER_LINK_FACTOR,
            pointer_distance: POINTER_DISTANCE,
            attraction: ATTRACTION,
            max_initial_speed: MAX_INITIAL_SPEED,
            max_speed: None,
            base_size: (BASE_SIZE_MIN, BASE_SIZE_MAX),
            pulse_speed: (PULSE_SPEED_MIN, PULSE_SPEED_MAX),
            pulse_amplitude: PULSE_AMPLITUDE,
            min_radius: MIN_RADIUS,
            edge_alpha: EDGE_ALPHA,
            pointer_edge_alpha: POINTER_EDGE_ALPHA,
            edge_width: EDGE_WIDTH,
            neighbor_search: NeighborSearch::BruteForce,
        }
    }
}

impl FieldParams {
    #[inline]
    pub fn pointer_link_distance(&self) -> f32 {
        self.connection_distance * self.pointer_link_factor
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: SPRING_STIFFNESS,
            damping: SPRING_DAMPING,
        }
    }
}

impl SpringParams {
    /// Damping ratio for unit mass; 1.0 is critical.
    pub fn damping_ratio(&self) -> f32 {
        self.damping / (2.0 * self.stiffness.sqrt())
    }

    /// Largest step for which the semi-implicit Euler update is stable,
    /// scaled by `SPRING_STABILITY_MARGIN`.
    ///
    /// The update is stable while `c h < 2` and `k h^2 + 2 c h < 4`; the
    /// positive root of the second bound is always the tighter one.
    pub fn max_stable_step(&self) -> f32 {
        let (k, c) = (self.stiffness, self.damping);
        let limit = if k > 0.0 {
            ((c * c + 4.0 * k).sqrt() - c) / k
        } else if c > 0.0 {
            2.0 / c
        } else {
            f32::INFINITY
        };
        limit * SPRING_STABILITY_MARGIN
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct BackdropConfig {
    pub field: FieldParams,
    pub spring: SpringParams,
    pub orb_drift: f32,
    pub theme: Theme,
    pub min_field_viewport_width: f32,
    pub max_frame_dt: f32,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for BackdropConfig {
    fn default() -> Self {
        Self {
            field: FieldParams::default(),
            spring: SpringParams::default(),
            orb_drift: ORB_DRIFT,
            theme: Theme::default(),
            min_field_viewport_width: MIN_FIELD_VIEWPORT_WIDTH,
            max_frame_dt: MAX_FRAME_DT_SEC,
            seed: None,
        }
    }
}

impl BackdropConfig {
    /// Keys understood by [`BackdropConfig::apply_override`], in kebab-case.
    pub const KEYS: [&'static str; 11] = [
        "theme",
        "particles",
        "connection-distance",
        "pointer-distance",
        "attraction",
        "max-speed",
        "neighbor-search",
        "stiffness",
        "damping",
        "orb-drift",
        "seed",
    ];

    pub fn validate(&self) -> Result<()> {
        let f = &self.field;
        if f.particle_count > MAX_PARTICLE_COUNT {
            return Err(BackdropError::invalid(
                "particles",
                f.particle_count,
                "too many for the pair search",
            ));
        }
        positive("connection-distance", f.connection_distance)?;
        positive("pointer-distance", f.pointer_distance)?;
        positive("pointer-link-factor", f.pointer_link_factor)?;
        non_negative("attraction", f.attraction)?;
        non_negative("max-initial-speed", f.max_initial_speed)?;
        if let Some(cap) = f.max_speed {
            positive("max-speed", cap)?;
        }
        ordered_range("base-size", f.base_size)?;
        ordered_range("pulse-speed", f.pulse_speed)?;
        positive("stiffness", self.spring.stiffness)?;
        non_negative("damping", self.spring.damping)?;
        non_negative("orb-drift", self.orb_drift)?;
        positive("max-frame-dt", self.max_frame_dt)?;
        let reach = self.spring.max_stable_step() * SPRING_MAX_SUBSTEPS as f32;
        if reach < self.max_frame_dt {
            return Err(BackdropError::invalid(
                "stiffness",
                format!("{}/{}", self.spring.stiffness, self.spring.damping),
                "spring too stiff for the frame delta",
            ));
        }
        Ok(())
    }

    /// Apply a single `key=value` override. Keys use the kebab-case names of
    /// the canvas `data-*` attributes.
    pub fn apply_override(&mut self, key: &str, value: &str) -> Result<()> {
        let v = value.trim();
        match key {
            "theme" => self.theme = v.parse()?,
            "particles" => self.field.particle_count = parse(key, v)?,
            "connection-distance" => self.field.connection_distance = parse(key, v)?,
            "pointer-distance" => self.field.pointer_distance = parse(key, v)?,
            "attraction" => self.field.attraction = parse(key, v)?,
            "max-speed" => {
                self.field.max_speed = match v {
                    "" | "none" | "off" => None,
                    _ => Some(parse(key, v)?),
                }
            }
            "neighbor-search" => self.field.neighbor_search = v.parse()?,
            "stiffness" => self.spring.stiffness = parse(key, v)?,
            "damping" => self.spring.damping = parse(key, v)?,
            "orb-drift" => self.orb_drift = parse(key, v)?,
            "seed" => self.seed = Some(parse(key, v)?),
            _ => return Err(BackdropError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Defaults with every override applied in order, then validated.
    pub fn from_overrides<'a, I>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut cfg = Self::default();
        for (k, v) in overrides {
            cfg.apply_override(k, v)?;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Like [`BackdropConfig::from_overrides`], but an override that does not
    /// parse, or that would leave the config invalid, is skipped and
    /// returned instead of failing the whole config.
    pub fn from_overrides_lossy<'a, I>(overrides: I) -> (Self, Vec<BackdropError>)
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut cfg = Self::default();
        let mut rejected = Vec::new();
        for (k, v) in overrides {
            let mut next = cfg.clone();
            match next.apply_override(k, v).and_then(|()| next.validate()) {
                Ok(()) => cfg = next,
                Err(e) => rejected.push(e),
            }
        }
        (cfg, rejected)
    }
}

fn parse<T: FromStr>(key: &str, v: &str) -> Result<T> {
    v.parse()
        .map_err(|_| BackdropError::invalid(key, v, "not a number"))
}

fn positive(key: &str, v: f32) -> Result<()> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(BackdropError::invalid(key, v, "must be finite and > 0"))
    }
}

fn non_negative(key: &str, v: f32) -> Result<()> {
    if v.is_finite() && v >= 0.0 {
        Ok(())
    } else {
        Err(BackdropError::invalid(key, v, "must be finite and >= 0"))
    }
}

fn ordered_range(key: &str, (lo, hi): (f32, f32)) -> Result<()> {
    if lo.is_finite() && hi.is_finite() && lo >= 0.0 && lo <= hi {
        Ok(())
    } else {
        Err(BackdropError::invalid(
            key,
            format!("{lo}..{hi}"),
            "expected 0 <= min <= max",
        ))
    }
}
