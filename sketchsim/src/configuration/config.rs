//! Configuration types for loading sketch scenarios from YAML.
//!
//! This module defines a thin, `serde`-deserializable representation of a
//! scenario. A scenario consists of:
//!
//! - [`CanvasConfig`]     – drawing area, also the extent used by boundaries
//! - [`ParametersConfig`] – seed and headless frame budget
//! - [`BoundaryConfig`]   – what happens at the canvas edge
//! - [`BodyConfig`] / [`SpawnConfig`] – explicit and randomly spawned movers
//! - [`ForceConfig`]      – force terms acting on every mover
//! - walkers, oscillators, polar paths, rotors, star bursts and balloons
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! # YAML format
//! Falling balls with wind, drag in the lower half:
//!
//! ```yaml
//! canvas: { width: 640, height: 360 }
//!
//! parameters:
//!   seed: 7                 # deterministic seed
//!   frames: 600             # headless frame budget
//!
//! boundary: { kind: reflect, inset: zero, open_top: true }
//!
//! spawn:
//!   count: 100
//!   mass: [0.1, 5.0]        # uniform range
//!   x: [0, 640]
//!   y: [0, 0]
//!
//! forces:
//!   - { type: wind, f: [0.01, 0.0] }
//!   - { type: weight, g: [0.0, 0.01] }
//!   - { type: drag, region: { x: 0, y: 180, w: 640, h: 180 }, c: 0.1 }
//! ```
//!
//! Scenario building maps this into the runtime types and reports any
//! invalid value as a [`ConfigError`].

use serde::Deserialize;
use thiserror::Error;

use crate::simulation::states::NVec2;

/// Problems found while turning a config into a runnable scenario
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` needs 2 components, got {got}")]
    Arity { field: &'static str, got: usize },

    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },

    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },

    #[error("`{field}` range [{lo}, {hi}] is inverted")]
    InvertedRange { field: &'static str, lo: f64, hi: f64 },

    #[error("`{field}` must be finite")]
    NotFinite { field: &'static str },

    #[error(transparent)]
    Normal(#[from] rand_distr::NormalError),
}

/// Read a 2 component vector
pub fn vec2(field: &'static str, v: &[f64]) -> Result<NVec2, ConfigError> {
    match v {
        [x, y] if x.is_finite() && y.is_finite() => Ok(NVec2::new(*x, *y)),
        [_, _] => Err(ConfigError::NotFinite { field }),
        _ => Err(ConfigError::Arity { field, got: v.len() }),
    }
}

pub fn positive(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub fn non_negative(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(value)
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

pub fn range(field: &'static str, r: [f64; 2]) -> Result<(f64, f64), ConfigError> {
    let [lo, hi] = r;
    if !lo.is_finite() || !hi.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if lo > hi {
        return Err(ConfigError::InvertedRange { field, lo, hi });
    }
    Ok((lo, hi))
}

fn default_seed() -> u64 { 42 }
fn default_frames() -> u64 { 600 }
fn default_mass() -> f64 { 1.0 }
fn default_radius() -> f64 { 8.0 }
fn default_radius_per_mass() -> f64 { 8.0 }
fn default_g() -> f64 { 0.4 }
fn default_clamp() -> [f64; 2] { [5.0, 25.0] }
fn default_noise_step() -> f64 { 0.01 }
fn default_noise_range() -> f64 { 2.0 }
fn default_seek() -> f64 { 1.0 }
fn default_pointer_wind() -> f64 { 0.1 }
fn default_dtheta() -> f64 { 0.01 }
fn default_star_lifetime() -> u32 { 500 }
fn default_star_radius() -> [f64; 2] { [20.0, 100.0] }
fn default_walker_count() -> usize { 1 }
fn default_helium() -> Vec<f64> { vec![0.0, -0.2] }
fn default_balloon_gravity() -> Vec<f64> { vec![0.0, 0.009] }
fn default_bounce() -> Vec<f64> { vec![0.0, 0.5] }
fn default_debounce() -> Vec<f64> { vec![0.0, -0.005] }
fn default_ceiling() -> f64 { 12.0 }
fn default_balloon_radius() -> f64 { 8.0 }

/// Drawing area in pixels
#[derive(Deserialize, Debug, Clone)]
pub struct CanvasConfig {
    pub width: f64,
    pub height: f64,
}

/// Run parameters
#[derive(Deserialize, Debug, Clone)]
pub struct ParametersConfig {
    #[serde(default = "default_seed")]
    pub seed: u64, // deterministic seed to make runs reproducible
    #[serde(default = "default_frames")]
    pub frames: u64, // frames stepped by a headless run
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            frames: default_frames(),
        }
    }
}

/// Where a reflecting body turns around
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum InsetConfig {
    #[default]
    Zero, // at the canvas edge
    Radius, // one body radius inside the edge
}

/// Edge policy
/// `kind: none`, `kind: wrap` or `kind: reflect`
#[derive(Deserialize, Debug, Clone, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoundaryConfig {
    #[default]
    None,
    Wrap,
    Reflect {
        #[serde(default)]
        inset: InsetConfig,
        #[serde(default)]
        open_top: bool, // leave the top edge open
    },
}

/// What a drawn body's rotation follows
#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrientConfig {
    #[default]
    None,
    Spin, // angle driven by horizontal acceleration
    Heading, // direction of travel
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    pub x: Vec<f64>, // initial position
    #[serde(default)]
    pub v: Option<Vec<f64>>, // initial velocity, zero when omitted
    #[serde(default = "default_mass")]
    pub m: f64, // mass
    #[serde(default = "default_radius")]
    pub radius: f64, // drawing radius
    #[serde(default)]
    pub top_speed: Option<f64>,
    #[serde(default)]
    pub orient: OrientConfig,
}

/// Bodies scattered uniformly at random
#[derive(Deserialize, Debug, Clone)]
pub struct SpawnConfig {
    pub count: usize,
    pub mass: [f64; 2],
    pub x: [f64; 2],
    pub y: [f64; 2],
    #[serde(default)]
    pub speed: [f64; 2], // initial speed in a random direction
    #[serde(default = "default_radius_per_mass")]
    pub radius_per_mass: f64,
    #[serde(default)]
    pub top_speed: Option<f64>,
    #[serde(default)]
    pub orient: OrientConfig,
}

/// Axis-aligned rectangle
#[derive(Deserialize, Debug, Clone, Copy)]
pub struct RegionConfig {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// One force term, selected by `type`
#[derive(Deserialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ForceConfig {
    /// Same force on every body
    Wind { f: Vec<f64> },
    /// Gravity scaled by mass
    Weight { g: Vec<f64> },
    /// Acceleration independent of mass
    ConstantAccel { a: Vec<f64> },
    Friction { mu: f64 },
    /// Velocity-squared drag inside a region
    Drag { region: RegionConfig, c: f64 },
    /// Push along velocity inside a region, negative slows down
    Pocket { region: RegionConfig, magnitude: f64 },
    Attractor {
        x: Vec<f64>,
        m: f64,
        #[serde(default = "default_g", alias = "G")]
        g: f64,
        #[serde(default = "default_clamp")]
        clamp: [f64; 2],
        #[serde(default)]
        follow_pointer: bool,
    },
    /// Every body attracts every other
    Mutual {
        #[serde(default = "default_g", alias = "G")]
        g: f64,
        #[serde(default = "default_clamp")]
        clamp: [f64; 2],
    },
    NoiseWander {
        #[serde(default = "default_noise_step")]
        step: f64,
        #[serde(default = "default_noise_range")]
        range: f64,
    },
    Seek {
        #[serde(default = "default_seek")]
        magnitude: f64,
    },
    PointerWind {
        #[serde(default = "default_pointer_wind")]
        f: f64,
    },
    /// Keyboard steered acceleration, `a` is the starting value
    Thrust { a: Vec<f64> },
    /// Invisible walls pushing back near the edges
    Restoring { margin: f64, strength: f64 },
}

/// Walk rule, selected by `kind`
#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WalkPolicyConfig {
    Uniform,
    RightLean,
    Gaussian { sd: f64 },
    Levy { long_step: f64 },
    TowardPointer,
    NoisePosition {
        #[serde(default = "default_noise_step")]
        step: f64,
    },
    NoiseStep {
        #[serde(default = "default_noise_step")]
        step: f64,
    },
    PointerPull,
}

#[derive(Deserialize, Debug, Clone)]
pub struct WalkerConfig {
    #[serde(default)]
    pub x: Option<Vec<f64>>, // start position, canvas center when omitted
    #[serde(default)]
    pub random_start: bool, // start anywhere on the canvas, overrides `x`
    #[serde(default = "default_walker_count")]
    pub count: usize, // identical walkers to create
    pub policy: WalkPolicyConfig,
}

#[derive(Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AxisConfig {
    #[default]
    X,
    Y,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OscillatorConfig {
    pub amplitude: f64,
    pub period: f64, // frames per full cycle
    #[serde(default)]
    pub axis: AxisConfig,
}

#[derive(Deserialize, Debug, Clone)]
pub struct PathConfig {
    #[serde(default)]
    pub r: f64,
    #[serde(default)]
    pub dr: f64,
    #[serde(default)]
    pub theta: f64,
    #[serde(default = "default_dtheta")]
    pub dtheta: f64,
}

#[derive(Deserialize, Debug, Clone)]
pub struct RotorConfig {
    #[serde(default)]
    pub angle: f64,
    #[serde(default)]
    pub velocity: f64,
    pub acceleration: f64,
}

/// Click-spawned star bursts
#[derive(Deserialize, Debug, Clone)]
pub struct StarsConfig {
    #[serde(default = "default_star_lifetime")]
    pub lifetime: u32, // frames a star keeps emitting rays
    #[serde(default = "default_star_radius")]
    pub radius: [f64; 2], // range of the max ray length
}

/// Helium balloon rising from `x`
#[derive(Deserialize, Debug, Clone)]
pub struct BalloonConfig {
    pub x: Vec<f64>,
    #[serde(default = "default_mass")]
    pub m: f64,
    #[serde(default = "default_balloon_radius")]
    pub radius: f64,
    #[serde(default = "default_helium")]
    pub helium: Vec<f64>,
    #[serde(default = "default_balloon_gravity")]
    pub gravity: Vec<f64>,
    #[serde(default = "default_bounce")]
    pub bounce: Vec<f64>,
    #[serde(default = "default_debounce")]
    pub debounce: Vec<f64>,
    #[serde(default = "default_ceiling")]
    pub ceiling: f64,
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    pub canvas: CanvasConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub boundary: BoundaryConfig,
    #[serde(default)]
    pub bodies: Vec<BodyConfig>,
    #[serde(default)]
    pub spawn: Option<SpawnConfig>,
    #[serde(default)]
    pub forces: Vec<ForceConfig>,
    #[serde(default)]
    pub walkers: Vec<WalkerConfig>,
    #[serde(default)]
    pub oscillators: Vec<OscillatorConfig>,
    #[serde(default)]
    pub paths: Vec<PathConfig>,
    #[serde(default)]
    pub rotors: Vec<RotorConfig>,
    #[serde(default)]
    pub stars: Option<StarsConfig>,
    #[serde(default)]
    pub balloons: Vec<BalloonConfig>,
}
