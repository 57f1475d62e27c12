//! Build fully-initialized sketch scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces the runtime bundle
//! `Scenario` containing:
//! - engine settings (`Engine`: canvas and boundary policy)
//! - run parameters (`Parameters`)
//! - system state (`System` with bodies at frame 0)
//! - active force set (`AccelSet`)
//! - walkers, oscillators, polar paths, rotors, star bursts and balloons
//! - the seeded RNG and noise source every random draw comes from
//!
//! The scenario is inserted into Bevy as a `Resource` and consumed by the
//! input, integration and drawing systems, or stepped directly when headless

use std::fmt;

use bevy::prelude::Resource;
use noise::Perlin;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use tracing::debug;

use crate::configuration::config::{
    non_negative, positive, range, vec2, AxisConfig, BalloonConfig, BodyConfig, BoundaryConfig, ConfigError,
    ForceConfig, InsetConfig, OrientConfig, RegionConfig, ScenarioConfig, SpawnConfig, WalkPolicyConfig,
};
use crate::simulation::balloon::Balloon;
use crate::simulation::boundary::{Boundary, Inset};
use crate::simulation::engine::{Canvas, Engine};
use crate::simulation::forces::{
    AccelSet, Attractor, ConstantAccel, DistanceClamp, Drag, Friction, MutualAttraction, NoiseWander, Pocket,
    PointerWind, Restoring, Seek, Thrust, Weight, Wind,
};
use crate::simulation::integrator::euler_integrator;
use crate::simulation::oscillation::{Axis, Oscillator, PolarPath, Rotor};
use crate::simulation::params::Parameters;
use crate::simulation::stars::StarField;
use crate::simulation::states::{Body, NVec2, Region, System};
use crate::simulation::walker::{WalkPolicy, Walker};

/// Noise tracks of consecutive walkers are this far apart
const WALKER_NOISE_SPACING: f64 = 1_000.0;

/// Bevy resource representing a fully-initialized sketch
///
/// This is the main "runtime bundle" constructed from a [`ScenarioConfig`]:
/// it contains the engine settings, parameters, current system
/// state, and the set of active force laws (accelerations)
#[derive(Resource)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub system: System,
    pub forces: AccelSet,
    pub walkers: Vec<Walker>,
    pub oscillators: Vec<Oscillator>,
    pub paths: Vec<PolarPath>,
    pub rotors: Vec<Rotor>,
    pub stars: Option<StarField>,
    pub balloons: Vec<Balloon>,
    pub rng: StdRng,
    pub noise: Perlin,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, ConfigError> {
        let canvas = Canvas {
            width: positive("canvas.width", cfg.canvas.width)?,
            height: positive("canvas.height", cfg.canvas.height)?,
        };

        // Parameters (runtime) from ParametersConfig
        let parameters = Parameters {
            seed: cfg.parameters.seed,
            frames: cfg.parameters.frames,
        };
        let mut rng = StdRng::seed_from_u64(parameters.seed);
        let noise = Perlin::new(noise_seed(parameters.seed));

        // Engine (runtime) from the canvas and BoundaryConfig
        let boundary = match cfg.boundary {
            BoundaryConfig::None => Boundary::None,
            BoundaryConfig::Wrap => Boundary::Wrap,
            BoundaryConfig::Reflect { inset, open_top } => Boundary::Reflect {
                inset: match inset {
                    InsetConfig::Zero => Inset::Zero,
                    InsetConfig::Radius => Inset::Radius,
                },
                open_top,
            },
        };
        let engine = Engine { canvas, boundary };

        // Bodies: explicit ones first, then the random spawn
        let mut bodies = cfg.bodies.iter().map(build_body).collect::<Result<Vec<_>, _>>()?;
        if let Some(spawn) = &cfg.spawn {
            spawn_bodies(spawn, &mut rng, &mut bodies)?;
        }

        // Initial system state: bodies at frame 0
        let mut system = System {
            bodies,
            frame: 0,
            ..Default::default()
        };

        // Forces: register every configured term in order
        let mut forces = AccelSet::new();
        for f in &cfg.forces {
            forces = add_force(forces, f, &canvas, &noise, &mut system)?;
        }

        let mut walkers = Vec::new();
        for w in &cfg.walkers {
            let policy = build_policy(w.policy)?;
            let start = match &w.x {
                Some(x) => vec2("walkers.x", x)?,
                None => NVec2::new(0.5 * canvas.width, 0.5 * canvas.height),
            };
            for _ in 0..w.count {
                let x = if w.random_start {
                    NVec2::new(uniform(&mut rng, 0.0, canvas.width), uniform(&mut rng, 0.0, canvas.height))
                } else {
                    start
                };
                let mut walker = Walker::new(x, policy);
                walker.noise_offset = walkers.len() as f64 * WALKER_NOISE_SPACING;
                walkers.push(walker);
            }
        }

        let oscillators = cfg
            .oscillators
            .iter()
            .map(|o| {
                Ok(Oscillator {
                    amplitude: o.amplitude,
                    period: positive("oscillators.period", o.period)?,
                    axis: match o.axis {
                        AxisConfig::X => Axis::X,
                        AxisConfig::Y => Axis::Y,
                    },
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let paths = cfg
            .paths
            .iter()
            .map(|p| PolarPath {
                r: p.r,
                dr: p.dr,
                theta: p.theta,
                dtheta: p.dtheta,
            })
            .collect();

        let rotors = cfg
            .rotors
            .iter()
            .map(|r| Rotor {
                angle: r.angle,
                velocity: r.velocity,
                acceleration: r.acceleration,
            })
            .collect();

        let balloons = cfg
            .balloons
            .iter()
            .map(|bc| launch_balloon(bc, &mut system))
            .collect::<Result<Vec<_>, ConfigError>>()?;

        let stars = match &cfg.stars {
            Some(s) => {
                let (lo, hi) = range("stars.radius", s.radius)?;
                positive("stars.radius", lo)?;
                positive("stars.lifetime", s.lifetime as f64)?;
                Some(StarField::new(s.lifetime, (lo, hi)))
            }
            None => None,
        };

        debug!(
            bodies = system.bodies.len(),
            forces = forces.len(),
            walkers = walkers.len(),
            balloons = balloons.len(),
            "scenario built"
        );

        Ok(Self {
            engine,
            parameters,
            system,
            forces,
            walkers,
            oscillators,
            paths,
            rotors,
            stars,
            balloons,
            rng,
            noise,
        })
    }

    /// Advance everything by one frame
    pub fn step(&mut self) {
        let frame = self.system.frame;
        for w in self.walkers.iter_mut() {
            w.step(frame, &self.engine.canvas, &self.system.pointer, &mut self.rng, &self.noise);
        }
        for p in self.paths.iter_mut() {
            p.advance();
        }
        for r in self.rotors.iter_mut() {
            r.advance();
        }
        if let Some(stars) = self.stars.as_mut() {
            stars.step(&mut self.rng);
        }

        euler_integrator(&mut self.system, &self.forces, &self.engine);

        for balloon in self.balloons.iter_mut() {
            if let Some(body) = self.system.bodies.get_mut(balloon.body) {
                balloon.check_top(body);
            }
        }
    }

    /// Step `frames` times
    pub fn advance(&mut self, frames: u64) {
        for _ in 0..frames {
            self.step();
        }
    }

    /// Start a star burst at `x` if this sketch has stars
    pub fn spawn_star(&mut self, x: NVec2) {
        if let Some(stars) = self.stars.as_mut() {
            stars.spawn(x, &mut self.rng);
        }
    }

    pub fn summary(&self) -> Summary {
        let bodies = &self.system.bodies;
        let speeds = bodies.iter().map(Body::speed);
        let kinetic = bodies.iter().map(|b| 0.5 * b.m * b.v.norm_squared()).sum();
        let mean_speed = if bodies.is_empty() {
            0.0
        } else {
            speeds.clone().sum::<f64>() / bodies.len() as f64
        };
        Summary {
            frame: self.system.frame,
            bodies: bodies.len(),
            walkers: self.walkers.len(),
            stars: self.stars.as_ref().map_or(0, StarField::len),
            mean_speed,
            max_speed: speeds.fold(0.0, f64::max),
            kinetic_energy: kinetic,
        }
    }
}

/// Snapshot of a running scenario for logs
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub frame: u64,
    pub bodies: usize,
    pub walkers: usize,
    pub stars: usize,
    pub mean_speed: f64,
    pub max_speed: f64,
    pub kinetic_energy: f64,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frame {} | {} bodies, {} walkers, {} stars | mean speed {:.4}, max speed {:.4}, KE {:.4}",
            self.frame, self.bodies, self.walkers, self.stars, self.mean_speed, self.max_speed, self.kinetic_energy
        )
    }
}

// Bodies: map `BodyConfig` -> runtime `Body` using nalgebra vectors
fn build_body(bc: &BodyConfig) -> Result<Body, ConfigError> {
    let v = match &bc.v {
        Some(v) => vec2("bodies.v", v)?,
        None => NVec2::zeros(),
    };
    let mut body = Body::new(
        vec2("bodies.x", &bc.x)?,
        v,
        positive("bodies.m", bc.m)?,
        non_negative("bodies.radius", bc.radius)?,
    );
    if let Some(top) = bc.top_speed {
        body = body.with_top_speed(non_negative("bodies.top_speed", top)?);
    }
    Ok(orient(body, bc.orient))
}

fn orient(body: Body, o: OrientConfig) -> Body {
    match o {
        OrientConfig::None => body,
        OrientConfig::Spin => body.with_spin(),
        OrientConfig::Heading => body.with_heading(),
    }
}

/// Perlin takes a 32 bit seed; fold the high half in so every seed bit counts
fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}

/// Add the balloon's body to the system and give it the launch impulse
fn launch_balloon(bc: &BalloonConfig, system: &mut System) -> Result<Balloon, ConfigError> {
    let mut body = Body::new(
        vec2("balloons.x", &bc.x)?,
        NVec2::zeros(),
        positive("balloons.m", bc.m)?,
        non_negative("balloons.radius", bc.radius)?,
    );
    let balloon = Balloon {
        body: system.bodies.len(),
        helium: vec2("balloons.helium", &bc.helium)?,
        gravity: vec2("balloons.gravity", &bc.gravity)?,
        bounce: vec2("balloons.bounce", &bc.bounce)?,
        debounce: vec2("balloons.debounce", &bc.debounce)?,
        ceiling: bc.ceiling,
        debouncing: false,
    };
    balloon.launch(&mut body);
    system.bodies.push(body);
    Ok(balloon)
}

fn spawn_bodies(spawn: &SpawnConfig, rng: &mut StdRng, bodies: &mut Vec<Body>) -> Result<(), ConfigError> {
    let (m_lo, m_hi) = range("spawn.mass", spawn.mass)?;
    positive("spawn.mass", m_lo)?;
    let (x_lo, x_hi) = range("spawn.x", spawn.x)?;
    let (y_lo, y_hi) = range("spawn.y", spawn.y)?;
    let (s_lo, s_hi) = range("spawn.speed", spawn.speed)?;
    non_negative("spawn.speed", s_lo)?;
    let radius_per_mass = non_negative("spawn.radius_per_mass", spawn.radius_per_mass)?;
    let top_speed = spawn.top_speed.map(|t| non_negative("spawn.top_speed", t)).transpose()?;

    bodies.reserve(spawn.count);
    for _ in 0..spawn.count {
        let m = uniform(rng, m_lo, m_hi);
        let x = NVec2::new(uniform(rng, x_lo, x_hi), uniform(rng, y_lo, y_hi));
        let theta = rng.gen_range(0.0..std::f64::consts::TAU);
        let v = NVec2::new(theta.cos(), theta.sin()) * uniform(rng, s_lo, s_hi);

        let mut body = Body::new(x, v, m, m * radius_per_mass);
        if let Some(top) = top_speed {
            body = body.with_top_speed(top);
        }
        bodies.push(orient(body, spawn.orient));
    }
    Ok(())
}

/// Uniform draw in `[lo, hi)`, or `lo` for an empty range
fn uniform(rng: &mut StdRng, lo: f64, hi: f64) -> f64 {
    if hi > lo { rng.gen_range(lo..hi) } else { lo }
}

fn region(field: &'static str, r: &RegionConfig) -> Result<Region, ConfigError> {
    Ok(Region {
        x: r.x,
        y: r.y,
        w: non_negative(field, r.w)?,
        h: non_negative(field, r.h)?,
    })
}

fn clamp(field: &'static str, c: [f64; 2]) -> Result<DistanceClamp, ConfigError> {
    let (min, max) = range(field, c)?;
    positive(field, min)?;
    Ok(DistanceClamp { min, max })
}

fn add_force(
    forces: AccelSet,
    cfg: &ForceConfig,
    canvas: &Canvas,
    noise: &Perlin,
    system: &mut System,
) -> Result<AccelSet, ConfigError> {
    let forces = match cfg {
        ForceConfig::Wind { f } => forces.with(Wind { f: vec2("wind.f", f)? }),
        ForceConfig::Weight { g } => forces.with(Weight { g: vec2("weight.g", g)? }),
        ForceConfig::ConstantAccel { a } => forces.with(ConstantAccel { a: vec2("constant_accel.a", a)? }),
        ForceConfig::Friction { mu } => forces.with(Friction { mu: non_negative("friction.mu", *mu)? }),
        ForceConfig::Drag { region: r, c } => forces.with(Drag {
            region: region("drag.region", r)?,
            c: non_negative("drag.c", *c)?,
        }),
        ForceConfig::Pocket { region: r, magnitude } => forces.with(Pocket {
            region: region("pocket.region", r)?,
            magnitude: *magnitude,
        }),
        ForceConfig::Attractor { x, m, g, clamp: c, follow_pointer } => forces.with(Attractor {
            x: vec2("attractor.x", x)?,
            m: positive("attractor.m", *m)?,
            g: *g,
            clamp: clamp("attractor.clamp", *c)?,
            follow_pointer: *follow_pointer,
        }),
        ForceConfig::Mutual { g, clamp: c } => forces.with(MutualAttraction {
            g: *g,
            clamp: clamp("mutual.clamp", *c)?,
        }),
        ForceConfig::NoiseWander { step, range } => forces.with(NoiseWander {
            noise: noise.clone(),
            step: *step,
            range: non_negative("noise_wander.range", *range)?,
        }),
        ForceConfig::Seek { magnitude } => forces.with(Seek { magnitude: *magnitude }),
        ForceConfig::PointerWind { f } => forces.with(PointerWind { f: *f }),
        ForceConfig::Thrust { a } => {
            // the keyboard steers the pointer copy, the term only reads it
            system.pointer.thrust = vec2("thrust.a", a)?;
            forces.with(Thrust)
        }
        ForceConfig::Restoring { margin, strength } => forces.with(Restoring {
            canvas: *canvas,
            margin: positive("restoring.margin", *margin)?,
            strength: *strength,
        }),
    };
    Ok(forces)
}

fn build_policy(p: WalkPolicyConfig) -> Result<WalkPolicy, ConfigError> {
    Ok(match p {
        WalkPolicyConfig::Uniform => WalkPolicy::Uniform,
        WalkPolicyConfig::RightLean => WalkPolicy::RightLean,
        WalkPolicyConfig::Gaussian { sd } => WalkPolicy::Gaussian(Normal::new(0.0, positive("gaussian.sd", sd)?)?),
        WalkPolicyConfig::Levy { long_step } => WalkPolicy::Levy {
            long_step: non_negative("levy.long_step", long_step)?,
        },
        WalkPolicyConfig::TowardPointer => WalkPolicy::TowardPointer,
        WalkPolicyConfig::NoisePosition { step } => WalkPolicy::NoisePosition { step },
        WalkPolicyConfig::NoiseStep { step } => WalkPolicy::NoiseStep { step },
        WalkPolicyConfig::PointerPull => WalkPolicy::PointerPull,
    })
}
