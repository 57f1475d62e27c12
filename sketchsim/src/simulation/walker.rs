//! Walkers: points that move by a sampled step each frame, no velocity or mass

use std::collections::VecDeque;

use noise::Perlin;
use rand::Rng;
use rand_distr::Normal;

use crate::simulation::engine::Canvas;
use crate::simulation::forces::{map_range, noise01};
use crate::simulation::states::{unit_or_zero, NVec2, Pointer};

/// Points kept for drawing a walker's path
pub const TRAIL_LEN: usize = 2_000;

const NOISE_Y_OFFSET: f64 = 10_000.0;

/// Pull strength next to the pointer and at a full canvas away
const PULL_NEAR: f64 = 10.0;
const PULL_FAR: f64 = 0.5;
/// Pull above this sends the walker to a random spot
const SCATTER_PULL: f64 = 9.9;

#[derive(Debug, Clone, Copy)]
pub enum WalkPolicy {
    /// dx, dy uniform in [-1, 1]
    Uniform,
    /// unit step: +x 40%, -x 20%, +y 20%, -y 20%
    RightLean,
    /// dx, dy normally distributed
    Gaussian(Normal<f64>),
    /// mostly tiny steps with rare jumps of `long_step`
    Levy { long_step: f64 },
    /// half the time drift toward the pointer, otherwise uniform
    TowardPointer,
    /// position read straight from noise across the canvas
    NoisePosition { step: f64 },
    /// step read from noise in [-1, 1]
    NoiseStep { step: f64 },
    /// jump toward the pointer, harder when closer; scatter when almost there
    PointerPull,
}

#[derive(Debug, Clone)]
pub struct Walker {
    pub x: NVec2,
    pub policy: WalkPolicy,
    pub noise_offset: f64, // separates noise tracks of different walkers
    pub trail: VecDeque<NVec2>,
}

impl Walker {
    pub fn new(x: NVec2, policy: WalkPolicy) -> Self {
        Self {
            x,
            policy,
            noise_offset: 0.0,
            trail: VecDeque::with_capacity(TRAIL_LEN),
        }
    }

    pub fn step<R: Rng>(&mut self, frame: u64, canvas: &Canvas, pointer: &Pointer, rng: &mut R, noise: &Perlin) {
        match self.policy {
            WalkPolicy::Uniform => {
                self.x += uniform_step(rng);
            }
            WalkPolicy::RightLean => {
                let r: f64 = rng.gen();
                let d = if r < 0.4 {
                    NVec2::new(1.0, 0.0)
                } else if r < 0.6 {
                    NVec2::new(-1.0, 0.0)
                } else if r < 0.8 {
                    NVec2::new(0.0, 1.0)
                } else {
                    NVec2::new(0.0, -1.0)
                };
                self.x += d;
            }
            WalkPolicy::Gaussian(normal) => {
                self.x += NVec2::new(rng.sample(normal), rng.sample(normal));
            }
            WalkPolicy::Levy { long_step } => {
                // accept-reject: small steps are likely, a big one slips through rarely
                let u: f64 = rng.gen();
                let p = u.powi(10);
                let size = if rng.gen::<f64>() > p { u } else { long_step };
                if size > 0.0 {
                    self.x += NVec2::new(rng.gen_range(-size..=size), rng.gen_range(-size..=size));
                }
            }
            WalkPolicy::TowardPointer => match pointer.position {
                Some(target) if rng.gen_bool(0.5) => {
                    let dx = toward(target.x, self.x.x, rng.gen());
                    let dy = toward(target.y, self.x.y, rng.gen());
                    self.x += NVec2::new(dx, dy);
                }
                _ => self.x += uniform_step(rng),
            },
            WalkPolicy::NoisePosition { step } => {
                let t = self.noise_offset + frame as f64 * step;
                self.x = NVec2::new(
                    map_range(noise01(noise, t), 0.0, 1.0, 0.0, canvas.width),
                    map_range(noise01(noise, t + NOISE_Y_OFFSET), 0.0, 1.0, 0.0, canvas.height),
                );
            }
            WalkPolicy::NoiseStep { step } => {
                let t = self.noise_offset + frame as f64 * step;
                self.x += NVec2::new(
                    map_range(noise01(noise, t), 0.0, 1.0, -1.0, 1.0),
                    map_range(noise01(noise, t + NOISE_Y_OFFSET), 0.0, 1.0, -1.0, 1.0),
                );
            }
            WalkPolicy::PointerPull => {
                if let Some(target) = pointer.position {
                    let d = target - self.x;
                    let strength = pull_strength(&d, canvas);
                    if strength > SCATTER_PULL {
                        self.x = NVec2::new(rng.gen_range(0.0..canvas.width), rng.gen_range(0.0..canvas.height));
                    }
                    // direction is taken before any scatter
                    self.x += unit_or_zero(&d) * strength;
                    self.x.x = reenter(self.x.x, canvas.width);
                    self.x.y = reenter(self.x.y, canvas.height);
                }
            }
        }

        if self.trail.len() == TRAIL_LEN {
            self.trail.pop_front();
        }
        self.trail.push_back(self.x);
    }
}

/// Pull for offset `d` to the pointer, linear in the Manhattan distance
pub fn pull_strength(d: &NVec2, canvas: &Canvas) -> f64 {
    map_range(d.x.abs() + d.y.abs(), 0.0, canvas.width + canvas.height, PULL_NEAR, PULL_FAR)
}

/// `r` in the direction of `target`; a walker level with it steps back
fn toward(target: f64, from: f64, r: f64) -> f64 {
    if target > from { r } else { -r }
}

/// Leaving one edge restarts at the opposite one
fn reenter(p: f64, extent: f64) -> f64 {
    if p > extent {
        0.0
    } else if p < 0.0 {
        extent
    } else {
        p
    }
}

fn uniform_step<R: Rng>(rng: &mut R) -> NVec2 {
    NVec2::new(rng.gen_range(-1.0..=1.0), rng.gen_range(-1.0..=1.0))
}
