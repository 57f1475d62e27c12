//! Star bursts spawned by pointer clicks
//!
//! Each star emits one random ray per frame until its counter runs out,
//! then it is dropped from the field.

use std::f64::consts::TAU;

use rand::Rng;
use tracing::debug;

use crate::simulation::states::NVec2;

#[derive(Debug, Clone)]
pub struct Star {
    pub x: NVec2,
    pub remaining: u32, // frames left to live
    pub max_radius: f64,
    pub rays: Vec<NVec2>, // ray end points, absolute
}

impl Star {
    fn emit<R: Rng>(&mut self, rng: &mut R) {
        let theta = rng.gen_range(0.0..TAU);
        let len = if self.max_radius > 0.0 { rng.gen_range(0.0..self.max_radius) } else { 0.0 };
        self.rays.push(self.x + NVec2::new(theta.cos(), theta.sin()) * len);
        self.remaining = self.remaining.saturating_sub(1);
    }
}

#[derive(Debug, Clone)]
pub struct StarField {
    pub lifetime: u32,
    pub radius: (f64, f64), // max radius drawn from [min, max)
    pub stars: Vec<Star>,
}

impl StarField {
    pub fn new(lifetime: u32, radius: (f64, f64)) -> Self {
        Self {
            lifetime,
            radius,
            stars: Vec::new(),
        }
    }

    pub fn spawn<R: Rng>(&mut self, x: NVec2, rng: &mut R) {
        let (lo, hi) = self.radius;
        let max_radius = if hi > lo { rng.gen_range(lo..hi) } else { lo };
        debug!(x = x.x, y = x.y, max_radius, "star spawned");
        self.stars.push(Star {
            x,
            remaining: self.lifetime,
            max_radius,
            rays: Vec::with_capacity(self.lifetime as usize),
        });
    }

    /// One ray per live star, then drop the spent ones in place
    pub fn step<R: Rng>(&mut self, rng: &mut R) {
        for star in self.stars.iter_mut() {
            star.emit(rng);
        }
        self.stars.retain(|s| s.remaining > 0);
    }

    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
