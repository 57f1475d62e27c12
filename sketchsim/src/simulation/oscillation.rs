//! Trigonometric motion without force integration

use std::f64::consts::TAU;

use crate::simulation::states::NVec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Axis {
    #[default]
    X,
    Y,
}

/// Simple harmonic offset from a rest point, closed form in the frame count
#[derive(Debug, Clone)]
pub struct Oscillator {
    pub amplitude: f64,
    pub period: f64, // frames per cycle
    pub axis: Axis,
}

impl Oscillator {
    pub fn offset(&self, frame: u64) -> NVec2 {
        let s = self.amplitude * (TAU * frame as f64 / self.period).cos();
        match self.axis {
            Axis::X => NVec2::new(s, 0.0),
            Axis::Y => NVec2::new(0.0, s),
        }
    }
}

/// Point moving in polar coordinates: a circle with `dr = 0`, a spiral otherwise
#[derive(Debug, Clone)]
pub struct PolarPath {
    pub r: f64,
    pub dr: f64,
    pub theta: f64,
    pub dtheta: f64,
}

impl PolarPath {
    /// Offset from the path center
    pub fn position(&self) -> NVec2 {
        NVec2::new(self.r * self.theta.cos(), self.r * self.theta.sin())
    }

    pub fn advance(&mut self) {
        self.theta += self.dtheta;
        self.r += self.dr;
    }
}

/// Angle driven by a constant angular acceleration
#[derive(Debug, Clone, Default)]
pub struct Rotor {
    pub angle: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

impl Rotor {
    pub fn advance(&mut self) {
        self.velocity += self.acceleration;
        self.angle += self.velocity;
    }
}
