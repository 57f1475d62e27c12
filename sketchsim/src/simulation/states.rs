//! Core state types for the sketches.
//!
//! - `Body`    a mover with position, velocity and an acceleration accumulator
//! - `Spin`    optional angular state carried by a body
//! - `Pointer` the input snapshot force terms are allowed to read
//! - `System`  the body population, frame counter and pointer
//!
//! Positions are canvas coordinates: origin top-left, y grows downward.

use nalgebra::Vector2;
pub type NVec2 = Vector2<f64>;

/// Unit vector along `v`, or zero when `v` has no length
pub fn unit_or_zero(v: &NVec2) -> NVec2 {
    v.try_normalize(0.0).unwrap_or_else(NVec2::zeros)
}

/// Rescale `v` to `max` if it is longer than `max`
pub fn limit(v: &mut NVec2, max: f64) {
    let n2 = v.norm_squared();
    if n2 > max * max {
        *v *= max / n2.sqrt();
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Spin {
    pub angle: f64,
    pub velocity: f64,
    pub acceleration: f64,
}

/// Bound on angular velocity for spinning bodies
pub const MAX_SPIN: f64 = 0.1;

impl Spin {
    /// Angular acceleration follows the horizontal acceleration of the body
    pub fn update(&mut self, a: &NVec2) {
        self.acceleration = a.x / 10.0;
        self.velocity = (self.velocity + self.acceleration).clamp(-MAX_SPIN, MAX_SPIN);
        self.angle += self.velocity;
    }
}

/// What the drawn rotation of a body follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Fixed,
    Spin, // accumulated spin angle
    Heading, // direction of travel
}

#[derive(Debug, Clone)]
pub struct Body {
    pub x: NVec2, // position
    pub v: NVec2, // velocity
    pub a: NVec2, // acceleration accumulator, zero between frames
    pub m: f64, // mass
    pub radius: f64, // drawing radius
    pub top_speed: Option<f64>,
    pub spin: Option<Spin>,
    pub facing: Facing,
}

impl Body {
    pub fn new(x: NVec2, v: NVec2, m: f64, radius: f64) -> Self {
        Self {
            x,
            v,
            a: NVec2::zeros(),
            m,
            radius,
            top_speed: None,
            spin: None,
            facing: Facing::Fixed,
        }
    }

    pub fn with_top_speed(mut self, top_speed: f64) -> Self {
        self.top_speed = Some(top_speed);
        self
    }

    pub fn with_spin(mut self) -> Self {
        self.spin = Some(Spin::default());
        self.facing = Facing::Spin;
        self
    }

    /// Draw rotated along the velocity
    pub fn with_heading(mut self) -> Self {
        self.facing = Facing::Heading;
        self
    }

    /// a += F / m
    pub fn apply_force(&mut self, f: NVec2) {
        self.a += f / self.m;
    }

    /// Direction of travel in radians
    pub fn heading(&self) -> f64 {
        self.v.y.atan2(self.v.x)
    }

    pub fn speed(&self) -> f64 {
        self.v.norm()
    }

    /// Drawing angle in radians, `None` for bodies drawn unrotated
    pub fn orientation(&self) -> Option<f64> {
        match self.facing {
            Facing::Fixed => None,
            Facing::Spin => self.spin.map(|s| s.angle),
            Facing::Heading => Some(self.heading()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
}

/// Limit on how far the thrust can be pulled upward (negative y)
const THRUST_FLOOR: f64 = -1.0;
const THRUST_STEP: f64 = 0.01;

/// Input state written by the viewer once per frame
#[derive(Debug, Clone, Default)]
pub struct Pointer {
    pub position: Option<NVec2>,
    pub pressed: Option<PointerButton>,
    pub thrust: NVec2,
}

impl Pointer {
    pub fn thrust_increase(&mut self) {
        self.thrust.y += THRUST_STEP;
    }

    pub fn thrust_reduce(&mut self) {
        if self.thrust.y > THRUST_FLOOR {
            self.thrust.y -= THRUST_STEP;
        }
    }

    pub fn thrust_left(&mut self) {
        if self.thrust.x > 0.0 {
            self.thrust.x = -self.thrust.x;
        }
    }

    pub fn thrust_right(&mut self) {
        if self.thrust.x < 0.0 {
            self.thrust.x = -self.thrust.x;
        }
    }
}

/// Axis-aligned rectangle in canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Region {
    /// Strictly inside, edges excluded
    pub fn contains(&self, p: &NVec2) -> bool {
        p.x > self.x && p.x < self.x + self.w && p.y > self.y && p.y < self.y + self.h
    }

    /// Inside `[x, x + w) x [y, y + h)`
    pub fn contains_half_open(&self, p: &NVec2) -> bool {
        p.x >= self.x && p.x < self.x + self.w && p.y >= self.y && p.y < self.y + self.h
    }

    pub fn center(&self) -> NVec2 {
        NVec2::new(self.x + 0.5 * self.w, self.y + 0.5 * self.h)
    }
}

#[derive(Debug, Clone, Default)]
pub struct System {
    pub bodies: Vec<Body>, // collection of movers
    pub frame: u64, // frames stepped so far
    pub pointer: Pointer,
}
