//! Force / acceleration contributors for the sketches
//!
//! Every term adds `F / m` per body into a shared acceleration buffer.
//! Terms never mutate the system; the integrator owns all state changes.

use noise::{NoiseFn, Perlin};

use crate::simulation::engine::Canvas;
use crate::simulation::states::{unit_or_zero, NVec2, PointerButton, Region, System};

/// Collection of acceleration terms (wind, gravity, drag, attraction, ...)
/// Each term implements [`Acceleration`] and their contributions are summed
/// into a single acceleration vector per body
pub struct AccelSet {
    terms: Vec<Box<dyn Acceleration + Send + Sync>>,
}

impl Default for AccelSet {
    fn default() -> Self {
        Self::new()
    }
}

impl AccelSet {
    /// Create an empty acceleration set
    pub fn new() -> Self {
        Self {
            terms: Vec::new()
        }
    }

    /// Add an acceleration term
    pub fn with<T>(mut self, term: T) -> Self
    where
        T: Acceleration + Send + Sync + 'static,
    {
        self.terms.push(Box::new(term));
        self
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Compute total accelerations at `frame` for all bodies in `sys`
    /// - `out[i]` will be set to the sum of contributions from all terms
    pub fn accumulate_accels(&self, frame: u64, sys: &System, out: &mut [NVec2]) {
        // Zero buffer
        for a in out.iter_mut() {
            *a = NVec2::zeros();
        }
        for term in &self.terms {
            term.acceleration(frame, sys, out);
        }
    }

    /// Things the viewer should draw for the active terms
    pub fn overlays<'a>(&'a self, sys: &'a System) -> impl Iterator<Item = Overlay> + 'a {
        self.terms.iter().filter_map(move |t| t.overlay(sys))
    }
}

/// Trait for acceleration sources operating on [`System`]
/// Implementations add their contribution into `out[i]` for each body
pub trait Acceleration {
    fn acceleration(&self, frame: u64, sys: &System, out: &mut [NVec2]);

    fn overlay(&self, _sys: &System) -> Option<Overlay> {
        None
    }
}

/// Visual footprint of a force source
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    Liquid(Region),
    Pocket { region: Region, boost: bool },
    Attractor { x: NVec2, m: f64 },
}

/// Distance bounds used by the inverse-square laws
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistanceClamp {
    pub min: f64,
    pub max: f64,
}

impl Default for DistanceClamp {
    fn default() -> Self {
        Self { min: 5.0, max: 25.0 }
    }
}

/// p5-style `map`: linear remap of `v` from `[a0, a1]` onto `[b0, b1]`
pub fn map_range(v: f64, a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    b0 + (v - a0) * (b1 - b0) / (a1 - a0)
}

/// 1D Perlin sample remapped into `[0, 1]`
pub fn noise01(noise: &Perlin, t: f64) -> f64 {
    ((noise.get([t, 0.0]) + 1.0) * 0.5).clamp(0.0, 1.0)
}

/// Inverse-square pull of `m_src` at `src` on `m` at `x`
fn attraction(src: &NVec2, m_src: f64, x: &NVec2, m: f64, g: f64, clamp: &DistanceClamp) -> NVec2 {
    let r = src - x;
    let d = r.norm().clamp(clamp.min, clamp.max);
    let strength = g * m_src * m / (d * d);
    unit_or_zero(&r) * strength
}

// =========================================================================================
// Constant forces
// =========================================================================================

/// Same force on every body, lighter bodies accelerate more
pub struct Wind {
    pub f: NVec2,
}

impl Acceleration for Wind {
    fn acceleration(&self, _frame: u64, sys: &System, out: &mut [NVec2]) {
        for (b, a) in sys.bodies.iter().zip(out.iter_mut()) {
            *a += self.f / b.m;
        }
    }
}

/// Gravity scaled by mass, so every body falls alike
pub struct Weight {
    pub g: NVec2,
}

impl Acceleration for Weight {
    fn acceleration(&self, _frame: u64, sys: &System, out: &mut [NVec2]) {
        for (b, a) in sys.bodies.iter().zip(out.iter_mut()) {
            let f = self.g * b.m;
            *a += f / b.m;
        }
    }
}

/// Fixed acceleration independent of mass
pub struct ConstantAccel {
    pub a: NVec2,
}

impl Acceleration for ConstantAccel {
    fn acceleration(&self, _frame: u64, _sys: &System, out: &mut [NVec2]) {
        for a in out.iter_mut() {
            *a += self.a;
        }
    }
}

// =========================================================================================
// Resistance
// =========================================================================================

/// Constant-magnitude friction against the direction of travel
pub struct Friction {
    pub mu: f64,
}

impl Acceleration for Friction {
    fn acceleration(&self, _frame: u64, sys: &System, out: &mut [NVec2]) {
        for (b, a) in sys.bodies.iter().zip(out.iter_mut()) {
            let f = unit_or_zero(&b.v) * -self.mu;
            *a += f / b.m;
        }
    }
}

/// Fluid drag `c |v|^2` opposing velocity inside a region
pub struct Drag {
    pub region: Region,
    pub c: f64,
}

impl Acceleration for Drag {
    fn acceleration(&self, _frame: u64, sys: &System, out: &mut [NVec2]) {
        for (b, a) in sys.bodies.iter().zip(out.iter_mut()) {
            if !self.region.contains(&b.x) {
                continue;
            }
            let speed2 = b.v.norm_squared();
            let f = unit_or_zero(&b.v) * (-self.c * speed2);
            *a += f / b.m;
        }
    }

    fn overlay(&self, _sys: &System) -> Option<Overlay> {
        Some(Overlay::Liquid(self.region))
    }
}

/// Region pushing along the velocity: negative magnitude is friction, positive a boost
pub struct Pocket {
    pub region: Region,
    pub magnitude: f64,
}

impl Pocket {
    /// Friction pockets include their top and left edges, boost pockets exclude every edge
    pub fn covers(&self, p: &NVec2) -> bool {
        if self.magnitude > 0.0 {
            self.region.contains(p)
        } else {
            self.region.contains_half_open(p)
        }
    }
}

impl Acceleration for Pocket {
    fn acceleration(&self, _frame: u64, sys: &System, out: &mut [NVec2]) {
        for (b, a) in sys.bodies.iter().zip(out.iter_mut()) {
            if self.covers(&b.x) {
                *a += unit_or_zero(&b.v) * self.magnitude / b.m;
            }
        }
    }

    fn overlay(&self, _sys: &System) -> Option<Overlay> {
        Some(Overlay::Pocket {
            region: self.region,
            boost: self.magnitude > 0.0,
        })
    }
}

// =========================================================================================
// Attraction
// =========================================================================================

/// Inverse-square attractor; optionally rides on the pointer
pub struct Attractor {
    pub x: NVec2,
    pub m: f64,
    pub g: f64,
    pub clamp: DistanceClamp,
    pub follow_pointer: bool,
}

impl Attractor {
    pub fn position(&self, sys: &System) -> NVec2 {
        match sys.pointer.position {
            Some(p) if self.follow_pointer => p,
            _ => self.x,
        }
    }
}

impl Acceleration for Attractor {
    fn acceleration(&self, _frame: u64, sys: &System, out: &mut [NVec2]) {
        let src = self.position(sys);
        for (b, a) in sys.bodies.iter().zip(out.iter_mut()) {
            let f = attraction(&src, self.m, &b.x, b.m, self.g, &self.clamp);
            *a += f / b.m;
        }
    }

    fn overlay(&self, sys: &System) -> Option<Overlay> {
        Some(Overlay::Attractor {
            x: self.position(sys),
            m: self.m,
        })
    }
}

/// Every body attracts every other body, direct n^2 sum
pub struct MutualAttraction {
    pub g: f64,
    pub clamp: DistanceClamp,
}

impl Acceleration for MutualAttraction {
    fn acceleration(&self, _frame: u64, sys: &System, out: &mut [NVec2]) {
        let n = sys.bodies.len();

        // Each unordered pair once; the pull on j is the reverse of the pull on i
        for i in 0..n {
            let bi = &sys.bodies[i];
            for j in (i + 1)..n {
                let bj = &sys.bodies[j];
                let f = attraction(&bj.x, bj.m, &bi.x, bi.m, self.g, &self.clamp);
                out[i] += f / bi.m;
                out[j] -= f / bj.m;
            }
        }
    }
}

// =========================================================================================
// Noise and input driven
// =========================================================================================

/// Separation between per-body noise tracks
const NOISE_TRACK_SPACING: f64 = 1_000.0;
/// Offset of the y track from the x track
const NOISE_Y_OFFSET: f64 = 10_000.0;

/// Acceleration sampled from Perlin noise along an advancing offset
pub struct NoiseWander {
    pub noise: Perlin,
    pub step: f64, // offset advance per frame
    pub range: f64, // output spans [-range, range]
}

impl NoiseWander {
    pub fn sample(&self, frame: u64, index: usize) -> NVec2 {
        let t = frame as f64 * self.step + index as f64 * NOISE_TRACK_SPACING;
        NVec2::new(
            map_range(noise01(&self.noise, t), 0.0, 1.0, -self.range, self.range),
            map_range(noise01(&self.noise, t + NOISE_Y_OFFSET), 0.0, 1.0, -self.range, self.range),
        )
    }
}

impl Acceleration for NoiseWander {
    fn acceleration(&self, frame: u64, _sys: &System, out: &mut [NVec2]) {
        for (i, a) in out.iter_mut().enumerate() {
            *a += self.sample(frame, i);
        }
    }
}

/// Fixed-magnitude acceleration toward the pointer
pub struct Seek {
    pub magnitude: f64,
}

impl Acceleration for Seek {
    fn acceleration(&self, _frame: u64, sys: &System, out: &mut [NVec2]) {
        let Some(target) = sys.pointer.position else {
            return;
        };
        for (b, a) in sys.bodies.iter().zip(out.iter_mut()) {
            *a += unit_or_zero(&(target - b.x)) * self.magnitude;
        }
    }
}

/// Horizontal wind while a pointer button is held: primary blows right, secondary left
pub struct PointerWind {
    pub f: f64,
}

impl Acceleration for PointerWind {
    fn acceleration(&self, _frame: u64, sys: &System, out: &mut [NVec2]) {
        let f = match sys.pointer.pressed {
            Some(PointerButton::Primary) => NVec2::new(self.f, 0.0),
            Some(PointerButton::Secondary) => NVec2::new(-self.f, 0.0),
            None => return,
        };
        for (b, a) in sys.bodies.iter().zip(out.iter_mut()) {
            *a += f / b.m;
        }
    }
}

/// Keyboard-steered acceleration held in `Pointer::thrust`
pub struct Thrust;

impl Acceleration for Thrust {
    fn acceleration(&self, _frame: u64, sys: &System, out: &mut [NVec2]) {
        for a in out.iter_mut() {
            *a += sys.pointer.thrust;
        }
    }
}

/// Invisible walls: inward push growing as a body nears an edge
pub struct Restoring {
    pub canvas: Canvas,
    pub margin: f64,
    pub strength: f64,
}

impl Restoring {
    /// Push for a body `d` away from an edge, zero outside the margin
    fn push(&self, d: f64) -> f64 {
        if d < self.margin {
            self.strength * (1.0 - d / self.margin)
        } else {
            0.0
        }
    }
}

impl Acceleration for Restoring {
    fn acceleration(&self, _frame: u64, sys: &System, out: &mut [NVec2]) {
        for (b, a) in sys.bodies.iter().zip(out.iter_mut()) {
            let fx = self.push(b.x.x) - self.push(self.canvas.width - b.x.x);
            let fy = self.push(b.x.y) - self.push(self.canvas.height - b.x.y);
            *a += NVec2::new(fx, fy) / b.m;
        }
    }
}
