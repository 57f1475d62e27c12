//! High-level runtime engine settings
//!
//! Canvas size and the boundary policy applied after each integration step

use crate::simulation::boundary::Boundary;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Canvas {
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone)]
pub struct Engine {
    pub canvas: Canvas,
    pub boundary: Boundary,
}
