//! Edge policies applied to each body after it has been integrated

use crate::simulation::engine::Canvas;
use crate::simulation::states::Body;

/// How far from the canvas edge a reflecting body turns around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Inset {
    #[default]
    Zero,
    Radius,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Boundary {
    /// Bodies may leave the canvas
    #[default]
    None,
    /// Leaving one edge re-enters at the opposite edge, carrying the excess over
    Wrap,
    /// Clamp to the edge and send the velocity component back inside
    Reflect { inset: Inset, open_top: bool },
}

impl Boundary {
    pub fn apply(&self, body: &mut Body, canvas: &Canvas) {
        match *self {
            Boundary::None => {}
            Boundary::Wrap => {
                body.x.x = wrap(body.x.x, canvas.width);
                body.x.y = wrap(body.x.y, canvas.height);
            }
            Boundary::Reflect { inset, open_top } => {
                let pad = match inset {
                    Inset::Zero => 0.0,
                    Inset::Radius => body.radius,
                };

                let (lo, hi) = (pad, canvas.width - pad);
                if body.x.x > hi {
                    body.x.x = hi;
                    body.v.x = -body.v.x.abs();
                } else if body.x.x < lo {
                    body.x.x = lo;
                    body.v.x = body.v.x.abs();
                }

                let (lo, hi) = (pad, canvas.height - pad);
                if body.x.y > hi {
                    body.x.y = hi;
                    body.v.y = -body.v.y.abs();
                } else if !open_top && body.x.y < lo {
                    body.x.y = lo;
                    body.v.y = body.v.y.abs();
                }
            }
        }
    }
}

/// One wrap per frame; a body never travels more than a canvas per step
fn wrap(p: f64, extent: f64) -> f64 {
    if p > extent {
        p - extent
    } else if p < 0.0 {
        p + extent
    } else {
        p
    }
}
