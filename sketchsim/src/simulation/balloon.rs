//! Helium balloon: one launch impulse, then a soft bounce off the ceiling
//!
//! Lift and gravity are applied once, so the balloon rises at a constant
//! speed. Near the top it gets a downward kick, then a small upward push
//! each frame until it is rising at its launch speed again.

use crate::simulation::states::{Body, NVec2};

#[derive(Debug, Clone)]
pub struct Balloon {
    pub body: usize, // index into `System::bodies`
    pub helium: NVec2,
    pub gravity: NVec2,
    pub bounce: NVec2, // kick applied on reaching the ceiling
    pub debounce: NVec2, // per-frame push while recovering
    pub ceiling: f64, // y below which the bounce fires
    pub debouncing: bool,
}

impl Balloon {
    /// Launch impulse, consumed by the next integration step
    pub fn launch(&self, body: &mut Body) {
        body.apply_force(self.helium);
        body.apply_force(self.gravity);
    }

    /// Vertical speed right after launch
    pub fn rise_speed(&self, body: &Body) -> f64 {
        (self.helium.y + self.gravity.y) / body.m
    }

    /// Run after the body has been integrated; queues forces for the next frame
    pub fn check_top(&mut self, body: &mut Body) {
        if self.debouncing {
            let rise = self.rise_speed(body);
            if body.v.y <= rise {
                self.debouncing = false;
                body.v.y = rise;
            } else {
                body.apply_force(self.debounce);
            }
        }

        if body.x.y < self.ceiling && !self.debouncing {
            body.apply_force(self.bounce);
            self.debouncing = true;
        }
    }
}
