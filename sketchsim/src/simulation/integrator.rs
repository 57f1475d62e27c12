//! Fixed-step frame integrator shared by every sketch
//!
//! One call is one animation frame: forces are gathered from a snapshot of
//! the system, then every body takes an explicit Euler step with a frame
//! time of exactly 1.

use super::engine::Engine;
use super::forces::AccelSet;
use super::states::{limit, NVec2, System};

/// Advance the system by one frame
/// Updates velocities, positions, spins and `sys.frame` in-place
pub fn euler_integrator(sys: &mut System, forces: &AccelSet, engine: &Engine) {
    let n = sys.bodies.len();
    if n == 0 { // nothing to move, the clock still runs
        sys.frame += 1;
        return;
    }

    // a[i] holds the summed F/m of every term for body i at this frame
    let mut accels = vec![NVec2::zeros(); n];
    forces.accumulate_accels(sys.frame, &*sys, &mut accels);

    for (b, a) in sys.bodies.iter_mut().zip(accels.iter()) {
        b.a += *a;

        // v_n+1 = v_n + a_n, capped at top speed
        b.v += b.a;
        if let Some(top) = b.top_speed {
            limit(&mut b.v, top);
        }

        // x_n+1 = x_n + v_n+1
        b.x += b.v;

        if let Some(spin) = b.spin.as_mut() {
            spin.update(&b.a);
        }

        // forces are re-applied every frame
        b.a = NVec2::zeros();

        engine.boundary.apply(b, &engine.canvas);
    }

    sys.frame += 1;
}
