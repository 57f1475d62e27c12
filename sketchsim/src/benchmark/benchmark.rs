use std::time::Instant;

use crate::simulation::boundary::Boundary;
use crate::simulation::engine::{Canvas, Engine};
use crate::simulation::forces::{AccelSet, Acceleration, DistanceClamp, MutualAttraction, Weight};
use crate::simulation::integrator::euler_integrator;
use crate::simulation::states::{Body, NVec2, System};

/// Helper to build a manual System of size `n`
/// deterministic positions spread over a 640x360 canvas, no rand needed
fn make_system(n: usize) -> System {
    let bodies = (0..n)
        .map(|i| {
            let i_f = i as f64;
            let x = NVec2::new(
                320.0 + (i_f * 0.37).sin() * 300.0,
                180.0 + (i_f * 0.13).cos() * 170.0,
            );
            Body::new(x, NVec2::zeros(), 1.0 + (i_f * 0.07).sin().abs(), 8.0)
        })
        .collect();

    System {
        bodies,
        ..Default::default()
    }
}

fn make_engine() -> Engine {
    Engine {
        canvas: Canvas { width: 640.0, height: 360.0 },
        boundary: Boundary::Wrap,
    }
}

/// Time the pairwise attraction alone and a full frame step for growing n
/// Output is CSV so it can be pasted straight into a spreadsheet
pub fn bench_mutual_attraction() {
    println!("N,force_ms,step_ms");

    for n in [50, 100, 200, 400, 800, 1600, 3200] {
        let sys = make_system(n);
        let mutual = MutualAttraction {
            g: 0.4,
            clamp: DistanceClamp::default(),
        };

        // Small n: average over a few passes to smooth noise
        let passes = if n <= 400 { 10 } else { 2 };

        let mut out = vec![NVec2::zeros(); n];
        mutual.acceleration(0, &sys, &mut out); // warm up

        let t0 = Instant::now();
        for frame in 0..passes {
            mutual.acceleration(frame, &sys, &mut out);
        }
        let force_ms = t0.elapsed().as_secs_f64() * 1000.0 / passes as f64;

        let mut sys_step = sys.clone();
        let engine = make_engine();
        let forces = AccelSet::new()
            .with(mutual)
            .with(Weight { g: NVec2::new(0.0, 0.01) });

        let t1 = Instant::now();
        for _ in 0..passes {
            euler_integrator(&mut sys_step, &forces, &engine);
        }
        let step_ms = t1.elapsed().as_secs_f64() * 1000.0 / passes as f64;

        println!("{},{:.6},{:.6}", n, force_ms, step_ms);
    }
}
