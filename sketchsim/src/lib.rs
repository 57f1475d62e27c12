pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, Facing, NVec2, Pointer, PointerButton, Region, Spin, System};
pub use simulation::balloon::Balloon;
pub use simulation::forces::{Acceleration, AccelSet, Overlay};
pub use simulation::integrator::euler_integrator;
pub use simulation::boundary::{Boundary, Inset};
pub use simulation::scenario::{Scenario, Summary};

pub use configuration::config::{ConfigError, ScenarioConfig};

pub use visualization::vis2d::run_2d;

pub use benchmark::benchmark::bench_mutual_attraction;
