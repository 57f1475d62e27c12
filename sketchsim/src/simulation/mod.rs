pub mod states;
pub mod params;
pub mod engine;
pub mod boundary;
pub mod forces;
pub mod integrator;
pub mod oscillation;
pub mod walker;
pub mod stars;
pub mod balloon;
pub mod scenario;
