//! Run parameters for a scenario
//!
//! `Parameters` holds runtime settings:
//! - deterministic seed for spawning, walkers, stars and noise
//! - frame budget for headless runs

#[derive(Debug, Clone)]
pub struct Parameters {
    pub seed: u64, // deterministic seed
    pub frames: u64, // headless frame budget
}
