use sketchsim::{bench_mutual_attraction, run_2d, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Vector, force and oscillation sketches")]
struct Args {
    /// Scenario file under scenarios/
    #[arg(short, default_value = "bounce.yaml")]
    file_name: String,

    /// Step without a window and log a summary
    #[arg(long)]
    headless: bool,

    /// Override the scenario's headless frame budget
    #[arg(long)]
    frames: Option<u64>,

    /// Time the mutual attraction and exit
    #[arg(long)]
    bench: bool,
}

// load here to keep main clean
fn load_scenario_from_yaml(file_name: &str) -> Result<ScenarioConfig> {
    let config_path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name);
    let file = File::open(&config_path).with_context(|| format!("opening {}", config_path.display()))?;
    let reader = BufReader::new(file);
    let scenario_cfg: ScenarioConfig =
        serde_yaml::from_reader(reader).with_context(|| format!("parsing {}", config_path.display()))?;

    Ok(scenario_cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_mutual_attraction();
        return Ok(());
    }

    let scenario_cfg = load_scenario_from_yaml(&args.file_name)?;
    let mut scenario = Scenario::build_scenario(scenario_cfg).with_context(|| format!("building {}", args.file_name))?;

    if args.headless {
        let frames = args.frames.unwrap_or(scenario.parameters.frames);
        info!(file = %args.file_name, frames, "running headless");
        scenario.advance(frames);
        info!("{}", scenario.summary());
    } else {
        run_2d(scenario);
    }

    Ok(())
}
