#[macro_use]
extern crate log;

use anyhow::{Context, Result};
use serde::Deserialize;
use structopt::StructOpt;

use model::{collect_stops, telemetry, StopConfig};

#[derive(StructOpt)]
struct Args {
    /// The path to a CSV file of telemetry fixes
    #[structopt(long)]
    fixes: String,
    /// The path to a JSON file with stop detection settings
    #[structopt(long)]
    config: String,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::from_args();

    // Settings problems should surface before we bother parsing any telemetry
    let config = load_config(&args.config)?;

    let collection = telemetry::load(fs_err::File::open(&args.fixes)?)?;
    info!("Loaded {} tracks from {}", collection.len(), args.fixes);

    let stops = collect_stops(&collection, &config);
    info!(
        "{} of {} tracks are currently stationary",
        stops.len(),
        collection.len()
    );
    for record in &stops {
        info!(
            "{:?} last seen at ({}, {})",
            record.track_id,
            record.location.x(),
            record.location.y()
        );
    }
    Ok(())
}

/// The host hands over settings as a small JSON document, like
/// {"stop_duration": 12, "distance_tolerance": 100}
fn parse_config(raw: &str) -> Result<StopConfig> {
    let raw: RawConfig = serde_json::from_str(raw)?;
    Ok(StopConfig::new(raw.stop_duration, raw.distance_tolerance)?)
}

fn load_config(path: &str) -> Result<StopConfig> {
    parse_config(&fs_err::read_to_string(path)?).with_context(|| format!("Bad config {path}"))
}

#[derive(Deserialize)]
struct RawConfig {
    stop_duration: f64,
    distance_tolerance: f64,
}
