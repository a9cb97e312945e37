//! # kitchen-sim
//!
//! Runs the kitchen simulation over an orders file and prints the final counters as JSON.
//!
//! ```bash
//! RUST_LOG=info kitchen-sim orders.json --seed 7
//! RUST_LOG=debug kitchen-sim orders.json --config kitchen.json
//! ```

use clap::Parser;
use kitchen_sim::config::KitchenConfig;
use kitchen_sim::lifecycle::Kitchen;
use kitchen_sim::source::read_orders;
use state_actor::tracing::setup_tracing;
use std::path::PathBuf;
use tracing::{info, Instrument};

#[derive(Parser, Debug)]
#[command(
    name = "kitchen-sim",
    version,
    about = "Simulates a kitchen's shelves under order arrivals and courier pickups"
)]
struct Args {
    /// JSON array of orders.
    orders: PathBuf,

    /// JSON kitchen configuration; defaults apply to every omitted field.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Seed for reproducible arrivals and pickup delays. Overrides the config's seed.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let args = Args::parse();
    setup_tracing();

    let mut config = match &args.config {
        Some(path) => KitchenConfig::from_file(path).map_err(|e| e.to_string())?,
        None => KitchenConfig::default(),
    };
    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let orders = read_orders(&args.orders).map_err(|e| e.to_string())?;
    info!(orders = orders.len(), path = %args.orders.display(), "Orders read");

    let mut kitchen = Kitchen::new(config).map_err(|e| e.to_string())?;
    kitchen.start(orders).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("simulation");
    kitchen
        .run_until_done()
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;

    let metrics = kitchen.shutdown().await.map_err(|e| e.to_string())?;
    let report = serde_json::to_string_pretty(&metrics).map_err(|e| e.to_string())?;
    println!("{}", report);

    info!(lost = metrics.lost(), "Simulation completed");
    Ok(())
}
