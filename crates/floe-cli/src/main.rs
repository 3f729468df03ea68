mod config;

use clap::Parser;
use config::CliArgs;
use floe::{SnowflakeGenerator, WallClock};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load from .env
    let _ = dotenvy::dotenv();
    let args = CliArgs::parse();

    init_tracing();

    let clock = match args.epoch() {
        Some(epoch) => WallClock::with_epoch(epoch),
        None => WallClock::default(),
    };
    let generator = SnowflakeGenerator::new(args.datacenter_id, args.machine_id, clock)?;

    tracing::debug!(
        datacenter_id = generator.datacenter_id(),
        machine_id = generator.machine_id(),
        count = args.count,
        "generator ready"
    );

    for _ in 0..args.count {
        let id = generator.generate_id()?;
        println!("Generated unique ID: {id}");
    }

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}
