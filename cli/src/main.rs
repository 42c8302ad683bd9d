use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::{error, info};
use tracing_subscriber::EnvFilter;

use cartgeo::{builder::PipelineBuilder, config::Config};

/// Fetch users and carts, geocode users and store the enriched records.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to a JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    if let Err(e) = start(args).await {
        error!("{e:#}");
        std::process::exit(1);
    }
}

async fn start(args: Args) -> Result<()> {
    init_logger()?;

    info!("start running...");
    let config = Config::load(args.config.as_deref())?;
    let pipeline = PipelineBuilder::new(config).build().await?;
    let summary = pipeline.run().await?;

    info!(
        "done: {} users, {} carts, {} unknown countries, {} users without cart",
        summary.users, summary.carts, summary.unknown_countries, summary.users_without_cart
    );
    Ok(())
}

fn init_logger() -> Result<()> {
    tracing_log::LogTracer::init()?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}
