use anyhow::Result;
use clap::Parser;
use fruit_cart::{cli::{Args, CliApp}, utils::Config};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::from_env()?.with_catalog_path(args.catalog.clone())?;

    let filter = if args.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("🛒 Fruit Cart starting in {} environment", config.environment);

    let mut app = CliApp::new(config).map_err(|e| {
        tracing::error!("Failed to start: {:#}", e);
        e
    })?;
    app.run(args)?;

    tracing::info!("🛒 Fruit Cart stopped");
    Ok(())
}
