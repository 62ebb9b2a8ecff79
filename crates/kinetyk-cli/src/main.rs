//! Kinetyk CLI.
//!
//! `kinetyk build` runs the content pipeline; `kinetyk serve` answers read
//! requests against the last persisted snapshot; `kinetyk version` prints
//! the persisted dataset version.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::KinetykConfig;
use kinetyk_api::{AppState, serve};
use kinetyk_pipeline::{Pipeline, load_version};
use kinetyk_query::{QueryEngine, Snapshot};
use std::sync::Arc;
use tracing::info;

/// Kinetyk — exercise content pipeline and read API.
#[derive(Parser, Debug)]
#[command(name = "kinetyk")]
#[command(about = "Build and serve the exercise dataset", long_about = None)]
struct Args {
    /// Configuration file path (defaults to ./kinetyk.toml when present)
    #[arg(short, long, env = "KINETYK_CONFIG")]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the content pipeline: parse, enrich, validate, version, persist
    Build,
    /// Serve the read API over the last persisted snapshot
    Serve,
    /// Print the persisted dataset version
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    let config = KinetykConfig::load(args.config.as_deref())?;

    match args.command {
        Command::Build => {
            let report = Pipeline::new(config.pipeline).run()?;
            info!(
                discovered = report.discovered,
                valid = report.valid,
                invalid = report.invalid,
                changed = report.changed,
                version = %report.version,
                "build finished"
            );
        }
        Command::Serve => {
            let snapshot = Snapshot::load(&config.pipeline.dist_dir)?;
            info!(
                version = %snapshot.version(),
                exercises = snapshot.len(),
                "snapshot loaded"
            );
            let state = AppState::new(QueryEngine::new(Arc::new(snapshot)));
            serve(&config.server, state).await?;
        }
        Command::Version => match load_version(&config.pipeline.dist_dir)? {
            Some(version) => println!("{}", version.version),
            None => println!("no dataset has been built yet"),
        },
    }

    Ok(())
}
