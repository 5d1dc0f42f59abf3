//! Cube Timer - Unified CLI
//!
//! Scramble service, terminal timer, and one-shot scramble generation.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use cube_scramble::{RngEntropy, ScrambleGenerator};
use cube_timer::tui::{ScrambleClient, ScrambleSource};
use cube_timer::{AppState, ServiceConfig, router};
use std::path::PathBuf;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Serve { config, host, port } => run_server(config, host, port).await,
        Command::Tui { server_url, length } => run_tui(server_url, length).await,
        Command::Generate {
            length,
            count,
            seed,
        } => run_generate(length, count, seed),
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Run the scramble HTTP service
#[instrument(skip_all)]
async fn run_server(
    config_path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    init_tracing();

    let mut config = match &config_path {
        Some(path) => ServiceConfig::from_file(path)?,
        None => ServiceConfig::default(),
    }
    .override_port(std::env::var("PORT").ok());
    if let Some(host) = host {
        config = config.with_host(host);
    }
    if let Some(port) = port {
        config = config.with_port(port);
    }

    let addr = format!("{}:{}", config.host(), config.port());
    info!(
        addr = %addr,
        allowed_origins = ?config.allowed_origins(),
        "Starting scramble service"
    );

    let app = router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server ready at http://{}/", addr);
    info!("To get a scramble, visit: http://{}/api/scramble", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Run the terminal timer
async fn run_tui(server_url: Option<String>, length: usize) -> Result<()> {
    let config = ServiceConfig::default();
    check_range("length", length, config.length_range())?;

    let source = match server_url {
        Some(url) => ScrambleSource::Remote(ScrambleClient::new(url, length)),
        None => ScrambleSource::Local {
            generator: config.generator(),
            length,
        },
    };

    cube_timer::tui::run_tui(source).await
}

/// Print scrambles to stdout
fn run_generate(length: usize, count: usize, seed: Option<u64>) -> Result<()> {
    let config = ServiceConfig::default();
    check_range("length", length, config.length_range())?;
    check_range("count", count, config.count_range())?;

    let generator = ScrambleGenerator::default();
    let scrambles = match seed {
        Some(seed) => generator.generate_batch(count, length, RngEntropy::seeded(seed)),
        None => generator.generate_batch(count, length, RngEntropy::from_os()?),
    };

    for scramble in scrambles {
        println!("{}", scramble);
    }
    Ok(())
}

fn check_range(
    parameter: &str,
    value: usize,
    range: std::ops::RangeInclusive<usize>,
) -> Result<()> {
    if !range.contains(&value) {
        bail!(
            "{} must be an integer between {} and {}",
            parameter,
            range.start(),
            range.end()
        );
    }
    Ok(())
}
