mod cli;

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use inbot::config::Config;
use inbot::indexa::{self, IndexaClient};
use inbot::performance::PerformanceFetcher;
use inbot::{render, Handler, Invocation};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr: stdout carries the response only
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Invoke { timeout_secs } => {
            let config = Config::load(cli.config.as_deref())?;
            handle_invoke(&config, timeout_secs.map(Duration::from_secs)).await
        }
        Commands::Show { json } => {
            let config = Config::load(cli.config.as_deref())?;
            handle_show(&config, json).await
        }
        Commands::Render { file } => handle_render(&file),
    }
}

fn build_client(config: &Config) -> Result<IndexaClient> {
    debug!("Using Indexa Capital API at {}", config.api_url);
    IndexaClient::new(&config.api_url, config.timeout())
}

/// One trigger invocation; Ctrl-C cancels the upstream calls
async fn handle_invoke(config: &Config, timeout: Option<Duration>) -> Result<()> {
    let handler = Handler::new(build_client(config)?, config.credentials());

    let mut invocation = Invocation::new();
    if let Some(timeout) = timeout {
        invocation = invocation.with_timeout(timeout);
    }
    let (invocation, cancel) = invocation.cancellable();

    let response = tokio::select! {
        response = handler.handle(&invocation) => response,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupted, cancelling invocation");
            cancel.cancel();
            handler.handle(&invocation).await
        }
    };

    println!(
        "{}",
        serde_json::to_string_pretty(&response).context("Failed to serialize response")?
    );
    Ok(())
}

async fn handle_show(config: &Config, json: bool) -> Result<()> {
    let fetcher = PerformanceFetcher::new(build_client(config)?);
    let metrics = fetcher
        .get_performance(&config.credentials(), &Invocation::new())
        .await
        .context("Failed to fetch performance from Indexa Capital")?;

    if json {
        println!("{}", cli::formatters::format_performance_json(&metrics));
    } else {
        println!("{}", cli::formatters::format_performance_table(&metrics));
    }
    Ok(())
}

fn handle_render(file: &Path) -> Result<()> {
    let body = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let metrics = indexa::parse_performance(&body)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    let payload = render::render(&metrics);
    println!(
        "{}",
        serde_json::to_string_pretty(&payload).context("Failed to serialize message")?
    );
    Ok(())
}
