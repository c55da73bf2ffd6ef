use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;

use shelf::app::{App, AppEvent};
use shelf::config::Config;
use shelf::source::{build_client, CatalogSource, FileSource, HttpSource};
use shelf::ui;

/// Get the config directory path (~/.config/shelf/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("shelf"))
}

#[derive(Parser, Debug)]
#[command(name = "shelf", about = "Terminal product catalog viewer")]
struct Args {
    /// Catalog endpoint URL (overrides the config file)
    #[arg(long, value_name = "URL", conflicts_with = "file")]
    endpoint: Option<String>,

    /// Read the catalog from a local JSON export instead of the endpoint
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Config file path (default: ~/.config/shelf/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never interleave with the TUI frame
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config_path = match args.config {
        Some(path) => path,
        None => get_config_dir()?.join("config.toml"),
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;

    if let Some(path) = args.file {
        let source = FileSource::new(path);
        tracing::info!(path = %source.path().display(), "Using local catalog file");
        return run(config, source).await;
    }

    let Some(endpoint) = args.endpoint.or_else(|| config.endpoint.clone()) else {
        eprintln!("Error: No catalog source configured.");
        eprintln!();
        eprintln!("Pass one on the command line:");
        eprintln!("  shelf --endpoint https://example.com/produtos");
        eprintln!("  shelf --file catalog.json");
        eprintln!();
        eprintln!("Or set `endpoint` in {}", config_path.display());
        std::process::exit(1);
    };

    // Refuse anything that is not an absolute http(s) URL up front
    let url = url::Url::parse(&endpoint).context("Invalid endpoint URL")?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("Endpoint must use http or https, got {}", url.scheme());
    }

    let client = build_client().context("Failed to create HTTP client")?;
    let source = HttpSource::new(client, url.as_str()).with_timeout(config.request_timeout());
    tracing::info!(endpoint = %source.url(), "Using catalog endpoint");
    run(config, source).await
}

async fn run<S: CatalogSource>(config: Config, source: S) -> Result<()> {
    let mut app = App::new(config);

    // Create event channel for background tasks
    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);

    app.start(Arc::new(source), &event_tx);
    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
