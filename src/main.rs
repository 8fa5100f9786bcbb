//! Headless host for the screensaver engine.
//!
//! Runs one session against a logging window until Ctrl-C, which plays the
//! role of the host's deactivation callback.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use fanart_screensaver::Screensaver;
use fanart_screensaver::config::{Configuration, Mode, SourceKind};
use fanart_screensaver::source::{FileLibrary, FsListing, ImageSource, JsonRpc};
use fanart_screensaver::window::LogWindow;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "fanart-screensaver",
    version,
    about = "Artwork screensaver engine with a logging window"
)]
struct Args {
    /// Path to YAML config
    #[arg(short, long, value_name = "FILE", default_value = "config.yaml")]
    config: PathBuf,

    /// Override the configured mode (e.g. star-wars)
    #[arg(long, value_name = "MODE", value_parser = parse_mode)]
    mode: Option<Mode>,

    /// Override the configured image source (e.g. image-folder)
    #[arg(long, value_name = "SOURCE", value_parser = parse_source)]
    source: Option<SourceKind>,

    /// Folder for the image-folder source
    #[arg(long, value_name = "DIR")]
    image_path: Option<PathBuf>,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn parse_mode(raw: &str) -> Result<Mode, String> {
    Mode::from_name(raw).map_err(|err| format!("{err}; expected one of {:?}", Mode::NAMES))
}

fn parse_source(raw: &str) -> Result<SourceKind, String> {
    SourceKind::from_name(raw)
        .map_err(|err| format!("{err}; expected one of {:?}", SourceKind::NAMES))
}

fn init_tracing(verbosity: u8) {
    let default = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let mut cfg = if args.config.exists() {
        Configuration::from_yaml_file(&args.config)
            .with_context(|| format!("failed to load configuration from {}", args.config.display()))?
    } else {
        warn!(path = %args.config.display(), "config file not found; using defaults");
        Configuration::default()
    };
    if let Some(mode) = args.mode {
        cfg.mode = mode;
    }
    if let Some(source) = args.source {
        cfg.source = source;
    }
    if let Some(path) = args.image_path {
        cfg.image_path = Some(path);
    }
    let cfg = cfg.validated().context("invalid configuration values")?;
    info!(mode = %cfg.mode, source = %cfg.source, "configuration loaded");

    let library: Arc<dyn JsonRpc> = match &cfg.library_file {
        Some(path) => Arc::new(FileLibrary::from_json_file(path)?),
        None => Arc::new(FileLibrary::default()),
    };
    let source = ImageSource::from_config(&cfg, library, Arc::new(FsListing));

    let mut screensaver = Screensaver::new(&cfg, source, LogWindow::new());
    let stop = screensaver.stop_handle();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!("ctrl-c handler failed: {err}");
            return;
        }
        info!("ctrl-c received; deactivating");
        stop.stop();
    });

    screensaver.run().await.context("screensaver session failed")?;
    Ok(())
}
