#![allow(non_snake_case)]

mod app;
mod context;
mod theme;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use cheerpaw_core::logging::LoggingBuilder;
use cheerpaw_core::{HttpCheerApi, InteractionConfig};
use dioxus::desktop::{Config, WindowBuilder};
use url::Url;

use crate::context::HostSettings;

/// Cheerpaw - cheer for your favourite animals
#[derive(Parser, Debug)]
#[command(name = "cheerpaw-desktop")]
#[command(about = "Cheerpaw - desktop client for the animal cheering site")]
struct Args {
    /// Base URL of the site
    #[arg(long, default_value = "http://127.0.0.1:8000/")]
    server: Url,

    /// Path to open first (e.g. /money/charge/)
    #[arg(long, default_value = "/")]
    start: String,

    /// Treat the viewer as signed in
    #[arg(long)]
    authenticated: bool,

    /// Cookie header to send (session and csrftoken)
    #[arg(long, default_value = "")]
    cookie: String,

    /// JSON file overriding interaction timings and endpoints
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for JSONL session logs
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Session name used in the log file name
    #[arg(long, default_value = "default")]
    session: String,

    /// Skip reveal animations
    #[arg(long)]
    reduced_motion: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_dir = args.log_dir.clone().unwrap_or_else(|| {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("cheerpaw")
            .join("logs")
    });
    if let Err(e) = LoggingBuilder::new(&log_dir, &args.session)
        .with_filter("cheerpaw=info,cheerpaw_core=debug")
        .init()
    {
        // Fall back to console-only logging
        let _ = tracing_subscriber::fmt().with_target(false).try_init();
        tracing::warn!("Failed to initialize JSONL logging: {}", e);
    }

    let config = match &args.config {
        Some(path) => InteractionConfig::from_json_file(path)?,
        None => InteractionConfig::default(),
    };
    config.validate()?;

    let start = args.server.join(&args.start)?;
    tracing::info!(
        server = %args.server,
        start = %start,
        authenticated = args.authenticated,
        "Starting Cheerpaw"
    );

    let api = HttpCheerApi::new(args.server.clone(), args.cookie.clone(), &config)?;

    context::install(
        HostSettings {
            start,
            cookies: args.cookie,
            authenticated: args.authenticated,
            reduced_motion: args.reduced_motion,
            config,
        },
        Arc::new(api),
    );

    let config = Config::new().with_window(
        WindowBuilder::new()
            .with_title("Cheerpaw")
            .with_inner_size(dioxus::desktop::LogicalSize::new(860.0, 960.0))
            .with_resizable(true),
    );

    dioxus::LaunchBuilder::desktop()
        .with_cfg(config)
        .launch(app::App);
    Ok(())
}
