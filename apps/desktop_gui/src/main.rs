use std::path::PathBuf;

mod backend_bridge;
mod controller;
mod ui;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use client_core::load_settings_from;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::ui::{DesktopGuiApp, StartupConfig};

const APP_TITLE: &str = "DNA Pattern Matching";

#[derive(Debug, Parser)]
#[command(name = "dna-matching-gui", about = "Desktop client for the DNA matching service")]
struct StartupArgs {
    /// Base URL of the analysis service, overriding config and environment.
    #[arg(long)]
    server_url: Option<String>,
    /// Path to a TOML settings file.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = StartupArgs::parse();
    let settings = load_settings_from(args.config.as_deref())
        .context("failed to load client settings")?
        .with_server_url(args.server_url.as_deref())
        .context("invalid --server-url")?;
    tracing::info!(server_url = %settings.server_url, "starting desktop client");

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(16);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(256);
    backend_bridge::runtime::launch(cmd_rx, ui_tx, settings.server_url.clone());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([760.0, 820.0])
            .with_min_inner_size([520.0, 560.0]),
        ..Default::default()
    };
    let startup = StartupConfig { settings };
    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |_cc| Ok(Box::new(DesktopGuiApp::bootstrap(cmd_tx, ui_rx, startup)))),
    )
    .map_err(|err| anyhow!("desktop client exited with error: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_args_accept_server_override_and_config() {
        let args = StartupArgs::try_parse_from([
            "dna-matching-gui",
            "--server-url",
            "http://analysis.local:9000",
            "--config",
            "custom.toml",
        ])
        .expect("parse");
        assert_eq!(args.server_url.as_deref(), Some("http://analysis.local:9000"));
        assert_eq!(args.config, Some(PathBuf::from("custom.toml")));
    }

    #[test]
    fn startup_args_default_to_no_overrides() {
        let args = StartupArgs::try_parse_from(["dna-matching-gui"]).expect("parse");
        assert!(args.server_url.is_none());
        assert!(args.config.is_none());
    }
}
