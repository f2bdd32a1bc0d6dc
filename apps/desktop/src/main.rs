use std::{path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use client_core::{
    load_settings_from, result_view, HttpTransport, SelectedFile, SelectionStore,
    SubmissionController, SubmissionOutcome,
};
use shared::protocol::DnaMatchingResponse;
use tracing_subscriber::EnvFilter;

/// Submit a DNA sequence to the matching service and print the analysis.
#[derive(Parser, Debug)]
struct Args {
    /// Sequence file to match (usually .txt).
    #[arg(long)]
    primary: Option<PathBuf>,
    /// Reference list to match against (usually .xlsx). The service uses its
    /// own database when omitted.
    #[arg(long)]
    reference: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    /// Settings file; defaults to ./dna_client.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Print the result as JSON in the service's wire shape.
    #[arg(long)]
    json: bool,
}

impl Args {
    fn selection(&self) -> SelectionStore {
        let mut store = SelectionStore::new();
        if let Some(path) = &self.primary {
            store.set_primary(SelectedFile::from_path(path));
        }
        store.set_reference(self.reference.as_ref().map(SelectedFile::from_path));
        store
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();
    let args = Args::parse();

    let settings = load_settings_from(args.config.as_deref())?
        .with_server_url(args.server_url.as_deref())?;
    tracing::info!(server_url = %settings.server_url, "using analysis service");

    let transport = HttpTransport::new(&settings.server_url);
    let store = args.selection();
    let mut controller = SubmissionController::new();

    if let Err(notice) = controller.submit(&store, &transport).await {
        eprintln!("{notice} (pass --primary <file>)");
        return Ok(ExitCode::from(2));
    }

    match controller.outcome() {
        SubmissionOutcome::Success(result) if args.json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&DnaMatchingResponse::from(result))?
            );
            Ok(ExitCode::SUCCESS)
        }
        outcome => {
            for line in result_view::render(outcome).to_lines() {
                println!("{line}");
            }
            Ok(if matches!(outcome, SubmissionOutcome::Failure(_)) {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
    }
}
