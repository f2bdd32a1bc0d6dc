//! Runtime bridge between UI command queue and backend event intake.

use std::thread;

use client_core::{execute, HttpTransport};
use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. It owns the tokio runtime and processes
/// commands one at a time; every `Submit` produces exactly one
/// `SubmissionFinished` event.
pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, server_url: String) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        runtime.block_on(async move {
            let transport = HttpTransport::new(&server_url);
            tracing::info!(endpoint = transport.endpoint(), "backend worker ready");
            let _ = ui_tx.try_send(UiEvent::Info(format!(
                "Ready: analysis service at {server_url}"
            )));

            while let Ok(cmd) = cmd_rx.recv() {
                match cmd {
                    BackendCommand::Submit(pending) => {
                        let ticket = pending.ticket;
                        let result = execute(&transport, &pending).await;
                        if ui_tx
                            .send(UiEvent::SubmissionFinished { ticket, result })
                            .is_err()
                        {
                            tracing::debug!("ui event receiver dropped; stopping backend worker");
                            break;
                        }
                    }
                }
            }
        });
    });
}
