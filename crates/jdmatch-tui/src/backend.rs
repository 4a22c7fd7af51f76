use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use jdmatch_core::{MatchService, Submission};

use crate::tui_event::{BackendCommand, BackendEvent};

/// Receive commands until the channel closes or `cancel` fires. Each
/// submission runs in its own task so the listener keeps draining commands.
pub async fn run_command_loop(
    service: Arc<dyn MatchService>,
    mut cmd_rx: mpsc::UnboundedReceiver<BackendCommand>,
    event_tx: mpsc::UnboundedSender<BackendEvent>,
    cancel: CancellationToken,
) {
    loop {
        let cmd = tokio::select! {
            _ = cancel.cancelled() => break,
            cmd = cmd_rx.recv() => cmd,
        };
        match cmd {
            Some(BackendCommand::Submit(submission)) => {
                let service = Arc::clone(&service);
                let tx = event_tx.clone();
                tokio::spawn(async move {
                    run_submission(service.as_ref(), submission, &tx).await;
                });
            }
            None => break,
        }
    }
}

/// Send one request and report its outcome.
pub async fn run_submission(
    service: &dyn MatchService,
    submission: Submission,
    tx: &mpsc::UnboundedSender<BackendEvent>,
) {
    tracing::info!(ticket = submission.ticket, "sending match request");
    let outcome = service.match_resume(&submission.request).await;
    // Receiver gone means the TUI is shutting down.
    let _ = tx.send(BackendEvent::MatchFinished {
        ticket: submission.ticket,
        outcome,
    });
}
