use jdmatch_core::{MatchResult, RequestError, Submission};

/// Commands sent from the TUI to the backend.
pub enum BackendCommand {
    /// Send a validated submission to the matching service.
    Submit(Submission),
}

/// Events flowing from the backend task to the TUI.
#[derive(Debug)]
pub enum BackendEvent {
    /// The request for submission `ticket` resolved.
    MatchFinished {
        ticket: u64,
        outcome: Result<MatchResult, RequestError>,
    },
}
