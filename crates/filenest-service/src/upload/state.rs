//! The single-slot transfer state machine.
//!
//! Every transition goes through [`TransferState::apply`]; anything not
//! listed in its table is rejected and leaves the state unchanged.

use serde::Serialize;
use thiserror::Error;

use super::staged::StagedFile;

/// Destination metadata supplied when confirming an upload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UploadMetadata {
    /// Destination folder path (empty for the root).
    pub path: String,
    /// Optional comment (empty for none).
    pub comment: String,
}

impl UploadMetadata {
    /// Metadata with surrounding whitespace trimmed from both fields.
    pub fn new(path: impl AsRef<str>, comment: impl AsRef<str>) -> Self {
        Self {
            path: path.as_ref().trim().to_string(),
            comment: comment.as_ref().trim().to_string(),
        }
    }
}

/// Where the one upload slot currently stands.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum TransferState {
    /// Nothing staged.
    #[default]
    Idle,
    /// A file is staged and waits for destination metadata.
    AwaitingMetadata {
        /// The staged file.
        file: StagedFile,
    },
    /// The transport is sending the file.
    InFlight {
        /// The file being sent.
        file: StagedFile,
        /// Destination folder path.
        destination: String,
        /// Comment sent with the file.
        comment: String,
        /// Fraction sent so far, in `[0, 1]` and never decreasing.
        progress: f64,
    },
    /// The last transfer failed; the file is kept for a retry.
    Failed {
        /// The file that failed to upload.
        file: StagedFile,
        /// Reason shown to the user.
        reason: String,
    },
}

/// Inputs to the transfer state machine.
#[derive(Debug, Clone)]
pub enum TransferEvent {
    /// Stage a new file.
    Stage(StagedFile),
    /// Confirm the staged file with its destination.
    Confirm(UploadMetadata),
    /// Transport progress report.
    Progress(f64),
    /// Transport finished successfully.
    Succeeded,
    /// Transport failed.
    Failed(String),
    /// Discard the staged or failed file.
    Cancel,
    /// Return a failed file to the confirmation step.
    Retry,
}

/// Why a transition was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// A transfer is in flight; nothing can be staged, confirmed or cancelled.
    #[error("an upload is already in progress")]
    Busy,
    /// Confirm was requested with no file awaiting metadata.
    #[error("no file is staged for upload")]
    NothingStaged,
    /// A progress or completion report arrived outside a transfer.
    #[error("no upload is in progress")]
    NotInFlight,
    /// Retry was requested without a failed transfer.
    #[error("there is no failed upload to retry")]
    NothingToRetry,
}

impl TransferState {
    /// Apply one event. On rejection the state is left as it was.
    pub fn apply(&mut self, event: TransferEvent) -> Result<(), Rejection> {
        let (next, outcome) = transition(std::mem::take(self), event);
        *self = next;
        outcome
    }

    /// Short state name for logs and status lines.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::AwaitingMetadata { .. } => "awaiting_metadata",
            Self::InFlight { .. } => "in_flight",
            Self::Failed { .. } => "failed",
        }
    }

    /// Whether a transfer is running.
    pub fn is_in_flight(&self) -> bool {
        matches!(self, Self::InFlight { .. })
    }

    /// The file occupying the slot, if any.
    pub fn file(&self) -> Option<&StagedFile> {
        match self {
            Self::Idle => None,
            Self::AwaitingMetadata { file }
            | Self::InFlight { file, .. }
            | Self::Failed { file, .. } => Some(file),
        }
    }

    /// Progress of the running transfer.
    pub fn progress(&self) -> Option<f64> {
        match self {
            Self::InFlight { progress, .. } => Some(*progress),
            _ => None,
        }
    }

    /// Reason of the last failure.
    pub fn failure(&self) -> Option<&str> {
        match self {
            Self::Failed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}

fn clamp_fraction(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn transition(
    state: TransferState,
    event: TransferEvent,
) -> (TransferState, Result<(), Rejection>) {
    use TransferEvent as E;
    use TransferState as S;

    match (state, event) {
        (state @ S::InFlight { .. }, E::Stage(_) | E::Confirm(_) | E::Cancel) => {
            (state, Err(Rejection::Busy))
        }
        (_, E::Stage(file)) => (S::AwaitingMetadata { file }, Ok(())),

        (S::AwaitingMetadata { file } | S::Failed { file, .. }, E::Confirm(meta)) => (
            S::InFlight {
                file,
                destination: meta.path,
                comment: meta.comment,
                progress: 0.0,
            },
            Ok(()),
        ),
        (S::Idle, E::Confirm(_)) => (S::Idle, Err(Rejection::NothingStaged)),

        (
            S::InFlight {
                file,
                destination,
                comment,
                progress,
            },
            E::Progress(fraction),
        ) => (
            S::InFlight {
                file,
                destination,
                comment,
                progress: progress.max(clamp_fraction(fraction)),
            },
            Ok(()),
        ),
        (S::InFlight { .. }, E::Succeeded) => (S::Idle, Ok(())),
        (S::InFlight { file, .. }, E::Failed(reason)) => (S::Failed { file, reason }, Ok(())),
        (state, E::Progress(_) | E::Succeeded | E::Failed(_)) => {
            (state, Err(Rejection::NotInFlight))
        }

        (_, E::Cancel) => (S::Idle, Ok(())),

        (S::Failed { file, .. }, E::Retry) => (S::AwaitingMetadata { file }, Ok(())),
        (state, E::Retry) => (state, Err(Rejection::NothingToRetry)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file() -> StagedFile {
        StagedFile::from_bytes("a.txt", &b"abc"[..])
    }

    fn in_flight() -> TransferState {
        let mut state = TransferState::Idle;
        state.apply(TransferEvent::Stage(file())).unwrap();
        state
            .apply(TransferEvent::Confirm(UploadMetadata::new("docs", "")))
            .unwrap();
        state
    }

    #[test]
    fn test_happy_path() {
        let mut state = in_flight();
        assert!(state.is_in_flight());
        state.apply(TransferEvent::Progress(0.5)).unwrap();
        assert_eq!(state.progress(), Some(0.5));
        state.apply(TransferEvent::Succeeded).unwrap();
        assert_eq!(state, TransferState::Idle);
    }

    #[test]
    fn test_stage_rejected_while_in_flight() {
        let mut state = in_flight();
        let before = state.clone();
        assert_eq!(
            state.apply(TransferEvent::Stage(StagedFile::from_bytes("b", &b"x"[..]))),
            Err(Rejection::Busy)
        );
        assert_eq!(state, before);
    }

    #[test]
    fn test_progress_clamped_and_monotone() {
        let mut state = in_flight();
        state.apply(TransferEvent::Progress(0.6)).unwrap();
        state.apply(TransferEvent::Progress(0.2)).unwrap();
        assert_eq!(state.progress(), Some(0.6));
        state.apply(TransferEvent::Progress(7.0)).unwrap();
        assert_eq!(state.progress(), Some(1.0));
        state.apply(TransferEvent::Progress(f64::NAN)).unwrap();
        assert_eq!(state.progress(), Some(1.0));
    }

    #[test]
    fn test_failure_keeps_file_for_retry() {
        let mut state = in_flight();
        state
            .apply(TransferEvent::Failed("HTTP: 500".to_string()))
            .unwrap();
        assert_eq!(state.failure(), Some("HTTP: 500"));
        assert_eq!(state.file().map(|f| f.name.as_str()), Some("a.txt"));

        state.apply(TransferEvent::Retry).unwrap();
        assert!(matches!(state, TransferState::AwaitingMetadata { .. }));
    }

    #[test]
    fn test_confirm_without_file() {
        let mut state = TransferState::Idle;
        assert_eq!(
            state.apply(TransferEvent::Confirm(UploadMetadata::default())),
            Err(Rejection::NothingStaged)
        );
        assert_eq!(state, TransferState::Idle);
    }

    #[test]
    fn test_cancel() {
        let mut state = TransferState::Idle;
        state.apply(TransferEvent::Stage(file())).unwrap();
        state.apply(TransferEvent::Cancel).unwrap();
        assert_eq!(state, TransferState::Idle);

        let mut busy = in_flight();
        assert_eq!(busy.apply(TransferEvent::Cancel), Err(Rejection::Busy));
        assert!(busy.is_in_flight());
    }

    #[test]
    fn test_metadata_trimmed() {
        let meta = UploadMetadata::new("  docs/2024 ", "  hi ");
        assert_eq!(meta.path, "docs/2024");
        assert_eq!(meta.comment, "hi");
    }
}
