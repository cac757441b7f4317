//! Upload coordinator: drag input, staging, confirmation and the transfer.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::mpsc;

use filenest_core::error::AppError;
use filenest_core::events::FileEvent;
use filenest_core::result::AppResult;
use filenest_core::traits::{ProgressFn, Transport, UploadRequest};
use filenest_core::types::FileRecord;

use super::drag::{DragEvent, DragTracker};
use super::staged::StagedFile;
use super::state::{Rejection, TransferEvent, TransferState, UploadMetadata};

/// Result of offering files to the coordinator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutcome {
    /// The first offered file is now awaiting metadata.
    Staged {
        /// Name of the staged file.
        name: String,
    },
    /// The offer contained no files.
    NothingOffered,
    /// An upload is in flight; the offer was ignored.
    Busy,
    /// The file exceeds the configured upload limit.
    TooLarge {
        /// File size in bytes.
        size: u64,
        /// Limit in bytes.
        limit: u64,
    },
}

/// Mediates between drag input, the confirmation step and the transport.
///
/// At most one upload runs at a time. The transfer state sits behind a
/// short-lived lock that is never held across an await, so the progress
/// callback can update it while the transport future is running.
#[derive(Debug)]
pub struct UploadCoordinator {
    transport: Arc<dyn Transport>,
    state: Arc<Mutex<TransferState>>,
    drag: Mutex<DragTracker>,
    events: Option<mpsc::UnboundedSender<FileEvent>>,
    max_upload_size: u64,
}

impl UploadCoordinator {
    /// Create a coordinator around a transport.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            state: Arc::new(Mutex::new(TransferState::Idle)),
            drag: Mutex::new(DragTracker::new()),
            events: None,
            max_upload_size: u64::MAX,
        }
    }

    /// Emit a [`FileEvent::Uploaded`] on this channel after every success.
    pub fn with_events(mut self, events: mpsc::UnboundedSender<FileEvent>) -> Self {
        self.events = Some(events);
        self
    }

    /// Refuse to stage files larger than `limit` bytes.
    pub fn with_max_upload_size(mut self, limit: u64) -> Self {
        self.max_upload_size = limit;
        self
    }

    fn lock_state(&self) -> MutexGuard<'_, TransferState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_drag(&self) -> MutexGuard<'_, DragTracker> {
        self.drag.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ── Drag input ──────────────────────────────────────────────────

    /// Feed a drag event; returns whether the region shows as dragging.
    pub fn drag_event(&self, event: DragEvent) -> bool {
        self.lock_drag().apply(event)
    }

    /// Whether a drag is over the drop region.
    pub fn is_dragging(&self) -> bool {
        self.lock_drag().is_dragging()
    }

    /// Whether drops should be accepted at all.
    pub fn drop_target_enabled(&self) -> bool {
        !self.lock_state().is_in_flight()
    }

    /// Handle a drop: reset drag tracking and stage the payload.
    pub fn offer_drop(&self, files: impl IntoIterator<Item = StagedFile>) -> StageOutcome {
        self.drag_event(DragEvent::Drop);
        self.stage(files)
    }

    // ── Transfer ────────────────────────────────────────────────────

    /// Stage the first offered file. Any further files are discarded.
    pub fn stage(&self, files: impl IntoIterator<Item = StagedFile>) -> StageOutcome {
        let mut files = files.into_iter();
        let Some(file) = files.next() else {
            return StageOutcome::NothingOffered;
        };
        let discarded = files.count();

        let mut state = self.lock_state();
        if state.is_in_flight() {
            tracing::debug!(file = %file.name, "Upload in flight, ignoring offered file");
            return StageOutcome::Busy;
        }
        if file.size > self.max_upload_size {
            return StageOutcome::TooLarge {
                size: file.size,
                limit: self.max_upload_size,
            };
        }

        let name = file.name.clone();
        match state.apply(TransferEvent::Stage(file)) {
            Ok(()) => {
                tracing::debug!(file = %name, discarded, "File staged for upload");
                StageOutcome::Staged { name }
            }
            Err(_) => StageOutcome::Busy,
        }
    }

    /// Confirm the staged file and run the upload to completion.
    ///
    /// Returns `Ok(None)` when nothing is staged. On failure the file stays
    /// in the slot for [`retry`](Self::retry) and the error is returned.
    pub async fn confirm(&self, metadata: UploadMetadata) -> AppResult<Option<FileRecord>> {
        let request = {
            let mut state = self.lock_state();
            match state.apply(TransferEvent::Confirm(metadata)) {
                Ok(()) => {}
                Err(Rejection::NothingStaged) => {
                    tracing::debug!("Confirm with nothing staged, ignoring");
                    return Ok(None);
                }
                Err(Rejection::Busy) => {
                    return Err(AppError::busy("An upload is already in progress"));
                }
                Err(other) => return Err(AppError::validation(other.to_string())),
            }
            match &*state {
                TransferState::InFlight {
                    file,
                    destination,
                    comment,
                    ..
                } => UploadRequest {
                    file_name: file.name.clone(),
                    data: file.data.clone(),
                    path: destination.clone(),
                    comment: comment.clone(),
                },
                other => {
                    return Err(AppError::internal(format!(
                        "Unexpected transfer state after confirm: {}",
                        other.name()
                    )));
                }
            }
        };

        tracing::info!(
            file = %request.file_name,
            path = %request.path,
            size = request.data.len(),
            "Starting upload"
        );

        let progress_state = Arc::clone(&self.state);
        let on_progress: ProgressFn = Arc::new(move |fraction| {
            let mut state = progress_state
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            let _ = state.apply(TransferEvent::Progress(fraction));
        });

        let file_name = request.file_name.clone();
        match self.transport.upload(request, on_progress).await {
            Ok(record) => {
                self.transition(TransferEvent::Succeeded);
                tracing::info!(file = %file_name, id = %record.id, "Upload completed");
                self.emit(FileEvent::Uploaded {
                    record: record.clone(),
                });
                Ok(Some(record))
            }
            Err(err) => {
                self.transition(TransferEvent::Failed(err.to_string()));
                tracing::warn!(file = %file_name, error = %err, "Upload failed");
                Err(err)
            }
        }
    }

    /// Discard the staged or failed file. Returns `false` when nothing was
    /// discarded, including while an upload is in flight.
    pub fn cancel(&self) -> bool {
        let mut state = self.lock_state();
        let had_file = state.file().is_some();
        state.apply(TransferEvent::Cancel).is_ok() && had_file
    }

    /// Clear a failed upload. Returns `false` unless the slot was failed.
    pub fn dismiss(&self) -> bool {
        let mut state = self.lock_state();
        if state.failure().is_none() {
            return false;
        }
        state.apply(TransferEvent::Cancel).is_ok()
    }

    /// Return a failed file to the confirmation step.
    pub fn retry(&self) -> AppResult<()> {
        self.lock_state()
            .apply(TransferEvent::Retry)
            .map_err(|r| AppError::validation(r.to_string()))
    }

    /// A copy of the current transfer state.
    pub fn snapshot(&self) -> TransferState {
        self.lock_state().clone()
    }

    /// Progress of the running upload.
    pub fn progress(&self) -> Option<f64> {
        self.lock_state().progress()
    }

    /// Reason of the last failed upload.
    pub fn last_error(&self) -> Option<String> {
        self.lock_state().failure().map(str::to_string)
    }

    fn transition(&self, event: TransferEvent) {
        if let Err(rejection) = self.lock_state().apply(event) {
            tracing::warn!(%rejection, "Unexpected transfer transition");
        }
    }

    fn emit(&self, event: FileEvent) {
        if let Some(events) = &self.events {
            if events.send(event).is_err() {
                tracing::debug!("File event receiver dropped");
            }
        }
    }
}
