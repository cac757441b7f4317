//! Upload coordination.
//!
//! Drag input is tracked by [`DragTracker`]; the single upload slot is the
//! [`TransferState`] machine, driven by [`UploadCoordinator`].

pub mod coordinator;
pub mod drag;
pub mod staged;
pub mod state;

pub use coordinator::{StageOutcome, UploadCoordinator};
pub use drag::{DragEvent, DragTracker};
pub use staged::StagedFile;
pub use state::{Rejection, TransferEvent, TransferState, UploadMetadata};
