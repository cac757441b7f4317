//! # filenest-service
//!
//! Client-side logic for FileNest. Everything here works against the
//! collaborator traits from `filenest-core`, so it runs the same against
//! the real HTTP client and against in-memory fakes.
//!
//! - [`tree`]: flat file list → ordered folder hierarchy, plus expand/collapse state
//! - [`upload`]: drag tracking and the single-flight upload state machine
//! - [`quota`]: proportional ring-chart geometry, hover and legend
//! - [`sync`]: full resync of the listing after every confirmed mutation

pub mod quota;
pub mod sync;
pub mod tree;
pub mod upload;

pub use quota::{ArcSegment, ChartItem, ChartMode, HoverState, QuotaView, RadialChart, allocate};
pub use sync::{Synced, ViewSync};
pub use tree::{ExpansionState, PathTree, TreeNode, TreeRow, visible_rows};
pub use upload::{
    DragEvent, DragTracker, StageOutcome, StagedFile, TransferState, UploadCoordinator,
    UploadMetadata,
};
