//! Collaborator traits defined in `filenest-core` and implemented by
//! `filenest-client` (and by in-memory fakes in tests).

pub mod listing;
pub mod quota;
pub mod transport;

pub use listing::DirectoryListing;
pub use quota::QuotaSource;
pub use transport::{DownloadedFile, ProgressFn, Transport, UploadRequest};
