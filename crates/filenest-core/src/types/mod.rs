//! Shared domain types: identifiers and the wire shapes exchanged with the
//! storage server.

pub mod file;
pub mod id;
pub mod listing;
pub mod quota;
pub mod timestamp;

pub use file::{FileRecord, FileUpdate};
pub use id::FileId;
pub use listing::ListingQuery;
pub use quota::{Category, CategoryUsage, QuotaSummary};
