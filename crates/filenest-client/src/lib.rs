//! # filenest-client
//!
//! HTTP implementation of the FileNest collaborator traits, talking to the
//! storage server's `/api/files` endpoints.
//!
//! A single [`ApiClient`] implements
//! [`DirectoryListing`](filenest_core::traits::DirectoryListing),
//! [`Transport`](filenest_core::traits::Transport) and
//! [`QuotaSource`](filenest_core::traits::QuotaSource).

pub mod client;
pub mod disposition;
pub mod listing;
pub mod progress;
pub mod quota;
pub mod transport;

pub use client::ApiClient;
pub use disposition::filename_from_disposition;
