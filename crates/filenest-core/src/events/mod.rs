//! Domain events emitted by FileNest operations.
//!
//! Mutating operations publish an event once the server has confirmed the
//! change; the view synchronizer consumes them and resyncs.

pub mod file;

pub use file::FileEvent;
