//! Keeps the local view consistent with the server.
//!
//! There is no optimistic patching: every confirmed mutation is followed by
//! a full listing fetch and a rebuild of the tree.

pub mod view_sync;

pub use view_sync::{Synced, ViewSync};
