//! Hierarchical namespace reconstruction.

pub mod builder;
pub mod collate;
pub mod expansion;
pub mod rows;

pub use builder::{PathTree, TreeNode};
pub use collate::{NameCollator, collate};
pub use expansion::ExpansionState;
pub use rows::{TreeRow, visible_rows};
