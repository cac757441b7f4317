//! Tracks which folders are expanded in the tree view.
//!
//! State is keyed by folder path rather than node id, because the tree is
//! rebuilt from scratch on every resync and node ids do not survive.

use std::collections::HashMap;

use filenest_core::types::file::normalize_path;

/// Per-folder expanded/collapsed flags over a default depth.
///
/// Folders without an explicit flag are expanded when their depth
/// (0 for top-level folders) is below `default_depth`.
#[derive(Debug, Clone)]
pub struct ExpansionState {
    explicit: HashMap<String, bool>,
    default_depth: usize,
}

impl Default for ExpansionState {
    /// Top-level folders start expanded, deeper ones collapsed.
    fn default() -> Self {
        Self {
            explicit: HashMap::new(),
            default_depth: 1,
        }
    }
}

impl ExpansionState {
    /// Whether the folder at `path` (with the given depth) is expanded.
    pub fn is_expanded(&self, path: &str, depth: usize) -> bool {
        self.explicit
            .get(&normalize_path(path))
            .copied()
            .unwrap_or(depth < self.default_depth)
    }

    /// Expand a single folder.
    pub fn expand(&mut self, path: &str) {
        self.explicit.insert(normalize_path(path), true);
    }

    /// Collapse a folder and forget every flag below it.
    pub fn collapse(&mut self, path: &str) {
        let path = normalize_path(path);
        let prefix = format!("{path}/");
        self.explicit.retain(|p, _| !p.starts_with(&prefix));
        self.explicit.insert(path, false);
    }

    /// Flip a folder; returns the new expanded flag.
    pub fn toggle(&mut self, path: &str, depth: usize) -> bool {
        if self.is_expanded(path, depth) {
            self.collapse(path);
            false
        } else {
            self.expand(path);
            true
        }
    }

    /// Expand everything above `depth` and drop explicit flags.
    pub fn expand_all_to(&mut self, depth: usize) {
        self.explicit.clear();
        self.default_depth = depth;
    }

    /// Collapse every folder.
    pub fn collapse_all(&mut self) {
        self.expand_all_to(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_expanded_by_default() {
        let state = ExpansionState::default();
        assert!(state.is_expanded("docs", 0));
        assert!(!state.is_expanded("docs/2024", 1));
    }

    #[test]
    fn test_expand_collapse() {
        let mut state = ExpansionState::default();
        state.expand("docs/2024");
        assert!(state.is_expanded("docs/2024", 1));

        state.collapse("docs/2024");
        assert!(!state.is_expanded("docs/2024", 1));
    }

    #[test]
    fn test_collapse_forgets_descendants() {
        let mut state = ExpansionState::default();
        state.expand("a/b");
        state.expand("a/b/c");
        state.expand("ab");

        state.collapse("a");

        assert!(!state.is_expanded("a", 0));
        assert!(!state.is_expanded("a/b", 1));
        assert!(!state.is_expanded("a/b/c", 2));
        assert!(state.is_expanded("ab", 0));
    }

    #[test]
    fn test_toggle_and_paths_normalized() {
        let mut state = ExpansionState::default();
        assert!(!state.toggle("/docs/", 0));
        assert!(!state.is_expanded("docs", 0));
        assert!(state.toggle("docs", 0));
    }

    #[test]
    fn test_depth_controls() {
        let mut state = ExpansionState::default();
        state.expand_all_to(3);
        assert!(state.is_expanded("a/b/c", 2));
        assert!(!state.is_expanded("a/b/c/d", 3));

        state.collapse_all();
        assert!(!state.is_expanded("a", 0));
    }
}
