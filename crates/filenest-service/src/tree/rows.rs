//! Flattens a [`PathTree`] into the rows a tree view renders.

use indextree::NodeId;

use super::builder::{PathTree, TreeNode};
use super::expansion::ExpansionState;

/// One renderable line of the tree view.
#[derive(Debug, Clone)]
pub struct TreeRow<'a> {
    /// Arena id of the node.
    pub node: NodeId,
    /// Nesting depth; top-level entries are at 0.
    pub depth: usize,
    /// The node itself.
    pub entry: &'a TreeNode,
    /// Full path of the folder (`None` for files).
    pub folder_path: Option<String>,
    /// Number of direct children (always 0 for files).
    pub child_count: usize,
    /// Whether the folder's children follow this row.
    pub expanded: bool,
}

impl TreeRow<'_> {
    /// Whether this row is a folder.
    pub fn is_folder(&self) -> bool {
        self.entry.is_folder()
    }
}

/// Walk the tree in display order, descending only into expanded folders.
pub fn visible_rows<'a>(tree: &'a PathTree, expansion: &ExpansionState) -> Vec<TreeRow<'a>> {
    let mut rows = Vec::with_capacity(tree.file_count());
    push_children(tree, expansion, tree.root(), 0, &mut rows);
    rows
}

fn push_children<'a>(
    tree: &'a PathTree,
    expansion: &ExpansionState,
    parent: NodeId,
    depth: usize,
    rows: &mut Vec<TreeRow<'a>>,
) {
    for child in tree.children(parent) {
        let Some(entry) = tree.node(child) else {
            continue;
        };

        if entry.is_folder() {
            let path = tree.folder_path(child);
            let expanded = expansion.is_expanded(&path, depth);
            rows.push(TreeRow {
                node: child,
                depth,
                entry,
                folder_path: Some(path),
                child_count: tree.child_count(child),
                expanded,
            });
            if expanded {
                push_children(tree, expansion, child, depth + 1, rows);
            }
        } else {
            rows.push(TreeRow {
                node: child,
                depth,
                entry,
                folder_path: None,
                child_count: 0,
                expanded: false,
            });
        }
    }
}
