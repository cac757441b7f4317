//! Builds an ordered folder/file hierarchy from a flat listing snapshot.
//!
//! Nodes live in an index-addressed arena; parent links are plain arena
//! indices. The tree is a disposable projection: it is rebuilt from scratch
//! on every snapshot and keeps no identity across rebuilds.

use std::cmp::Ordering;
use std::collections::HashMap;

use indextree::{Arena, NodeId};

use filenest_core::types::FileRecord;
use filenest_core::types::file::split_path;

use super::collate::NameCollator;

/// A node in the reconstructed hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeNode {
    /// A folder, synthesized from the path segments of the records below it.
    Folder {
        /// Folder name (empty for the root).
        name: String,
    },
    /// A file, wrapping exactly one listing record.
    File {
        /// Display name.
        name: String,
        /// The originating record.
        record: FileRecord,
    },
}

impl TreeNode {
    /// Display name of the node.
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Folder { name } | TreeNode::File { name, .. } => name,
        }
    }

    /// Whether this node is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, TreeNode::Folder { .. })
    }

    /// The wrapped record, for file nodes.
    pub fn record(&self) -> Option<&FileRecord> {
        match self {
            TreeNode::File { record, .. } => Some(record),
            TreeNode::Folder { .. } => None,
        }
    }
}

/// Folders first, then files; each group by collated name.
fn compare_nodes(collator: &mut NameCollator, a: &TreeNode, b: &TreeNode) -> Ordering {
    b.is_folder()
        .cmp(&a.is_folder())
        .then_with(|| collator.compare(a.name(), b.name()))
}

/// Arena-backed folder hierarchy reconstructed from file records.
#[derive(Debug, Clone)]
pub struct PathTree {
    arena: Arena<TreeNode>,
    root: NodeId,
    file_count: usize,
}

impl PathTree {
    /// Build the hierarchy for a snapshot.
    ///
    /// Records are placed in input order: each one walks its path segments
    /// from the root, merging into an existing folder of the same name or
    /// creating one, and is appended as a file under the last folder.
    /// Records sharing a path and name stay separate siblings. Afterwards
    /// every folder's children are sorted.
    pub fn build(records: &[FileRecord]) -> Self {
        let mut arena = Arena::new();
        let root = arena.new_node(TreeNode::Folder {
            name: String::new(),
        });
        let mut folders: HashMap<(NodeId, String), NodeId> = HashMap::new();

        for record in records {
            let mut current = root;
            for segment in split_path(&record.path) {
                let key = (current, segment.to_string());
                current = match folders.get(&key) {
                    Some(&existing) => existing,
                    None => {
                        let folder = arena.new_node(TreeNode::Folder {
                            name: segment.to_string(),
                        });
                        current.append(folder, &mut arena);
                        folders.insert(key, folder);
                        folder
                    }
                };
            }

            let file = arena.new_node(TreeNode::File {
                name: record.name.clone(),
                record: record.clone(),
            });
            current.append(file, &mut arena);
        }

        sort_children(&mut arena, &mut NameCollator::new(), root);

        tracing::debug!(
            records = records.len(),
            nodes = arena.count(),
            "Path tree rebuilt"
        );

        Self {
            arena,
            root,
            file_count: records.len(),
        }
    }

    /// The root folder.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The underlying arena.
    pub fn arena(&self) -> &Arena<TreeNode> {
        &self.arena
    }

    /// Look up a node.
    pub fn node(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.get(id).map(|n| n.get())
    }

    /// Ordered children of a node.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        id.children(&self.arena)
    }

    /// Number of direct children of a node.
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    /// Parent of a node (`None` for the root).
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.arena.get(id).and_then(|n| n.parent())
    }

    /// Total number of file nodes.
    pub fn file_count(&self) -> usize {
        self.file_count
    }

    /// Whether the snapshot had no records at all.
    pub fn is_empty(&self) -> bool {
        self.file_count == 0
    }

    /// Slash-joined folder names from the root down to `id`
    /// (the breadcrumb of a folder; the containing folder path of a file).
    pub fn folder_path(&self, id: NodeId) -> String {
        let mut names: Vec<&str> = id
            .ancestors(&self.arena)
            .filter(|&a| a != self.root)
            .filter_map(|a| self.node(a))
            .filter(|n| n.is_folder())
            .map(|n| n.name())
            .collect();
        names.reverse();
        names.join("/")
    }

    /// Resolve a slash-delimited folder path to its node.
    pub fn find_folder(&self, path: &str) -> Option<NodeId> {
        let mut current = self.root;
        for segment in split_path(path) {
            current = self.children(current).find(|&child| {
                self.node(child)
                    .is_some_and(|n| n.is_folder() && n.name() == segment)
            })?;
        }
        Some(current)
    }

    /// Ids of all file nodes directly inside a folder.
    pub fn files_in(&self, folder: NodeId) -> Vec<&FileRecord> {
        self.children(folder)
            .filter_map(|child| self.node(child).and_then(|n| n.record()))
            .collect()
    }

    /// Every file record in the tree, in display order.
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> + '_ {
        self.root
            .descendants(&self.arena)
            .filter_map(|id| self.node(id).and_then(|n| n.record()))
    }
}

impl Default for PathTree {
    fn default() -> Self {
        Self::build(&[])
    }
}

/// Recursively sort every folder's children in place.
fn sort_children(arena: &mut Arena<TreeNode>, collator: &mut NameCollator, folder: NodeId) {
    let mut children: Vec<NodeId> = folder.children(arena).collect();
    children.sort_by(|a, b| compare_nodes(collator, arena[*a].get(), arena[*b].get()));

    for &child in &children {
        child.detach(arena);
        folder.append(child, arena);
    }

    for child in children {
        if arena[child].get().is_folder() {
            sort_children(arena, collator, child);
        }
    }
}
