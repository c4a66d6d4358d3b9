//! Hierarchy builder: reconstructs a tree from depth-tagged records.

use generational_arena::Index;
use tracing::{debug, instrument, trace};

use crate::domain::arena::{HierarchyArena, NodeData};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::record::Record;

/// Traversal position while consuming records.
#[derive(Debug, Clone, Copy)]
struct Cursor {
    /// Most recently created node
    node: Index,
    /// Input column of `node`
    depth: usize,
}

/// Where a record attaches relative to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    Child,
    Sibling,
    /// Re-attach at `level`, `steps` ancestors above the cursor's parent
    Ancestor { level: usize, steps: usize },
}

/// Constructs a hierarchy from flat records.
///
/// Every record names exactly one node. Its depth is resolved against the
/// cursor: one column deeper is a child, the same column is a sibling, and a
/// shallower column re-attaches to the matching ancestor. Anything else is a
/// malformed document.
#[derive(Debug, Default)]
pub struct HierarchyBuilder;

impl HierarchyBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the tree. Fails whole: no partial tree is returned.
    #[instrument(level = "debug", skip(self, records))]
    pub fn build<'a, I>(&self, records: I) -> DomainResult<HierarchyArena>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut records = records.into_iter().enumerate();

        // First non-blank record becomes the root
        let (root_level, root_name) = loop {
            match records.next() {
                None => return Err(DomainError::EmptyDocument),
                Some((_, record)) => {
                    if let Some(level) = record.declared_depth() {
                        let name = record.value_at(level).unwrap_or_default();
                        break (level, name.to_string());
                    }
                }
            }
        };

        let mut tree = HierarchyArena::with_root_level(root_level);
        let root = tree.insert_node(NodeData::new(root_name), None);
        let mut cursor = Cursor {
            node: root,
            depth: root_level,
        };

        for (index, record) in records {
            let Some(placement) = Self::place(record, cursor, root_level) else {
                if record.is_blank() {
                    trace!("skipping blank record {}", index);
                    continue;
                }
                return Err(DomainError::MalformedHierarchy {
                    record_index: index,
                });
            };

            let (parent, depth) = match placement {
                Placement::Child => (Some(cursor.node), cursor.depth + 1),
                Placement::Sibling => (Self::parent_of(&tree, cursor.node), cursor.depth),
                Placement::Ancestor { level, steps } => {
                    let parent = Self::parent_of(&tree, cursor.node)
                        .and_then(|p| tree.ancestor_at(p, steps));
                    (parent, level)
                }
            };
            let Some(parent) = parent else {
                return Err(DomainError::MalformedHierarchy {
                    record_index: index,
                });
            };

            let name = record.value_at(depth).unwrap_or_default().to_string();
            debug!("record {}: {:?} '{}' at level {}", index, placement, name, depth);
            let node = tree.insert_node(NodeData::new(name), Some(parent));
            cursor = Cursor { node, depth };
        }

        debug!("built hierarchy with {} nodes", tree.len());
        Ok(tree)
    }

    fn place(record: &Record, cursor: Cursor, root_level: usize) -> Option<Placement> {
        if record.has(cursor.depth + 1) {
            return Some(Placement::Child);
        }
        if record.has(cursor.depth) {
            return Some(Placement::Sibling);
        }
        // Scan upwards; the shallowest populated column wins.
        let mut found = None;
        for (steps, level) in (root_level + 1..cursor.depth).rev().enumerate() {
            if record.has(level) {
                found = Some(Placement::Ancestor { level, steps: steps + 1 });
            }
        }
        found
    }

    fn parent_of(tree: &HierarchyArena, idx: Index) -> Option<Index> {
        tree.get_node(idx).and_then(|n| n.parent)
    }
}

/// Flatten a tree back into records, depth-first, one record per node with
/// its name in the node's original column.
pub fn flatten(tree: &HierarchyArena) -> Vec<Record> {
    let base = tree.root_level();
    tree.iter()
        .map(|(_, node)| Record::at(base + node.depth, node.data.name.clone()))
        .collect()
}

/// Render a tree as an indentation document (two spaces per level).
pub fn to_document(tree: &HierarchyArena) -> String {
    let base = tree.root_level().saturating_sub(1);
    tree.iter()
        .map(|(_, node)| format!("{}{}\n", "  ".repeat(base + node.depth), node.data.name))
        .collect()
}
