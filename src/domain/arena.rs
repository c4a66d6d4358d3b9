use generational_arena::{Arena, Index};
use std::collections::VecDeque;
use std::fmt;
use tracing::instrument;

use crate::domain::palette::Rgb;

/// Data payload for hierarchy nodes: the name plus the layout fields written
/// by the layout, label and palette passes.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    /// Slot value of the record that produced this node
    pub name: String,
    /// Number of descendant leaves, 1 for a leaf
    pub weight: usize,
    /// Angular interval in radians, within `[0, 2π]`
    pub angle_start: f64,
    pub angle_end: f64,
    /// Radial band, normalized to `[0, 1]`
    pub radius_inner: f64,
    pub radius_outer: f64,
    /// Rendered width of the name at the reference font size
    pub label_width: f64,
    /// Widest label among the direct children
    pub max_child_label_width: f64,
    /// Length term used when sizing this node's label
    pub text_len: f64,
    pub color: Rgb,
}

impl NodeData {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight: 0,
            angle_start: 0.0,
            angle_end: 0.0,
            radius_inner: 0.0,
            radius_outer: 0.0,
            label_width: 0.0,
            max_child_label_width: 0.0,
            text_len: 0.0,
            color: Rgb::WHITE,
        }
    }

    pub fn mid_angle(&self) -> f64 {
        (self.angle_start + self.angle_end) / 2.0
    }
}

impl fmt::Display for NodeData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Tree node in the arena-based hierarchy structure.
#[derive(Debug)]
pub struct TreeNode {
    pub data: NodeData,
    /// Index of parent node in the arena, None for the root
    pub parent: Option<Index>,
    /// Indices of child nodes in input row order
    pub children: Vec<Index>,
    /// Distance from the root, root = 0
    pub depth: usize,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Arena-based hierarchy.
///
/// Parent links are arena indices, so upward walks never hold owning
/// references. The topology is append-only: nodes are never removed.
#[derive(Debug)]
pub struct HierarchyArena {
    arena: Arena<TreeNode>,
    root: Option<Index>,
    /// Input column of the root record
    root_level: usize,
}

impl Default for HierarchyArena {
    fn default() -> Self {
        Self::new()
    }
}

impl HierarchyArena {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            root_level: 1,
        }
    }

    pub fn with_root_level(root_level: usize) -> Self {
        Self {
            root_level,
            ..Self::new()
        }
    }

    #[instrument(level = "trace", skip(self))]
    pub fn insert_node(&mut self, data: NodeData, parent: Option<Index>) -> Index {
        let depth = parent
            .and_then(|p| self.arena.get(p))
            .map(|p| p.depth + 1)
            .unwrap_or(0);
        let node = TreeNode {
            data,
            parent,
            children: Vec::new(),
            depth,
        };
        let node_idx = self.arena.insert(node);

        if let Some(parent_idx) = parent {
            if let Some(parent) = self.arena.get_mut(parent_idx) {
                parent.children.push(node_idx);
            }
        } else {
            self.root = Some(node_idx);
        }

        node_idx
    }

    pub fn get_node(&self, idx: Index) -> Option<&TreeNode> {
        self.arena.get(idx)
    }

    pub fn get_node_mut(&mut self, idx: Index) -> Option<&mut TreeNode> {
        self.arena.get_mut(idx)
    }

    pub fn root(&self) -> Option<Index> {
        self.root
    }

    pub fn root_level(&self) -> usize {
        self.root_level
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    /// Depth-first pre-order traversal, children left to right.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }

    pub fn iter_postorder(&self) -> PostOrderIterator<'_> {
        PostOrderIterator::new(self)
    }

    /// Level-order traversal, children left to right.
    pub fn iter_breadth_first(&self) -> BreadthFirstIterator<'_> {
        BreadthFirstIterator::new(self)
    }

    /// Maximum node depth (root = 0); 0 for empty trees.
    #[instrument(level = "debug", skip(self))]
    pub fn height(&self) -> usize {
        self.iter().map(|(_, node)| node.depth).max().unwrap_or(0)
    }

    /// Leaf indices in pre-order.
    pub fn leaf_nodes(&self) -> Vec<Index> {
        self.iter()
            .filter(|(_, node)| node.is_leaf())
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Walks from `idx` up to the root, `idx` first.
    pub fn ancestors(&self, idx: Index) -> AncestorIterator<'_> {
        AncestorIterator {
            arena: self,
            next: self.get_node(idx).map(|_| idx),
        }
    }

    /// The `steps`-th ancestor of `idx`; `steps == 0` yields `idx` itself.
    pub fn ancestor_at(&self, idx: Index, steps: usize) -> Option<Index> {
        self.ancestors(idx).nth(steps).map(|(i, _)| i)
    }

    /// True when `ancestor` is `node` or lies on the path from `node` to the root.
    pub fn is_ancestor_or_self(&self, ancestor: Index, node: Index) -> bool {
        self.ancestors(node).any(|(i, _)| i == ancestor)
    }

    /// Names from the root down to `idx`.
    pub fn path_names(&self, idx: Index) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .ancestors(idx)
            .map(|(_, node)| node.data.name.as_str())
            .collect();
        names.reverse();
        names
    }

    /// Resolve a name path starting at the root, e.g. `["root", "a", "b"]`.
    /// An empty path resolves to the root.
    pub fn find_path<S: AsRef<str>>(&self, path: &[S]) -> Option<Index> {
        let root = self.root?;
        let mut segments = path.iter().map(AsRef::<str>::as_ref).peekable();
        if segments.peek().is_none() {
            return Some(root);
        }
        if segments.next()? != self.get_node(root)?.data.name {
            return None;
        }
        let mut current = root;
        for segment in segments {
            let node = self.get_node(current)?;
            current = node
                .children
                .iter()
                .copied()
                .find(|&c| self.get_node(c).is_some_and(|n| n.data.name == segment))?;
        }
        Some(current)
    }
}

pub struct TreeIterator<'a> {
    arena: &'a HierarchyArena,
    stack: Vec<Index>,
}

impl<'a> TreeIterator<'a> {
    fn new(arena: &'a HierarchyArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push(root);
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(current_idx) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push(child);
                }
                return Some((current_idx, node));
            }
        }
        None
    }
}

pub struct PostOrderIterator<'a> {
    arena: &'a HierarchyArena,
    stack: Vec<(Index, bool)>,
}

impl<'a> PostOrderIterator<'a> {
    fn new(arena: &'a HierarchyArena) -> Self {
        let mut stack = Vec::new();
        if let Some(root) = arena.root() {
            stack.push((root, false));
        }
        Self { arena, stack }
    }
}

impl<'a> Iterator for PostOrderIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, visited)) = self.stack.pop() {
            if let Some(node) = self.arena.get_node(current_idx) {
                if !visited {
                    self.stack.push((current_idx, true));
                    for &child in node.children.iter().rev() {
                        self.stack.push((child, false));
                    }
                } else {
                    return Some((current_idx, node));
                }
            }
        }
        None
    }
}

pub struct BreadthFirstIterator<'a> {
    arena: &'a HierarchyArena,
    queue: VecDeque<Index>,
}

impl<'a> BreadthFirstIterator<'a> {
    fn new(arena: &'a HierarchyArena) -> Self {
        let mut queue = VecDeque::new();
        if let Some(root) = arena.root() {
            queue.push_back(root);
        }
        Self { arena, queue }
    }
}

impl<'a> Iterator for BreadthFirstIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let current_idx = self.queue.pop_front()?;
        let node = self.arena.get_node(current_idx)?;
        self.queue.extend(node.children.iter().copied());
        Some((current_idx, node))
    }
}

pub struct AncestorIterator<'a> {
    arena: &'a HierarchyArena,
    next: Option<Index>,
}

impl<'a> Iterator for AncestorIterator<'a> {
    type Item = (Index, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.next?;
        let node = self.arena.get_node(idx)?;
        self.next = node.parent;
        Some((idx, node))
    }
}
