//! Terminal rendering of hierarchies.

use generational_arena::Index;
use termtree::Tree;

use crate::domain::HierarchyArena;

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for HierarchyArena {
    /// Names annotated with their leaf weight, children in input order.
    fn to_tree_string(&self) -> Tree<String> {
        fn label(arena: &HierarchyArena, idx: Index) -> String {
            arena
                .get_node(idx)
                .map(|n| format!("{} ({})", n.data.name, n.data.weight))
                .unwrap_or_default()
        }

        fn build_tree(arena: &HierarchyArena, node_idx: Index, parent_tree: &mut Tree<String>) {
            if let Some(node) = arena.get_node(node_idx) {
                for &child_idx in &node.children {
                    let mut child_tree = Tree::new(label(arena, child_idx));
                    build_tree(arena, child_idx, &mut child_tree);
                    parent_tree.push(child_tree);
                }
            }
        }

        match self.root() {
            Some(root_idx) => {
                let mut tree = Tree::new(label(self, root_idx));
                build_tree(self, root_idx, &mut tree);
                tree
            }
            None => Tree::new("Empty tree".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NodeData, RadialLayout};

    #[test]
    fn given_laid_out_tree_when_converting_then_shows_names_and_weights() {
        let mut arena = HierarchyArena::new();
        let root = arena.insert_node(NodeData::new("root"), None);
        let a = arena.insert_node(NodeData::new("a"), Some(root));
        arena.insert_node(NodeData::new("a1"), Some(a));
        arena.insert_node(NodeData::new("b"), Some(root));
        RadialLayout::new().apply(&mut arena).unwrap();

        let rendered = arena.to_tree_string().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "root (2)");
        assert!(lines[1].ends_with("a (1)"));
        assert!(lines[2].ends_with("a1 (1)"));
        assert!(lines[3].ends_with("b (1)"));
    }

    #[test]
    fn given_empty_arena_when_converting_then_placeholder() {
        assert_eq!(HierarchyArena::new().to_tree_string().to_string().trim(), "Empty tree");
    }
}
