//! Radial partition layout.
//!
//! Angles are stored in radians over the full circle, radii normalized to
//! `[0, 1]`. Screen coordinates come from projecting these stored values
//! through a [`ViewDomain`](crate::domain::view::ViewDomain).

use std::f64::consts::TAU;

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::arena::HierarchyArena;
use crate::domain::error::{DomainError, DomainResult};

/// Equal-weight leaves, level-proportional radius.
#[derive(Debug, Default, Clone, Copy)]
pub struct RadialLayout;

impl RadialLayout {
    pub fn new() -> Self {
        Self
    }

    /// Run weight, angle and radius passes in place.
    ///
    /// Deterministic: re-running on an unchanged tree yields identical values.
    #[instrument(level = "debug", skip(self, tree))]
    pub fn apply(&self, tree: &mut HierarchyArena) -> DomainResult<()> {
        let Some(root) = tree.root() else {
            return Err(DomainError::InvariantViolation(
                "layout requested for an empty tree".to_string(),
            ));
        };
        self.assign_weights(tree);
        self.assign_angles(tree, root)?;
        self.assign_radii(tree);
        debug!("layout complete for {} nodes", tree.len());
        Ok(())
    }

    /// Bottom-up: a leaf weighs 1, an internal node the sum of its children.
    fn assign_weights(&self, tree: &mut HierarchyArena) {
        let order: Vec<Index> = tree.iter_postorder().map(|(idx, _)| idx).collect();
        for idx in order {
            let Some(node) = tree.get_node(idx) else {
                continue;
            };
            let weight = if node.is_leaf() {
                1
            } else {
                node.children
                    .iter()
                    .filter_map(|&c| tree.get_node(c))
                    .map(|c| c.data.weight)
                    .sum()
            };
            if let Some(node) = tree.get_node_mut(idx) {
                node.data.weight = weight;
            }
        }
    }

    /// Top-down: children tile their parent's interval in proportion to weight.
    fn assign_angles(&self, tree: &mut HierarchyArena, root: Index) -> DomainResult<()> {
        if let Some(node) = tree.get_node_mut(root) {
            node.data.angle_start = 0.0;
            node.data.angle_end = TAU;
        }

        let order: Vec<Index> = tree.iter().map(|(idx, _)| idx).collect();
        for idx in order {
            let Some(node) = tree.get_node(idx) else {
                continue;
            };
            if node.is_leaf() {
                continue;
            }
            let (a0, a1) = (node.data.angle_start, node.data.angle_end);
            let total = node.data.weight;
            if total == 0 {
                return Err(DomainError::InvariantViolation(format!(
                    "node '{}' has zero weight",
                    node.data.name
                )));
            }
            let children = node.children.clone();
            let span = a1 - a0;
            let last = children.len() - 1;

            let mut cursor = a0;
            let mut cumulative = 0usize;
            for (i, child) in children.into_iter().enumerate() {
                let Some(child_node) = tree.get_node_mut(child) else {
                    continue;
                };
                cumulative += child_node.data.weight;
                let end = if i == last {
                    a1
                } else {
                    a0 + span * cumulative as f64 / total as f64
                };
                child_node.data.angle_start = cursor;
                child_node.data.angle_end = end;
                cursor = end;
            }
        }
        Ok(())
    }

    /// One equal annulus per level, root as the inner disk.
    fn assign_radii(&self, tree: &mut HierarchyArena) {
        let bands = (tree.height() + 1) as f64;
        let order: Vec<Index> = tree.iter().map(|(idx, _)| idx).collect();
        for idx in order {
            if let Some(node) = tree.get_node_mut(idx) {
                let depth = node.depth as f64;
                node.data.radius_inner = depth / bands;
                node.data.radius_outer = (depth + 1.0) / bands;
            }
        }
    }

    /// Label-length pass, run after `label_width` has been measured.
    ///
    /// Each parent records the widest label among its children. With
    /// `same_size_siblings` every child sizes against that shared maximum,
    /// so one sibling group gets one type size.
    pub fn assign_label_lengths(&self, tree: &mut HierarchyArena, same_size_siblings: bool) {
        let order: Vec<Index> = tree.iter().map(|(idx, _)| idx).collect();

        for &idx in &order {
            let Some(node) = tree.get_node(idx) else {
                continue;
            };
            let widest = node
                .children
                .iter()
                .filter_map(|&c| tree.get_node(c))
                .map(|c| c.data.label_width)
                .fold(0.0_f64, f64::max);
            if let Some(node) = tree.get_node_mut(idx) {
                node.data.max_child_label_width = widest;
            }
        }

        for idx in order {
            let Some(node) = tree.get_node(idx) else {
                continue;
            };
            let shared = node
                .parent
                .filter(|_| same_size_siblings)
                .and_then(|p| tree.get_node(p))
                .map(|p| p.data.max_child_label_width);
            let text_len = shared.unwrap_or(node.data.label_width);
            if let Some(node) = tree.get_node_mut(idx) {
                node.data.text_len = text_len;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::arena::NodeData;

    #[test]
    fn given_single_node_when_laid_out_then_fills_disk() {
        let mut tree = HierarchyArena::new();
        let root = tree.insert_node(NodeData::new("only"), None);

        RadialLayout::new().apply(&mut tree).unwrap();

        let data = &tree.get_node(root).unwrap().data;
        assert_eq!(data.weight, 1);
        assert_eq!((data.angle_start, data.angle_end), (0.0, TAU));
        assert_eq!((data.radius_inner, data.radius_outer), (0.0, 1.0));
    }

    #[test]
    fn given_empty_tree_when_laid_out_then_fails_loudly() {
        let mut tree = HierarchyArena::new();
        let result = RadialLayout::new().apply(&mut tree);
        assert!(matches!(result, Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn given_measured_labels_when_assigning_lengths_then_siblings_share_maximum() {
        let mut tree = HierarchyArena::new();
        let root = tree.insert_node(NodeData::new("root"), None);
        let a = tree.insert_node(NodeData::new("a"), Some(root));
        let b = tree.insert_node(NodeData::new("bbbb"), Some(root));
        for (idx, width) in [(root, 40.0), (a, 10.0), (b, 40.0)] {
            tree.get_node_mut(idx).unwrap().data.label_width = width;
        }

        let layout = RadialLayout::new();
        layout.assign_label_lengths(&mut tree, true);
        assert_eq!(tree.get_node(root).unwrap().data.max_child_label_width, 40.0);
        assert_eq!(tree.get_node(a).unwrap().data.text_len, 40.0);
        assert_eq!(tree.get_node(b).unwrap().data.text_len, 40.0);
        assert_eq!(tree.get_node(root).unwrap().data.text_len, 40.0);

        layout.assign_label_lengths(&mut tree, false);
        assert_eq!(tree.get_node(a).unwrap().data.text_len, 10.0);
    }
}
