//! Node colouring: white root, one categorical colour per top-level branch,
//! progressively darker shades further out.

use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::domain::arena::HierarchyArena;

/// Per-channel multiplier applied for each step away from a top-level branch.
pub const DARKER: f64 = 0.7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    pub fn darker(self) -> Self {
        let scale = |c: u8| (f64::from(c) * DARKER).round() as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The 20-colour categorical scheme.
pub const CATEGORY20: [Rgb; 20] = [
    Rgb::from_hex(0x1f77b4),
    Rgb::from_hex(0xaec7e8),
    Rgb::from_hex(0xff7f0e),
    Rgb::from_hex(0xffbb78),
    Rgb::from_hex(0x2ca02c),
    Rgb::from_hex(0x98df8a),
    Rgb::from_hex(0xd62728),
    Rgb::from_hex(0xff9896),
    Rgb::from_hex(0x9467bd),
    Rgb::from_hex(0xc5b0d5),
    Rgb::from_hex(0x8c564b),
    Rgb::from_hex(0xc49c94),
    Rgb::from_hex(0xe377c2),
    Rgb::from_hex(0xf7b6d2),
    Rgb::from_hex(0x7f7f7f),
    Rgb::from_hex(0xc7c7c7),
    Rgb::from_hex(0xbcbd22),
    Rgb::from_hex(0xdbdb8d),
    Rgb::from_hex(0x17becf),
    Rgb::from_hex(0x9edae5),
];

/// Ordinal scale: each new key takes the next colour, wrapping around.
#[derive(Debug, Default)]
pub struct OrdinalScale {
    assigned: HashMap<String, usize>,
}

impl OrdinalScale {
    pub fn color(&mut self, key: &str) -> Rgb {
        let next = self.assigned.len();
        let slot = *self.assigned.entry(key.to_string()).or_insert(next);
        CATEGORY20[slot % CATEGORY20.len()]
    }
}

/// Assign `color` on every node, walking level by level so parents are
/// coloured before their children.
///
/// A top-level branch with children is keyed by its own name; a top-level
/// leaf is keyed by its parent's name.
pub fn assign_colors(tree: &mut HierarchyArena) {
    let mut scale = OrdinalScale::default();
    let order: Vec<_> = tree.iter_breadth_first().map(|(idx, _)| idx).collect();

    for idx in order {
        let Some(node) = tree.get_node(idx) else {
            continue;
        };
        let parent = node.parent.and_then(|p| tree.get_node(p));
        let color = match (node.depth, parent) {
            (0, _) | (_, None) => Rgb::WHITE,
            (1, Some(parent)) => {
                let key = if node.is_leaf() {
                    &parent.data.name
                } else {
                    &node.data.name
                };
                scale.color(key)
            }
            (_, Some(parent)) => parent.data.color.darker(),
        };
        if let Some(node) = tree.get_node_mut(idx) {
            node.data.color = color;
        }
    }
    debug!("assigned colors to {} nodes", tree.len());
}
