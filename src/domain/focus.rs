//! Click-to-zoom: target domains, transition plans and label placement.

use std::f64::consts::PI;

use generational_arena::Index;
use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::arena::{HierarchyArena, NodeData};
use crate::domain::view::{font_size, FontSizing, Interval, ViewDomain};

/// Durable view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewState {
    /// Root is focused: full circle, no inner hole
    #[default]
    Overview,
    /// A non-root node is focused
    Focused(Index),
}

impl ViewState {
    /// The single transition. Selecting the root collapses back to `Overview`.
    pub fn select(tree: &HierarchyArena, idx: Index) -> ViewState {
        if tree.root() == Some(idx) {
            ViewState::Overview
        } else {
            ViewState::Focused(idx)
        }
    }

    /// Currently focused node; the root in `Overview`.
    pub fn focus_node(&self, tree: &HierarchyArena) -> Option<Index> {
        match self {
            ViewState::Overview => tree.root(),
            ViewState::Focused(idx) => Some(*idx),
        }
    }
}

/// Pure description of one zoom transition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TransitionPlan {
    pub from: ViewDomain,
    pub to: ViewDomain,
    pub duration_ms: u64,
    /// Labels switch visibility once this much of the transition has elapsed
    pub label_fade_delay_ms: u64,
}

impl TransitionPlan {
    /// Domain at progress `t` in `[0, 1]`.
    pub fn at(&self, t: f64) -> ViewDomain {
        self.from.interpolate(&self.to, t)
    }

    /// Domain after `elapsed_ms` of the transition.
    pub fn at_elapsed(&self, elapsed_ms: u64) -> ViewDomain {
        if self.duration_ms == 0 {
            return self.to;
        }
        self.at(elapsed_ms as f64 / self.duration_ms as f64)
    }

    pub fn labels_switched(&self, elapsed_ms: u64) -> bool {
        elapsed_ms >= self.label_fade_delay_ms
    }

    /// `frames + 1` evenly spaced samples from start to end.
    pub fn sample(&self, frames: usize) -> Vec<ViewDomain> {
        if frames == 0 {
            return vec![self.to];
        }
        (0..=frames)
            .map(|i| self.at(i as f64 / frames as f64))
            .collect()
    }
}

/// Computes zoom targets. Never fails for a node that has been laid out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusController {
    pub max_radius: f64,
    /// Inner radius of the hole shown while a non-root node is focused
    pub inner_hole_radius: f64,
    pub duration_ms: u64,
    pub label_fade_delay_ms: u64,
}

impl FocusController {
    pub fn new(max_radius: f64, inner_hole_radius: f64) -> Self {
        Self {
            max_radius,
            inner_hole_radius,
            duration_ms: 750,
            label_fade_delay_ms: 400,
        }
    }

    pub fn with_timing(mut self, duration_ms: u64, label_fade_delay_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self.label_fade_delay_ms = label_fade_delay_ms;
        self
    }

    pub fn overview(&self) -> ViewDomain {
        ViewDomain::overview(self.max_radius)
    }

    /// Domain that shows `selected`'s subtree: its angular interval spread
    /// over the full circle and its band starting at the hole.
    pub fn target(&self, selected: &NodeData) -> ViewDomain {
        let hole = if selected.radius_inner > 0.0 {
            self.inner_hole_radius
        } else {
            0.0
        };
        ViewDomain {
            angle_domain: Interval::new(selected.angle_start, selected.angle_end),
            radius_domain: Interval::new(selected.radius_inner, 1.0),
            radius_range: Interval::new(hole, self.max_radius),
        }
    }

    /// Plan the transition from `current`, which may itself be a mid-flight
    /// domain of an earlier transition.
    #[instrument(level = "debug", skip(self, current, selected), fields(selected = %selected))]
    pub fn focus(&self, current: &ViewDomain, selected: &NodeData) -> TransitionPlan {
        let to = self.target(selected);
        debug!("focus target: {:?}", to);
        TransitionPlan {
            from: *current,
            to,
            duration_ms: self.duration_ms,
            label_fade_delay_ms: self.label_fade_delay_ms,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelAnchor {
    Start,
    Middle,
    End,
}

/// Label styling constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelStyle {
    /// Horizontal offset from the baseline anchor
    pub offset: f64,
    /// Vertical alignment in em
    pub dy_em: f64,
    pub sizing: FontSizing,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            offset: 6.0,
            dy_em: 0.35,
            sizing: FontSizing::default(),
        }
    }
}

/// Where and how a node's label is drawn under one domain.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LabelPlacement {
    /// Degrees
    pub rotation: f64,
    /// Radial offset along the rotated baseline
    pub translation: f64,
    pub anchor: LabelAnchor,
    pub dx: f64,
    pub dy: f64,
    pub opacity: f64,
    pub font_size: f64,
}

/// Raw label rotation in degrees before any flip.
pub fn label_rotation(node: &NodeData, is_root: bool, is_current: bool, domain: &ViewDomain) -> f64 {
    if is_root {
        return 0.0;
    }
    let mut angle = (domain.x(node.mid_angle()) - PI / 2.0) / PI * 180.0;
    if is_current {
        angle -= 90.0;
    }
    angle
}

/// Labels pointing into the left half are turned over to stay upright.
pub fn is_flipped(rotation: f64) -> bool {
    rotation > 90.0 && rotation < 270.0
}

/// Place the label of `idx` while `current` is the focused node.
pub fn label_placement(
    tree: &HierarchyArena,
    idx: Index,
    current: Index,
    domain: &ViewDomain,
    style: &LabelStyle,
) -> Option<LabelPlacement> {
    let node = tree.get_node(idx)?;
    let is_root = node.parent.is_none();
    let data = &node.data;

    let mut rotation = label_rotation(data, is_root, idx == current, domain);
    let mut translation = domain.y(data.radius_inner);
    let (anchor, dx) = if is_root {
        (LabelAnchor::Middle, 0.0)
    } else if is_flipped(rotation) {
        rotation += 180.0;
        translation = -translation;
        (LabelAnchor::End, -style.offset)
    } else {
        (LabelAnchor::Start, style.offset)
    };

    let opacity = if tree.is_ancestor_or_self(current, idx) {
        1.0
    } else {
        0.0
    };

    Some(LabelPlacement {
        rotation,
        translation,
        anchor,
        dx,
        dy: style.dy_em,
        opacity,
        font_size: font_size(data, is_root, domain, &style.sizing),
    })
}
