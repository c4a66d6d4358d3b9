//! Chart service
//!
//! Turns documents into laid-out, coloured, label-sized charts and drives
//! focus changes on them.

use std::path::Path;
use std::sync::Arc;

use generational_arena::Index;
use itertools::Itertools;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::{loader, ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    assign_colors, label_placement, project, DomainError, DomainResult, FocusController,
    HierarchyArena, HierarchyBuilder, LabelAnchor, LabelStyle, RadialLayout, Record,
    TransitionPlan, ViewDomain, ViewState,
};
use crate::infrastructure::traits::{FileSystem, TextMeasurer};

/// Everything a renderer needs to draw one node under one domain.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedNode {
    pub name: String,
    pub depth: usize,
    pub weight: usize,
    pub angle_start: f64,
    pub angle_end: f64,
    pub radius_inner: f64,
    pub radius_outer: f64,
    pub color: String,
    pub font_size: f64,
    pub label_rotation: f64,
    pub label_translation: f64,
    pub label_anchor: LabelAnchor,
    pub label_dx: f64,
    pub label_dy: f64,
    pub label_opacity: f64,
}

/// Service for building charts from documents.
pub struct ChartService {
    settings: Arc<Settings>,
    fs: Arc<dyn FileSystem>,
    measurer: Arc<dyn TextMeasurer>,
}

impl ChartService {
    pub fn new(
        settings: Arc<Settings>,
        fs: Arc<dyn FileSystem>,
        measurer: Arc<dyn TextMeasurer>,
    ) -> Self {
        Self {
            settings,
            fs,
            measurer,
        }
    }

    /// Read and build a chart from an indentation document on disk.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<Chart> {
        let raw = self.fs.read_to_string(path).with_path_context("read document", path)?;
        info!("loaded {} ({} bytes)", path.display(), raw.len());
        self.from_text(&raw)
    }

    pub fn from_text(&self, raw: &str) -> ApplicationResult<Chart> {
        self.from_records(&loader::parse_document(raw))
    }

    /// Build, lay out, measure and colour. Any failure aborts the whole chart.
    pub fn from_records(&self, records: &[Record]) -> ApplicationResult<Chart> {
        let mut tree = HierarchyBuilder::new().build(records)?;
        let layout = RadialLayout::new();
        layout.apply(&mut tree)?;
        self.measure_labels(&mut tree);
        layout.assign_label_lengths(&mut tree, self.settings.labels.same_size_siblings);
        assign_colors(&mut tree);
        debug!("chart ready: {} nodes, height {}", tree.len(), tree.height());
        Ok(Chart::new(
            tree,
            self.settings.focus_controller(),
            self.settings.label_style(),
        ))
    }

    fn measure_labels(&self, tree: &mut HierarchyArena) {
        let reference = self.settings.labels.reference_font_size;
        let order: Vec<Index> = tree.iter().map(|(idx, _)| idx).collect();
        for idx in order {
            if let Some(node) = tree.get_node_mut(idx) {
                node.data.label_width = self.measurer.text_width(&node.data.name, reference);
            }
        }
    }
}

/// A laid-out hierarchy plus its view state.
#[derive(Debug)]
pub struct Chart {
    tree: HierarchyArena,
    state: ViewState,
    /// Domain the last transition settles on
    domain: ViewDomain,
    controller: FocusController,
    style: LabelStyle,
}

impl Chart {
    pub fn new(tree: HierarchyArena, controller: FocusController, style: LabelStyle) -> Self {
        Self {
            tree,
            state: ViewState::Overview,
            domain: controller.overview(),
            controller,
            style,
        }
    }

    pub fn tree(&self) -> &HierarchyArena {
        &self.tree
    }

    pub fn state(&self) -> ViewState {
        self.state
    }

    pub fn domain(&self) -> ViewDomain {
        self.domain
    }

    pub fn controller(&self) -> &FocusController {
        &self.controller
    }

    /// Focused node; the root in overview.
    pub fn focused(&self) -> Option<Index> {
        self.state.focus_node(&self.tree)
    }

    /// Focus `idx`, starting from the settled domain of the previous selection.
    pub fn select(&mut self, idx: Index) -> DomainResult<TransitionPlan> {
        let current = self.domain;
        self.select_from(idx, current)
    }

    /// Focus `idx` starting from `current`, typically the interpolated domain
    /// of a transition still in flight. The latest selection wins.
    #[instrument(level = "debug", skip(self, current))]
    pub fn select_from(&mut self, idx: Index, current: ViewDomain) -> DomainResult<TransitionPlan> {
        let node = self
            .tree
            .get_node(idx)
            .ok_or_else(|| DomainError::NodeNotFound(format!("{:?}", idx)))?;
        let plan = self.controller.focus(&current, &node.data);
        self.state = ViewState::select(&self.tree, idx);
        self.domain = plan.to;
        debug!("state now {:?}", self.state);
        Ok(plan)
    }

    /// Focus the node at a name path from the root.
    pub fn select_path<S: AsRef<str>>(&mut self, path: &[S]) -> DomainResult<TransitionPlan> {
        let idx = self.resolve_path(path)?;
        self.select(idx)
    }

    pub fn resolve_path<S: AsRef<str>>(&self, path: &[S]) -> DomainResult<Index> {
        self.tree.find_path(path).ok_or_else(|| {
            DomainError::NodeNotFound(path.iter().map(AsRef::<str>::as_ref).join("/"))
        })
    }

    /// Render records for every node under `domain`, labels placed against the
    /// currently focused node. Pre-order.
    pub fn render(&self, domain: &ViewDomain) -> Vec<RenderedNode> {
        let Some(current) = self.focused() else {
            return Vec::new();
        };
        self.tree
            .iter()
            .filter_map(|(idx, node)| {
                let arc = project(&node.data, domain);
                let label = label_placement(&self.tree, idx, current, domain, &self.style)?;
                Some(RenderedNode {
                    name: node.data.name.clone(),
                    depth: node.depth,
                    weight: node.data.weight,
                    angle_start: arc.start_angle,
                    angle_end: arc.end_angle,
                    radius_inner: arc.inner_radius,
                    radius_outer: arc.outer_radius,
                    color: node.data.color.to_string(),
                    font_size: label.font_size,
                    label_rotation: label.rotation,
                    label_translation: label.translation,
                    label_anchor: label.anchor,
                    label_dx: label.dx,
                    label_dy: label.dy,
                    label_opacity: label.opacity,
                })
            })
            .collect()
    }

    /// Render records under the settled domain.
    pub fn render_current(&self) -> Vec<RenderedNode> {
        self.render(&self.domain)
    }
}
