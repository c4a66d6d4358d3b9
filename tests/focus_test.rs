//! Tests for FocusController, ViewState and label placement

use std::f64::consts::{PI, TAU};

use generational_arena::Index;

use sunburst::application::parse_document;
use sunburst::domain::{
    label_placement, project, FocusController, HierarchyArena, HierarchyBuilder, Interval,
    LabelAnchor, LabelStyle, RadialLayout, ViewDomain, ViewState,
};

const MAX_RADIUS: f64 = 340.0;

fn laid_out(doc: &str) -> HierarchyArena {
    let mut tree = HierarchyBuilder::new().build(&parse_document(doc)).unwrap();
    RadialLayout::new().apply(&mut tree).unwrap();
    tree
}

fn find(tree: &HierarchyArena, path: &[&str]) -> Index {
    tree.find_path(path).unwrap()
}

fn controller() -> FocusController {
    FocusController::new(MAX_RADIUS, 20.0)
}

const DOC: &str = "a\n  b\n    c\n    e\n  d\n";

// ============================================================
// Target domains
// ============================================================

#[test]
fn given_non_root_selection_when_focusing_then_domain_spans_node_with_hole() {
    let tree = laid_out(DOC);
    let b = tree.get_node(find(&tree, &["a", "b"])).unwrap();
    let ctl = controller();

    let plan = ctl.focus(&ctl.overview(), &b.data);

    assert_eq!(plan.from, ViewDomain::overview(MAX_RADIUS));
    assert_eq!(plan.to.angle_domain, Interval::new(0.0, 4.0 * PI / 3.0));
    assert_eq!(plan.to.radius_domain, Interval::new(1.0 / 3.0, 1.0));
    assert_eq!(plan.to.radius_range, Interval::new(20.0, MAX_RADIUS));
    assert_eq!(plan.duration_ms, 750);
    assert_eq!(plan.label_fade_delay_ms, 400);
}

#[test]
fn given_focus_then_root_when_focusing_then_overview_restored_exactly() {
    let tree = laid_out(DOC);
    let ctl = controller();
    let root = tree.get_node(tree.root().unwrap()).unwrap();
    let c = tree.get_node(find(&tree, &["a", "b", "c"])).unwrap();

    let zoomed = ctl.focus(&ctl.overview(), &c.data);
    let back = ctl.focus(&zoomed.to, &root.data);

    assert_eq!(back.to.angle_domain, Interval::new(0.0, TAU));
    assert_eq!(back.to.radius_domain, Interval::new(0.0, 1.0));
    assert_eq!(back.to.radius_range, Interval::new(0.0, MAX_RADIUS));
    assert_eq!(back.to, ViewDomain::overview(MAX_RADIUS));
}

#[test]
fn given_transition_in_flight_when_selecting_again_then_starts_from_interpolated_domain() {
    let tree = laid_out(DOC);
    let ctl = controller();
    let b = tree.get_node(find(&tree, &["a", "b"])).unwrap();
    let d = tree.get_node(find(&tree, &["a", "d"])).unwrap();

    let first = ctl.focus(&ctl.overview(), &b.data);
    let midway = first.at(0.5);
    let second = ctl.focus(&midway, &d.data);

    assert_eq!(second.from, midway);
    assert_eq!(second.to, ctl.target(&d.data));
    assert_eq!(midway.radius_range, Interval::new(10.0, MAX_RADIUS));
}

#[test]
fn given_focused_domain_when_projecting_then_selected_node_fills_circle() {
    let tree = laid_out(DOC);
    let ctl = controller();
    let b = tree.get_node(find(&tree, &["a", "b"])).unwrap();
    let domain = ctl.target(&b.data);

    let arc = project(&b.data, &domain);
    assert!(arc.start_angle.abs() < 1e-9);
    assert!((arc.end_angle - TAU).abs() < 1e-9);
    assert!((arc.inner_radius - 20.0).abs() < 1e-9);

    // d lies outside the focused window and collapses to an edge
    let d = tree.get_node(find(&tree, &["a", "d"])).unwrap();
    let hidden = project(&d.data, &domain);
    assert_eq!(hidden.start_angle, TAU);
    assert_eq!(hidden.end_angle, TAU);
}

// ============================================================
// View state
// ============================================================

#[test]
fn given_any_state_when_selecting_then_follows_two_state_machine() {
    let tree = laid_out(DOC);
    let root = tree.root().unwrap();
    let b = find(&tree, &["a", "b"]);
    let c = find(&tree, &["a", "b", "c"]);

    let state = ViewState::default();
    assert_eq!(state, ViewState::Overview);
    assert_eq!(state.focus_node(&tree), Some(root));

    let state = ViewState::select(&tree, b);
    assert_eq!(state, ViewState::Focused(b));
    let state = ViewState::select(&tree, c);
    assert_eq!(state, ViewState::Focused(c));
    let state = ViewState::select(&tree, root);
    assert_eq!(state, ViewState::Overview);
}

// ============================================================
// Labels
// ============================================================

#[test]
fn given_root_when_placing_label_then_centered_without_rotation() {
    let tree = laid_out(DOC);
    let root = tree.root().unwrap();
    let domain = ViewDomain::overview(MAX_RADIUS);

    let label = label_placement(&tree, root, root, &domain, &LabelStyle::default()).unwrap();
    assert_eq!(label.rotation, 0.0);
    assert_eq!(label.anchor, LabelAnchor::Middle);
    assert_eq!(label.dx, 0.0);
    assert_eq!(label.translation, 0.0);
    assert_eq!(label.font_size, 30.0);
    assert_eq!(label.opacity, 1.0);
}

#[test]
fn given_left_half_node_when_placing_label_then_flipped_and_mirrored() {
    // b: [0, π], d: [π, 2π]
    let tree = laid_out("a\n  b\n  d\n");
    let root = tree.root().unwrap();
    let d = find(&tree, &["a", "d"]);
    let domain = ViewDomain::overview(MAX_RADIUS);

    let label = label_placement(&tree, d, root, &domain, &LabelStyle::default()).unwrap();
    // mid 3π/2 → 180°, flipped to 360°
    assert!((label.rotation - 360.0).abs() < 1e-9);
    assert_eq!(label.anchor, LabelAnchor::End);
    assert_eq!(label.dx, -6.0);
    assert!((label.translation + MAX_RADIUS / 2.0).abs() < 1e-9);
    assert_eq!(label.dy, 0.35);
}

#[test]
fn given_right_half_node_when_placing_label_then_starts_at_inner_radius() {
    let tree = laid_out("a\n  b\n  d\n");
    let root = tree.root().unwrap();
    let b = find(&tree, &["a", "b"]);
    let domain = ViewDomain::overview(MAX_RADIUS);

    let label = label_placement(&tree, b, root, &domain, &LabelStyle::default()).unwrap();
    assert!(label.rotation.abs() < 1e-9);
    assert_eq!(label.anchor, LabelAnchor::Start);
    assert_eq!(label.dx, 6.0);
    assert!((label.translation - MAX_RADIUS / 2.0).abs() < 1e-9);
}

#[test]
fn given_focused_node_when_placing_its_label_then_rotated_back_a_quarter() {
    let tree = laid_out("a\n  b\n  d\n");
    let b = find(&tree, &["a", "b"]);
    let ctl = controller();
    let domain = ctl.target(&tree.get_node(b).unwrap().data);

    let label = label_placement(&tree, b, b, &domain, &LabelStyle::default()).unwrap();
    // mid of b maps to π under its own domain → 90°, minus 90° for the focus
    assert!(label.rotation.abs() < 1e-9);
    assert_eq!(label.anchor, LabelAnchor::Start);
}

#[test]
fn given_focus_when_placing_labels_then_only_focused_subtree_stays_visible() {
    let tree = laid_out(DOC);
    let b = find(&tree, &["a", "b"]);
    let domain = controller().target(&tree.get_node(b).unwrap().data);
    let style = LabelStyle::default();

    let opacity = |path: &[&str]| {
        label_placement(&tree, find(&tree, path), b, &domain, &style)
            .unwrap()
            .opacity
    };
    assert_eq!(opacity(&["a", "b"]), 1.0);
    assert_eq!(opacity(&["a", "b", "c"]), 1.0);
    assert_eq!(opacity(&["a", "b", "e"]), 1.0);
    assert_eq!(opacity(&["a", "d"]), 0.0);
    assert_eq!(opacity(&["a"]), 0.0);
}

#[test]
fn given_node_inside_hole_when_placing_label_then_translation_is_not_clamped() {
    let tree = laid_out(DOC);
    let root = tree.root().unwrap();
    let b = find(&tree, &["a", "b"]);
    let domain = controller().target(&tree.get_node(b).unwrap().data);

    // root's inner radius 0 sits below the focused window [1/3, 1] → [20, 340]
    let label = label_placement(&tree, root, b, &domain, &LabelStyle::default()).unwrap();
    assert!((label.translation + 140.0).abs() < 1e-9);

    // arcs stay clamped under the same domain
    let arc = project(&tree.get_node(root).unwrap().data, &domain);
    assert_eq!(arc.inner_radius, 0.0);
}
