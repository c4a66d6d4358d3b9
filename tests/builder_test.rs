//! Tests for HierarchyBuilder

use rstest::rstest;

use sunburst::application::parse_document;
use sunburst::domain::{flatten, to_document, DomainError, HierarchyArena, HierarchyBuilder, Record};

fn build(doc: &str) -> Result<HierarchyArena, DomainError> {
    HierarchyBuilder::new().build(&parse_document(doc))
}

/// Nested `(name, children)` view for shape comparisons.
#[derive(Debug, PartialEq)]
struct Shape(String, Vec<Shape>);

fn shape(tree: &HierarchyArena) -> Shape {
    fn walk(tree: &HierarchyArena, idx: generational_arena::Index) -> Shape {
        let node = tree.get_node(idx).unwrap();
        Shape(
            node.data.name.clone(),
            node.children.iter().map(|&c| walk(tree, c)).collect(),
        )
    }
    walk(tree, tree.root().unwrap())
}

fn leaf(name: &str) -> Shape {
    Shape(name.to_string(), vec![])
}

fn node(name: &str, children: Vec<Shape>) -> Shape {
    Shape(name.to_string(), children)
}

// ============================================================
// Reconstruction rules
// ============================================================

#[test]
fn given_two_children_when_building_then_root_has_both_in_order() {
    let tree = build("a\n  b\n  c\n").unwrap();
    assert_eq!(shape(&tree), node("a", vec![leaf("b"), leaf("c")]));
}

#[test]
fn given_nested_child_then_sibling_when_building_then_reattaches_to_root() {
    let tree = build("a\n  b\n    c\n  d\n").unwrap();
    assert_eq!(
        shape(&tree),
        node("a", vec![node("b", vec![leaf("c")]), leaf("d")])
    );
}

#[test]
fn given_jump_up_several_levels_when_building_then_climbs_matching_ancestors() {
    let doc = "r\n  a\n    b\n      c\n        d\n    e\n  f\n";
    let tree = build(doc).unwrap();
    assert_eq!(
        shape(&tree),
        node(
            "r",
            vec![
                node(
                    "a",
                    vec![node("b", vec![node("c", vec![leaf("d")])]), leaf("e")]
                ),
                leaf("f"),
            ]
        )
    );
}

#[test]
fn given_siblings_when_building_then_order_matches_input_not_alphabet() {
    let tree = build("root\n  zeta\n  alpha\n  mid\n").unwrap();
    let root = tree.get_node(tree.root().unwrap()).unwrap();
    let names: Vec<_> = root
        .children
        .iter()
        .map(|&c| tree.get_node(c).unwrap().data.name.as_str())
        .collect();
    assert_eq!(names, vec!["zeta", "alpha", "mid"]);
}

#[test]
fn given_leaves_when_building_then_depth_matches_deepest_column() {
    let records = parse_document("a\n  b\n    c\n  d\n      e\n");
    // "e" skips a level and is malformed; check the well-formed prefix instead
    let tree = HierarchyBuilder::new().build(&records[..4]).unwrap();
    for idx in tree.leaf_nodes() {
        let node = tree.get_node(idx).unwrap();
        let record = records
            .iter()
            .find(|r| r.value_at(r.declared_depth().unwrap()) == Some(node.data.name.as_str()))
            .unwrap();
        assert_eq!(node.depth + 1, record.declared_depth().unwrap());
    }
}

#[test]
fn given_indented_root_when_building_then_root_column_sets_base_level() {
    let tree = build("  a\n    b\n    c\n").unwrap();
    assert_eq!(tree.root_level(), 2);
    assert_eq!(shape(&tree), node("a", vec![leaf("b"), leaf("c")]));
}

// ============================================================
// Blank lines and errors
// ============================================================

#[test]
fn given_blank_lines_when_building_then_skips_them() {
    let tree = build("\na\n\n  b\n  \n  c\n\n").unwrap();
    assert_eq!(shape(&tree), node("a", vec![leaf("b"), leaf("c")]));
}

#[rstest]
#[case("")]
#[case("\n\n")]
#[case("  \n    \n")]
fn given_no_usable_records_when_building_then_empty_document(#[case] doc: &str) {
    assert_eq!(build(doc).unwrap_err(), DomainError::EmptyDocument);
}

#[test]
fn given_column_three_under_depth_one_cursor_when_building_then_malformed_at_index() {
    let err = build("a\n    x\n").unwrap_err();
    assert_eq!(err, DomainError::MalformedHierarchy { record_index: 1 });
}

#[rstest]
#[case("a\nb\n", 1)]
#[case("a\n  b\nc\n", 2)]
#[case("a\n  b\n      c\n", 2)]
#[case("a\n\n  b\n\n        c\n", 4)]
fn given_unreconcilable_record_when_building_then_reports_its_index(
    #[case] doc: &str,
    #[case] index: usize,
) {
    assert_eq!(
        build(doc).unwrap_err(),
        DomainError::MalformedHierarchy {
            record_index: index
        }
    );
}

#[test]
fn given_explicit_records_when_building_then_uses_sparse_columns() {
    let records = vec![
        Record::at(1, "root"),
        Record::at(2, "a"),
        Record::new(),
        Record::at(3, "a1"),
        Record::at(2, "b"),
    ];
    let tree = HierarchyBuilder::new().build(&records).unwrap();
    assert_eq!(
        shape(&tree),
        node("root", vec![node("a", vec![leaf("a1")]), leaf("b")])
    );
}

// ============================================================
// Round trip
// ============================================================

#[rstest]
#[case("a\n  b\n  c\n")]
#[case("a\n  b\n    c\n  d\n")]
#[case("r\n  a\n    b\n      c\n        d\n    e\n  f\n")]
#[case("  indented\n    child\n")]
fn given_built_tree_when_flattened_and_rebuilt_then_isomorphic(#[case] doc: &str) {
    let tree = build(doc).unwrap();

    let from_records = HierarchyBuilder::new().build(&flatten(&tree)).unwrap();
    let from_text = build(&to_document(&tree)).unwrap();

    assert_eq!(shape(&from_records), shape(&tree));
    assert_eq!(shape(&from_text), shape(&tree));
}

#[test]
fn given_tree_when_rendering_document_then_uses_two_space_indent() {
    let tree = build("a\n\n  b\n    c\n").unwrap();
    assert_eq!(to_document(&tree), "a\n  b\n    c\n");
}
