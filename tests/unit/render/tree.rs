use super::*;
use crate::render::Fixture;
use crate::render::display::DrawCmd;
use serde_json::json;

fn tree(v: serde_json::Value) -> TreeNode {
    TreeNode::from_snapshot(v.as_array().unwrap())
}

fn circle_fills(list: &DisplayList) -> Vec<crate::foundation::core::Rgba8> {
    list.commands()
        .iter()
        .filter_map(|c| match c {
            DrawCmd::Circle { fill, .. } => Some(*fill),
            _ => None,
        })
        .collect()
}

#[test]
fn flatten_is_preorder_with_parent_links() {
    let root = tree(json!([{
        "value": 1,
        "left": {"value": 2, "left": {"value": 4}},
        "right": {"value": 3}
    }]));
    let flat = flatten(&root);
    let labels: Vec<&str> = flat.iter().map(|(n, _)| n.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "2", "4", "3"]);
    let parents: Vec<Option<usize>> = flat.iter().map(|(_, l)| l.parent).collect();
    assert_eq!(parents, vec![None, Some(0), Some(1), Some(0)]);
    assert_eq!(flat[2].1.depth, 2);
}

#[test]
fn edges_then_nodes() {
    let fx = Fixture::new(json!([]));
    let root = tree(json!([{"value": 1, "children": [{"value": 2}, {"value": 3}]}]));
    let mut out = DisplayList::new(fx.canvas);
    render(&root, false, &fx.ctx(None, None), &mut out).unwrap();
    let kinds: Vec<&str> = out
        .commands()
        .iter()
        .map(|c| match c {
            DrawCmd::Line { .. } => "line",
            DrawCmd::Circle { .. } => "circle",
            DrawCmd::Text(_) => "text",
            _ => "other",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["line", "line", "circle", "text", "circle", "text", "circle", "text"]
    );
}

#[test]
fn highlights_match_values_and_positions() {
    let fx = Fixture::new(json!([3]));
    let root = tree(json!([{"value": 1, "children": [{"value": 2}, {"value": 3}]}]));
    let mut out = DisplayList::new(fx.canvas);
    render(&root, false, &fx.ctx(None, None), &mut out).unwrap();
    let p = &fx.palette;
    assert_eq!(circle_fills(&out), vec![p.fill, p.fill, p.active]);

    let fx = Fixture::new(json!([1]));
    let flat_list = tree(json!([
        {"value": "r", "left": 1, "right": 2},
        {"value": "a"},
        {"value": "b"}
    ]));
    let mut out = DisplayList::new(fx.canvas);
    render(&flat_list, false, &fx.ctx(None, None), &mut out).unwrap();
    assert_eq!(circle_fills(&out), vec![p.fill, p.active, p.fill]);
}

#[test]
fn trie_labels_edges_and_tints_terminals() {
    let fx = Fixture::new(json!([]));
    let root = tree(json!([{
        "children": {"a": {"children": {"t": {"isEnd": true, "children": {}}}}}
    }]));
    let mut out = DisplayList::new(fx.canvas);
    render(&root, true, &fx.ctx(None, None), &mut out).unwrap();
    assert_eq!(out.texts().collect::<Vec<_>>(), vec!["a", "t"]);
    let p = &fx.palette;
    assert_eq!(circle_fills(&out), vec![p.fill, p.fill, p.visited]);
}

#[test]
fn positioned_nodes_ignore_value_matches() {
    // `1` addresses list position 1 ("a"), not the node whose value is 1.
    let fx = Fixture::new(json!([1]));
    let root = tree(json!([
        {"value": 1, "left": 1, "right": 2},
        {"value": "a"},
        {"value": 1}
    ]));
    let mut out = DisplayList::new(fx.canvas);
    render(&root, false, &fx.ctx(None, None), &mut out).unwrap();
    let p = &fx.palette;
    assert_eq!(circle_fills(&out), vec![p.fill, p.active, p.fill]);
}

#[test]
fn nested_root_matches_by_value() {
    let fx = Fixture::new(json!([8]));
    let root = tree(json!([{"value": 8, "left": {"value": 3}}]));
    let mut out = DisplayList::new(fx.canvas);
    render(&root, false, &fx.ctx(None, None), &mut out).unwrap();
    let p = &fx.palette;
    assert_eq!(circle_fills(&out), vec![p.active, p.fill]);
}

#[test]
fn truncated_tree_cannot_be_visualized() {
    let fx = Fixture::new(json!([]));
    let items: Vec<serde_json::Value> =
        (0..2000).map(|i| json!({"value": i, "left": i + 1})).collect();
    let shape = crate::shape::Shape::Tree(TreeNode::from_snapshot(&items));
    let (out, degraded) = fx.paint(&shape, None);
    assert!(degraded.is_some_and(|r| r.contains("deeper than")));
    assert!(out.texts().any(|t| t.contains(crate::render::CANNOT_VISUALIZE)));
}
