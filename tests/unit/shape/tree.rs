use super::*;
use serde_json::json;

fn tree(v: Value) -> TreeNode {
    TreeNode::from_snapshot(v.as_array().unwrap())
}

#[test]
fn nested_binary_tree_keeps_left_right_order() {
    let root = tree(json!([{
        "value": 8,
        "left": {"value": 3, "left": null, "right": {"value": 6}},
        "right": {"value": 10}
    }]));
    assert_eq!(root.label, "8");
    assert_eq!(root.index, None);
    let labels: Vec<&str> = root.children.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["3", "10"]);
    assert_eq!(root.children[0].children[0].label, "6");
    assert_eq!(root.len(), 4);
    assert_eq!(root.depth(), 3);
}

#[test]
fn flat_list_resolves_positions() {
    let root = tree(json!([
        {"val": "a", "left": 1, "right": 2},
        {"val": "b"},
        {"val": "c", "left": 0}
    ]));
    assert_eq!(root.index, Some(0));
    assert_eq!(root.children.len(), 2);
    assert_eq!(root.children[0].index, Some(1));
    assert_eq!(root.children[1].index, Some(2));
    // Back-reference to the root is on the current path and is dropped.
    assert!(root.children[1].is_leaf());
}

#[test]
fn children_list_and_scalar_leaves() {
    let root = tree(json!([{"name": "root", "children": [{"name": "x"}, 5]}]));
    assert_eq!(root.children[0].label, "x");
    assert_eq!(root.children[1].label, "5");
    assert_eq!(root.children[1].key, Some(json!(5)));
}

#[test]
fn keyed_children_become_labelled_edges() {
    let root = tree(json!([{
        "children": {
            "c": {"children": {"a": {"isEnd": true, "children": {}}}},
            "d": {"children": {}}
        }
    }]));
    assert_eq!(root.label, "");
    let edges: Vec<_> = root.children.iter().map(|c| c.edge_label.as_deref()).collect();
    assert_eq!(edges, vec![Some("c"), Some("d")]);
    let a = &root.children[0].children[0];
    assert_eq!(a.edge_label.as_deref(), Some("a"));
    assert!(a.terminal);
    assert!(!root.children[1].terminal);
}

#[test]
fn empty_snapshot_is_a_bare_root() {
    let root = TreeNode::from_snapshot(&[]);
    assert!(root.is_leaf());
    assert_eq!(root.len(), 1);
}

#[test]
fn shared_positions_are_resolved_once() {
    // Every record points both children at the next one.
    let items: Vec<Value> = (0..40)
        .map(|i| json!({"value": i, "left": i + 1, "right": i + 1}))
        .collect();
    let root = TreeNode::from_snapshot(&items);
    assert_eq!(root.len(), 40);
    assert_eq!(root.depth(), 40);
    assert_eq!(root.children.len(), 1);
    assert_eq!(root.children[0].index, Some(1));
    assert!(!root.is_truncated());
}

#[test]
fn first_expanded_parent_claims_a_shared_child() {
    let root = tree(json!([
        {"value": "r", "left": 1, "right": 2},
        {"value": "a", "left": 3},
        {"value": "b", "left": 3},
        {"value": "c"}
    ]));
    assert_eq!(root.len(), 4);
    assert_eq!(root.children[0].children[0].label, "c");
    assert!(root.children[1].is_leaf());
}

#[test]
fn long_chains_are_cut_at_the_depth_cap() {
    let items: Vec<Value> = (0..5000).map(|i| json!({"value": i, "left": i + 1})).collect();
    let root = TreeNode::from_snapshot(&items);
    assert_eq!(root.depth(), MAX_TREE_DEPTH);
    assert_eq!(root.len(), MAX_TREE_DEPTH);
    assert!(root.is_truncated());
    assert!(!root.children[0].truncated);
}

#[test]
fn shallow_chain_keeps_every_node() {
    let items: Vec<Value> = (0..100).map(|i| json!({"value": i, "left": i + 1})).collect();
    let root = TreeNode::from_snapshot(&items);
    assert_eq!(root.len(), 100);
    assert!(!root.is_truncated());
}
