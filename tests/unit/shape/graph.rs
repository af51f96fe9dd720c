use super::*;
use serde_json::json;

fn snapshot(v: Value) -> GraphSnapshot {
    GraphSnapshot::from_records(v.as_array().unwrap())
}

#[test]
fn distances_cover_finite_infinite_and_absent() {
    let g = snapshot(json!([
        {"id": 0, "distance": 0, "visited": true},
        {"id": 1, "distance": "Infinity"},
        {"id": 2, "distance": null},
        {"id": 3},
        {"id": 4, "dist": 7.5}
    ]));
    assert_eq!(g.nodes[0].distance, Distance::Finite(0.0));
    assert!(g.nodes[0].visited);
    assert_eq!(g.nodes[1].distance, Distance::Infinite);
    assert_eq!(g.nodes[2].distance, Distance::Infinite);
    assert_eq!(g.nodes[3].distance, Distance::Absent);
    assert_eq!(g.nodes[4].distance, Distance::Finite(7.5));
    assert!(!g.nodes[1].visited);
}

#[test]
fn infinite_distance_labels_as_infinity_sign() {
    assert_eq!(Distance::Infinite.label().as_deref(), Some("∞"));
    assert_eq!(Distance::Finite(4.0).label().as_deref(), Some("4"));
    assert_eq!(Distance::Absent.label(), None);
}

#[test]
fn no_adjacency_fields_means_no_edges() {
    let g = snapshot(json!([{"id": 0}, {"id": 1}]));
    assert_eq!(g.edges, None);
}

#[test]
fn adjacency_resolves_ids_to_positions() {
    let g = snapshot(json!([
        {"id": "A", "neighbors": ["B", "C", "missing"]},
        {"id": "B", "edges": [{"to": "C", "weight": 3}]},
        {"id": "C"}
    ]));
    let edges = g.edges.unwrap();
    assert_eq!(
        edges,
        vec![
            GraphEdge { from: 0, to: 1, weight: None },
            GraphEdge { from: 0, to: 2, weight: None },
            GraphEdge { from: 1, to: 2, weight: Some(3.0) },
        ]
    );
}

#[test]
fn numeric_ids_match_across_representations() {
    let g = snapshot(json!([
        {"id": 1, "neighbors": ["2"]},
        {"id": 2.0, "neighbors": [1]}
    ]));
    let edges = g.edges.unwrap();
    assert_eq!(edges.len(), 2);
    assert_eq!((edges[0].from, edges[0].to), (0, 1));
    assert_eq!((edges[1].from, edges[1].to), (1, 0));
    assert_eq!(g.nodes[1].label(), "2");
}
