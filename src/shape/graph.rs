use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::shape::scalar;

/// Tentative distance attached to a graph node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Distance {
    Finite(f64),
    /// Infinite or unset. JSON producers serialize an infinite distance as `null` or as an
    /// `"Infinity"` string.
    Infinite,
    /// The record has no distance field at all.
    Absent,
}

impl Distance {
    fn from_field(v: Option<&Value>) -> Self {
        let Some(v) = v else {
            return Self::Absent;
        };
        match v {
            Value::Null => Self::Infinite,
            Value::Number(_) | Value::String(_) => {
                if let Value::String(s) = v
                    && matches!(s.trim(), "∞" | "inf" | "-inf")
                {
                    return Self::Infinite;
                }
                let f = scalar::to_f64(v);
                if f.is_nan() {
                    Self::Absent
                } else if f.is_infinite() {
                    Self::Infinite
                } else {
                    Self::Finite(f)
                }
            }
            _ => Self::Absent,
        }
    }

    /// Label text; `"∞"` for infinite distances, `None` when absent.
    pub fn label(self) -> Option<String> {
        match self {
            Self::Finite(v) => Some(scalar::format_number(v)),
            Self::Infinite => Some("∞".to_owned()),
            Self::Absent => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphNode {
    /// Entity id as supplied; highlight references match against it.
    pub id: Value,
    pub distance: Distance,
    pub visited: bool,
}

impl GraphNode {
    pub fn label(&self) -> String {
        scalar::display(&self.id)
    }
}

/// Directed edge between node positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
    pub weight: Option<f64>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphSnapshot {
    pub nodes: Vec<GraphNode>,
    /// Edges supplied by the snapshot itself; `None` when no record carries adjacency.
    pub edges: Option<Vec<GraphEdge>>,
}

const ADJACENCY_FIELDS: [&str; 3] = ["neighbors", "edges", "adj"];

impl GraphSnapshot {
    pub(crate) fn from_records(items: &[Value]) -> Self {
        let records: Vec<Option<&Map<String, Value>>> = items.iter().map(Value::as_object).collect();

        let nodes: Vec<GraphNode> = records
            .iter()
            .enumerate()
            .map(|(pos, rec)| GraphNode {
                id: rec
                    .and_then(|r| r.get("id"))
                    .cloned()
                    .unwrap_or_else(|| Value::from(pos)),
                distance: Distance::from_field(
                    rec.and_then(|r| r.get("distance").or_else(|| r.get("dist"))),
                ),
                visited: rec
                    .and_then(|r| r.get("visited"))
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            })
            .collect();

        let mut position_by_id = HashMap::<String, usize>::with_capacity(nodes.len());
        for (pos, node) in nodes.iter().enumerate() {
            position_by_id.entry(id_key(&node.id)).or_insert(pos);
        }

        let mut edges = Vec::new();
        let mut any_adjacency = false;
        for (from, rec) in records.iter().enumerate() {
            let Some(list) = rec.and_then(|r| {
                ADJACENCY_FIELDS
                    .iter()
                    .find_map(|f| r.get(*f).and_then(Value::as_array))
            }) else {
                continue;
            };
            any_adjacency = true;
            for entry in list {
                let (target, weight) = match entry {
                    Value::Object(e) => (
                        e.get("to").or_else(|| e.get("target")).or_else(|| e.get("node")),
                        e.get("weight").and_then(Value::as_f64),
                    ),
                    other => (Some(other), None),
                };
                let Some(to) = target.and_then(|t| position_by_id.get(&id_key(t)).copied())
                else {
                    continue;
                };
                edges.push(GraphEdge { from, to, weight });
            }
        }

        Self {
            nodes,
            edges: any_adjacency.then_some(edges),
        }
    }
}

/// Lookup key that lets `1`, `1.0` and `"1"` address the same node.
fn id_key(v: &Value) -> String {
    match v {
        Value::String(s) => s.trim().to_owned(),
        Value::Number(_) => crate::model::highlight::as_integer(v)
            .map(|i| i.to_string())
            .unwrap_or_else(|| v.to_string()),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/graph.rs"]
mod tests;
