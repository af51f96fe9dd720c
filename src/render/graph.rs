use std::collections::HashSet;
use std::f64::consts::TAU;

use crate::config::EdgePolicy;
use crate::foundation::core::{Point, Vec2};
use crate::render::display::{DisplayList, Label, Stroke};
use crate::render::{RenderCtx, Unrenderable};
use crate::shape::{GraphEdge, GraphSnapshot, scalar};

/// Topology assumed for a four-node graph without explicit edges: `(from, to, weight)`.
const DIJKSTRA_EDGES: [(usize, usize, f64); 5] =
    [(0, 1, 4.0), (0, 2, 2.0), (1, 2, 1.0), (1, 3, 5.0), (2, 3, 8.0)];

/// Vertical room reserved under each node for its distance label.
const DISTANCE_LABEL_GAP: f64 = 16.0;

/// Edges to draw for `graph` under `policy`.
pub(crate) fn resolve_edges(graph: &GraphSnapshot, policy: EdgePolicy) -> Vec<GraphEdge> {
    if let Some(edges) = &graph.edges {
        return edges.clone();
    }
    match policy {
        EdgePolicy::Explicit => Vec::new(),
        EdgePolicy::Synthesize if graph.nodes.len() == 4 => DIJKSTRA_EDGES
            .iter()
            .map(|&(from, to, w)| GraphEdge {
                from,
                to,
                weight: Some(w),
            })
            .collect(),
        EdgePolicy::Synthesize => (1..graph.nodes.len())
            .map(|i| GraphEdge {
                from: i - 1,
                to: i,
                weight: None,
            })
            .collect(),
    }
}

/// Node centers evenly spaced on a circle, starting at angle zero.
pub(crate) fn circle_positions(count: usize, center: Point, radius: f64) -> Vec<Point> {
    (0..count)
        .map(|i| {
            let angle = TAU * i as f64 / count as f64;
            center + Vec2::new(radius * angle.cos(), radius * angle.sin())
        })
        .collect()
}

pub(crate) fn render(
    graph: &GraphSnapshot,
    ctx: &RenderCtx<'_>,
    out: &mut DisplayList,
) -> Result<(), Unrenderable> {
    if graph.nodes.is_empty() {
        return Err(Unrenderable("graph has no nodes".to_owned()));
    }

    let content = ctx.canvas.content_box();
    let node_r = ctx.graph.node_radius;
    let fit = (content.width().min(content.height()) / 2.0 - node_r - DISTANCE_LABEL_GAP).max(0.0);
    let radius = ctx.graph.radius.min(fit);
    let pos = circle_positions(graph.nodes.len(), content.center(), radius);

    let edge_stroke = Stroke::new(ctx.palette.grid_line, 2.0);
    let mut drawn = HashSet::new();
    for edge in resolve_edges(graph, ctx.graph.edge_policy) {
        let (Some(&a), Some(&b)) = (pos.get(edge.from), pos.get(edge.to)) else {
            continue;
        };
        if edge.from == edge.to || !drawn.insert((edge.from.min(edge.to), edge.from.max(edge.to)))
        {
            continue;
        }
        out.line(a, b, edge_stroke);
        if let Some(w) = edge.weight {
            let mid = a.midpoint(b);
            out.text(Label::new(
                Point::new(mid.x, mid.y - 4.0),
                scalar::format_number(w),
                11.0,
                ctx.palette.muted_text,
            ));
        }
    }

    let highlight = ctx.highlight();
    for (node, &p) in graph.nodes.iter().zip(&pos) {
        let fill = if ctx.highlights.contains_id(&node.id) {
            highlight
        } else if node.visited {
            ctx.palette.visited
        } else {
            ctx.palette.fill
        };
        out.circle(p, node_r, fill, Some(Stroke::new(ctx.palette.stroke, 2.0)));
        out.text(
            Label::new(
                Point::new(p.x, p.y + 5.0),
                node.label(),
                14.0,
                ctx.palette.text,
            )
            .bold(),
        );
        if let Some(d) = node.distance.label() {
            out.text(Label::new(
                Point::new(p.x, p.y + node_r + DISTANCE_LABEL_GAP),
                d,
                12.0,
                ctx.palette.muted_text,
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/graph.rs"]
mod tests;
