use crate::foundation::core::Point;
use crate::layout::tree::LayoutNode;
use crate::render::display::{DisplayList, Label, Stroke};
use crate::render::{RenderCtx, Unrenderable, fit_text};
use crate::shape::{MAX_TREE_DEPTH, TreeNode};

const MAX_NODE_R: f64 = 18.0;
const MIN_NODE_R: f64 = 6.0;

/// Preorder flattening: `(node, parent, depth)` per entry.
pub(crate) fn flatten(root: &TreeNode) -> Vec<(&TreeNode, LayoutNode)> {
    let mut out = Vec::with_capacity(root.len());
    let mut stack = vec![(root, None, 0usize)];
    while let Some((node, parent, depth)) = stack.pop() {
        let idx = out.len();
        out.push((node, LayoutNode { parent, depth }));
        for child in node.children.iter().rev() {
            stack.push((child, Some(idx), depth + 1));
        }
    }
    out
}

pub(crate) fn render(
    root: &TreeNode,
    trie: bool,
    ctx: &RenderCtx<'_>,
    out: &mut DisplayList,
) -> Result<(), Unrenderable> {
    if root.is_truncated() {
        return Err(Unrenderable(format!(
            "tree is deeper than {MAX_TREE_DEPTH} levels"
        )));
    }
    let flat = flatten(root);
    let leaves = flat.iter().filter(|(n, _)| n.is_leaf()).count().max(1);
    let content = ctx.canvas.content_box();
    let node_r = (content.width() / leaves as f64 / 2.0 - 2.0).clamp(MIN_NODE_R, MAX_NODE_R);
    let extent = content.inset(-node_r);

    let layout: Vec<LayoutNode> = flat.iter().map(|(_, l)| *l).collect();
    let pos = ctx.tree_layout.layout(&layout, extent);
    if pos.len() != flat.len() {
        return Err(Unrenderable(format!(
            "tree layout placed {} of {} nodes",
            pos.len(),
            flat.len()
        )));
    }

    let edge_stroke = Stroke::new(ctx.palette.grid_line, 2.0);
    for (idx, (node, l)) in flat.iter().enumerate() {
        let Some(parent) = l.parent else {
            continue;
        };
        let (a, b) = (pos[parent], pos[idx]);
        out.line(a, b, edge_stroke);
        if trie && let Some(edge) = &node.edge_label {
            let mid = a.midpoint(b);
            out.text(Label::new(
                Point::new(mid.x - 8.0, mid.y),
                edge.clone(),
                12.0,
                ctx.palette.muted_text,
            ));
        }
    }

    let highlight = ctx.highlight();
    let max_chars = ((node_r * 2.0) / 7.0).floor().max(1.0) as usize;
    for ((node, _), &p) in flat.iter().zip(&pos) {
        // Positioned nodes answer to their list position only.
        let hit = match node.index {
            Some(i) => ctx.highlights.contains_index(i),
            None => node
                .key
                .as_ref()
                .is_some_and(|k| ctx.highlights.contains_id(k)),
        };
        let fill = if hit {
            highlight
        } else if trie && node.terminal {
            ctx.palette.visited
        } else {
            ctx.palette.fill
        };
        out.circle(p, node_r, fill, Some(Stroke::new(ctx.palette.stroke, 2.0)));
        if !node.label.is_empty() {
            out.text(
                Label::new(
                    Point::new(p.x, p.y + 4.0),
                    fit_text(&node.label, max_chars),
                    (node_r * 0.7).clamp(8.0, 12.0),
                    ctx.palette.text,
                )
                .bold(),
            );
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/tree.rs"]
mod tests;
