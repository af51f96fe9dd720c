use crate::foundation::core::{Point, Rect};

/// One node of a flattened hierarchy, in preorder. `parent` always points to an earlier entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayoutNode {
    pub parent: Option<usize>,
    pub depth: usize,
}

/// Hierarchical layout capability used by the Tree and Trie renderers.
///
/// Implementations return one position per input node, inside `extent`.
pub trait TreeLayout: Send + Sync {
    fn layout(&self, nodes: &[LayoutNode], extent: Rect) -> Vec<Point>;
}

/// Tidy layered layout: leaves take evenly spaced slots left to right, each parent is centered
/// over its first and last child, and depth maps to evenly spaced rows.
#[derive(Clone, Copy, Debug, Default)]
pub struct TidyTreeLayout;

impl TreeLayout for TidyTreeLayout {
    fn layout(&self, nodes: &[LayoutNode], extent: Rect) -> Vec<Point> {
        if nodes.is_empty() {
            return Vec::new();
        }

        let mut first_child = vec![None::<usize>; nodes.len()];
        let mut last_child = vec![None::<usize>; nodes.len()];
        for (idx, node) in nodes.iter().enumerate() {
            if let Some(p) = node.parent.filter(|p| *p < idx) {
                first_child[p].get_or_insert(idx);
                last_child[p] = Some(idx);
            }
        }

        let mut slot = vec![0.0f64; nodes.len()];
        let mut leaves = 0usize;
        for idx in 0..nodes.len() {
            if first_child[idx].is_none() {
                slot[idx] = leaves as f64;
                leaves += 1;
            }
        }
        // Preorder puts every child after its parent, so a reverse sweep sees children first.
        for idx in (0..nodes.len()).rev() {
            if let (Some(a), Some(b)) = (first_child[idx], last_child[idx]) {
                slot[idx] = (slot[a] + slot[b]) / 2.0;
            }
        }

        let max_depth = nodes.iter().map(|n| n.depth).max().unwrap_or(0);
        let col_w = extent.width() / leaves.max(1) as f64;
        let row_h = if max_depth == 0 {
            0.0
        } else {
            extent.height() / max_depth as f64
        };

        nodes
            .iter()
            .zip(&slot)
            .map(|(node, s)| {
                Point::new(
                    extent.x0 + (s + 0.5) * col_w,
                    extent.y0 + node.depth as f64 * row_h,
                )
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/tree.rs"]
mod tests;
