//! Render strategies: one pure function per shape variant, each painting into a
//! [`DisplayList`](display::DisplayList).
//!
//! Every strategy starts from a cleared surface. A strategy whose precondition does not hold
//! for the snapshot it was handed reports [`Unrenderable`]; [`paint`] turns that into a visible
//! "cannot visualize" message instead of an error.

pub(crate) mod bits;
pub(crate) mod display;
pub(crate) mod graph;
pub(crate) mod grid;
pub(crate) mod palette;
pub(crate) mod sequence;
pub(crate) mod tree;

use crate::config::{GraphOpts, MotionOpts};
use crate::foundation::core::{Canvas, Point};
use crate::layout::tree::TreeLayout;
use crate::model::highlight::HighlightSet;
use crate::shape::Shape;

use display::{DisplayList, Label};
use palette::Palette;

/// Literal message painted when no strategy can draw a snapshot.
pub const CANNOT_VISUALIZE: &str = "cannot visualize";

/// A strategy precondition failed for the snapshot it was handed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct Unrenderable(pub String);

/// Everything a strategy may read besides the shape itself.
#[derive(Clone, Copy)]
pub(crate) struct RenderCtx<'a> {
    pub canvas: Canvas,
    pub palette: &'a Palette,
    pub motion: &'a MotionOpts,
    pub graph: &'a GraphOpts,
    pub highlights: &'a HighlightSet,
    pub action: Option<&'a str>,
    /// Shape shown by the preceding step, used as the tween origin.
    pub previous: Option<&'a Shape>,
    pub tree_layout: &'a dyn TreeLayout,
}

impl RenderCtx<'_> {
    pub fn highlight(&self) -> crate::foundation::core::Rgba8 {
        self.palette.highlight_for(self.action)
    }
}

/// Paint `shape` into `out`, replacing its contents. Returns the failure reason when the frame
/// degraded to the "cannot visualize" message.
pub(crate) fn paint(shape: &Shape, ctx: &RenderCtx<'_>, out: &mut DisplayList) -> Option<String> {
    out.clear(ctx.palette.background);
    let result = match shape {
        Shape::Sequence(values) => sequence::render(values, ctx, out),
        Shape::Graph(graph) => graph::render(graph, ctx, out),
        Shape::Grid(cells) => grid::render_grid(cells, ctx, out),
        Shape::Board(cells) => grid::render_board(cells, ctx, out),
        Shape::Table(table) => grid::render_table(table, ctx, out),
        Shape::Tree(root) => tree::render(root, false, ctx, out),
        Shape::Trie(root) => tree::render(root, true, ctx, out),
        Shape::BitVector(rows) => bits::render(rows, ctx, out),
    };

    match result {
        Ok(()) => None,
        Err(Unrenderable(reason)) => {
            tracing::warn!(kind = %shape.kind(), %reason, "snapshot degraded to message");
            out.clear(ctx.palette.background);
            paint_message(ctx, out, CANNOT_VISUALIZE, Some(&reason));
            Some(reason)
        }
    }
}

/// Centered headline with an optional muted detail line.
pub(crate) fn paint_message(
    ctx: &RenderCtx<'_>,
    out: &mut DisplayList,
    headline: &str,
    detail: Option<&str>,
) {
    let c = ctx.canvas.content_box().center();
    out.text(Label::new(c, headline, 16.0, ctx.palette.error).bold());
    if let Some(detail) = detail {
        out.text(Label::new(
            Point::new(c.x, c.y + 22.0),
            detail,
            12.0,
            ctx.palette.muted_text,
        ));
    }
}

/// Clip `text` to at most `max_chars` characters, marking the cut with an ellipsis.
pub(crate) fn fit_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    if max_chars == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max_chars - 1).collect();
    out.push('…');
    out
}

/// Owned render inputs for strategy tests.
#[cfg(test)]
pub(crate) struct Fixture {
    pub canvas: Canvas,
    pub palette: Palette,
    pub motion: MotionOpts,
    pub graph: GraphOpts,
    pub highlights: HighlightSet,
    pub layout: crate::layout::tree::TidyTreeLayout,
}

#[cfg(test)]
impl Fixture {
    pub fn new(highlights: serde_json::Value) -> Self {
        Self {
            canvas: Canvas::default(),
            palette: Palette::default(),
            motion: MotionOpts::default(),
            graph: GraphOpts::default(),
            highlights: HighlightSet::from_values(&highlights.as_array().cloned().unwrap_or_default()),
            layout: crate::layout::tree::TidyTreeLayout,
        }
    }

    pub fn ctx<'a>(&'a self, action: Option<&'a str>, previous: Option<&'a Shape>) -> RenderCtx<'a> {
        RenderCtx {
            canvas: self.canvas,
            palette: &self.palette,
            motion: &self.motion,
            graph: &self.graph,
            highlights: &self.highlights,
            action,
            previous,
            tree_layout: &self.layout,
        }
    }

    pub fn paint(&self, shape: &Shape, action: Option<&str>) -> (DisplayList, Option<String>) {
        let mut out = DisplayList::new(self.canvas);
        let degraded = paint(shape, &self.ctx(action, None), &mut out);
        (out, degraded)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/mod.rs"]
mod tests;
