//! stepviz turns an algorithm trace into animated, step-by-step frames.
//!
//! A trace is an [`AlgorithmResponse`]: an ordered list of steps, each carrying an untyped data
//! snapshot plus highlight and action metadata.
//!
//! # Pipeline overview
//!
//! 1. **Classify**: `snapshot -> Shape` via [`classify`], a total function over a closed set of
//!    structures (sequence, graph, grid, board, tree, trie, bit vector, table).
//! 2. **Build**: `(response, index) -> Frame` via [`FrameBuilder`], which resolves the step's
//!    snapshot, highlights and action and runs the matching render strategy into a
//!    [`DisplayList`].
//! 3. **Play**: [`PlaybackController`] owns the step index and the auto-advance timer and
//!    presents a fresh frame to a [`RenderSink`] on every transition.
//! 4. **Output** (optional): [`SvgSink`] / [`render_svg`] serialize frames to SVG with SMIL
//!    tweens; [`Rasterizer`] turns those documents into PNGs.
//!
//! Classification, frame building and playback never fail. Snapshots a strategy cannot draw
//! degrade to a visible "cannot visualize" message.
#![forbid(unsafe_code)]

mod animation;
mod config;
mod foundation;
mod frame;
mod layout;
mod model;
mod playback;
mod render;
mod shape;
mod sink;

pub use animation::ease::Ease;
pub use config::{EdgePolicy, GraphOpts, MotionOpts, VizConfig};
pub use foundation::core::{Canvas, Margins, Point, Rect, Rgba8, Vec2};
pub use foundation::error::{VizError, VizResult};
pub use frame::builder::{Caption, Frame, FrameBuilder};
pub use layout::tree::{LayoutNode, TidyTreeLayout, TreeLayout};
pub use model::highlight::HighlightSet;
pub use model::response::{AlgorithmResponse, AlgorithmStep};
pub use playback::controller::{PlaybackController, PlaybackOpts, PlaybackState};
pub use render::display::{DisplayList, DrawCmd, Label, RectEnter, Stroke, TextAnchor, Tween};
pub use render::palette::Palette;
pub use render::{CANNOT_VISUALIZE, Unrenderable};
pub use shape::{
    BIT_WIDTH, Distance, GraphEdge, GraphNode, GraphSnapshot, Shape, ShapeKind, TableSnapshot,
    MAX_TREE_DEPTH, TreeNode, classify,
};
pub use sink::RenderSink;
pub use sink::raster::{RasterImage, Rasterizer};
pub use sink::recording::RecordingSink;
pub use sink::svg::{CAPTION_H, SvgDocument, SvgOpts, SvgSink, render_svg};
