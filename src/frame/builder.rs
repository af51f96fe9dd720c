use serde_json::Value;

use crate::config::VizConfig;
use crate::layout::tree::{TidyTreeLayout, TreeLayout};
use crate::model::highlight::HighlightSet;
use crate::model::response::AlgorithmResponse;
use crate::render::display::DisplayList;
use crate::render::{self, RenderCtx};
use crate::shape::{self, Shape};

/// Text accompanying a frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Caption {
    pub title: String,
    pub description: String,
    pub code: Option<String>,
    /// `"Step {i+1} of {n}"`, empty for an empty trace.
    pub progress: String,
}

/// Everything needed to paint one step.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Clamped step index the frame was built for.
    pub step_index: usize,
    pub step_count: usize,
    pub shape: Shape,
    pub highlights: HighlightSet,
    pub action: Option<String>,
    pub caption: Caption,
    pub display: DisplayList,
    /// Set when the snapshot could not be drawn and the frame shows a message instead.
    pub degraded: Option<String>,
}

/// Resolves a step into a classified, painted [`Frame`].
pub struct FrameBuilder {
    config: VizConfig,
    tree_layout: Box<dyn TreeLayout>,
}

impl Default for FrameBuilder {
    fn default() -> Self {
        Self::new(VizConfig::default())
    }
}

impl FrameBuilder {
    pub fn new(config: VizConfig) -> Self {
        Self {
            config,
            tree_layout: Box::new(TidyTreeLayout),
        }
    }

    /// Swap the hierarchical layout used for Tree and Trie snapshots.
    pub fn with_tree_layout(mut self, layout: impl TreeLayout + 'static) -> Self {
        self.tree_layout = Box::new(layout);
        self
    }

    pub fn config(&self) -> &VizConfig {
        &self.config
    }

    /// Build the frame for `step_index`, clamped into the trace.
    ///
    /// Pure: the same `(response, step_index)` always yields an equal frame. Bars tween from the
    /// preceding step of the trace, so the result does not depend on navigation history.
    #[tracing::instrument(skip(self, response), fields(steps = response.len()))]
    pub fn build(&self, response: &AlgorithmResponse, step_index: usize) -> Frame {
        let idx = response.clamp_index(step_index);
        let step = response.steps.get(idx);

        let shape = classify_at(response, idx);
        let previous = idx
            .checked_sub(1)
            .filter(|_| step.is_some())
            .map(|prev| classify_at(response, prev));
        let highlights = step
            .and_then(|s| s.highlights.as_deref())
            .map(HighlightSet::from_values)
            .unwrap_or_default();
        let action = step.and_then(|s| s.action.clone());

        let ctx = RenderCtx {
            canvas: self.config.canvas,
            palette: &self.config.palette,
            motion: &self.config.motion,
            graph: &self.config.graph,
            highlights: &highlights,
            action: action.as_deref(),
            previous: previous.as_ref(),
            tree_layout: self.tree_layout.as_ref(),
        };
        let mut display = DisplayList::new(self.config.canvas);
        let degraded = render::paint(&shape, &ctx, &mut display);
        let cmds = display.len();
        tracing::debug!(index = idx, kind = %shape.kind(), cmds, "frame built");

        let caption = match step {
            Some(s) => Caption {
                title: s.title.clone(),
                description: s.description.clone(),
                code: s.code.clone(),
                progress: format!("Step {} of {}", idx + 1, response.len()),
            },
            None => Caption {
                title: response.title.clone(),
                description: response.explanation.clone(),
                code: None,
                progress: String::new(),
            },
        };

        Frame {
            step_index: idx,
            step_count: response.len(),
            shape,
            highlights,
            action,
            caption,
            display,
            degraded,
        }
    }
}

fn classify_at(response: &AlgorithmResponse, idx: usize) -> Shape {
    shape::classify(response.snapshot_at(idx).unwrap_or(&Value::Null))
}

#[cfg(test)]
#[path = "../../tests/unit/frame/builder.rs"]
mod tests;
