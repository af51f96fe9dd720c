use std::path::Path;

use anyhow::Context as _;

use crate::animation::ease::Ease;
use crate::foundation::core::Canvas;
use crate::foundation::error::{VizError, VizResult};
use crate::playback::controller::PlaybackOpts;
use crate::render::palette::Palette;

/// Tween timings for animated strategies.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct MotionOpts {
    /// Bar height interpolation duration.
    pub bar_duration_ms: u64,
    /// Value label fade, starting once the bars settle.
    pub label_fade_ms: u64,
    pub ease: Ease,
}

impl Default for MotionOpts {
    fn default() -> Self {
        Self {
            bar_duration_ms: 750,
            label_fade_ms: 300,
            ease: Ease::InOutCubic,
        }
    }
}

/// What to draw for a graph snapshot whose records carry no adjacency.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Guess a topology: the fixed 4-node Dijkstra example for exactly four nodes, else a chain.
    #[default]
    Synthesize,
    /// Draw only edges the snapshot supplies.
    Explicit,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct GraphOpts {
    /// Radius of the circle nodes are placed on; shrunk to fit the content box.
    pub radius: f64,
    pub node_radius: f64,
    pub edge_policy: EdgePolicy,
}

impl Default for GraphOpts {
    fn default() -> Self {
        Self {
            radius: 150.0,
            node_radius: 24.0,
            edge_policy: EdgePolicy::Synthesize,
        }
    }
}

/// Complete visualization settings. Every field is optional in JSON.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct VizConfig {
    pub canvas: Canvas,
    pub palette: Palette,
    pub playback: PlaybackOpts,
    pub motion: MotionOpts,
    pub graph: GraphOpts,
}

impl VizConfig {
    pub fn from_json_str(text: &str) -> VizResult<Self> {
        let cfg: Self = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> VizResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> VizResult<()> {
        self.canvas.validate()?;
        if self.playback.interval_ms == 0 {
            return Err(VizError::validation("playback.interval_ms must be > 0"));
        }
        if !(self.graph.radius.is_finite() && self.graph.radius >= 0.0) {
            return Err(VizError::validation("graph.radius must be finite and >= 0"));
        }
        if !(self.graph.node_radius.is_finite() && self.graph.node_radius > 0.0) {
            return Err(VizError::validation(
                "graph.node_radius must be finite and > 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
