use crate::animation::ease::Ease;
use crate::foundation::core::{Canvas, Point, Rect, Rgba8};

/// Time-based interpolation attached to a draw command, relative to frame presentation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub delay_ms: u64,
    pub duration_ms: u64,
    pub ease: Ease,
}

impl Tween {
    pub fn new(duration_ms: u64, ease: Ease) -> Self {
        Self {
            delay_ms: 0,
            duration_ms,
            ease,
        }
    }

    pub fn delayed(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn end_ms(&self) -> u64 {
        self.delay_ms.saturating_add(self.duration_ms)
    }

    /// Eased progress in `[0, 1]` at `t_ms` after presentation.
    pub fn progress(&self, t_ms: u64) -> f64 {
        if t_ms <= self.delay_ms {
            return 0.0;
        }
        if self.duration_ms == 0 || t_ms >= self.end_ms() {
            return 1.0;
        }
        let t = (t_ms - self.delay_ms) as f64 / self.duration_ms as f64;
        self.ease.apply(t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stroke {
    pub color: Rgba8,
    pub width: f64,
}

impl Stroke {
    pub fn new(color: Rgba8, width: f64) -> Self {
        Self { color, width }
    }
}

/// Rectangle geometry animated from `from` to the command's final rect.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectEnter {
    pub from: Rect,
    pub tween: Tween,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_svg(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Middle => "middle",
            Self::End => "end",
        }
    }
}

/// Text primitive. `pos` is the baseline anchor point.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub pos: Point,
    pub text: String,
    pub size: f64,
    pub color: Rgba8,
    pub anchor: TextAnchor,
    pub bold: bool,
    pub fade_in: Option<Tween>,
}

impl Label {
    pub fn new(pos: Point, text: impl Into<String>, size: f64, color: Rgba8) -> Self {
        Self {
            pos,
            text: text.into(),
            size,
            color,
            anchor: TextAnchor::Middle,
            bold: false,
            fade_in: None,
        }
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn fade_in(mut self, tween: Tween) -> Self {
        self.fade_in = Some(tween);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
/// Backend-agnostic drawing primitive. Sinks paint these in list order.
pub enum DrawCmd {
    Clear {
        color: Rgba8,
    },
    Rect {
        rect: Rect,
        fill: Rgba8,
        stroke: Option<Stroke>,
        enter: Option<RectEnter>,
    },
    Line {
        from: Point,
        to: Point,
        stroke: Stroke,
    },
    Circle {
        center: Point,
        radius: f64,
        fill: Rgba8,
        stroke: Option<Stroke>,
    },
    Text(Label),
}

#[derive(Clone, Debug, PartialEq)]
/// Draw commands for one frame on a fixed logical canvas.
pub struct DisplayList {
    pub canvas: Canvas,
    pub cmds: Vec<DrawCmd>,
}

impl DisplayList {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            cmds: Vec::new(),
        }
    }

    /// Drop everything and start over with a full-surface clear.
    pub fn clear(&mut self, color: Rgba8) {
        self.cmds.clear();
        self.cmds.push(DrawCmd::Clear { color });
    }

    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    pub fn rect(&mut self, rect: Rect, fill: Rgba8, stroke: Option<Stroke>) {
        self.push(DrawCmd::Rect {
            rect,
            fill,
            stroke,
            enter: None,
        });
    }

    pub fn line(&mut self, from: Point, to: Point, stroke: Stroke) {
        self.push(DrawCmd::Line { from, to, stroke });
    }

    pub fn circle(&mut self, center: Point, radius: f64, fill: Rgba8, stroke: Option<Stroke>) {
        self.push(DrawCmd::Circle {
            center,
            radius,
            fill,
            stroke,
        });
    }

    pub fn text(&mut self, label: Label) {
        self.push(DrawCmd::Text(label));
    }

    pub fn commands(&self) -> &[DrawCmd] {
        &self.cmds
    }

    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    /// All text content in paint order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Text(label) => Some(label.text.as_str()),
            _ => None,
        })
    }

    /// Static copy of this list as it appears `t_ms` after presentation. Entering rects sit at
    /// their eased position and fading labels carry the matching alpha; no tweens remain.
    pub fn sample_at(&self, t_ms: u64) -> DisplayList {
        let cmds = self
            .cmds
            .iter()
            .map(|cmd| match cmd {
                DrawCmd::Rect {
                    rect,
                    fill,
                    stroke,
                    enter: Some(enter),
                } => DrawCmd::Rect {
                    rect: mix_rect(enter.from, *rect, enter.tween.progress(t_ms)),
                    fill: *fill,
                    stroke: *stroke,
                    enter: None,
                },
                DrawCmd::Text(label) => {
                    let mut label = label.clone();
                    if let Some(fade) = label.fade_in.take() {
                        let alpha = f64::from(label.color.a) * fade.progress(t_ms);
                        label.color.a = alpha.round().clamp(0.0, 255.0) as u8;
                    }
                    DrawCmd::Text(label)
                }
                other => other.clone(),
            })
            .collect();
        DisplayList {
            canvas: self.canvas,
            cmds,
        }
    }

    /// Longest tween end across all commands; `0` for a static frame.
    pub fn motion_end_ms(&self) -> u64 {
        self.cmds
            .iter()
            .filter_map(|c| match c {
                DrawCmd::Rect {
                    enter: Some(enter), ..
                } => Some(enter.tween.end_ms()),
                DrawCmd::Text(Label {
                    fade_in: Some(t), ..
                }) => Some(t.end_ms()),
                _ => None,
            })
            .max()
            .unwrap_or(0)
    }
}

fn mix_rect(from: Rect, to: Rect, p: f64) -> Rect {
    let mix = |a: f64, b: f64| a + (b - a) * p;
    Rect::new(
        mix(from.x0, to.x0),
        mix(from.y0, to.y0),
        mix(from.x1, to.x1),
        mix(from.y1, to.y1),
    )
}

#[cfg(test)]
#[path = "../../tests/unit/render/display.rs"]
mod tests;
