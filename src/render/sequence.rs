use crate::animation::ease::Ease;
use crate::foundation::core::{Point, Rect};
use crate::render::display::{DisplayList, DrawCmd, Label, RectEnter, Stroke, Tween};
use crate::render::{RenderCtx, Unrenderable};
use crate::shape::{Shape, scalar};

/// Outer and inner band padding, as a fraction of the band step.
const BAND_PADDING: f64 = 0.1;

/// Evenly spaced bands across `[x0, x1]`, padded on both ends and between bands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct BandScale {
    x0: f64,
    step: f64,
    padding: f64,
}

impl BandScale {
    pub fn new(x0: f64, x1: f64, count: usize, padding: f64) -> Self {
        let n = count as f64;
        let step = if count == 0 {
            0.0
        } else {
            (x1 - x0).max(0.0) / (n + padding)
        };
        Self { x0, step, padding }
    }

    pub fn x(&self, index: usize) -> f64 {
        self.x0 + self.step * self.padding + index as f64 * self.step
    }

    pub fn bandwidth(&self) -> f64 {
        self.step * (1.0 - self.padding)
    }
}

/// Linear value axis with the domain always spanning zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ValueScale {
    lo: f64,
    hi: f64,
    y_top: f64,
    y_bottom: f64,
}

impl ValueScale {
    pub fn new(values: &[f64], y_top: f64, y_bottom: f64) -> Self {
        let lo = values.iter().copied().fold(0.0, f64::min);
        let mut hi = values.iter().copied().fold(0.0, f64::max);
        if hi - lo <= f64::EPSILON {
            hi = lo + 1.0;
        }
        Self {
            lo,
            hi,
            y_top,
            y_bottom,
        }
    }

    pub fn y(&self, v: f64) -> f64 {
        let t = (v - self.lo) / (self.hi - self.lo);
        self.y_bottom - t * (self.y_bottom - self.y_top)
    }

    /// Bar extent from the zero baseline to `v`.
    pub fn bar(&self, x: f64, width: f64, v: f64) -> Rect {
        Rect::new(x, self.y(v.max(0.0)), x + width, self.y(v.min(0.0)))
    }
}

pub(crate) fn render(
    values: &[f64],
    ctx: &RenderCtx<'_>,
    out: &mut DisplayList,
) -> Result<(), Unrenderable> {
    if let Some(pos) = values.iter().position(|v| !v.is_finite()) {
        return Err(Unrenderable(format!(
            "sequence entry {pos} is not a finite number"
        )));
    }

    let content = ctx.canvas.content_box();
    if values.is_empty() {
        super::paint_message(ctx, out, "no data", None);
        return Ok(());
    }

    let band = BandScale::new(content.x0, content.x1, values.len(), BAND_PADDING);
    let scale = ValueScale::new(values, content.y0, content.y1);
    let previous = match ctx.previous {
        Some(Shape::Sequence(prev)) if prev.len() == values.len() => Some(prev.as_slice()),
        _ => None,
    };
    let bar_tween = Tween::new(ctx.motion.bar_duration_ms, ctx.motion.ease);
    let label_tween =
        Tween::new(ctx.motion.label_fade_ms, Ease::Linear).delayed(ctx.motion.bar_duration_ms);
    let baseline = scale.y(0.0);

    out.line(
        Point::new(content.x0, baseline),
        Point::new(content.x1, baseline),
        Stroke::new(ctx.palette.grid_line, 1.0),
    );

    for (i, &v) in values.iter().enumerate() {
        let x = band.x(i);
        let w = band.bandwidth();
        let rect = scale.bar(x, w, v);
        let from = match previous.map(|p| p[i]).filter(|p| p.is_finite()) {
            Some(p) => scale.bar(x, w, p),
            None => Rect::new(x, baseline, x + w, baseline),
        };
        let fill = if ctx.highlights.contains_index(i) {
            ctx.highlight()
        } else {
            ctx.palette.fill
        };

        out.push(DrawCmd::Rect {
            rect,
            fill,
            stroke: Some(Stroke::new(ctx.palette.stroke, 1.0)),
            enter: (from != rect).then_some(RectEnter {
                from,
                tween: bar_tween,
            }),
        });

        let cx = x + w / 2.0;
        let label_y = if v < 0.0 { rect.y1 + 14.0 } else { rect.y0 - 5.0 };
        out.text(
            Label::new(
                Point::new(cx, label_y),
                scalar::format_number(v),
                12.0,
                ctx.palette.text,
            )
            .fade_in(label_tween),
        );
        out.text(Label::new(
            Point::new(cx, content.y1 + 16.0),
            i.to_string(),
            11.0,
            ctx.palette.muted_text,
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/sequence.rs"]
mod tests;
