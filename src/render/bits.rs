use crate::foundation::core::{Point, Rect};
use crate::render::display::{DisplayList, Label, Stroke, TextAnchor};
use crate::render::{RenderCtx, Unrenderable};
use crate::shape::BIT_WIDTH;

const LABEL_COL_W: f64 = 80.0;
const MAX_ROW_H: f64 = 24.0;

/// Bits of `value`, most significant first.
pub(crate) fn expand(value: u32) -> [bool; BIT_WIDTH] {
    std::array::from_fn(|i| (value >> (BIT_WIDTH - 1 - i)) & 1 == 1)
}

pub(crate) fn render(
    rows: &[Option<u32>],
    ctx: &RenderCtx<'_>,
    out: &mut DisplayList,
) -> Result<(), Unrenderable> {
    let values = rows
        .iter()
        .enumerate()
        .map(|(r, v)| v.ok_or_else(|| Unrenderable(format!("row {r} is not a 32-bit value"))))
        .collect::<Result<Vec<u32>, _>>()?;
    if values.is_empty() {
        return Err(Unrenderable("bit vector has no rows".to_owned()));
    }

    let content = ctx.canvas.content_box();
    let cell_w = ((content.width() - LABEL_COL_W) / BIT_WIDTH as f64).max(0.0);
    let row_h = (content.height() / values.len() as f64).min(MAX_ROW_H);
    let show_digits = cell_w >= 12.0 && row_h >= 12.0;
    let stroke = Stroke::new(ctx.palette.grid_line, 1.0);
    let highlight = ctx.highlight();

    for (r, &value) in values.iter().enumerate() {
        let y = content.y0 + r as f64 * row_h;
        let highlighted = ctx.highlights.contains_index(r);
        let label_color = if highlighted {
            highlight
        } else {
            ctx.palette.text
        };
        let mut label = Label::new(
            Point::new(content.x0 + LABEL_COL_W - 8.0, y + row_h * 0.7),
            value.to_string(),
            (row_h * 0.55).clamp(8.0, 13.0),
            label_color,
        )
        .anchor(TextAnchor::End);
        if highlighted {
            label = label.bold();
        }
        out.text(label);

        for (i, on) in expand(value).into_iter().enumerate() {
            let x = content.x0 + LABEL_COL_W + i as f64 * cell_w;
            let rect = Rect::new(x, y, x + cell_w, y + row_h);
            let fill = if on {
                ctx.palette.bit_on
            } else {
                ctx.palette.bit_off
            };
            let cell_stroke = if highlighted {
                Stroke::new(highlight, 2.0)
            } else {
                stroke
            };
            out.rect(rect, fill, Some(cell_stroke));
            if show_digits {
                out.text(Label::new(
                    Point::new(rect.center().x, y + row_h * 0.7),
                    if on { "1" } else { "0" },
                    (row_h * 0.5).min(11.0),
                    if on {
                        ctx.palette.background
                    } else {
                        ctx.palette.muted_text
                    },
                ));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/bits.rs"]
mod tests;
