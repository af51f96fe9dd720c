use serde_json::Value;

use crate::foundation::core::{Point, Rect};
use crate::render::display::{DisplayList, Label, Stroke, TextAnchor};
use crate::render::{RenderCtx, Unrenderable, fit_text};
use crate::shape::{TableSnapshot, scalar};

const MAX_CELL: f64 = 60.0;
const QUEEN: &str = "♛";
const TABLE_ROW_H: f64 = 28.0;

/// Square cells of one size, centered in `area`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct CellLayout {
    origin: Point,
    pub size: f64,
}

impl CellLayout {
    pub fn fit(area: Rect, rows: usize, cols: usize, max_cell: f64) -> Self {
        let size = (area.width() / cols.max(1) as f64)
            .min(area.height() / rows.max(1) as f64)
            .min(max_cell)
            .max(0.0);
        let w = size * cols as f64;
        let h = size * rows as f64;
        Self {
            origin: Point::new(
                area.x0 + (area.width() - w) / 2.0,
                area.y0 + (area.height() - h) / 2.0,
            ),
            size,
        }
    }

    pub fn cell(&self, row: usize, col: usize) -> Rect {
        let x = self.origin.x + col as f64 * self.size;
        let y = self.origin.y + row as f64 * self.size;
        Rect::new(x, y, x + self.size, y + self.size)
    }
}

/// Column count shared by every row, or why there is none.
fn rectangular<T>(rows: &[Vec<T>]) -> Result<usize, Unrenderable> {
    let cols = rows.first().map_or(0, Vec::len);
    if rows.is_empty() || cols == 0 {
        return Err(Unrenderable("grid is empty".to_owned()));
    }
    if let Some(r) = rows.iter().position(|row| row.len() != cols) {
        return Err(Unrenderable(format!(
            "grid is not rectangular: row {r} has {} cells, expected {cols}",
            rows[r].len()
        )));
    }
    Ok(cols)
}

fn cell_text(rect: Rect, text: String, ctx: &RenderCtx<'_>) -> Label {
    let size = (rect.height() * 0.4).clamp(8.0, 16.0);
    let max_chars = (rect.width() / (size * 0.6)).floor() as usize;
    Label::new(
        Point::new(rect.center().x, rect.center().y + size * 0.35),
        fit_text(&text, max_chars.max(1)),
        size,
        ctx.palette.text,
    )
}

pub(crate) fn render_grid(
    rows: &[Vec<Value>],
    ctx: &RenderCtx<'_>,
    out: &mut DisplayList,
) -> Result<(), Unrenderable> {
    let cols = rectangular(rows)?;
    let layout = CellLayout::fit(ctx.canvas.content_box(), rows.len(), cols, MAX_CELL);
    let stroke = Some(Stroke::new(ctx.palette.grid_line, 1.0));
    let highlight = ctx.highlight();

    for (r, row) in rows.iter().enumerate() {
        for (c, v) in row.iter().enumerate() {
            let rect = layout.cell(r, c);
            let fill = if ctx.highlights.contains_cell(r, c, cols) {
                highlight
            } else {
                ctx.palette.row_even
            };
            out.rect(rect, fill, stroke);
            out.text(cell_text(rect, scalar::display(v), ctx));
        }
    }
    Ok(())
}

pub(crate) fn render_board(
    rows: &[Vec<u32>],
    ctx: &RenderCtx<'_>,
    out: &mut DisplayList,
) -> Result<(), Unrenderable> {
    let cols = rectangular(rows)?;
    let layout = CellLayout::fit(ctx.canvas.content_box(), rows.len(), cols, f64::INFINITY);
    let highlight = ctx.highlight();

    for (r, row) in rows.iter().enumerate() {
        for (c, &v) in row.iter().enumerate() {
            let rect = layout.cell(r, c);
            let light = (r + c) % 2 == 0;
            let fill = if ctx.highlights.contains_cell(r, c, cols) {
                highlight
            } else if light {
                ctx.palette.board_light
            } else {
                ctx.palette.board_dark
            };
            out.rect(rect, fill, None);
            if v == 0 {
                continue;
            }
            let glyph = if v == 1 { QUEEN.to_owned() } else { v.to_string() };
            let color = if light {
                ctx.palette.background
            } else {
                ctx.palette.text
            };
            out.text(
                Label::new(
                    Point::new(rect.center().x, rect.center().y + layout.size * 0.2),
                    glyph,
                    layout.size * 0.6,
                    color,
                )
                .bold(),
            );
        }
    }
    Ok(())
}

pub(crate) fn render_table(
    table: &TableSnapshot,
    ctx: &RenderCtx<'_>,
    out: &mut DisplayList,
) -> Result<(), Unrenderable> {
    if table.columns.is_empty() {
        return Err(Unrenderable("table has no columns".to_owned()));
    }

    let content = ctx.canvas.content_box();
    let col_w = content.width() / table.columns.len() as f64;
    let row_h = ((content.height() - TABLE_ROW_H) / table.rows.len().max(1) as f64)
        .min(TABLE_ROW_H)
        .max(0.0);
    let stroke = Some(Stroke::new(ctx.palette.grid_line, 1.0));
    let highlight = ctx.highlight();

    for (c, name) in table.columns.iter().enumerate() {
        let x = content.x0 + c as f64 * col_w;
        let rect = Rect::new(x, content.y0, x + col_w, content.y0 + TABLE_ROW_H);
        out.rect(rect, ctx.palette.header, stroke);
        out.text(cell_text(rect, name.clone(), ctx).bold());
    }

    for (r, row) in table.rows.iter().enumerate() {
        let y = content.y0 + TABLE_ROW_H + r as f64 * row_h;
        let row_fill = if ctx.highlights.contains_index(r) {
            highlight
        } else if r % 2 == 0 {
            ctx.palette.row_even
        } else {
            ctx.palette.row_odd
        };
        for (c, v) in row.iter().enumerate() {
            let x = content.x0 + c as f64 * col_w;
            let rect = Rect::new(x, y, x + col_w, y + row_h);
            let fill = match v {
                Value::Bool(true) => ctx.palette.cell_true,
                Value::Bool(false) => ctx.palette.cell_false,
                _ => row_fill,
            };
            out.rect(rect, fill, stroke);
            let mut label = cell_text(rect, scalar::display(v), ctx);
            if v.is_number() {
                label = label.anchor(TextAnchor::End);
                label.pos.x = rect.x1 - 6.0;
            }
            out.text(label);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/grid.rs"]
mod tests;
