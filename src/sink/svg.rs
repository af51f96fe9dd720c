use std::fmt::Write as _;

use crate::foundation::core::Rgba8;
use crate::frame::builder::Frame;
use crate::render::display::{DrawCmd, Label, RectEnter, Stroke, Tween};
use crate::sink::RenderSink;

/// Height of the caption strip drawn above the canvas.
pub const CAPTION_H: f64 = 40.0;
const CAPTION_TITLE: Rgba8 = Rgba8::rgb(0xf8, 0xfa, 0xfc);
const CAPTION_PROGRESS: Rgba8 = Rgba8::rgb(0xcb, 0xd5, 0xe1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SvgOpts {
    /// Draw the step title and progress above the canvas.
    pub caption: bool,
    /// Emit SMIL `<animate>` elements for tweens. Static attributes always hold final values.
    pub animate: bool,
}

impl Default for SvgOpts {
    fn default() -> Self {
        Self {
            caption: true,
            animate: true,
        }
    }
}

/// Serialize a frame's display list as a standalone SVG document.
pub fn render_svg(frame: &Frame, opts: &SvgOpts) -> String {
    let canvas = frame.display.canvas;
    let top = if opts.caption { CAPTION_H } else { 0.0 };
    let (w, h) = (canvas.width, canvas.height + top);

    let mut s = String::with_capacity(4096);
    let _ = write!(
        s,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = num(w),
        h = num(h),
    );

    if opts.caption {
        let bg = frame
            .display
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCmd::Clear { color } => Some(*color),
                _ => None,
            })
            .unwrap_or(Rgba8::rgb(0, 0, 0));
        let _ = write!(
            s,
            r#"<rect width="{}" height="{}"{}/>"#,
            num(w),
            num(CAPTION_H),
            paint("fill", bg)
        );
        let _ = write!(
            s,
            r#"<text x="12" y="26" font-size="16" font-weight="bold"{}>{}</text>"#,
            paint("fill", CAPTION_TITLE),
            escape(&frame.caption.title)
        );
        let _ = write!(
            s,
            r#"<text x="{}" y="26" font-size="13" text-anchor="end"{}>{}</text>"#,
            num(w - 12.0),
            paint("fill", CAPTION_PROGRESS),
            escape(&frame.caption.progress)
        );
        let _ = write!(s, r#"<g transform="translate(0 {})">"#, num(top));
    } else {
        s.push_str("<g>");
    }

    for cmd in frame.display.commands() {
        write_cmd(&mut s, cmd, canvas.width, canvas.height, opts.animate);
    }
    s.push_str("</g></svg>");
    s
}

fn write_cmd(s: &mut String, cmd: &DrawCmd, w: f64, h: f64, animate: bool) {
    match cmd {
        DrawCmd::Clear { color } => {
            let _ = write!(
                s,
                r#"<rect width="{}" height="{}"{}/>"#,
                num(w),
                num(h),
                paint("fill", *color)
            );
        }
        DrawCmd::Rect {
            rect,
            fill,
            stroke,
            enter,
        } => {
            let _ = write!(
                s,
                r#"<rect x="{}" y="{}" width="{}" height="{}"{}{}"#,
                num(rect.x0),
                num(rect.y0),
                num(rect.width()),
                num(rect.height()),
                paint("fill", *fill),
                stroke_attrs(stroke.as_ref()),
            );
            match enter {
                Some(RectEnter { from, tween }) if animate => {
                    s.push('>');
                    write_animate(s, "y", from.y0, rect.y0, tween);
                    write_animate(s, "height", from.height(), rect.height(), tween);
                    s.push_str("</rect>");
                }
                _ => s.push_str("/>"),
            }
        }
        DrawCmd::Line { from, to, stroke } => {
            let _ = write!(
                s,
                r#"<line x1="{}" y1="{}" x2="{}" y2="{}"{} stroke-linecap="round"/>"#,
                num(from.x),
                num(from.y),
                num(to.x),
                num(to.y),
                stroke_attrs(Some(stroke)),
            );
        }
        DrawCmd::Circle {
            center,
            radius,
            fill,
            stroke,
        } => {
            let _ = write!(
                s,
                r#"<circle cx="{}" cy="{}" r="{}"{}{}/>"#,
                num(center.x),
                num(center.y),
                num(*radius),
                paint("fill", *fill),
                stroke_attrs(stroke.as_ref()),
            );
        }
        DrawCmd::Text(label) => write_text(s, label, animate),
    }
}

fn write_text(s: &mut String, label: &Label, animate: bool) {
    let _ = write!(
        s,
        r#"<text x="{}" y="{}" font-size="{}" text-anchor="{}"{}"#,
        num(label.pos.x),
        num(label.pos.y),
        num(label.size),
        label.anchor.as_svg(),
        paint("fill", label.color),
    );
    if label.bold {
        s.push_str(r#" font-weight="bold""#);
    }
    s.push('>');
    s.push_str(&escape(&label.text));
    if let Some(fade) = label.fade_in.filter(|_| animate) {
        let end = fade.end_ms().max(1);
        if fade.delay_ms == 0 {
            let _ = write!(
                s,
                r#"<animate attributeName="opacity" values="0;1" dur="{end}ms" fill="freeze"/>"#
            );
        } else {
            let _ = write!(
                s,
                r#"<animate attributeName="opacity" values="0;0;1" keyTimes="0;{};1" dur="{end}ms" fill="freeze"/>"#,
                num(fade.delay_ms as f64 / end as f64)
            );
        }
    }
    s.push_str("</text>");
}

/// Eased attribute tween that holds `from` during the delay, then runs on the ease's spline.
fn write_animate(s: &mut String, attr: &str, from: f64, to: f64, tween: &Tween) {
    let [x1, y1, x2, y2] = tween.ease.control_points();
    let spline = format!("{} {} {} {}", num(x1), num(y1), num(x2), num(y2));
    let end = tween.end_ms().max(1);
    if tween.delay_ms == 0 {
        let _ = write!(
            s,
            r#"<animate attributeName="{attr}" values="{};{}" keyTimes="0;1" calcMode="spline" keySplines="{spline}" dur="{end}ms" fill="freeze"/>"#,
            num(from),
            num(to),
        );
    } else {
        let _ = write!(
            s,
            r#"<animate attributeName="{attr}" values="{f};{f};{}" keyTimes="0;{};1" calcMode="spline" keySplines="0 0 1 1;{spline}" dur="{end}ms" fill="freeze"/>"#,
            num(to),
            num(tween.delay_ms as f64 / end as f64),
            f = num(from),
        );
    }
}

fn paint(attr: &str, color: Rgba8) -> String {
    if color.a == 255 {
        format!(r#" {attr}="{}""#, color.to_hex_rgb())
    } else {
        format!(
            r#" {attr}="{}" {attr}-opacity="{}""#,
            color.to_hex_rgb(),
            num(color.opacity())
        )
    }
}

fn stroke_attrs(stroke: Option<&Stroke>) -> String {
    match stroke {
        Some(st) => format!(r#"{} stroke-width="{}""#, paint("stroke", st.color), num(st.width)),
        None => String::new(),
    }
}

/// Coordinate formatting: at most three decimals, no trailing zeros.
fn num(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_owned();
    }
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_owned(),
        other => other.to_owned(),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// One presented frame as an SVG document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SvgDocument {
    pub step_index: usize,
    pub svg: String,
}

/// Sink that serializes every presented frame to SVG and keeps the documents in order.
#[derive(Debug, Default)]
pub struct SvgSink {
    opts: SvgOpts,
    documents: Vec<SvgDocument>,
}

impl SvgSink {
    pub fn new(opts: SvgOpts) -> Self {
        Self {
            opts,
            documents: Vec::new(),
        }
    }

    pub fn documents(&self) -> &[SvgDocument] {
        &self.documents
    }

    pub fn latest(&self) -> Option<&SvgDocument> {
        self.documents.last()
    }

    /// Hand over the collected documents, leaving the sink empty.
    pub fn take_documents(&mut self) -> Vec<SvgDocument> {
        std::mem::take(&mut self.documents)
    }
}

impl RenderSink for SvgSink {
    fn present(&mut self, frame: &Frame) {
        self.documents.push(SvgDocument {
            step_index: frame.step_index,
            svg: render_svg(frame, &self.opts),
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sink/svg.rs"]
mod tests;
