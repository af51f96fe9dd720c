use super::*;
use crate::frame::builder::FrameBuilder;
use crate::model::response::AlgorithmResponse;

fn frame(json: &str, idx: usize) -> Frame {
    let r = AlgorithmResponse::from_json_str(json).unwrap();
    FrameBuilder::default().build(&r, idx)
}

const BARS: &str = r#"{"title": "Sort <fast>", "steps": [
    {"title": "A & B", "data": [3, 1]},
    {"title": "B", "data": [1, 3]}
]}"#;

#[test]
fn caption_strip_offsets_content() {
    let svg = render_svg(&frame(BARS, 0), &SvgOpts::default());
    assert!(svg.starts_with("<svg "));
    assert!(svg.ends_with("</g></svg>"));
    assert!(svg.contains(r#"height="440""#));
    assert!(svg.contains(r#"<g transform="translate(0 40)">"#));
    assert!(svg.contains("A &amp; B"));
    assert!(svg.contains("Step 1 of 2"));
}

#[test]
fn without_caption_the_document_matches_the_canvas() {
    let opts = SvgOpts {
        caption: false,
        animate: false,
    };
    let svg = render_svg(&frame(BARS, 0), &opts);
    assert!(svg.contains(r#"viewBox="0 0 800 400""#));
    assert!(!svg.contains("Step 1 of 2"));
    assert!(!svg.contains("<animate"));
}

#[test]
fn tweens_become_spline_animations() {
    let svg = render_svg(&frame(BARS, 1), &SvgOpts::default());
    assert!(svg.contains(r#"<animate attributeName="height""#));
    assert!(svg.contains(r#"calcMode="spline""#));
    assert!(svg.contains(r#"keySplines="0.645 0.045 0.355 1""#));
    assert!(svg.contains(r#"attributeName="opacity" values="0;0;1""#));
}

#[test]
fn numbers_are_compact() {
    assert_eq!(num(1.5000), "1.5");
    assert_eq!(num(40.0), "40");
    assert_eq!(num(-0.0001), "0");
    assert_eq!(num(f64::NAN), "0");
}

#[test]
fn markup_is_escaped() {
    assert_eq!(escape(r#"<a href="x">'&'"#), "&lt;a href=&quot;x&quot;&gt;&apos;&amp;&apos;");
}

#[test]
fn sink_keeps_documents_in_order() {
    let mut sink = SvgSink::new(SvgOpts::default());
    sink.present(&frame(BARS, 1));
    sink.present(&frame(BARS, 0));
    let idx: Vec<usize> = sink.documents().iter().map(|d| d.step_index).collect();
    assert_eq!(idx, vec![1, 0]);
    assert_eq!(sink.take_documents().len(), 2);
    assert!(sink.latest().is_none());
}
