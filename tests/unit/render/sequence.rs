use super::*;
use crate::render::Fixture;
use crate::render::display::DrawCmd;
use serde_json::json;

fn bars(list: &DisplayList) -> Vec<(Rect, crate::foundation::core::Rgba8, Option<RectEnter>)> {
    list.commands()
        .iter()
        .filter_map(|c| match c {
            DrawCmd::Rect {
                rect, fill, enter, ..
            } => Some((*rect, *fill, *enter)),
            _ => None,
        })
        .collect()
}

#[test]
fn band_scale_matches_padded_bands() {
    let band = BandScale::new(40.0, 780.0, 7, 0.1);
    let step = 740.0 / 7.1;
    assert!((band.x(0) - (40.0 + step * 0.1)).abs() < 1e-9);
    assert!((band.x(6) + band.bandwidth() + step * 0.1 - 780.0).abs() < 1e-9);
    assert!((band.bandwidth() - step * 0.9).abs() < 1e-9);
}

#[test]
fn value_scale_spans_zero() {
    let scale = ValueScale::new(&[5.0, 10.0], 20.0, 360.0);
    assert_eq!(scale.y(0.0), 360.0);
    assert_eq!(scale.y(10.0), 20.0);
    let mixed = ValueScale::new(&[-10.0, 10.0], 0.0, 100.0);
    assert_eq!(mixed.y(0.0), 50.0);
    let r = mixed.bar(0.0, 5.0, -10.0);
    assert_eq!((r.y0, r.y1), (50.0, 100.0));
}

#[test]
fn highlighted_bars_use_action_tint() {
    let fx = Fixture::new(json!([0, 1]));
    let values = [64.0, 34.0, 25.0];
    let mut out = DisplayList::new(fx.canvas);

    render(&values, &fx.ctx(Some("compare"), None), &mut out).unwrap();
    let b = bars(&out);
    assert_eq!(b[0].1, fx.palette.active);
    assert_eq!(b[1].1, fx.palette.active);
    assert_eq!(b[2].1, fx.palette.fill);

    let mut out = DisplayList::new(fx.canvas);
    render(&values, &fx.ctx(Some("swap"), None), &mut out).unwrap();
    let b = bars(&out);
    assert_eq!(b[0].1, fx.palette.complete);
    assert_eq!(b[2].1, fx.palette.fill);
}

#[test]
fn bars_grow_from_baseline_without_previous_step() {
    let fx = Fixture::new(json!([]));
    let mut out = DisplayList::new(fx.canvas);
    render(&[3.0, 6.0], &fx.ctx(None, None), &mut out).unwrap();
    let (rect, _, enter) = bars(&out)[1];
    let enter = enter.unwrap();
    assert_eq!(enter.from.height(), 0.0);
    assert_eq!(enter.from.y0, rect.y1);
    assert_eq!(enter.tween.duration_ms, 750);
}

#[test]
fn bars_tween_from_previous_values() {
    let fx = Fixture::new(json!([]));
    let prev = Shape::Sequence(vec![6.0, 3.0]);
    let mut out = DisplayList::new(fx.canvas);
    render(&[3.0, 6.0], &fx.ctx(None, Some(&prev)), &mut out).unwrap();
    let b = bars(&out);
    let (first, _, enter) = b[0];
    let enter = enter.unwrap();
    assert!(enter.from.height() > first.height());

    // Unchanged values carry no tween.
    let same = Shape::Sequence(vec![3.0, 6.0]);
    let mut out = DisplayList::new(fx.canvas);
    render(&[3.0, 6.0], &fx.ctx(None, Some(&same)), &mut out).unwrap();
    assert!(bars(&out).iter().all(|(_, _, e)| e.is_none()));
}

#[test]
fn labels_sit_above_bars_and_fade_in_after_them() {
    let fx = Fixture::new(json!([]));
    let mut out = DisplayList::new(fx.canvas);
    render(&[12.5], &fx.ctx(None, None), &mut out).unwrap();
    let (rect, _, _) = bars(&out)[0];
    let label = out
        .commands()
        .iter()
        .find_map(|c| match c {
            DrawCmd::Text(l) if l.text == "12.5" => Some(l.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(label.pos.y, rect.y0 - 5.0);
    let fade = label.fade_in.unwrap();
    assert_eq!(fade.delay_ms, 750);
    assert_eq!(fade.duration_ms, 300);
}

#[test]
fn non_finite_entries_are_unrenderable() {
    let fx = Fixture::new(json!([]));
    let mut out = DisplayList::new(fx.canvas);
    let err = render(&[1.0, f64::NAN], &fx.ctx(None, None), &mut out).unwrap_err();
    assert!(err.0.contains("entry 1"));
}

#[test]
fn empty_sequence_says_no_data() {
    let fx = Fixture::new(json!([]));
    let mut out = DisplayList::new(fx.canvas);
    render(&[], &fx.ctx(None, None), &mut out).unwrap();
    assert!(out.texts().any(|t| t == "no data"));
}
