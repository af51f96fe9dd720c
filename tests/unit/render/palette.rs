use super::*;

#[test]
fn swap_uses_complete_tint() {
    let p = Palette::default();
    assert_eq!(p.highlight_for(Some("swap")), p.complete);
    assert_eq!(p.highlight_for(Some("SWAP ")), p.complete);
    assert_eq!(p.highlight_for(Some("compare")), p.active);
    assert_eq!(p.highlight_for(None), p.active);
    assert_ne!(p.active, p.complete);
}

#[test]
fn partial_json_keeps_defaults() {
    let p: Palette = serde_json::from_str(r##"{"active": "#ff0000"}"##).unwrap();
    assert_eq!(p.active, Rgba8::rgb(255, 0, 0));
    assert_eq!(p.complete, Palette::default().complete);
}
