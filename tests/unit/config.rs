use super::*;

#[test]
fn defaults_match_reference_layout() {
    let cfg = VizConfig::default();
    assert_eq!(cfg.canvas.width, 800.0);
    assert_eq!(cfg.canvas.height, 400.0);
    assert_eq!(cfg.playback.interval_ms, 2000);
    assert!(!cfg.playback.restart_timer_on_step);
    assert_eq!(cfg.motion.bar_duration_ms, 750);
    assert_eq!(cfg.graph.edge_policy, EdgePolicy::Synthesize);
    cfg.validate().unwrap();
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = VizConfig::from_json_str(
        r#"{"playback": {"interval_ms": 500}, "graph": {"edge_policy": "explicit"}}"#,
    )
    .unwrap();
    assert_eq!(cfg.playback.interval_ms, 500);
    assert_eq!(cfg.graph.edge_policy, EdgePolicy::Explicit);
    assert_eq!(cfg.graph.radius, 150.0);
    assert_eq!(cfg.motion, MotionOpts::default());
}

#[test]
fn rejects_degenerate_values() {
    let err = VizConfig::from_json_str(r#"{"playback": {"interval_ms": 0}}"#).unwrap_err();
    assert!(err.to_string().starts_with("validation error:"));
    assert!(VizConfig::from_json_str(r#"{"canvas": {"width": 0}}"#).is_err());
    assert!(VizConfig::from_json_str(r#"{"graph": {"node_radius": -1}}"#).is_err());
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = VizConfig::from_json_str("{").unwrap_err();
    assert!(matches!(err, VizError::Serde(_)));
}
