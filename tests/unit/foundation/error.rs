use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        VizError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        VizError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
    assert!(VizError::render("x").to_string().contains("render error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = VizError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde_variant() {
    let err: VizError = serde_json::from_str::<serde_json::Value>("{")
        .unwrap_err()
        .into();
    assert!(matches!(err, VizError::Serde(_)));
}
