use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        RenderError::invalid_parameter("x")
            .to_string()
            .contains("invalid parameter:")
    );
    assert!(
        RenderError::image_decode("x")
            .to_string()
            .contains("image decode failed:")
    );
    assert!(RenderError::export("x").to_string().contains("export failed:"));
    assert!(RenderError::preset("x").to_string().contains("preset error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = RenderError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
