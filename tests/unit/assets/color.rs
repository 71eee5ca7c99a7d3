use super::*;
use serde_json::json;

#[test]
fn parses_hex_short_long_and_alpha() {
    assert_eq!("#fff".parse::<Color>().unwrap(), Color::WHITE);
    assert_eq!("#10B981".parse::<Color>().unwrap(), Color::hex(0x10b981));
    let c: Color = "#0000ff80".parse().unwrap();
    assert_eq!(c, Color::rgba(0, 0, 255, 128));
}

#[test]
fn parses_css_functions_and_keywords() {
    assert_eq!(
        "rgba(0,0,0,0.6)".parse::<Color>().unwrap(),
        Color::rgba(0, 0, 0, 153)
    );
    assert_eq!(
        "rgb(139, 69, 19)".parse::<Color>().unwrap(),
        Color::rgb(139, 69, 19)
    );
    assert_eq!("Transparent".parse::<Color>().unwrap(), Color::TRANSPARENT);
}

#[test]
fn malformed_colors_are_invalid_parameters() {
    for bad in ["#12", "#zzzzzz", "rgba(1,2)", "rgb(1,2,3", "chartreuse-ish"] {
        let err = bad.parse::<Color>().unwrap_err();
        assert!(matches!(err, RenderError::InvalidParameter(_)), "{bad}");
    }
}

#[test]
fn serde_accepts_strings_objects_and_arrays() {
    let c: Color = serde_json::from_value(json!("#ff0000")).unwrap();
    assert_eq!(c, Color::rgb(255, 0, 0));

    let c: Color = serde_json::from_value(json!({"r": 0.0, "g": 1.0, "b": 0.0})).unwrap();
    assert_eq!(c, Color::rgb(0, 255, 0));

    let c: Color = serde_json::from_value(json!([0.0, 0.0, 1.0, 0.5])).unwrap();
    assert_eq!(c, Color::rgba(0, 0, 255, 128));

    assert!(serde_json::from_value::<Color>(json!([1.0])).is_err());
}

#[test]
fn serializes_as_hex() {
    assert_eq!(
        serde_json::to_value(Color::hex(0x050505)).unwrap(),
        json!("#050505")
    );
    assert_eq!(
        serde_json::to_value(Color::rgba(1, 2, 3, 4)).unwrap(),
        json!("#01020304")
    );
}

#[test]
fn fade_multiplies_alpha() {
    assert_eq!(Color::WHITE.fade(0.5).a, 128);
    assert_eq!(Color::rgba(0, 0, 0, 100).fade(0.5).a, 50);
    assert_eq!(Color::BLACK.with_alpha(0.0).a, 0);
}

#[test]
fn premul_conversion_scales_channels() {
    let c = Color::rgba(255, 128, 0, 128);
    assert!((c.alpha_f64() - 128.0 / 255.0).abs() < 1e-12);
    let p = c.to_premul();
    assert_eq!(p.a, 128);
    assert_eq!(p.r, 128);
    assert_eq!(p.b, 0);
}
