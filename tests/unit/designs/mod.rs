use super::*;
use kurbo::Shape;

#[test]
fn app_names_and_preset_keys() {
    let cases: [(Design, &str, &str); 5] = [
        (QuoteParams::default().into(), "quote", "quote_preset"),
        (AlbumParams::default().into(), "album", "album_preset"),
        (WallpaperParams::default().into(), "wallpaper", "wallpaper_preset"),
        (BannerParams::default().into(), "souls-banner", "souls_banner_preset"),
        (CardParams::default().into(), "tcg-card", "tcg_card_preset"),
    ];
    for (design, app, key) in cases {
        assert_eq!(design.app_name(), app);
        assert_eq!(design.preset_key(), key);
    }
}

#[test]
fn design_is_tagged_by_app() {
    let params = RenderParameters::new(7u64, BannerParams::default());
    let json = serde_json::to_value(&params).unwrap();
    assert_eq!(json["design"]["app"], "souls-banner");
    assert_eq!(json["seed"], 7);
    assert!(json.get("image").is_none());

    let back: RenderParameters = serde_json::from_value(json).unwrap();
    assert_eq!(back, params);

    let parsed: RenderParameters =
        serde_json::from_str(r#"{"design":{"app":"tcg-card","hp":"90"}}"#).unwrap();
    match parsed.design {
        Design::TcgCard(card) => assert_eq!(card.hp, "90"),
        other => panic!("unexpected design {other:?}"),
    }
    assert!(serde_json::from_str::<Design>(r#"{"app":"dice"}"#).is_err());
}

#[test]
fn positive_rejects_zero_negative_and_nan() {
    assert_eq!(positive("w", 2.5).unwrap(), 2.5);
    assert!(positive("w", 0.0).is_err());
    assert!(positive("w", -1.0).is_err());
    assert!(positive("w", f64::NAN).is_err());
    assert!(positive("w", f64::INFINITY).is_err());
}

#[test]
fn quad_round_rect_stays_inside_its_rect() {
    let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
    let path = quad_round_rect(rect, 10.0);
    assert_eq!(path.bounding_box(), rect);
    // Corners are cut, edge midpoints are not.
    assert!(!path.contains((1.0, 1.0).into()));
    assert!(path.contains((50.0, 1.0).into()));
}

#[test]
fn polygon_closes_and_polyline_does_not() {
    let pts = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)];
    assert_eq!(polyline(&pts).elements().len(), 3);
    assert_eq!(polygon(&pts).elements().len(), 4);
    assert!(polyline(&[]).elements().is_empty());
}
