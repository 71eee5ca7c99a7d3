use super::*;
use crate::assets::fonts::FontBook;
use crate::designs::RenderParameters;
use crate::render::pipeline::render;

fn solid_image(w: u32, h: u32, px: [u8; 4]) -> PreparedImage {
    PreparedImage::from_premul(w, h, px.repeat((w * h) as usize)).unwrap()
}

#[test]
fn defaults_are_the_enemy_felled_preset() {
    let p = BannerParams::default();
    assert_eq!(p.text, "ENEMY FELLED");
    assert_eq!(p.text_color, Color::hex(0xe8c227));
    assert_eq!(p.font_size, 100.0);
    assert_eq!(p.font_weight, 700);
    assert_eq!(p.y_offset, 50.0);
    assert!(p.show_overlay);
}

#[test]
fn presets_keep_position_and_visibility() {
    let mut p = BannerParams {
        y_offset: 80.0,
        show_overlay: false,
        ..BannerParams::default()
    };
    BannerPreset::Wasted.apply(&mut p);
    assert_eq!(p.text, "WASTED");
    assert_eq!(p.glow_color, Color::BLACK);
    assert_eq!(p.font_family, "Pricedown");
    assert_eq!(p.letter_spacing, 2.0);
    assert_eq!((p.y_offset, p.show_overlay), (80.0, false));

    assert_eq!(
        serde_json::to_string(&BannerPreset::YouDied).unwrap(),
        r#""you_died""#
    );
    assert_eq!(BannerPreset::ALL.len(), 4);
}

#[test]
fn band_is_centered_on_the_offset() {
    let p = BannerParams::default();
    let logical = LogicalSize::new(1280.0, 720.0).unwrap();
    let (rect, gradient) = p.band(logical);
    assert_eq!(rect, Rect::new(0.0, 235.0, 1280.0, 485.0));
    let offsets: Vec<f64> = gradient.stops().iter().map(|s| s.offset).collect();
    assert_eq!(offsets, [0.0, 0.2, 0.8, 1.0]);
    assert_eq!(gradient.stops()[1].color.a, 102);
}

#[test]
fn placeholder_surface_darkens_under_the_band() {
    let params = RenderParameters::new("banner", BannerParams::default());
    let surface = render(&params, &FontBook::new(), 0.05).unwrap();
    assert_eq!((surface.width(), surface.height()), (64, 36));
    assert_eq!(surface.pixel(0, 0).unwrap().to_array(), [17, 17, 17, 255]);
    let mid = surface.pixel(32, 18).unwrap().to_array();
    assert!(mid[0] < 13, "{mid:?}");
}

#[test]
fn image_sets_the_surface_size() {
    let image = solid_image(20, 10, [0, 0, 255, 255]);
    let plain = BannerParams {
        show_overlay: false,
        ..BannerParams::default()
    };
    let params = RenderParameters::new("img", plain.clone()).with_image(image.clone());
    let surface = render(&params, &FontBook::new(), 1.0).unwrap();
    assert_eq!((surface.width(), surface.height()), (20, 10));
    assert_eq!(surface.pixel(3, 3).unwrap().to_array(), [0, 0, 255, 255]);

    // A 250 unit band covers the whole strip at 40 % black.
    let shaded = RenderParameters::new("img", BannerParams {
        show_overlay: true,
        ..plain
    })
    .with_image(image);
    let surface = render(&shaded, &FontBook::new(), 1.0).unwrap();
    let px = surface.pixel(10, 5).unwrap().to_array();
    assert!(px[2].abs_diff(153) <= 2, "{px:?}");
}

#[test]
fn zero_font_size_is_rejected() {
    let params = RenderParameters::new(
        "banner",
        BannerParams {
            font_size: 0.0,
            ..BannerParams::default()
        },
    );
    assert!(render(&params, &FontBook::new(), 0.05).is_err());
}

#[test]
fn spread_anchors_step_by_advance_plus_spacing() {
    // Three 10-unit glyphs, 5 apart: 40 units wide around x = 100.
    let anchors = spread_anchors(100.0, 30.0, &[10.0, 10.0, 10.0], 5.0);
    assert_eq!(anchors, vec![80.0, 95.0, 110.0]);
    assert_eq!(spread_anchors(100.0, 0.0, &[], 5.0), Vec::<f64>::new());
    // Kerned whole-line width drives the start, per-glyph advances drive the steps.
    assert_eq!(spread_anchors(0.0, 18.0, &[10.0, 10.0], 2.0), vec![-10.0, 2.0]);
}

#[test]
fn spaced_text_renders_without_a_font() {
    let params = RenderParameters::new(
        "spacing",
        BannerParams {
            letter_spacing: 12.0,
            ..BannerParams::default()
        },
    );
    let a = render(&params, &FontBook::new(), 0.1).unwrap();
    let b = render(&params, &FontBook::new(), 0.1).unwrap();
    assert_eq!(a.fingerprint(), b.fingerprint());
}
