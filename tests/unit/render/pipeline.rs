use super::*;

fn cx_parts() -> (FontBook, TextLayoutEngine) {
    (FontBook::new(), TextLayoutEngine::new())
}

#[test]
fn missing_font_measures_with_fixed_advance() {
    let (fonts, mut engine) = cx_parts();
    let seed = Seed::from("x");
    let logical = LogicalSize::new(100.0, 50.0).unwrap();
    let canvas = Canvas::new(200, 100).unwrap();
    let mut cx = PaintCx::new(
        canvas,
        logical,
        &seed,
        None,
        &fonts,
        &mut engine,
    );
    let run = TextRun::new("Inter", 10.0, Color::BLACK);
    assert_eq!(cx.measure("abcd", &run).unwrap(), 24.0);

    let drawn = cx.fill_text("abcd", &run, Point::new(10.0, 10.0)).unwrap();
    assert_eq!(drawn, 24.0);
    assert!(cx.warned_missing_font);

    let surface = cx.painter.finish().unwrap();
    assert!(surface.as_premul_bytes().iter().all(|&b| b == 0));
}

#[test]
fn wrap_uses_fallback_metric() {
    let (fonts, mut engine) = cx_parts();
    let seed = Seed::from("x");
    let logical = LogicalSize::new(100.0, 100.0).unwrap();
    let canvas = Canvas::new(100, 100).unwrap();
    let mut cx = PaintCx::new(
        canvas,
        logical,
        &seed,
        None,
        &fonts,
        &mut engine,
    );
    // 10 px font: 6 px per character.
    let run = TextRun::new("Inter", 10.0, Color::BLACK);
    let lines = cx.wrap("aaa bbb ccc", &run, 50.0).unwrap();
    assert_eq!(lines, vec!["aaa bbb".to_owned(), "ccc".to_owned()]);
}

#[test]
fn base_transform_maps_logical_width_to_canvas_width() {
    let (fonts, mut engine) = cx_parts();
    let seed = Seed::from("x");
    let logical = LogicalSize::new(1000.0, 1000.0).unwrap();
    let canvas = Canvas::new(250, 250).unwrap();
    let cx = PaintCx::new(
        canvas,
        logical,
        &seed,
        None,
        &fonts,
        &mut engine,
    );
    let p = cx.base_transform() * Point::new(1000.0, 400.0);
    assert!((p.x - 250.0).abs() < 1e-9);
    assert!((p.y - 100.0).abs() < 1e-9);
    assert!((cx.painter.device_scale() - 0.25).abs() < 1e-9);
}

#[test]
fn text_run_builder_sets_effects() {
    let run = TextRun::new("Arvo", 22.0, Color::WHITE)
        .bold(true)
        .italic(true)
        .aligned(HorizontalAlign::Right)
        .baseline(TextBaseline::Middle)
        .glow(Color::hex(0x00ffff), 8.0)
        .contour(Color::BLACK, 3.0);
    assert_eq!(run.variant(), FontVariant::BoldItalic);
    assert_eq!(run.glow.map(|g| g.blur), Some(8.0));
    assert_eq!(run.contour.map(|c| c.width), Some(3.0));

    let no_glow = TextRun::new("Arvo", 22.0, Color::WHITE).glow(Color::BLACK, 0.0);
    assert!(no_glow.glow.is_none());
}
