use super::*;

fn face(tag: u8) -> FontFace {
    FontFace::from_bytes(vec![tag; 8]).unwrap()
}

fn system_font() -> Option<FontFace> {
    let mut candidates = Vec::new();
    if let Ok(p) = std::env::var("CANVASFORGE_TEST_FONT") {
        candidates.push(p);
    }
    candidates.extend(
        [
            "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/dejavu/DejaVuSans.ttf",
            "/usr/share/fonts/TTF/DejaVuSans.ttf",
            "/System/Library/Fonts/Supplemental/Arial.ttf",
        ]
        .map(String::from),
    );
    candidates
        .into_iter()
        .find_map(|p| FontFace::load(p).ok())
}

#[test]
fn empty_font_bytes_are_rejected() {
    assert!(matches!(
        FontFace::from_bytes(Vec::new()),
        Err(RenderError::InvalidParameter(_))
    ));
    assert!(FontFace::load("/nonexistent/font.ttf").is_err());
}

#[test]
fn resolve_prefers_exact_family_and_variant() {
    let book = FontBook::new()
        .with_face("Inter", FontVariant::Regular, face(1))
        .with_face("Inter", FontVariant::Bold, face(2))
        .with_face("Arvo", FontVariant::Regular, face(3));

    assert_eq!(book.resolve("inter", FontVariant::Bold), Some(&face(2)));
    assert_eq!(book.resolve(" Arvo ", FontVariant::Regular), Some(&face(3)));
    // Missing italic falls back within the family.
    assert_eq!(book.resolve("Inter", FontVariant::Italic), Some(&face(1)));
    assert_eq!(book.resolve("Inter", FontVariant::BoldItalic), Some(&face(2)));
}

#[test]
fn resolve_falls_back_to_default_then_first_family() {
    let mut book = FontBook::new()
        .with_face("b-family", FontVariant::Regular, face(1))
        .with_face("a-family", FontVariant::Regular, face(2));
    assert_eq!(book.resolve("Cinzel", FontVariant::Regular), Some(&face(2)));

    book.set_default_family("B-Family");
    assert_eq!(book.resolve("Cinzel", FontVariant::Bold), Some(&face(1)));

    assert!(FontBook::new().resolve("Inter", FontVariant::Regular).is_none());
}

#[test]
fn variant_from_flags() {
    assert_eq!(FontVariant::from_flags(true, true), FontVariant::BoldItalic);
    assert_eq!(FontVariant::from_flags(false, true), FontVariant::Italic);
}

#[test]
fn shape_line_rejects_bad_sizes() {
    let mut engine = TextLayoutEngine::new();
    assert!(engine.shape_line("x", &face(1), 0.0).is_err());
    assert!(engine.shape_line("x", &face(1), f64::NAN).is_err());
}

#[test]
fn measure_grows_with_text_and_size() {
    let Some(font) = system_font() else {
        eprintln!("no test font available; skipping");
        return;
    };
    let mut engine = TextLayoutEngine::new();
    let short = engine.measure("Hello", &font, 32.0).unwrap();
    let long = engine.measure("Hello world", &font, 32.0).unwrap();
    let big = engine.measure("Hello", &font, 64.0).unwrap();
    assert!(short > 0.0);
    assert!(long > short);
    assert!((big / short - 2.0).abs() < 0.05);
    assert_eq!(engine.measure("", &font, 32.0).unwrap(), 0.0);

    let line = engine.shape_line("Hello", &font, 32.0).unwrap();
    assert!(line.ascent > 0.0);
    assert!(line.baseline >= line.ascent * 0.5);
    assert_eq!(line.width, short);
}
