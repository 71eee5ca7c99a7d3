use super::*;
use crate::assets::fonts::FontBook;
use crate::designs::RenderParameters;
use crate::layout::wrap::MonospaceMeasure;
use crate::render::pipeline::render;

fn square() -> LogicalSize {
    LogicalSize::new(1080.0, 1080.0).unwrap()
}

#[test]
fn default_quote_wraps_inside_padding() {
    let params = QuoteParams::default();
    let block = params.layout_block(square(), &mut MonospaceMeasure::new(24.0));

    assert!(block.lines.len() > 1);
    let rejoined: Vec<&str> = block
        .lines
        .iter()
        .flat_map(|l| l.text.split(' '))
        .collect();
    let original: Vec<&str> = params.text.split(' ').collect();
    assert_eq!(rejoined, original);

    for (i, line) in block.lines.iter().enumerate() {
        assert!(line.width < 920.0, "line {i} is {} wide", line.width);
        assert_eq!(line.x, 80.0);
        if i > 0 {
            let step = line.y - block.lines[i - 1].y;
            assert!((step - 48.0 * 1.2).abs() < 1e-9);
        }
    }
}

#[test]
fn author_raises_block_and_sits_below_it() {
    let mut params = QuoteParams {
        text: "one two".to_owned(),
        ..QuoteParams::default()
    };
    let with_author = params.layout_block(square(), &mut MonospaceMeasure::new(24.0));
    params.author.clear();
    let without = params.layout_block(square(), &mut MonospaceMeasure::new(24.0));

    let single_line = 48.0 * 1.2;
    assert!((without.lines[0].y - (1080.0 - single_line) / 2.0).abs() < 1e-9);
    assert!((without.lines[0].y - with_author.lines[0].y - 48.0 * 0.8).abs() < 1e-9);
    assert!(
        (with_author.author_y - (with_author.lines[0].y + single_line + 72.0)).abs() < 1e-9
    );
}

#[test]
fn alignment_uses_each_line_width() {
    let params = QuoteParams {
        text: "aaaa bb".to_owned(),
        text_align: HorizontalAlign::Right,
        ..QuoteParams::default()
    };
    // 20 px per char against a 100 px budget splits the two words.
    let narrow = LogicalSize::new(180.0, 100.0).unwrap();
    let params = QuoteParams {
        padding: 40.0,
        ..params
    };
    let block = params.layout_block(narrow, &mut MonospaceMeasure::new(20.0));
    assert_eq!(block.lines.len(), 2);
    assert_eq!(block.lines[0].x, 140.0 - 80.0);
    assert_eq!(block.lines[1].x, 140.0 - 40.0);

    let centered = QuoteParams {
        text_align: HorizontalAlign::Center,
        ..params
    };
    let block = centered.layout_block(narrow, &mut MonospaceMeasure::new(20.0));
    assert_eq!(block.lines[1].x, (180.0 - 40.0) / 2.0);
}

#[test]
fn presets_overwrite_look_and_reset_overlay() {
    let mut params = QuoteParams {
        overlay_opacity: 0.6,
        ..QuoteParams::default()
    };
    QuotePreset::Newspaper.apply(&mut params);
    assert_eq!(params.style, QuoteStyle::Newspaper);
    assert_eq!(params.background_color, Color::hex(0xfdf6e3));
    assert_eq!(params.font_family, "Playfair Display");
    assert_eq!(params.overlay_opacity, 0.0);

    QuotePreset::Highlighted.apply(&mut params);
    assert_eq!(params.style, QuoteStyle::Wordbox);
    assert_eq!(params.text_align, HorizontalAlign::Center);

    QuotePreset::Typewriter.apply(&mut params);
    assert!(!params.is_bold());
    assert_eq!(QuotePreset::ALL.len(), 6);
}

#[test]
fn torn_sheet_walks_all_four_edges() {
    let mut draws = 0;
    let path = torn_sheet(1080.0, 1080.0, &mut || {
        draws += 1;
        0.0
    });
    // 193 vertices per edge at a 5 px step over 960 px.
    assert_eq!(draws, 4 * 193);
    let bbox = kurbo::Shape::bounding_box(&path);
    assert_eq!(bbox, Rect::new(60.0, 60.0, 1020.0, 1020.0));
}

#[test]
fn params_deserialize_with_defaults() {
    let p: QuoteParams =
        serde_json::from_str(r##"{"text":"hi","textAlign":"center","backgroundColor":"#123456"}"##)
            .unwrap();
    assert_eq!(p.text, "hi");
    assert_eq!(p.text_align, HorizontalAlign::Center);
    assert_eq!(p.background_color, Color::hex(0x123456));
    assert_eq!(p.font_size, 48.0);
    assert_eq!(p.style, QuoteStyle::Standard);

    let p: QuoteParams = serde_json::from_str(r#"{"style":"wordbox"}"#).unwrap();
    assert_eq!(p.style, QuoteStyle::Wordbox);
    let p: QuoteParams = serde_json::from_str(r#"{"theme":"newspaper"}"#).unwrap();
    assert_eq!(p.style, QuoteStyle::Newspaper);
    assert_eq!(serde_json::to_value(&p).unwrap()["style"], "newspaper");

    assert!(serde_json::from_str::<QuoteParams>(r#"{"textColor":"nope"}"#).is_err());
}

#[test]
fn standard_card_fills_background_and_overlay() {
    let params = RenderParameters::new(
        "q",
        QuoteParams {
            text: String::new(),
            author: String::new(),
            background_color: Color::rgb(200, 0, 0),
            overlay_opacity: 0.5,
            overlay_color: Color::BLACK,
            ..QuoteParams::default()
        },
    );
    let surface = render(&params, &FontBook::new(), 0.05).unwrap();
    assert_eq!((surface.width(), surface.height()), (54, 54));
    let px = surface.pixel(10, 10).unwrap().to_array();
    assert!(px[0].abs_diff(100) <= 2, "{px:?}");
    assert_eq!(px[3], 255);
}

#[test]
fn newspaper_leaves_margins_transparent() {
    let mut quote = QuoteParams::default();
    QuotePreset::Newspaper.apply(&mut quote);
    let params = RenderParameters::new("paper", quote);
    let surface = render(&params, &FontBook::new(), 0.1).unwrap();

    assert!(surface.pixel(0, 0).unwrap().a < 8);
    assert_eq!(surface.pixel(54, 54).unwrap().a, 255);

    let again = render(&params, &FontBook::new(), 0.1).unwrap();
    assert_eq!(surface.fingerprint(), again.fingerprint());
}

#[test]
fn non_positive_size_is_rejected() {
    let params = RenderParameters::new(
        "q",
        QuoteParams {
            width: 0.0,
            ..QuoteParams::default()
        },
    );
    assert!(render(&params, &FontBook::new(), 1.0).is_err());
}
