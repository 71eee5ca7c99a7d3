use super::*;
use crate::designs::QuoteParams;
use crate::foundation::core::Canvas;

fn two_pixels() -> Surface {
    let canvas = Canvas::new(2, 1).unwrap();
    // Second pixel is red at half alpha, premultiplied.
    Surface::from_premul(canvas, vec![0, 0, 255, 255, 128, 0, 0, 128]).unwrap()
}

#[test]
fn filename_embeds_app_and_timestamp() {
    let out = export_png_at(&two_pixels(), "souls-banner", 1_700_000_000_123).unwrap();
    assert_eq!(out.filename, "souls-banner-1700000000123.png");
    assert_eq!(&out.bytes[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn png_holds_straight_alpha_pixels() {
    let out = export_png_at(&two_pixels(), "quote", 1).unwrap();
    let decoded = image::load_from_memory(&out.bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 255, 255]);
    assert_eq!(decoded.get_pixel(1, 0).0, [255, 0, 0, 128]);
}

#[test]
fn app_slug_is_checked() {
    for bad in ["", "Quote", "tcg_card", "album 2", "../x"] {
        let err = export_png_at(&two_pixels(), bad, 1).unwrap_err();
        assert!(matches!(err, RenderError::ExportFailed(_)), "{bad}");
    }
}

#[test]
fn wall_clock_export_uses_millis() {
    let out = export_png(&two_pixels(), "album").unwrap();
    let stamp = out
        .filename
        .strip_prefix("album-")
        .and_then(|s| s.strip_suffix(".png"))
        .unwrap();
    assert!(stamp.parse::<u64>().unwrap() > 1_600_000_000_000);
}

#[test]
fn hd_render_multiplies_the_logical_size() {
    let params = RenderParameters::new(
        "hd",
        QuoteParams {
            width: 40.0,
            height: 30.0,
            padding: 4.0,
            ..QuoteParams::default()
        },
    );
    let surface = render_hd(&params, &FontBook::new(), 3).unwrap();
    assert_eq!((surface.width(), surface.height()), (120, 90));
    assert!(render_hd(&params, &FontBook::new(), 0).is_err());
}
