use super::*;
use crate::assets::fonts::FontBook;
use crate::designs::RenderParameters;
use crate::render::pipeline::render;

fn full_hd(style: WallpaperStyle) -> WallpaperParams {
    WallpaperParams {
        style,
        noise: 0,
        resolution: Resolution::FullHd,
        ..WallpaperParams::default()
    }
}

#[test]
fn resolutions_and_names_match_the_page() {
    assert_eq!(Resolution::default().size(), (3840, 2160));
    assert_eq!(Resolution::Phone.size(), (1170, 2532));
    assert_eq!(
        serde_json::from_str::<Resolution>(r#""1080""#).unwrap(),
        Resolution::FullHd
    );
    assert_eq!(serde_json::to_string(&Resolution::Uhd8k).unwrap(), r#""8k""#);
    assert_eq!(
        serde_json::to_string(&Palette::PipboyAmber).unwrap(),
        r#""pipboy_amber""#
    );
    assert_eq!(
        serde_json::from_str::<WallpaperStyle>(r#""noise""#).unwrap(),
        WallpaperStyle::Organic
    );
    assert_eq!(
        serde_json::from_str::<WallpaperStyle>(r#""organic""#).unwrap(),
        WallpaperStyle::Organic
    );
}

#[test]
fn every_style_has_a_distinct_wire_name() {
    let names: Vec<String> = WallpaperStyle::ALL
        .iter()
        .map(|style| serde_json::to_string(style).unwrap())
        .collect();
    let mut unique = names.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), WallpaperStyle::ALL.len());

    for (name, style) in [
        ("rain", WallpaperStyle::Rain),
        ("echo", WallpaperStyle::Echo),
        ("typematrix", WallpaperStyle::Typematrix),
        ("pipboy", WallpaperStyle::Pipboy),
        ("docs", WallpaperStyle::Docs),
        ("nightcity", WallpaperStyle::Nightcity),
        ("global", WallpaperStyle::Global),
        ("schematic", WallpaperStyle::Schematic),
    ] {
        let json = format!("\"{name}\"");
        assert_eq!(serde_json::from_str::<WallpaperStyle>(&json).unwrap(), style);
        assert_eq!(serde_json::to_string(&style).unwrap(), json);
    }
    assert_eq!(Resolution::Phone.as_str(), "phone");
    assert_eq!(Resolution::FullHd.as_str(), "1080");
}

#[test]
fn hex_fraction_reads_base_16_digits() {
    assert_eq!(hex_fraction(0.5, 4), "8");
    assert_eq!(hex_fraction(0.0, 4), "");
    assert_eq!(hex_fraction(f64::from(0xabcd_ef12u32) / 4_294_967_296.0, 4), "ABCD");
    assert_eq!(hex_fraction(f64::from(0xabcd_ef12u32) / 4_294_967_296.0, 8), "ABCDEF12");
}

#[test]
fn scanlines_cover_the_height() {
    let path = scanlines(100.0, 10.0, 4.0);
    // y = 0, 4, 8
    assert_eq!(path.elements().len(), 6);
    assert_eq!(scanlines(100.0, 0.0, 4.0).elements().len(), 0);
}

#[test]
fn draft_tag_is_the_uppercased_seed_prefix() {
    let params = full_hd(WallpaperStyle::Schematic);
    let logical = LogicalSize::new(1920.0, 1080.0).unwrap();
    let scene = params.scene(logical, &Seed::from("ab9xyz")).unwrap();
    assert_eq!(scene.draft, "AB9X");
    let scene = params.scene(logical, &Seed::from(42u64)).unwrap();
    assert_eq!(scene.draft, "42");
}

#[test]
fn defaults_and_catalog() {
    let p = WallpaperParams::default();
    assert_eq!(p.style, WallpaperStyle::Bauhaus);
    assert_eq!((p.complexity, p.noise), (50, 15));
    assert_eq!(p.colors().unwrap(), Palette::Default.colors());
    assert_eq!(Palette::Vaporwave.colors().len(), 5);
    assert_eq!(Palette::Matrix.colors()[3], Color::hex(0x0d0208));
    assert!(Palette::Custom.colors().is_empty());

    let p: WallpaperParams =
        serde_json::from_str(r##"{"preset":"custom","customColors":["#ff0000","#000000"]}"##)
            .unwrap();
    assert_eq!(p.colors().unwrap(), &[Color::hex(0xff0000), Color::BLACK]);
}

#[test]
fn empty_custom_palette_is_rejected() {
    let params = RenderParameters::new(
        "empty",
        WallpaperParams {
            preset: Palette::Custom,
            custom_colors: Vec::new(),
            ..full_hd(WallpaperStyle::Bauhaus)
        },
    );
    assert!(render(&params, &FontBook::new(), 0.05).is_err());
}

#[test]
fn pick_never_returns_the_background() {
    let ink = Ink {
        colors: Palette::Cyberpunk.colors(),
    };
    let mut rng = SeededRng::from_text("pick");
    for _ in 0..500 {
        assert_ne!(ink.pick(&mut rng), Color::WHITE);
    }
    assert_eq!(ink.bg(), Color::WHITE);
    assert_eq!(ink.accent(), Color::hex(0x00ff9f));

    let single = Ink {
        colors: &[Color::BLACK],
    };
    assert_eq!(single.pick(&mut rng), Color::BLACK);
    assert_eq!(single.accent(), Color::BLACK);
}

#[test]
fn steps_below_counts_fractional_bounds() {
    assert_eq!(steps_below(0.0), 0);
    assert_eq!(steps_below(-3.0), 0);
    assert_eq!(steps_below(3.0), 3);
    assert_eq!(steps_below(3.2), 4);
}

#[test]
fn quarter_bite_spans_the_square() {
    let bbox = quarter_bite(10.0).bounding_box();
    assert!((bbox.x0 + 10.0).abs() < 1e-9 && (bbox.x1 - 10.0).abs() < 1e-9);
    assert!((bbox.y0 + 10.0).abs() < 1e-9 && (bbox.y1 - 10.0).abs() < 1e-9);
}

#[test]
fn every_style_renders_opaque_and_repeatably() {
    let fonts = FontBook::new();
    for style in WallpaperStyle::ALL {
        let params = RenderParameters::new("styles", full_hd(style));
        let first = render(&params, &fonts, 0.05).unwrap();
        assert_eq!((first.width(), first.height()), (96, 54));
        assert!(
            first.as_premul_bytes().chunks_exact(4).all(|px| px[3] == 255),
            "{style:?} left holes"
        );
        let again = render(&params, &fonts, 0.05).unwrap();
        assert_eq!(first.fingerprint(), again.fingerprint(), "{style:?}");
    }
}

#[test]
fn single_color_palette_paints_only_that_color() {
    let fonts = FontBook::new();
    for style in [
        WallpaperStyle::Bauhaus,
        WallpaperStyle::Circuit,
        WallpaperStyle::Flow,
        WallpaperStyle::Solar,
        WallpaperStyle::Mesh,
        WallpaperStyle::Organic,
    ] {
        let params = RenderParameters::new(
            "red",
            WallpaperParams {
                preset: Palette::Custom,
                custom_colors: vec![Color::rgb(255, 0, 0)],
                ..full_hd(style)
            },
        );
        let surface = render(&params, &fonts, 0.05).unwrap();
        for px in surface.as_premul_bytes().chunks_exact(4) {
            // The faint white grid is the only other ink.
            assert!(px[0] > 245 && px[1] < 12 && px[2] < 12, "{style:?}: {px:?}");
        }
    }
}

#[test]
fn grain_follows_noise_and_seed() {
    let fonts = FontBook::new();
    let quiet = full_hd(WallpaperStyle::Solar);
    let grainy = WallpaperParams {
        noise: 40,
        ..quiet.clone()
    };

    let clean = render(&RenderParameters::new("g", quiet), &fonts, 0.05).unwrap();
    let noisy = render(&RenderParameters::new("g", grainy.clone()), &fonts, 0.05).unwrap();
    let other = render(&RenderParameters::new("h", grainy), &fonts, 0.05).unwrap();
    assert_ne!(clean.fingerprint(), noisy.fingerprint());
    assert_ne!(noisy.fingerprint(), other.fingerprint());
    assert!(clean.mean_abs_diff(&noisy).unwrap() > 1.0);
}
