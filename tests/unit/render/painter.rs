use super::*;

fn painter(w: u32, h: u32) -> Painter {
    Painter::new(Canvas::new(w, h).unwrap())
}

fn px(s: &Surface, x: u32, y: u32) -> [u8; 4] {
    s.pixel(x, y).unwrap().to_array()
}

#[test]
fn solid_fill_covers_only_the_shape() {
    let mut p = painter(8, 8);
    p.fill_color(&Rect::new(2.0, 2.0, 6.0, 6.0), Color::rgb(255, 0, 0));
    let s = p.finish().unwrap();
    assert_eq!(px(&s, 3, 3), [255, 0, 0, 255]);
    assert_eq!(px(&s, 0, 0), [0, 0, 0, 0]);
    assert_eq!(px(&s, 7, 7), [0, 0, 0, 0]);
}

#[test]
fn transform_scales_local_units() {
    let mut p = painter(8, 8);
    p.set_transform(Affine::scale(4.0));
    assert_eq!(p.device_scale(), 4.0);
    p.fill_color(&Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE);
    let s = p.finish().unwrap();
    assert_eq!(px(&s, 3, 3), [255, 255, 255, 255]);
    assert_eq!(px(&s, 5, 5), [0, 0, 0, 0]);
}

#[test]
fn save_restore_round_trips_the_transform() {
    let mut p = painter(4, 4);
    p.save();
    p.concat(Affine::translate((1.0, 2.0)));
    assert_ne!(p.transform(), Affine::IDENTITY);
    p.restore();
    assert_eq!(p.transform(), Affine::IDENTITY);
    p.restore();
    assert_eq!(p.transform(), Affine::IDENTITY);
}

#[test]
fn later_draws_land_on_top() {
    let mut p = painter(4, 4);
    p.fill_color(&Rect::new(0.0, 0.0, 4.0, 4.0), Color::rgb(255, 0, 0));
    p.fill_color(&Rect::new(0.0, 0.0, 4.0, 4.0), Color::rgb(0, 0, 255));
    p.with_pixels(|_, _| {}).unwrap();
    p.fill_color(&Rect::new(0.0, 0.0, 2.0, 4.0), Color::rgb(0, 255, 0));
    let s = p.finish().unwrap();
    assert_eq!(px(&s, 0, 0), [0, 255, 0, 255]);
    assert_eq!(px(&s, 3, 0), [0, 0, 255, 255]);
}

#[test]
fn gradient_fill_varies_along_its_axis() {
    let mut p = painter(16, 4);
    let g = Gradient::linear((0.0, 0.0), (16.0, 0.0))
        .with_stop(0.0, Color::BLACK)
        .with_stop(1.0, Color::WHITE);
    p.fill(&Rect::new(0.0, 0.0, 16.0, 4.0), &Paint::from(g))
        .unwrap();
    let s = p.finish().unwrap();
    let left = px(&s, 1, 2);
    let right = px(&s, 14, 2);
    assert_eq!(left[3], 255);
    assert!(left[0] < 40, "{left:?}");
    assert!(right[0] > 215, "{right:?}");
}

#[test]
fn degenerate_gradient_paints_nothing() {
    let mut p = painter(4, 4);
    let g = Gradient::linear((1.0, 1.0), (1.0, 1.0)).with_stop(0.0, Color::WHITE);
    p.fill(&Rect::new(0.0, 0.0, 4.0, 4.0), &g.into()).unwrap();
    assert!(p.finish().unwrap().as_premul_bytes().iter().all(|&b| b == 0));
}

#[test]
fn opacity_layer_scales_alpha() {
    let mut p = painter(4, 4);
    p.with_opacity(0.5, |p| {
        p.fill_color(&Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);
        Ok(())
    })
    .unwrap();
    let a = px(&p.finish().unwrap(), 1, 1)[3];
    assert!((126..=129).contains(&a), "alpha {a}");
}

#[test]
fn pixel_readback_inside_opacity_layer_is_rejected() {
    let mut p = painter(4, 4);
    let err = p
        .with_opacity(0.5, |p| p.with_pixels(|_, _| {}))
        .unwrap_err();
    assert!(matches!(err, RenderError::InvalidParameter(_)));
}

#[test]
fn with_pixels_exposes_straight_alpha() {
    let mut p = painter(2, 2);
    p.fill_color(&Rect::new(0.0, 0.0, 2.0, 2.0), Color::rgba(200, 100, 50, 255));
    p.with_pixels(|data, canvas| {
        assert_eq!(canvas, Canvas::new(2, 2).unwrap());
        assert_eq!(&data[..4], &[200, 100, 50, 255]);
        data[0] = 10;
    })
    .unwrap();
    assert_eq!(px(&p.finish().unwrap(), 0, 0), [10, 100, 50, 255]);
}

#[test]
fn blur_spreads_beyond_the_shape() {
    let mut p = painter(32, 32);
    p.blurred(3.0, |layer| {
        layer.fill_color(&Rect::new(12.0, 12.0, 20.0, 20.0), Color::BLACK);
        Ok(())
    })
    .unwrap();
    let s = p.finish().unwrap();
    assert!(px(&s, 10, 16)[3] > 0);
    assert!(px(&s, 16, 16)[3] < 255);
    assert_eq!(px(&s, 0, 0)[3], 0);
}

#[test]
fn dashed_stroke_leaves_gaps() {
    let mut p = painter(40, 4);
    let line = kurbo::Line::new((0.0, 2.0), (40.0, 2.0));
    p.stroke_color(&line, &StrokeStyle::new(2.0).with_dashes(&[10.0, 10.0]), Color::WHITE);
    let s = p.finish().unwrap();
    assert_eq!(px(&s, 5, 1)[3], 255);
    assert_eq!(px(&s, 15, 1)[3], 0);
    assert_eq!(px(&s, 25, 1)[3], 255);
}

#[test]
fn zero_width_stroke_is_skipped() {
    let mut p = painter(4, 4);
    p.stroke_color(&Rect::new(0.0, 0.0, 4.0, 4.0), &StrokeStyle::new(0.0), Color::WHITE);
    assert!(p.finish().unwrap().as_premul_bytes().iter().all(|&b| b == 0));
}

#[test]
fn image_draws_into_destination_rect() {
    let red = [255u8, 0, 0, 255];
    let image = PreparedImage::from_premul(2, 2, red.repeat(4)).unwrap();
    let mut p = painter(8, 8);
    p.draw_image(
        &image,
        Rect::new(0.0, 0.0, 2.0, 2.0),
        Rect::new(0.0, 0.0, 4.0, 4.0),
        1.0,
    )
    .unwrap();
    let s = p.finish().unwrap();
    assert_eq!(px(&s, 1, 1), red);
    assert_eq!(px(&s, 6, 6), [0, 0, 0, 0]);
}

#[test]
fn group_composites_at_opacity() {
    let mut p = painter(4, 4);
    p.group(0.5, |layer| {
        layer.fill_color(&Rect::new(0.0, 0.0, 4.0, 4.0), Color::WHITE);
        layer.with_pixels(|_, _| {})
    })
    .unwrap();
    assert_eq!(px(&p.finish().unwrap(), 2, 2), [128, 128, 128, 128]);
}
