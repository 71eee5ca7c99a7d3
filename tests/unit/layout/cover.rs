use super::*;
use crate::foundation::core::Point;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn wide_image_into_square_box_crops_sides() {
    let dst = Rect::new(0.0, 0.0, 100.0, 100.0);
    let d = cover_dest_rect(Size::new(200.0, 100.0), dst).unwrap();
    assert_eq!(d, Rect::new(-50.0, 0.0, 150.0, 100.0));

    let s = cover_source_rect(Size::new(200.0, 100.0), dst).unwrap();
    assert_eq!(s, Rect::new(50.0, 0.0, 150.0, 100.0));
}

#[test]
fn tall_image_into_wide_box_crops_top_and_bottom() {
    let dst = Rect::new(25.0, 85.0, 395.0, 285.0);
    let s = cover_source_rect(Size::new(300.0, 600.0), dst).unwrap();
    assert!(close(s.width() / s.height(), dst.width() / dst.height()));
    assert!(close(s.x0, 0.0));
    assert!(close(s.y0, 600.0 - s.y1));
}

#[test]
fn both_strategies_show_the_same_crop() {
    let dst = Rect::new(10.0, 20.0, 330.0, 260.0);
    for (w, h) in [(640.0, 480.0), (480.0, 640.0), (1000.0, 100.0), (320.0, 240.0)] {
        let src = Size::new(w, h);
        let d = cover_dest_rect(src, dst).unwrap();
        let s = cover_source_rect(src, dst).unwrap();
        // Map the visible box back into image space through strategy (a).
        let inv = rect_to_rect(Rect::new(0.0, 0.0, w, h), d).inverse();
        let tl = inv * Point::new(dst.x0, dst.y0);
        let br = inv * Point::new(dst.x1, dst.y1);
        assert!(close(tl.x, s.x0) && close(tl.y, s.y0), "{w}x{h}");
        assert!(close(br.x, s.x1) && close(br.y, s.y1), "{w}x{h}");
    }
}

#[test]
fn degenerate_inputs_are_invalid() {
    let dst = Rect::new(0.0, 0.0, 10.0, 10.0);
    assert!(cover_dest_rect(Size::new(0.0, 10.0), dst).is_err());
    assert!(cover_source_rect(Size::new(10.0, f64::NAN), dst).is_err());
    assert!(cover_source_rect(Size::new(10.0, 10.0), Rect::new(0.0, 0.0, 0.0, 5.0)).is_err());
}

#[test]
fn rect_to_rect_maps_corners() {
    let a = rect_to_rect(Rect::new(50.0, 0.0, 150.0, 100.0), Rect::new(25.0, 85.0, 395.0, 285.0));
    let p = a * Point::new(50.0, 0.0);
    assert!(close(p.x, 25.0) && close(p.y, 85.0));
    let q = a * Point::new(150.0, 100.0);
    assert!(close(q.x, 395.0) && close(q.y, 285.0));
}
