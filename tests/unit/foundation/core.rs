use super::*;

#[test]
fn canvas_rejects_zero_and_oversized_edges() {
    assert!(Canvas::new(0, 10).is_err());
    assert!(Canvas::new(10, 0).is_err());
    assert!(Canvas::new(MAX_SURFACE_EDGE + 1, 10).is_err());
    assert_eq!(Canvas::new(64, 32).unwrap().pixel_count(), 2048);
}

#[test]
fn canvas_scaled_multiplies_both_edges() {
    let c = Canvas::new(420, 750).unwrap().scaled(3).unwrap();
    assert_eq!((c.width, c.height), (1260, 2250));
    assert!(Canvas::new(40_000, 10).unwrap().scaled(2).is_err());
}

#[test]
fn logical_size_maps_to_device_canvas() {
    let s = LogicalSize::new(1000.0, 1000.0).unwrap();
    assert_eq!(s.to_canvas(0.25).unwrap(), Canvas::new(250, 250).unwrap());
    assert!(s.to_canvas(0.0).is_err());
    assert!(LogicalSize::new(f64::NAN, 1.0).is_err());
}

#[test]
fn premul_rounds_half_up() {
    let p = Rgba8Premul::from_straight_rgba(255, 128, 0, 128);
    assert_eq!(p.to_array(), [128, 64, 0, 128]);
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}
