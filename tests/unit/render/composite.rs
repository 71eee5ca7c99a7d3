use super::*;

#[test]
fn over_with_zero_opacity_or_alpha_is_noop() {
    let dst = [1, 2, 3, 4];
    assert_eq!(over(dst, [200, 200, 200, 200], 0.0), dst);
    assert_eq!(over(dst, [255, 255, 255, 0], 1.0), dst);
}

#[test]
fn opaque_source_replaces_destination() {
    assert_eq!(over([0, 0, 0, 255], [255, 0, 0, 255], 1.0), [255, 0, 0, 255]);
}

#[test]
fn half_opacity_mixes() {
    let out = over([0, 0, 0, 255], [255, 255, 255, 255], 0.5);
    assert_eq!(out, [128, 128, 128, 255]);
}

#[test]
fn over_in_place_checks_lengths() {
    let mut dst = vec![0u8; 8];
    assert!(over_in_place(&mut dst, &[0u8; 4], 1.0).is_err());
    over_in_place(&mut dst, &[10, 20, 30, 255, 0, 0, 0, 0], 1.0).unwrap();
    assert_eq!(dst, [10, 20, 30, 255, 0, 0, 0, 0]);
}

#[test]
fn atop_keeps_destination_coverage() {
    assert_eq!(atop_straight([0, 0, 0, 0], [255, 0, 0, 255]), [0, 0, 0, 0]);
    assert_eq!(
        atop_straight([0, 0, 0, 128], [255, 0, 0, 255]),
        [255, 0, 0, 128]
    );
    assert_eq!(atop_straight([100, 100, 100, 255], [0, 0, 0, 0]), [100, 100, 100, 255]);
}

#[test]
fn overlay_midgray_is_identity_ish() {
    // 128 blend over any base stays within one step of the base.
    for base in [0u8, 40, 127, 128, 200, 255] {
        let out = overlay_channel(base, 128);
        assert!(out.abs_diff(base) <= 1, "base {base} -> {out}");
    }
    assert_eq!(overlay_channel(0, 255), 0);
    assert_eq!(overlay_channel(255, 0), 255);
}

#[test]
fn screen_only_lightens_opaque_destination() {
    let dst = [100, 50, 0, 255];
    assert_eq!(screen_straight(dst, [0, 0, 0, 0]), dst);
    assert_eq!(screen_straight(dst, [0, 0, 0, 255]), dst);
    assert_eq!(screen_straight(dst, [255, 255, 255, 255]), [255, 255, 255, 255]);
    let out = screen_straight(dst, [128, 128, 128, 255]);
    assert!(out[0] > 100 && out[1] > 50 && out[2] >= 127, "{out:?}");
    assert_eq!(out[3], 255);
}

#[test]
fn screen_onto_transparent_is_plain_source() {
    assert_eq!(screen_straight([0, 0, 0, 0], [10, 20, 30, 255]), [10, 20, 30, 255]);
}
