use std::io::Cursor;

use super::*;

fn encode_png(w: u32, h: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(w, h, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let buf = encode_png(1, 1, vec![100, 50, 200, 128]);

    let prepared = decode_image(&buf).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn garbage_bytes_are_decode_failures() {
    let err = decode_image(b"definitely not an image").unwrap_err();
    assert!(matches!(err, RenderError::ImageDecodeFailed(_)));
}

#[test]
fn from_premul_checks_buffer_length() {
    assert!(PreparedImage::from_premul(2, 2, vec![0; 16]).is_ok());
    assert!(PreparedImage::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(PreparedImage::from_premul(0, 2, Vec::new()).is_err());
}

#[test]
fn map_straight_sees_unpremultiplied_pixels() {
    let img = PreparedImage::from_premul(1, 1, vec![64, 0, 0, 128]).unwrap();
    let mut seen = [0u8; 4];
    let out = img.map_straight(|px| {
        seen = px;
        [0, 255, 0, px[3]]
    });
    assert_eq!(seen, [128, 0, 0, 128]);
    assert_eq!(out.rgba8_premul.as_slice(), &[0, 128, 0, 128]);
}
