use std::io::Cursor;

use super::*;

fn png_bytes(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();
    let prepared = decode_image(&png_bytes(img)).unwrap();
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
fn aspect_reflects_natural_size() {
    let img = image::RgbaImage::from_pixel(20, 10, image::Rgba([1, 2, 3, 255]));
    let prepared = decode_image(&png_bytes(img)).unwrap();
    assert_eq!(prepared.aspect(), Some(2.0));

    let empty = PreparedImage::from_premul(0, 4, vec![]).unwrap();
    assert_eq!(empty.aspect(), None);
}

#[test]
fn lossy_decode_turns_garbage_into_none() {
    assert!(decode_image(b"not an image").is_err());
    assert!(decode_image_lossy(b"not an image", "background").is_none());
}

#[test]
fn from_premul_checks_length() {
    assert!(PreparedImage::from_premul(2, 2, vec![0; 15]).is_err());
    assert!(PreparedImage::from_premul(2, 2, vec![0; 16]).is_ok());
}
