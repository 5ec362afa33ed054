use std::io::Cursor;

use super::*;

fn encode(img: image::RgbaImage, format: image::ImageFormat) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let src_rgba = vec![100u8, 50u8, 200u8, 128u8];
    let img = image::RgbaImage::from_raw(1, 1, src_rgba).unwrap();
    let buf = encode(img, image::ImageFormat::Png);

    let raster = decode_image(&buf).unwrap();
    assert_eq!(raster.width, 1);
    assert_eq!(raster.height, 1);
    assert_eq!(
        raster.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn decode_keeps_natural_size() {
    let img = image::RgbaImage::from_pixel(200, 100, image::Rgba([1, 2, 3, 255]));
    let raster = decode_image(&encode(img, image::ImageFormat::Bmp)).unwrap();
    assert_eq!((raster.width, raster.height), (200, 100));
    assert_eq!(raster.rgba8_premul.len(), 200 * 100 * 4);
}

#[test]
fn svg_is_rasterized_at_intrinsic_size() {
    let svg = br##"<svg xmlns="http://www.w3.org/2000/svg" width="8" height="4">
        <rect width="8" height="4" fill="#ff0000"/>
    </svg>"##;
    let raster = decode_image(svg).unwrap();
    assert_eq!((raster.width, raster.height), (8, 4));
    assert_eq!(&raster.rgba8_premul[..4], &[255, 0, 0, 255]);
}

#[test]
fn garbage_and_empty_are_decode_errors() {
    for bytes in [&b""[..], &b"definitely not an image"[..], &b"<svg"[..]] {
        let err = decode_image(bytes).unwrap_err();
        assert!(matches!(err, CanvasError::Decode(_)), "{err}");
    }
}

#[test]
fn truncated_png_is_a_decode_error() {
    let img = image::RgbaImage::from_pixel(16, 16, image::Rgba([9, 9, 9, 255]));
    let mut buf = encode(img, image::ImageFormat::Png);
    buf.truncate(buf.len() / 2);
    assert!(matches!(decode_image(&buf), Err(CanvasError::Decode(_))));
}
