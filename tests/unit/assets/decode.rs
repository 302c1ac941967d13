use std::io::Cursor;

use super::*;
use crate::foundation::core::Rgba8Premul;

fn tile(w: u32, h: u32) -> TileSize {
    TileSize::new(w, h).unwrap()
}

fn png(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(width, height, image::Rgba(px));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"><rect width="2" height="2" fill="#ff0000"/></svg>"##;

fn assert_red_tile(asset: &TileAsset, w: u32, h: u32) {
    assert_eq!((asset.width, asset.height), (w, h));
    assert_eq!(asset.rgba8_premul.len(), (w * h * 4) as usize);
    let center = (((h / 2) * w + w / 2) * 4) as usize;
    assert_eq!(&asset.rgba8_premul[center..center + 4], &[255, 0, 0, 255]);
}

#[test]
fn raster_keeps_native_size_regardless_of_tile() {
    let asset = decode_tile_asset(&png(3, 2, [0, 0x80, 0xff, 0x80]), tile(16, 16)).unwrap();
    assert_eq!((asset.width, asset.height), (3, 2));
    assert_eq!(asset.rgba8_premul.len(), 3 * 2 * 4);
    let expected = Rgba8Premul::from_straight_rgba(0, 0x80, 0xff, 0x80);
    assert_eq!(
        &asset.rgba8_premul[..4],
        &[expected.r, expected.g, expected.b, expected.a]
    );
}

#[test]
fn svg_is_rasterized_at_tile_size() {
    let asset = decode_tile_asset(RED_SQUARE.as_bytes(), tile(4, 6)).unwrap();
    assert_red_tile(&asset, 4, 6);
}

#[test]
fn svg_with_xml_prolog_is_rasterized() {
    let svg = format!("\n  <?xml version=\"1.0\"?>\n{RED_SQUARE}");
    assert_red_tile(&decode_tile_asset(svg.as_bytes(), tile(2, 2)).unwrap(), 2, 2);
}

#[test]
fn svg_with_doctype_is_rasterized() {
    let svg = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n{RED_SQUARE}"
    );
    assert_red_tile(&decode_tile_asset(svg.as_bytes(), tile(4, 4)).unwrap(), 4, 4);
}

#[test]
fn svg_with_leading_comment_is_rasterized() {
    let svg = format!("<!-- generated tile -->\n{RED_SQUARE}");
    assert_red_tile(&decode_tile_asset(svg.as_bytes(), tile(4, 4)).unwrap(), 4, 4);
}

#[test]
fn svg_with_utf8_bom_is_rasterized() {
    let mut svg = vec![0xEF, 0xBB, 0xBF];
    svg.extend_from_slice(RED_SQUARE.as_bytes());
    assert_red_tile(&decode_tile_asset(&svg, tile(4, 4)).unwrap(), 4, 4);
}

#[test]
fn garbage_bytes_are_a_decode_error() {
    let err = decode_tile_asset(b"not an image", tile(2, 2)).unwrap_err();
    assert!(matches!(err, MosaicError::Decode(_)));

    let err = decode_tile_asset(b"<svg", tile(2, 2)).unwrap_err();
    assert!(matches!(err, MosaicError::Decode(_)));
}
