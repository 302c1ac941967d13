use std::sync::Arc;

use crate::{
    assets::store::TileAsset,
    foundation::{
        core::{TileSize, premultiply_rgba8_in_place},
        error::{MosaicError, MosaicResult},
    },
};

/// Decode store bytes into a tile asset.
///
/// Bytes with a recognised raster signature keep their native size and are scaled by the
/// compositor. Everything else is parsed as SVG and rasterized at `tile` size.
pub fn decode_tile_asset(bytes: &[u8], tile: TileSize) -> MosaicResult<TileAsset> {
    if image::guess_format(bytes).is_ok() {
        return decode_image(bytes);
    }
    let tree = parse_svg(bytes)?;
    let rgba8_premul = rasterize_svg_to_premul_rgba8(&tree, tile.width, tile.height)?;
    Ok(TileAsset {
        width: tile.width,
        height: tile.height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

pub fn decode_image(bytes: &[u8]) -> MosaicResult<TileAsset> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| MosaicError::decode(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(TileAsset {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

pub fn parse_svg(bytes: &[u8]) -> MosaicResult<usvg::Tree> {
    let opts = usvg::Options::default();
    usvg::Tree::from_data(bytes, &opts).map_err(|e| MosaicError::decode(format!("parse svg: {e}")))
}

pub fn rasterize_svg_to_premul_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> MosaicResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| MosaicError::decode("failed to allocate svg pixmap"))?;

    let sx = (width as f32) / tree.size().width();
    let sy = (height as f32) / tree.size().height();
    let xform = resvg::tiny_skia::Transform::from_scale(sx, sy);

    resvg::render(tree, xform, &mut pixmap.as_mut());
    Ok(pixmap.data().to_vec())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
