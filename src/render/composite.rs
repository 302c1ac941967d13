use crate::{
    assets::store::TileAsset,
    foundation::error::{MosaicError, MosaicResult},
    layout::grid::GridPlan,
    render::surface::Surface,
};

pub type PremulRgba8 = [u8; 4];

/// Source-over for premultiplied pixels.
pub fn over(dst: PremulRgba8, src: PremulRgba8) -> PremulRgba8 {
    match src[3] {
        0 => return dst,
        255 => return src,
        _ => {}
    }

    let inv = 255u16 - u16::from(src[3]);
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = src[i].saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8]) -> MosaicResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(MosaicError::surface(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Draw a resolved row at `row`, one tile per column, left to right.
pub fn draw_row<S: Surface + ?Sized>(
    surface: &mut S,
    plan: &GridPlan,
    row: u32,
    assets: &[TileAsset],
) -> MosaicResult<()> {
    if assets.len() != plan.cols as usize {
        return Err(MosaicError::surface(format!(
            "row {row} has {} assets for {} columns",
            assets.len(),
            plan.cols
        )));
    }
    for (col, asset) in (0u32..).zip(assets) {
        surface.draw_image_scaled(asset, plan.tile_rect(row, col))?;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
