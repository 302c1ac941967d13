use image::RgbaImage;

use crate::{
    foundation::core::{PixelRect, TileColor},
    layout::grid::GridPlan,
};

/// Sample every 5th pixel of a tile buffer.
pub const SAMPLE_STRIDE_PIXELS: usize = 5;

/// Average color of a straight-alpha RGBA8 tile buffer.
///
/// Pixels `4, 9, 14, ...` are sampled; each channel is summed independently and
/// floor-divided by the sample count. Alpha is ignored, so transparent padding
/// counts as black. A buffer too small to contain a sample yields `000000`.
pub fn average_color(rgba: &[u8]) -> TileColor {
    let pixels = rgba.len() / 4;
    let mut sum = [0u64; 3];
    let mut count = 0u64;

    for px in (SAMPLE_STRIDE_PIXELS - 1..pixels).step_by(SAMPLE_STRIDE_PIXELS) {
        let i = px * 4;
        sum[0] += u64::from(rgba[i]);
        sum[1] += u64::from(rgba[i + 1]);
        sum[2] += u64::from(rgba[i + 2]);
        count += 1;
    }

    if count == 0 {
        return TileColor::BLACK;
    }
    TileColor::new(
        (sum[0] / count) as u8,
        (sum[1] / count) as u8,
        (sum[2] / count) as u8,
    )
}

/// Copy `rect` out of `image` into a tightly packed `rect.width * rect.height` buffer.
///
/// Pixels of `rect` that fall outside the image stay transparent black.
pub fn copy_region(image: &RgbaImage, rect: PixelRect) -> Vec<u8> {
    let mut out = vec![0u8; rect.width as usize * rect.height as usize * 4];
    let (iw, ih) = image.dimensions();
    if rect.x >= iw || rect.y >= ih {
        return out;
    }

    let copy_w = rect.width.min(iw - rect.x) as usize;
    let copy_h = rect.height.min(ih - rect.y);
    let src = image.as_raw();
    let src_stride = iw as usize * 4;
    let dst_stride = rect.width as usize * 4;

    for dy in 0..copy_h {
        let src_start = (rect.y + dy) as usize * src_stride + rect.x as usize * 4;
        let dst_start = dy as usize * dst_stride;
        out[dst_start..dst_start + copy_w * 4]
            .copy_from_slice(&src[src_start..src_start + copy_w * 4]);
    }
    out
}

/// Representative color of tile `(row, col)` of `image` under `plan`.
pub fn sample_tile(image: &RgbaImage, plan: &GridPlan, row: u32, col: u32) -> TileColor {
    average_color(&copy_region(image, plan.tile_rect(row, col)))
}

/// Sample a full row, left to right.
pub fn sample_row(image: &RgbaImage, plan: &GridPlan, row: u32) -> Vec<TileColor> {
    (0..plan.cols)
        .map(|col| sample_tile(image, plan, row, col))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/sample/average.rs"]
mod tests;
