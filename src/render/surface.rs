use image::{ImageBuffer, Rgba, RgbaImage, imageops::FilterType};

use crate::{
    assets::store::TileAsset,
    foundation::{
        core::{PixelRect, unpremultiply_rgba8_in_place},
        error::{MosaicError, MosaicResult},
    },
    render::composite::over_in_place,
};

/// 2D raster target the renderer composites onto.
pub trait Surface {
    /// Resize to `width x height` and clear every pixel to transparent.
    fn resize_and_clear(&mut self, width: u32, height: u32) -> MosaicResult<()>;

    /// Draw `asset` scaled to fill `dst`, blending source-over.
    fn draw_image_scaled(&mut self, asset: &TileAsset, dst: PixelRect) -> MosaicResult<()>;

    /// Straight-alpha RGBA8 copy of `rect`; pixels outside the surface read as transparent.
    fn read_region(&self, rect: PixelRect) -> MosaicResult<Vec<u8>>;

    fn dimensions(&self) -> (u32, u32);
}

/// In-memory surface holding premultiplied RGBA8 pixels.
#[derive(Clone, Debug, Default)]
pub struct CpuSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl CpuSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Premultiplied pixels, row-major.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Un-premultiplied copy suitable for encoding.
    pub fn to_rgba_image(&self) -> MosaicResult<RgbaImage> {
        let mut straight = self.data.clone();
        unpremultiply_rgba8_in_place(&mut straight);
        RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| MosaicError::surface("surface buffer does not match its dimensions"))
    }
}

impl Surface for CpuSurface {
    fn resize_and_clear(&mut self, width: u32, height: u32) -> MosaicResult<()> {
        let len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|px| px.checked_mul(4))
            .ok_or_else(|| MosaicError::surface(format!("surface {width}x{height} too large")))?;
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(len, 0);
        Ok(())
    }

    fn draw_image_scaled(&mut self, asset: &TileAsset, dst: PixelRect) -> MosaicResult<()> {
        if dst.width == 0 || dst.height == 0 {
            return Ok(());
        }
        let scaled = scale_premul(asset, dst.width, dst.height)?;

        if dst.x >= self.width || dst.y >= self.height {
            return Ok(());
        }
        let copy_w = dst.width.min(self.width - dst.x) as usize;
        let copy_h = dst.height.min(self.height - dst.y);
        let dst_stride = self.width as usize * 4;
        let src_stride = dst.width as usize * 4;

        for dy in 0..copy_h {
            let d0 = (dst.y + dy) as usize * dst_stride + dst.x as usize * 4;
            let s0 = dy as usize * src_stride;
            over_in_place(
                &mut self.data[d0..d0 + copy_w * 4],
                &scaled[s0..s0 + copy_w * 4],
            )?;
        }
        Ok(())
    }

    fn read_region(&self, rect: PixelRect) -> MosaicResult<Vec<u8>> {
        let mut out = vec![0u8; rect.width as usize * rect.height as usize * 4];
        if rect.x < self.width && rect.y < self.height {
            let copy_w = rect.width.min(self.width - rect.x) as usize;
            let copy_h = rect.height.min(self.height - rect.y);
            let src_stride = self.width as usize * 4;
            let dst_stride = rect.width as usize * 4;
            for dy in 0..copy_h {
                let s0 = (rect.y + dy) as usize * src_stride + rect.x as usize * 4;
                let d0 = dy as usize * dst_stride;
                out[d0..d0 + copy_w * 4].copy_from_slice(&self.data[s0..s0 + copy_w * 4]);
            }
        }
        unpremultiply_rgba8_in_place(&mut out);
        Ok(out)
    }

    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

fn scale_premul(asset: &TileAsset, width: u32, height: u32) -> MosaicResult<Vec<u8>> {
    let expected = asset.width as usize * asset.height as usize * 4;
    if asset.rgba8_premul.len() != expected || expected == 0 {
        return Err(MosaicError::surface(format!(
            "tile asset {}x{} has {} bytes, expected {expected}",
            asset.width,
            asset.height,
            asset.rgba8_premul.len()
        )));
    }
    if asset.width == width && asset.height == height {
        return Ok(asset.rgba8_premul.as_ref().clone());
    }

    // Resampled in premultiplied space.
    let src: ImageBuffer<Rgba<u8>, &[u8]> =
        ImageBuffer::from_raw(asset.width, asset.height, asset.rgba8_premul.as_slice())
            .ok_or_else(|| MosaicError::surface("tile asset buffer too small"))?;
    Ok(image::imageops::resize(&src, width, height, FilterType::Triangle).into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
