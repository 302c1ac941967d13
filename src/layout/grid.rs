use crate::foundation::{
    core::{PixelRect, TileSize},
    error::MosaicResult,
};

/// Row/column counts and output dimensions for one render.
///
/// The output is the source rounded up to whole tiles, so a partial tile on the right or bottom
/// edge still gets a full replacement tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridPlan {
    pub tile: TileSize,
    pub rows: u32,
    pub cols: u32,
    pub output_width: u32,
    pub output_height: u32,
}

impl GridPlan {
    /// Fails when `tile` has a zero dimension.
    pub fn new(source_width: u32, source_height: u32, tile: TileSize) -> MosaicResult<Self> {
        let tile = TileSize::new(tile.width, tile.height)?;
        let rows = source_height.div_ceil(tile.height);
        let cols = source_width.div_ceil(tile.width);
        Ok(Self {
            tile,
            rows,
            cols,
            output_width: cols * tile.width,
            output_height: rows * tile.height,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Pixel rectangle of tile `(row, col)`, in both source and output coordinates.
    pub fn tile_rect(&self, row: u32, col: u32) -> PixelRect {
        PixelRect::new(
            col * self.tile.width,
            row * self.tile.height,
            self.tile.width,
            self.tile.height,
        )
    }

    /// Progress percentage after `row` (0-based) has been drawn.
    pub fn progress_after_row(&self, row: u32) -> u8 {
        if self.rows == 0 {
            return 100;
        }
        let done = u64::from(row.saturating_add(1)).min(u64::from(self.rows));
        (done * 100 / u64::from(self.rows)) as u8
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
