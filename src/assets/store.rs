use std::sync::Arc;

use crate::foundation::{core::TileColor, error::MosaicResult};

/// Decoded replacement tile, ready to draw.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileAsset {
    pub width: u32,
    pub height: u32,
    /// Premultiplied RGBA8, row-major, tightly packed.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl TileAsset {
    /// A fully opaque tile filled with `color`.
    pub fn solid(width: u32, height: u32, color: TileColor) -> Self {
        let px = [color.r, color.g, color.b, 255];
        let data = px
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect();
        Self {
            width,
            height,
            rgba8_premul: Arc::new(data),
        }
    }
}

/// Store path for a tile color: `color/<6 hex digits>`.
pub fn color_path(color: TileColor) -> String {
    format!("color/{color}")
}

/// Resolves store paths to drawable tile assets.
///
/// Implementations must tolerate the same path being requested again after a failure;
/// the row fetcher retries by re-issuing identical requests.
#[async_trait::async_trait]
pub trait AssetStore: Send + Sync {
    async fn fetch(&self, path: &str) -> MosaicResult<TileAsset>;
}

#[async_trait::async_trait]
impl<T: AssetStore + ?Sized> AssetStore for Arc<T> {
    async fn fetch(&self, path: &str) -> MosaicResult<TileAsset> {
        (**self).fetch(path).await
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
