use crate::{
    assets::{
        decode::decode_tile_asset,
        store::{AssetStore, TileAsset},
    },
    foundation::{
        core::{TileColor, TileSize},
        error::{MosaicError, MosaicResult},
    },
};

/// Offline store that draws each tile as a filled ellipse of the requested color.
///
/// Answers the same `color/<hex>` paths as the HTTP tile server, so it can stand in for it
/// when rendering without a network.
#[derive(Clone, Copy, Debug)]
pub struct SolidColorStore {
    tile: TileSize,
}

impl SolidColorStore {
    pub fn new(tile: TileSize) -> Self {
        Self { tile }
    }

    pub fn svg_for(&self, color: TileColor) -> String {
        let TileSize { width, height } = self.tile;
        let (rx, ry) = (f64::from(width) / 2.0, f64::from(height) / 2.0);
        format!(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}"><ellipse cx="{rx}" cy="{ry}" rx="{rx}" ry="{ry}" fill="#{color}"/></svg>"##
        )
    }
}

#[async_trait::async_trait]
impl AssetStore for SolidColorStore {
    async fn fetch(&self, path: &str) -> MosaicResult<TileAsset> {
        let hex = path
            .trim_start_matches('/')
            .strip_prefix("color/")
            .ok_or_else(|| MosaicError::store(format!("unknown store path '{path}'")))?;
        let color = TileColor::from_hex(hex).map_err(|e| MosaicError::store(e.to_string()))?;
        decode_tile_asset(self.svg_for(color).as_bytes(), self.tile)
    }
}
