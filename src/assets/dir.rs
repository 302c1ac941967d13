use std::path::PathBuf;

use crate::{
    assets::{
        decode::decode_tile_asset,
        store::{AssetStore, TileAsset},
    },
    foundation::{
        core::TileSize,
        error::{MosaicError, MosaicResult},
    },
};

const EXTENSIONS: [&str; 3] = ["svg", "png", "jpg"];

/// Serves tiles from a directory laid out like the HTTP store: `<root>/color/<hex>[.svg|.png|.jpg]`.
#[derive(Clone, Debug)]
pub struct DirAssetStore {
    root: PathBuf,
    tile: TileSize,
}

impl DirAssetStore {
    pub fn new(root: impl Into<PathBuf>, tile: TileSize) -> Self {
        Self {
            root: root.into(),
            tile,
        }
    }

    async fn read_first(&self, path: &str) -> MosaicResult<Vec<u8>> {
        let rel = normalize_store_path(path)?;
        let base = self.root.join(&rel);
        let mut candidates = vec![base.clone()];
        candidates.extend(EXTENSIONS.iter().map(|ext| base.with_extension(ext)));

        for candidate in &candidates {
            match tokio::fs::read(candidate).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(MosaicError::store(format!(
                        "read '{}': {e}",
                        candidate.display()
                    )));
                }
            }
        }
        Err(MosaicError::store(format!(
            "asset not found: '{}'",
            base.display()
        )))
    }
}

#[async_trait::async_trait]
impl AssetStore for DirAssetStore {
    async fn fetch(&self, path: &str) -> MosaicResult<TileAsset> {
        let bytes = self.read_first(path).await?;
        decode_tile_asset(&bytes, self.tile)
    }
}

/// Reject store paths that would escape the store root.
pub fn normalize_store_path(path: &str) -> MosaicResult<String> {
    let s = path.replace('\\', "/");
    let trimmed = s.trim_start_matches('/');
    if trimmed.is_empty() || trimmed.split('/').any(|seg| seg == ".." || seg.is_empty()) {
        return Err(MosaicError::store(format!("invalid store path '{path}'")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/dir.rs"]
mod tests;
