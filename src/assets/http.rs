//! Asset store backed by an HTTP tile server.

use tracing::trace;

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

/// Fetches `<base_url>/color/<hex>` and decodes the body.
#[derive(Clone, Debug)]
pub struct HttpAssetStore {
    client: reqwest::Client,
    base_url: String,
    tile: TileSize,
}

impl HttpAssetStore {
    /// Per-request deadlines come from the fetcher's retry policy, not the client.
    pub fn new(base_url: impl Into<String>, tile: TileSize) -> MosaicResult<Self> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| MosaicError::store(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            tile,
        })
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait::async_trait]
impl AssetStore for HttpAssetStore {
    async fn fetch(&self, path: &str) -> MosaicResult<TileAsset> {
        let url = self.url_for(path);
        trace!(%url, "GET tile");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| MosaicError::store(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(MosaicError::store(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| MosaicError::store(format!("failed to read response: {e}")))?;
        decode_tile_asset(&body, self.tile)
    }
}
