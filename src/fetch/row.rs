use futures::future::try_join_all;
use tracing::{debug, warn};

use crate::{
    assets::store::{AssetStore, TileAsset, color_path},
    config::settings::RetryPolicy,
    foundation::{
        core::TileColor,
        error::{MosaicError, MosaicResult},
    },
};

/// Assets for one row, index-aligned with the row's colors, or the first fatal tile error.
pub type RowFetchResult = MosaicResult<Vec<TileAsset>>;

/// Fetch one tile asset, re-issuing the same request until it succeeds or
/// `policy.max_attempts` attempts have failed.
///
/// A request that outlives `policy.request_timeout` counts as a failed attempt.
#[tracing::instrument(level = "debug", skip_all, fields(color = %color))]
pub async fn fetch_tile(
    store: &dyn AssetStore,
    color: TileColor,
    policy: &RetryPolicy,
) -> MosaicResult<TileAsset> {
    let path = color_path(color);
    let max_attempts = policy.max_attempts.max(1);

    let mut last_error = String::new();
    for attempt in 1..=max_attempts {
        let result = match policy.request_timeout {
            Some(timeout) => match tokio::time::timeout(timeout, store.fetch(&path)).await {
                Ok(r) => r,
                Err(_) => Err(MosaicError::store(format!(
                    "timed out after {} ms",
                    timeout.as_millis()
                ))),
            },
            None => store.fetch(&path).await,
        };

        match result {
            Ok(asset) => {
                if attempt > 1 {
                    debug!(attempt, "tile fetched after retry");
                }
                return Ok(asset);
            }
            Err(e) => {
                debug!(attempt, max_attempts, error = %e, "tile fetch attempt failed");
                last_error = e.to_string();
            }
        }
    }

    warn!(attempts = max_attempts, error = %last_error, "tile fetch exhausted retries");
    Err(MosaicError::AssetFetch {
        color: color.to_hex(),
        attempts: max_attempts,
        reason: last_error,
    })
}

/// Fetch every tile of a row concurrently.
///
/// All requests are in flight at once on the calling task. Completion order does not matter:
/// results are placed by column. The first tile to exhaust its retries fails the row, and the
/// sibling requests still in flight are dropped.
#[tracing::instrument(level = "debug", skip_all, fields(cols = colors.len()))]
pub async fn fetch_row(
    store: &dyn AssetStore,
    colors: &[TileColor],
    policy: &RetryPolicy,
) -> RowFetchResult {
    try_join_all(
        colors
            .iter()
            .map(|&color| fetch_tile(store, color, policy)),
    )
    .await
}

#[cfg(test)]
#[path = "../../tests/unit/fetch/row.rs"]
mod tests;
