pub type MosaicResult<T> = Result<T, MosaicError>;

/// Errors produced while planning, fetching, or compositing a mosaic.
#[derive(thiserror::Error, Debug)]
pub enum MosaicError {
    /// Settings or inputs rejected before any work starts.
    #[error("validation error: {0}")]
    Validation(String),

    /// Asset bytes could not be turned into a drawable image.
    #[error("decode error: {0}")]
    Decode(String),

    /// A single asset-store attempt failed. Retried at tile level.
    #[error("asset store error: {0}")]
    Store(String),

    /// A tile exhausted all of its attempts; terminal for the row and the job.
    #[error("asset fetch error: color/{color} failed after {attempts} attempts: {reason}")]
    AssetFetch {
        /// Hex color of the tile that failed.
        color: String,
        /// Attempts made before giving up.
        attempts: u32,
        /// Last failure reported by the store.
        reason: String,
    },

    /// The drawing surface rejected an operation.
    #[error("surface error: {0}")]
    Surface(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl MosaicError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn store(msg: impl Into<String>) -> Self {
        Self::Store(msg.into())
    }

    pub fn surface(msg: impl Into<String>) -> Self {
        Self::Surface(msg.into())
    }

    /// True for the tile-exhaustion error that aborts a render.
    pub fn is_asset_fetch(&self) -> bool {
        matches!(self, Self::AssetFetch { .. })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
