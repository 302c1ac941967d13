use std::{fs::File, io::BufReader, path::Path, time::Duration};

use anyhow::Context;

use crate::foundation::{
    core::TileSize,
    error::{MosaicError, MosaicResult},
};

/// Per-tile retry behaviour of the row fetcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Total attempts per tile, including the first request.
    pub max_attempts: u32,
    /// Upper bound for a single store request. `None` waits indefinitely.
    #[serde(with = "opt_millis", rename = "request_timeout_ms")]
    pub request_timeout: Option<Duration>,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            request_timeout: None,
        }
    }
}

/// Settings for one [`MosaicRenderer`](crate::MosaicRenderer).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub tile: TileSize,
    pub retry: RetryPolicy,
}

impl RenderSettings {
    /// Load settings from a JSON file. Missing fields keep their defaults.
    pub fn from_json_path(path: impl AsRef<Path>) -> MosaicResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
        let settings: Self = serde_json::from_reader(BufReader::new(f))
            .with_context(|| format!("parse settings JSON '{}'", path.display()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> MosaicResult<()> {
        TileSize::new(self.tile.width, self.tile.height)?;
        if self.retry.max_attempts == 0 {
            return Err(MosaicError::validation("retry.max_attempts must be >= 1"));
        }
        if self.retry.request_timeout == Some(Duration::ZERO) {
            return Err(MosaicError::validation(
                "retry.request_timeout_ms must be > 0 when set",
            ));
        }
        Ok(())
    }
}

mod opt_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(v: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match v {
            Some(d) => s.serialize_some(&(d.as_millis() as u64)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
