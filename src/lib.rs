//! Photomosaic renders an image as a grid of replacement tiles.
//!
//! The source is cut into fixed-size tiles; each tile is reduced to its average color, a tile
//! graphic for that color is fetched from an [`AssetStore`], and the graphics are composited
//! onto a [`Surface`].
//!
//! # Pipeline overview
//!
//! 1. **Plan**: `image dimensions + TileSize -> GridPlan` (rows, columns, output size)
//! 2. **Sample**: `row -> Vec<TileColor>`, synchronously, left to right
//! 3. **Fetch**: `Vec<TileColor> -> Vec<TileAsset>`, all tiles of the row concurrently, each
//!    retried up to [`RetryPolicy::max_attempts`] times
//! 4. **Draw**: composite the row at its offset, then report progress
//!
//! Rows are strictly sequential: row `n + 1` is not sampled until row `n` is drawn and reported.
//! A tile that exhausts its attempts aborts the whole render and leaves the surface partially
//! composited.
//!
//! Lifecycle notifications go to a [`RenderObserver`]: `on_start` once, `on_progress` once per
//! drawn row, then exactly one of `on_complete` or `on_error`.
#![forbid(unsafe_code)]

#[cfg(test)]
extern crate self as photomosaic;

mod assets;
mod config;
mod fetch;
mod foundation;
mod layout;
mod render;
mod sample;

pub use assets::decode::{decode_image, decode_tile_asset, parse_svg};
pub use assets::dir::{DirAssetStore, normalize_store_path};
pub use assets::http::HttpAssetStore;
pub use assets::solid::SolidColorStore;
pub use assets::store::{AssetStore, TileAsset, color_path};
pub use config::settings::{RenderSettings, RetryPolicy};
pub use fetch::row::{RowFetchResult, fetch_row, fetch_tile};
pub use foundation::core::{PixelRect, Rgba8Premul, TileColor, TileSize};
pub use foundation::error::{MosaicError, MosaicResult};
pub use layout::grid::GridPlan;
pub use render::composite::{draw_row, over};
pub use render::job::RenderJob;
pub use render::progress::{JobSnapshot, JobStatus, LogObserver, RenderEvent, RenderObserver};
pub use render::renderer::MosaicRenderer;
pub use render::surface::{CpuSurface, Surface};
pub use sample::average::{SAMPLE_STRIDE_PIXELS, average_color, copy_region, sample_row, sample_tile};

#[cfg(test)]
#[path = "../tests/support/mod.rs"]
mod test_support;
