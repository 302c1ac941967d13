use std::sync::Arc;

use image::RgbaImage;
use tracing::{debug, info};

use crate::{
    assets::store::AssetStore,
    config::settings::RenderSettings,
    fetch::row::fetch_row,
    foundation::error::{MosaicError, MosaicResult},
    layout::grid::GridPlan,
    render::{
        composite::draw_row,
        job::RenderJob,
        progress::{JobSnapshot, RenderObserver},
        surface::{CpuSurface, Surface},
    },
    sample::average::sample_row,
};

/// Renders photomosaics onto a surface, one row at a time.
///
/// Each row is sampled, fetched as one concurrent batch, drawn, and reported before the next
/// row is sampled. The first row that cannot be fetched ends the render; rows already drawn
/// stay on the surface.
pub struct MosaicRenderer<S: Surface = CpuSurface> {
    surface: S,
    store: Arc<dyn AssetStore>,
    settings: RenderSettings,
    observer: Box<dyn RenderObserver>,
    last_job: Option<JobSnapshot>,
}

impl<S: Surface> MosaicRenderer<S> {
    pub fn new(
        surface: S,
        store: Arc<dyn AssetStore>,
        settings: RenderSettings,
        observer: impl RenderObserver + 'static,
    ) -> MosaicResult<Self> {
        settings.validate()?;
        Ok(Self {
            surface,
            store,
            settings,
            observer: Box::new(observer),
            last_job: None,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Snapshot of the most recent job, as last reported to the observer.
    pub fn last_job(&self) -> Option<JobSnapshot> {
        self.last_job
    }

    /// Render `image` as a mosaic.
    ///
    /// Returns the terminal snapshot when every row was drawn. When a row fails the observer's
    /// `on_error` fires and that row's error is returned.
    #[tracing::instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub async fn start(&mut self, image: &RgbaImage) -> MosaicResult<JobSnapshot> {
        let plan = GridPlan::new(image.width(), image.height(), self.settings.tile)?;
        let mut job = RenderJob::new(plan);

        let cleared = self
            .surface
            .resize_and_clear(plan.output_width, plan.output_height);
        job.begin();
        self.notify(&job, |o, s| o.on_start(s));
        if let Err(e) = cleared {
            return Err(self.abort(&mut job, e));
        }
        info!(rows = plan.rows, cols = plan.cols, "render started");

        let rows = if plan.is_empty() { 0 } else { plan.rows };
        for row in 0..rows {
            let colors = sample_row(image, &plan, row);
            debug!(row, "row sampled");

            let assets = match fetch_row(self.store.as_ref(), &colors, &self.settings.retry).await
            {
                Ok(assets) => assets,
                Err(e) => return Err(self.abort(&mut job, e)),
            };
            if let Err(e) = draw_row(&mut self.surface, &plan, row, &assets) {
                return Err(self.abort(&mut job, e));
            }

            job.row_drawn(row);
            self.notify(&job, |o, s| o.on_progress(s));
        }

        job.complete();
        let snapshot = self.notify(&job, |o, s| o.on_complete(s));
        info!("render complete");
        Ok(snapshot)
    }

    fn notify(
        &mut self,
        job: &RenderJob,
        f: impl FnOnce(&mut dyn RenderObserver, &JobSnapshot),
    ) -> JobSnapshot {
        let snapshot = job.snapshot();
        self.last_job = Some(snapshot);
        f(self.observer.as_mut(), &snapshot);
        snapshot
    }

    fn abort(&mut self, job: &mut RenderJob, err: MosaicError) -> MosaicError {
        job.fail();
        let snapshot = job.snapshot();
        self.last_job = Some(snapshot);
        self.observer.on_error(&snapshot, &err);
        err
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
