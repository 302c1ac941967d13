use super::*;
use crate::{
    assets::store::TileAsset,
    foundation::core::{PixelRect, TileSize},
    render::progress::{JobStatus, RenderEvent},
    test_support::{ScriptedStore, SharedEvents},
};

struct BrokenSurface;

impl Surface for BrokenSurface {
    fn resize_and_clear(&mut self, _width: u32, _height: u32) -> MosaicResult<()> {
        Err(MosaicError::surface("no backing store"))
    }

    fn draw_image_scaled(&mut self, _asset: &TileAsset, _dst: PixelRect) -> MosaicResult<()> {
        unreachable!("nothing is drawn after a failed resize")
    }

    fn read_region(&self, _rect: PixelRect) -> MosaicResult<Vec<u8>> {
        Ok(Vec::new())
    }

    fn dimensions(&self) -> (u32, u32) {
        (0, 0)
    }
}

fn store() -> Arc<ScriptedStore> {
    Arc::new(ScriptedStore::new())
}

fn settings(tile: u32) -> RenderSettings {
    RenderSettings {
        tile: TileSize::new(tile, tile).unwrap(),
        ..RenderSettings::default()
    }
}

#[test]
fn new_rejects_invalid_settings() {
    let mut bad = RenderSettings::default();
    bad.retry.max_attempts = 0;
    let res = MosaicRenderer::new(CpuSurface::new(), store(), bad, ());
    assert!(res.is_err());
}

#[tokio::test]
async fn mosaic_reproduces_a_uniform_image() {
    let image = RgbaImage::from_pixel(10, 10, image::Rgba([0x20, 0x40, 0x60, 255]));
    let mut renderer = MosaicRenderer::new(CpuSurface::new(), store(), settings(5), ()).unwrap();

    let done = renderer.start(&image).await.unwrap();
    assert_eq!(done.status, JobStatus::Complete);
    assert_eq!((done.width, done.height), (10, 10));
    assert_eq!(renderer.last_job(), Some(done));

    let out = renderer.into_surface().to_rgba_image().unwrap();
    assert!(out.pixels().all(|p| p.0 == [0x20, 0x40, 0x60, 255]));
}

#[tokio::test]
async fn surface_failure_still_reports_start_then_error() {
    let events = SharedEvents::default();
    let mut renderer =
        MosaicRenderer::new(BrokenSurface, store(), settings(4), events.clone()).unwrap();

    let image = RgbaImage::new(8, 8);
    let err = renderer.start(&image).await.unwrap_err();
    assert!(matches!(err, MosaicError::Surface(_)));

    let events = events.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], RenderEvent::Started(_)));
    assert!(matches!(events[1], RenderEvent::Failed { .. }));
    assert_eq!(renderer.last_job().map(|j| j.status), Some(JobStatus::Error));
}

#[tokio::test]
async fn empty_image_completes_without_fetching() {
    let events = SharedEvents::default();
    let store = store();
    let mut renderer = MosaicRenderer::new(
        CpuSurface::new(),
        store.clone(),
        settings(4),
        events.clone(),
    )
    .unwrap();

    let done = renderer.start(&RgbaImage::new(0, 12)).await.unwrap();
    assert_eq!(done.progress, 100);
    assert_eq!((done.width, done.height), (0, 12));

    let events = events.events();
    assert_eq!(events.len(), 2);
    assert!(matches!(events[0], RenderEvent::Started(_)));
    assert!(matches!(events[1], RenderEvent::Completed(_)));
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn renderer_is_reusable_after_a_job_finishes() {
    let mut renderer = MosaicRenderer::new(CpuSurface::new(), store(), settings(4), ()).unwrap();

    renderer.start(&RgbaImage::new(8, 8)).await.unwrap();
    let second = renderer.start(&RgbaImage::new(4, 12)).await.unwrap();
    assert_eq!((second.width, second.height), (4, 12));
    assert_eq!(renderer.surface().dimensions(), (4, 12));
}
