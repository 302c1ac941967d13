use super::*;

#[test]
fn color_path_uses_bare_hex() {
    assert_eq!(color_path(TileColor::new(0x3f, 0x7a, 0xe0)), "color/3f7ae0");
    assert_eq!(color_path(TileColor::BLACK), "color/000000");
}

#[test]
fn solid_asset_is_opaque_and_sized() {
    let a = TileAsset::solid(2, 3, TileColor::new(1, 2, 3));
    assert_eq!(a.rgba8_premul.len(), 2 * 3 * 4);
    assert!(a.rgba8_premul.chunks_exact(4).all(|p| p == [1, 2, 3, 255]));
}

struct Fixed;

#[async_trait::async_trait]
impl AssetStore for Fixed {
    async fn fetch(&self, _path: &str) -> MosaicResult<TileAsset> {
        Ok(TileAsset::solid(1, 1, TileColor::BLACK))
    }
}

#[tokio::test]
async fn arc_store_delegates() {
    let store: Arc<dyn AssetStore> = Arc::new(Fixed);
    let asset = store.fetch("color/000000").await.unwrap();
    assert_eq!((asset.width, asset.height), (1, 1));
}
