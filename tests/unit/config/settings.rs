use std::io::Write;

use super::*;

#[test]
fn defaults_are_sixteen_pixel_tiles_and_three_attempts() {
    let s = RenderSettings::default();
    assert_eq!(s.tile, TileSize::new(16, 16).unwrap());
    assert_eq!(s.retry.max_attempts, 3);
    assert_eq!(s.retry.request_timeout, None);
    s.validate().unwrap();
}

#[test]
fn partial_json_keeps_defaults() {
    let s: RenderSettings =
        serde_json::from_str(r#"{ "tile": { "width": 64, "height": 32 } }"#).unwrap();
    assert_eq!(s.tile, TileSize::new(64, 32).unwrap());
    assert_eq!(s.retry, RetryPolicy::default());

    let s: RenderSettings =
        serde_json::from_str(r#"{ "retry": { "request_timeout_ms": 250 } }"#).unwrap();
    assert_eq!(s.retry.max_attempts, 3);
    assert_eq!(s.retry.request_timeout, Some(Duration::from_millis(250)));
}

#[test]
fn validate_rejects_degenerate_values() {
    let mut s = RenderSettings::default();
    s.retry.max_attempts = 0;
    assert!(s.validate().is_err());

    let mut s = RenderSettings::default();
    s.tile.width = 0;
    assert!(s.validate().is_err());

    let mut s = RenderSettings::default();
    s.retry.request_timeout = Some(Duration::ZERO);
    assert!(s.validate().is_err());
}

#[test]
fn from_json_path_reads_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    write!(
        f,
        r#"{{ "tile": {{ "width": 8, "height": 8 }}, "retry": {{ "max_attempts": 5 }} }}"#
    )
    .unwrap();

    let s = RenderSettings::from_json_path(f.path()).unwrap();
    assert_eq!(s.tile, TileSize::new(8, 8).unwrap());
    assert_eq!(s.retry.max_attempts, 5);
}

#[test]
fn from_json_path_reports_missing_file() {
    let err = RenderSettings::from_json_path("does/not/exist.json").unwrap_err();
    assert!(err.to_string().contains("open settings"));
}
