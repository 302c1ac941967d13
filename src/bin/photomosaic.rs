use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "photomosaic", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an image as a photomosaic PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input image (any format the `image` crate can decode).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Tile source: `solid`, `dir:<path>`, or `http:<base-url>`.
    #[arg(long, default_value = "solid")]
    store: String,

    /// Settings JSON; flags below override its values.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Tile size as WxH.
    #[arg(long)]
    tile: Option<photomosaic::TileSize>,

    /// Attempts per tile before the render fails.
    #[arg(long)]
    attempts: Option<u32>,

    /// Per-request timeout in milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args).await,
    }
}

fn load_settings(args: &RenderArgs) -> anyhow::Result<photomosaic::RenderSettings> {
    let mut settings = match &args.settings {
        Some(path) => photomosaic::RenderSettings::from_json_path(path)?,
        None => photomosaic::RenderSettings::default(),
    };
    if let Some(tile) = args.tile {
        settings.tile = tile;
    }
    if let Some(attempts) = args.attempts {
        settings.retry.max_attempts = attempts;
    }
    if let Some(ms) = args.timeout_ms {
        settings.retry.request_timeout = Some(Duration::from_millis(ms));
    }
    settings.validate()?;
    Ok(settings)
}

fn make_store(
    kind: &str,
    tile: photomosaic::TileSize,
) -> anyhow::Result<Arc<dyn photomosaic::AssetStore>> {
    if kind == "solid" {
        return Ok(Arc::new(photomosaic::SolidColorStore::new(tile)));
    }
    if let Some(root) = kind.strip_prefix("dir:") {
        return Ok(Arc::new(photomosaic::DirAssetStore::new(root, tile)));
    }
    if let Some(url) = kind.strip_prefix("http:") {
        let url = if url.starts_with("//") {
            format!("http:{url}")
        } else {
            url.to_string()
        };
        return Ok(Arc::new(photomosaic::HttpAssetStore::new(url, tile)?));
    }
    anyhow::bail!("unknown store '{kind}' (expected solid, dir:<path>, or http:<url>)")
}

fn read_source(path: &Path) -> anyhow::Result<image::RgbaImage> {
    let img = image::ImageReader::open(path)
        .with_context(|| format!("open image '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("detect image format of '{}'", path.display()))?
        .decode()
        .with_context(|| format!("'{}' is not a decodable image", path.display()))?;
    Ok(img.to_rgba8())
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let settings = load_settings(&args)?;
    let store = make_store(&args.store, settings.tile)?;
    let source = read_source(&args.in_path)?;

    let mut renderer = photomosaic::MosaicRenderer::new(
        photomosaic::CpuSurface::new(),
        store,
        settings,
        photomosaic::LogObserver,
    )?;
    renderer
        .start(&source)
        .await
        .with_context(|| format!("render '{}'", args.in_path.display()))?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let out = renderer.surface().to_rgba_image()?;
    out.save_with_format(&args.out, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
