//! Headless driver for the dot art pipeline.
//!
//! Loads settings (defaults, `.env`, environment, flags), reads the source
//! and stamp images from disk and writes the rendered PNG(s).

pub mod cli;
pub mod config;

use std::path::{Path, PathBuf};

use anyhow::Context;
use dot_art::{DotRenderer, RenderTarget, STAMP_MAX_SIZE, Stamp};
use rand::SeedableRng;
use rand::rngs::StdRng;

use cli::Cli;
use config::AppConfig;

/// Load .env from multiple candidate paths.
pub fn load_dotenv() {
    let candidates = [".env", "../.env", "../../.env"];
    for path in &candidates {
        if dotenvy::from_filename(path).is_ok() {
            tracing::info!("Loaded .env from: {path}");
            return;
        }
    }
    tracing::info!("No .env file found, using system environment variables");
}

/// Resolve settings: environment (after `.env`) first, then flags.
pub fn init_config(cli: &Cli) -> Result<AppConfig, anyhow::Error> {
    load_dotenv();

    let mut config = AppConfig::from_env()?;
    cli.apply(&mut config)?;
    config.render.validate().context("invalid settings")?;

    tracing::info!(
        grid_width = config.grid_width,
        grid_height = config.grid_height,
        pixel_size_mm = config.render.pixel_size_mm,
        total_bands = config.render.total_bands,
        "Settings loaded"
    );
    Ok(config)
}

/// Run one conversion as described by `cli`.
pub fn run(cli: &Cli) -> Result<(), anyhow::Error> {
    let config = init_config(cli)?;

    let bytes = std::fs::read(&cli.input)
        .with_context(|| format!("Failed to read {}", cli.input.display()))?;
    let source = dot_art::decode_upright(&bytes, Some(config.max_source_size))
        .with_context(|| format!("Failed to load {}", cli.input.display()))?;

    let stamp = cli
        .stamp
        .as_deref()
        .map(|path| load_stamp(path, config.stamp_rotation))
        .transpose()?;

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut renderer = DotRenderer::new(config.render, rng);
    if let Some(stamp) = &stamp {
        renderer = renderer.with_stamp(stamp);
    }

    let (grid_width, grid_height) = config.grid_bounds();

    if cli.all_sheets {
        let bands = config.render.total_bands;
        let grid = dot_art::build_grid(&source, grid_width, grid_height, bands)?;
        let layout = dot_art::paginate(&grid, config.render.pixel_size_mm)?;
        for index in 0..layout.total_sheets {
            let image = dot_art::render_sheet(&layout, index, &mut renderer)?;
            save(&image, &sheet_path(&cli.output, index))?;
        }
        tracing::info!(total_sheets = layout.total_sheets, "Rendered all sheets");
        return Ok(());
    }

    let target = cli.sheet.map_or(RenderTarget::FullImage, RenderTarget::Sheet);
    let output = dot_art::render(&source, grid_width, grid_height, target, &mut renderer)?;
    save(&output.image, &cli.output)?;

    if let (Some(total), Some(index)) = (output.total_sheets, cli.sheet) {
        tracing::info!(sheet = index, total_sheets = total, "Rendered sheet");
    }
    Ok(())
}

fn load_stamp(path: &Path, random_rotation: bool) -> Result<Stamp, anyhow::Error> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read stamp {}", path.display()))?;
    let image = dot_art::decode_upright(&bytes, Some(STAMP_MAX_SIZE))
        .with_context(|| format!("Failed to load stamp {}", path.display()))?;
    Ok(Stamp {
        image,
        random_rotation,
    })
}

fn save(image: &image::RgbaImage, path: &Path) -> Result<(), anyhow::Error> {
    image
        .save(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::info!(
        width = image.width(),
        height = image.height(),
        "Wrote {}",
        path.display()
    );
    Ok(())
}

/// `out.png` -> `out-sheet-3.png` for sheet index 3.
pub fn sheet_path(output: &Path, index: usize) -> PathBuf {
    let stem = output
        .file_stem()
        .map_or_else(|| "sheet".into(), |s| s.to_string_lossy());
    let name = match output.extension() {
        Some(ext) => format!("{stem}-sheet-{index}.{}", ext.to_string_lossy()),
        None => format!("{stem}-sheet-{index}"),
    };
    output.with_file_name(name)
}
