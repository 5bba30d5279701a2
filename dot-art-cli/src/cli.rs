//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;
use dot_art::{ColorScheme, DotStyle};

use crate::config::AppConfig;
use crate::config::validation::validate_setting;

/// Run a flag value through the same checks as its environment setting.
fn checked<T: ToString>(flag: &str, key: &str, value: T) -> Result<T, anyhow::Error> {
    validate_setting(key, &value.to_string())
        .map_err(|e| anyhow::anyhow!("invalid value for {flag}: {e}"))?;
    Ok(value)
}

/// dot-art - Turn a photo into printable halftone dots
#[derive(Parser, Debug)]
#[command(name = "dot-art")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Source image (JPEG orientation metadata is honored)
    pub input: PathBuf,

    /// Output PNG file (with --all-sheets, one file per sheet is derived from it)
    #[arg(short, long, value_name = "FILE")]
    pub output: PathBuf,

    /// Maximum dots per side of the grid (0 = source size)
    #[arg(long)]
    pub grid: Option<u32>,

    /// Maximum dots across, overriding --grid
    #[arg(long)]
    pub grid_width: Option<u32>,

    /// Maximum dots down, overriding --grid
    #[arg(long)]
    pub grid_height: Option<u32>,

    /// Number of brightness bands
    #[arg(long)]
    pub bands: Option<u32>,

    /// Dot size multiplier
    #[arg(long)]
    pub multiplier: Option<f32>,

    /// Physical size of one dot cell in millimeters
    #[arg(long)]
    pub pixel_size_mm: Option<f64>,

    /// Dot shape: round, square, triangle, triangle-alt, ring
    #[arg(long)]
    pub style: Option<DotStyle>,

    /// Colors: black-on-white, grey-on-white, white-on-black, random-on-white
    #[arg(long)]
    pub colors: Option<ColorScheme>,

    /// Image drawn inside every dot instead of a flat shape
    #[arg(long, value_name = "FILE")]
    pub stamp: Option<PathBuf>,

    /// Keep stamp images upright
    #[arg(long)]
    pub no_stamp_rotation: bool,

    /// Seed for random hues and stamp rotation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render a single A4 sheet (0-based) instead of the full image
    #[arg(long, conflicts_with = "all_sheets")]
    pub sheet: Option<usize>,

    /// Render every A4 sheet to its own file
    #[arg(long)]
    pub all_sheets: bool,
}

impl Cli {
    /// Apply command-line flags on top of an environment-derived config.
    ///
    /// Each flag is validated like the setting it overrides.
    pub fn apply(&self, config: &mut AppConfig) -> Result<(), anyhow::Error> {
        if let Some(grid) = self.grid {
            let grid = checked("--grid", "DOT_ART_GRID_SIZE", grid)?;
            config.grid_width = grid;
            config.grid_height = grid;
        }
        if let Some(w) = self.grid_width {
            config.grid_width = checked("--grid-width", "DOT_ART_GRID_SIZE", w)?;
        }
        if let Some(h) = self.grid_height {
            config.grid_height = checked("--grid-height", "DOT_ART_GRID_SIZE", h)?;
        }
        if let Some(bands) = self.bands {
            config.render.total_bands = checked("--bands", "DOT_ART_TOTAL_BANDS", bands)?;
        }
        if let Some(m) = self.multiplier {
            config.render.dot_size_multiplier =
                checked("--multiplier", "DOT_ART_DOT_SIZE_MULTIPLIER", m)?;
        }
        if let Some(mm) = self.pixel_size_mm {
            config.render.pixel_size_mm = checked("--pixel-size-mm", "DOT_ART_PIXEL_SIZE_MM", mm)?;
        }
        if let Some(style) = self.style {
            config.render.style = style;
        }
        if let Some(colors) = self.colors {
            config.render.color_scheme = colors;
        }
        if self.no_stamp_rotation {
            config.stamp_rotation = false;
        }
        Ok(())
    }
}
