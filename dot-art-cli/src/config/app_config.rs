//! Runtime configuration: defaults overridden by the environment.

use anyhow::Context;
use dot_art::RenderConfig;

use super::defaults::get_default;
use super::validation::validate_setting;

/// Runtime configuration for one conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub render: RenderConfig,
    /// Grid bound on the horizontal axis (0 = source width).
    pub grid_width: u32,
    /// Grid bound on the vertical axis (0 = source height).
    pub grid_height: u32,
    /// Shrink-only cap applied when decoding the source image.
    pub max_source_size: u32,
    pub stamp_rotation: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            grid_width: 32,
            grid_height: 32,
            max_source_size: 1000,
            stamp_rotation: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, anyhow::Error> {
        Self::load(|key| std::env::var(key).ok())
    }

    /// Load configuration, looking each key up with `lookup` and falling back
    /// to the default. Every value is validated before it is parsed.
    pub fn load(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> Result<String, anyhow::Error> {
            let value = match lookup(key) {
                Some(v) if !v.trim().is_empty() => v.trim().to_string(),
                _ => get_default(key)
                    .ok_or_else(|| anyhow::anyhow!("setting not found: {key}"))?
                    .to_string(),
            };
            validate_setting(key, &value)
                .map_err(|e| anyhow::anyhow!("validation error for {key}: {e}"))?;
            Ok(value)
        };

        let grid_size: u32 = g("DOT_ART_GRID_SIZE")?.parse()?;
        let render = RenderConfig {
            pixel_size_mm: g("DOT_ART_PIXEL_SIZE_MM")?.parse()?,
            dot_size_multiplier: g("DOT_ART_DOT_SIZE_MULTIPLIER")?.parse()?,
            total_bands: g("DOT_ART_TOTAL_BANDS")?.parse()?,
            style: g("DOT_ART_DOT_STYLE")?.parse()?,
            color_scheme: g("DOT_ART_COLOR_SCHEME")?.parse()?,
        };

        let config = Self {
            render,
            grid_width: grid_size,
            grid_height: grid_size,
            max_source_size: g("DOT_ART_MAX_SOURCE_SIZE")?.parse()?,
            stamp_rotation: g("DOT_ART_STAMP_ROTATION")? == "true",
        };
        config.render.validate().context("invalid render settings")?;
        Ok(config)
    }

    /// Grid bounds as the core expects them (`None` = unbounded).
    pub fn grid_bounds(&self) -> (Option<u32>, Option<u32>) {
        let bound = |v: u32| (v > 0).then_some(v);
        (bound(self.grid_width), bound(self.grid_height))
    }
}
