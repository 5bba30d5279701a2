//! Halftone "dot art" conversion for photographs.
//!
//! Turns a decoded photo into a coarse grid of banded brightness values,
//! renders that grid as stylized dots, and splits it into printable sheets
//! with millimeter-accurate cell sizes.

pub mod normalize;
pub mod orientation;
pub mod paginate;
pub mod pipeline;
pub mod quantize;
pub mod render;
pub mod units;

// Re-exports for convenience
pub use normalize::{apply_orientation, decode_upright, fit_dimensions, resample, shrink_to_fit};
pub use orientation::{OrientationTag, read_orientation};
pub use paginate::{Sheet, SheetDot, SheetLayout, SheetSize, paginate, paginate_with};
pub use pipeline::{
    MAX_SURFACE_EDGE, PlacedDot, RenderOutput, RenderTarget, build_grid, render, render_dots,
    render_sheet,
};
pub use quantize::{Dot, DotGrid, quantize};
pub use render::{ColorScheme, DotFill, DotRenderer, DotStyle, RenderConfig, Stamp};
pub use units::{PIXELS_PER_MM, mm_to_pixels, pixels_to_mm};

/// Largest edge (in pixels) a stamp image is shrunk to when loaded.
pub const STAMP_MAX_SIZE: u32 = 500;

/// Errors produced by the dot art pipeline.
#[derive(Debug, thiserror::Error)]
pub enum DotArtError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("Sheet index {index} out of range ({total} sheets)")]
    SheetOutOfRange { index: usize, total: usize },
}

impl DotArtError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Result type alias for dot art operations.
pub type Result<T> = std::result::Result<T, DotArtError>;
