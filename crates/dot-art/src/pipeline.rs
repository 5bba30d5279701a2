//! End-to-end rendering: source image -> dot grid -> dot image.
//!
//! The pipeline starts from an already decoded, upright image; decoding and
//! caching it is the caller's job (see [`crate::decode_upright`]).

use image::{Rgba, RgbaImage};
use rand::Rng;
use tracing::{debug, info};

use crate::normalize::resample;
use crate::paginate::{SheetDot, SheetLayout, paginate};
use crate::quantize::{Dot, DotGrid, quantize};
use crate::render::DotRenderer;
use crate::DotArtError;

/// Which part of the grid to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderTarget {
    #[default]
    FullImage,
    /// One A4 sheet, by 0-based index.
    Sheet(usize),
}

/// A rendered surface, plus the sheet count when a sheet was requested.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub image: RgbaImage,
    pub total_sheets: Option<usize>,
}

/// Anything with a grid position and a fill fraction.
pub trait PlacedDot {
    fn position(&self) -> (u32, u32);
    fn fraction(&self) -> f32;
}

impl PlacedDot for Dot {
    fn position(&self) -> (u32, u32) {
        (self.x_index, self.y_index)
    }

    fn fraction(&self) -> f32 {
        self.fraction_size
    }
}

impl PlacedDot for SheetDot {
    fn position(&self) -> (u32, u32) {
        (self.x_index, self.y_index)
    }

    fn fraction(&self) -> f32 {
        self.fraction_size
    }
}

/// Downsample `source` to the grid bounds and quantize it.
///
/// `None` or `0` leaves that axis unbounded.
pub fn build_grid(
    source: &RgbaImage,
    grid_width: Option<u32>,
    grid_height: Option<u32>,
    total_bands: u32,
) -> crate::Result<DotGrid> {
    let small = resample(source, grid_width, grid_height);
    quantize(&small, total_bands)
}

/// Largest edge, in pixels, of a rendered surface.
pub const MAX_SURFACE_EDGE: u32 = 32_768;

/// Pixel size of a surface holding `cells` cells of `cell_size` pixels.
fn surface_edge(name: &'static str, cells: u32, cell_size: f64) -> crate::Result<u32> {
    let edge = (f64::from(cells) * cell_size).ceil();
    if !edge.is_finite() || edge > f64::from(MAX_SURFACE_EDGE) {
        return Err(DotArtError::invalid(
            name,
            format!("{cells} cells of {cell_size:.1}px exceed {MAX_SURFACE_EDGE}px"),
        ));
    }
    Ok(edge as u32)
}

/// Render `dots` onto a fresh surface of `dots_wide` x `dots_high` cells.
///
/// Cells are `renderer.config().cell_size_px()` pixels on a side. Fails with
/// [`DotArtError::InvalidParameter`] when either edge would exceed
/// [`MAX_SURFACE_EDGE`].
pub fn render_dots<D: PlacedDot, R: Rng>(
    dots: &[D],
    dots_wide: u32,
    dots_high: u32,
    renderer: &mut DotRenderer<'_, R>,
) -> crate::Result<RgbaImage> {
    let cell_size = renderer.config().cell_size_px();
    let width = surface_edge("pixel_size_mm", dots_wide, cell_size)?;
    let height = surface_edge("pixel_size_mm", dots_high, cell_size)?;
    debug!(dots_wide, dots_high, width, height, "Rendering dots");

    let mut surface = RgbaImage::from_pixel(width, height, Rgba([255, 255, 255, 255]));
    for dot in dots {
        let (x, y) = dot.position();
        renderer.render_cell(
            &mut surface,
            f64::from(x) * cell_size,
            f64::from(y) * cell_size,
            cell_size,
            dot.fraction(),
        );
    }
    Ok(surface)
}

/// Render one sheet of `layout` at its full per-sheet cell extent.
pub fn render_sheet<R: Rng>(
    layout: &SheetLayout,
    index: usize,
    renderer: &mut DotRenderer<'_, R>,
) -> crate::Result<RgbaImage> {
    let sheet = layout.sheet(index).ok_or(DotArtError::SheetOutOfRange {
        index,
        total: layout.total_sheets,
    })?;
    render_dots(
        &sheet.dots,
        layout.pixels_per_sheet_width,
        layout.pixels_per_sheet_height,
        renderer,
    )
}

/// Run the whole pipeline on a decoded source image.
pub fn render<R: Rng>(
    source: &RgbaImage,
    grid_width: Option<u32>,
    grid_height: Option<u32>,
    target: RenderTarget,
    renderer: &mut DotRenderer<'_, R>,
) -> crate::Result<RenderOutput> {
    let config = *renderer.config();
    config.validate()?;

    let grid = build_grid(source, grid_width, grid_height, config.total_bands)?;
    info!(
        width = grid.width(),
        height = grid.height(),
        style = %config.style,
        colors = %config.color_scheme,
        "Built dot grid"
    );

    match target {
        RenderTarget::FullImage => Ok(RenderOutput {
            image: render_dots(grid.dots(), grid.width(), grid.height(), renderer)?,
            total_sheets: None,
        }),
        RenderTarget::Sheet(index) => {
            let layout = paginate(&grid, config.pixel_size_mm)?;
            let image = render_sheet(&layout, index, renderer)?;
            Ok(RenderOutput {
                image,
                total_sheets: Some(layout.total_sheets),
            })
        }
    }
}
