//! Split a dot grid into printable sheets.
//!
//! Each sheet holds only whole cells: the number of cells per sheet is the
//! sheet size divided by the cell size, rounded down. Sheets are laid out
//! row-major and every dot lands on exactly one sheet.

use tracing::{debug, info};

use crate::DotArtError;
use crate::quantize::DotGrid;

/// Physical sheet size in millimeters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetSize {
    pub width_mm: f64,
    pub height_mm: f64,
}

impl SheetSize {
    pub const A4_PORTRAIT: Self = Self {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    /// Same sheet turned on its side.
    pub fn landscape(self) -> Self {
        Self {
            width_mm: self.height_mm,
            height_mm: self.width_mm,
        }
    }
}

impl Default for SheetSize {
    fn default() -> Self {
        Self::A4_PORTRAIT
    }
}

/// A dot copied onto a sheet, with both sheet-local and full-grid indices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SheetDot {
    pub x_index: u32,
    pub y_index: u32,
    pub full_dot_x_index: u32,
    pub full_dot_y_index: u32,
    pub fraction_size: f32,
}

/// One printable page of the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub dots: Vec<SheetDot>,
    pub row_index: u32,
    pub col_index: u32,
    /// First grid column on this sheet.
    pub start_x: u32,
    /// First grid row on this sheet.
    pub start_y: u32,
    /// Last grid column on this sheet (inclusive).
    pub end_x: u32,
    /// Last grid row on this sheet (inclusive).
    pub end_y: u32,
}

/// The full set of sheets for a grid, plus the measurements used to build it.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetLayout {
    pub sheets: Vec<Sheet>,
    pub sheets_wide: u32,
    pub sheets_high: u32,
    pub total_sheets: usize,
    pub pixels_per_sheet_width: u32,
    pub pixels_per_sheet_height: u32,
    pub full_image_width_mm: f64,
    pub full_image_height_mm: f64,
    pub usable_width_mm: f64,
    pub usable_height_mm: f64,
}

impl SheetLayout {
    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    /// Highest valid 0-based sheet index, `None` when there are no sheets.
    pub fn max_sheet_index(&self) -> Option<usize> {
        self.total_sheets.checked_sub(1)
    }

    /// Move `current` by `delta`, staying put if that would leave the
    /// valid index range.
    pub fn step(&self, current: usize, delta: isize) -> usize {
        let Some(max) = self.max_sheet_index() else {
            return current;
        };
        match current.checked_add_signed(delta) {
            Some(next) if next <= max => next,
            _ => current,
        }
    }
}

/// Paginate onto A4 portrait sheets.
pub fn paginate(grid: &DotGrid, pixel_size_mm: f64) -> crate::Result<SheetLayout> {
    paginate_with(grid, pixel_size_mm, SheetSize::A4_PORTRAIT)
}

/// Paginate onto sheets of the given size.
pub fn paginate_with(
    grid: &DotGrid,
    pixel_size_mm: f64,
    sheet: SheetSize,
) -> crate::Result<SheetLayout> {
    if !pixel_size_mm.is_finite() || pixel_size_mm <= 0.0 {
        return Err(DotArtError::invalid(
            "pixel_size_mm",
            format!("must be a positive number, got {pixel_size_mm}"),
        ));
    }

    let pixels_per_sheet_width = cells_per_edge(sheet.width_mm, pixel_size_mm);
    let pixels_per_sheet_height = cells_per_edge(sheet.height_mm, pixel_size_mm);
    if pixels_per_sheet_width == 0 || pixels_per_sheet_height == 0 {
        return Err(DotArtError::invalid(
            "pixel_size_mm",
            format!(
                "{pixel_size_mm}mm cells do not fit on a {}x{}mm sheet",
                sheet.width_mm, sheet.height_mm
            ),
        ));
    }

    let (width, height) = (grid.width(), grid.height());
    // ceil(full_mm / usable_mm) == ceil(cells / cells_per_sheet)
    let sheets_wide = width.div_ceil(pixels_per_sheet_width);
    let sheets_high = height.div_ceil(pixels_per_sheet_height);

    debug!(
        width,
        height,
        pixels_per_sheet_width,
        pixels_per_sheet_height,
        sheets_wide,
        sheets_high,
        "Computed sheet grid"
    );

    let mut sheets = Vec::with_capacity(sheets_wide as usize * sheets_high as usize);
    for row_index in 0..sheets_high {
        for col_index in 0..sheets_wide {
            let start_x = col_index * pixels_per_sheet_width;
            let start_y = row_index * pixels_per_sheet_height;
            // edge sheets stop at the grid boundary
            let end_x = (start_x + pixels_per_sheet_width).min(width);
            let end_y = (start_y + pixels_per_sheet_height).min(height);

            let mut dots = Vec::with_capacity(((end_x - start_x) * (end_y - start_y)) as usize);
            for y in start_y..end_y {
                for x in start_x..end_x {
                    let Some(dot) = grid.get(x, y) else {
                        continue;
                    };
                    dots.push(SheetDot {
                        x_index: x - start_x,
                        y_index: y - start_y,
                        full_dot_x_index: dot.x_index,
                        full_dot_y_index: dot.y_index,
                        fraction_size: dot.fraction_size,
                    });
                }
            }

            sheets.push(Sheet {
                dots,
                row_index,
                col_index,
                start_x,
                start_y,
                end_x: end_x - 1,
                end_y: end_y - 1,
            });
        }
    }

    let layout = SheetLayout {
        total_sheets: sheets.len(),
        sheets,
        sheets_wide,
        sheets_high,
        pixels_per_sheet_width,
        pixels_per_sheet_height,
        full_image_width_mm: f64::from(width) * pixel_size_mm,
        full_image_height_mm: f64::from(height) * pixel_size_mm,
        usable_width_mm: f64::from(pixels_per_sheet_width) * pixel_size_mm,
        usable_height_mm: f64::from(pixels_per_sheet_height) * pixel_size_mm,
    };

    info!(
        total_sheets = layout.total_sheets,
        sheets_wide, sheets_high, "Paginated dot grid"
    );
    Ok(layout)
}

/// Whole cells of `cell_mm` that fit along `edge_mm`.
fn cells_per_edge(edge_mm: f64, cell_mm: f64) -> u32 {
    // float noise at exact multiples must not drop a cell
    let cells = (edge_mm / cell_mm + 1e-9).floor();
    if cells.is_finite() && cells > 0.0 {
        cells.min(f64::from(u32::MAX)) as u32
    } else {
        0
    }
}

#[cfg(test)]
#[path = "paginate_tests.rs"]
mod tests;
