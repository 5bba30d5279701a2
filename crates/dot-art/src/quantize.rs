//! Banded brightness quantization.
//!
//! Maps every pixel of an (already downsampled) image to a dot whose fill
//! fraction is darkness snapped to `1 / total_bands` steps.

use image::RgbaImage;
use tracing::debug;

use crate::DotArtError;

/// BT.709 luma weights for R, G, B.
const LUMA_WEIGHTS: [f32; 3] = [0.2126, 0.7152, 0.0722];

/// One grid cell and its quantized fill fraction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    pub x_index: u32,
    pub y_index: u32,
    /// Darkness in `[0, 1]`, a multiple of the band size.
    pub fraction_size: f32,
}

/// Row-major grid of dots covering a whole image.
#[derive(Debug, Clone, PartialEq)]
pub struct DotGrid {
    dots: Vec<Dot>,
    width: u32,
    height: u32,
}

impl DotGrid {
    /// Build a grid from row-major fractions, assigning indices.
    ///
    /// Fails when `fractions.len() != width * height` or any fraction lies
    /// outside `[0, 1]`.
    pub fn from_fractions(width: u32, height: u32, fractions: &[f32]) -> crate::Result<Self> {
        let expected = width as usize * height as usize;
        if fractions.len() != expected {
            return Err(DotArtError::invalid(
                "fractions",
                format!("expected {expected} values for {width}x{height}, got {}", fractions.len()),
            ));
        }
        if let Some(bad) = fractions.iter().find(|f| !(0.0..=1.0).contains(*f)) {
            return Err(DotArtError::invalid(
                "fractions",
                format!("{bad} is outside [0, 1]"),
            ));
        }

        let dots = fractions
            .iter()
            .enumerate()
            .map(|(i, &fraction_size)| Dot {
                x_index: (i % width as usize) as u32,
                y_index: (i / width as usize) as u32,
                fraction_size,
            })
            .collect();
        Ok(Self {
            dots,
            width,
            height,
        })
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Dot at grid position `(x, y)`, if inside the grid.
    pub fn get(&self, x: u32, y: u32) -> Option<&Dot> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.dots.get(y as usize * self.width as usize + x as usize)
    }
}

/// Quantize every pixel of `img` into a dot.
///
/// `total_bands` must be at least 1; it yields `total_bands + 1` distinct
/// fractions from 0 to 1.
pub fn quantize(img: &RgbaImage, total_bands: u32) -> crate::Result<DotGrid> {
    if total_bands == 0 {
        return Err(DotArtError::invalid("total_bands", "must be at least 1"));
    }

    let (width, height) = img.dimensions();
    debug!(width, height, total_bands, "Quantizing image into dots");

    let band_size = 1.0 / total_bands as f32;
    let dots = img
        .enumerate_pixels()
        .map(|(x, y, pixel)| {
            let raw = 1.0 - luminance(pixel.0) / 255.0;
            Dot {
                x_index: x,
                y_index: y,
                fraction_size: snap_to_band(raw, band_size),
            }
        })
        .collect();

    Ok(DotGrid {
        dots,
        width,
        height,
    })
}

/// Weighted luminance of an RGBA pixel; alpha is ignored.
fn luminance([r, g, b, _]: [u8; 4]) -> f32 {
    f32::from(r) * LUMA_WEIGHTS[0] + f32::from(g) * LUMA_WEIGHTS[1] + f32::from(b) * LUMA_WEIGHTS[2]
}

fn snap_to_band(value: f32, band_size: f32) -> f32 {
    let value = value.clamp(0.0, 1.0);
    ((value / band_size).round() * band_size).clamp(0.0, 1.0)
}
