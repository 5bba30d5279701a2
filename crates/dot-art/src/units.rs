//! Millimeter / pixel conversion at 96 DPI.

/// Screen pixels per millimeter (96 / 25.4).
pub const PIXELS_PER_MM: f64 = 3.779_527_559_1;

/// Convert millimeters to (fractional) pixels.
pub fn mm_to_pixels(mm: f64) -> f64 {
    mm * PIXELS_PER_MM
}

/// Convert (fractional) pixels to millimeters.
pub fn pixels_to_mm(px: f64) -> f64 {
    px / PIXELS_PER_MM
}
