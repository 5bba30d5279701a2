//! Per-cell dot drawing.
//!
//! A [`DotRenderer`] paints one grid cell at a time: the cell background
//! first, then a centered foreground sized by the cell's fill fraction. The
//! foreground is either a flat shape or a circular crop of a stamp image.

use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut, draw_polygon_mut};
use imageproc::point::Point;
use imageproc::rect::Rect;
use rand::Rng;

use crate::DotArtError;
use crate::units::mm_to_pixels;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const GREY: Rgba<u8> = Rgba([128, 128, 128, 255]);

/// Foreground shape of a dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DotStyle {
    /// Filled circle centered in the cell.
    #[default]
    Round,
    /// Filled square anchored at the cell's top-left corner.
    Square,
    /// Right triangle, hypotenuse from top-left to bottom-right.
    Triangle,
    /// Right triangle, hypotenuse from the bottom-left apex to top-right.
    TriangleAlt,
    /// Circle outline with an empty interior.
    Ring,
}

impl DotStyle {
    pub const ALL: [Self; 5] = [
        Self::Round,
        Self::Square,
        Self::Triangle,
        Self::TriangleAlt,
        Self::Ring,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Round => "round",
            Self::Square => "square",
            Self::Triangle => "triangle",
            Self::TriangleAlt => "triangle-alt",
            Self::Ring => "ring",
        }
    }
}

impl fmt::Display for DotStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DotStyle {
    type Err = DotArtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str() == s)
            .ok_or_else(|| DotArtError::invalid("dot_style", format!("unknown style '{s}'")))
    }
}

/// Background / foreground color pairing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorScheme {
    #[default]
    BlackOnWhite,
    GreyOnWhite,
    /// Inverted polarity: dot size follows lightness instead of darkness.
    WhiteOnBlack,
    /// Every dot gets its own saturated hue.
    RandomOnWhite,
}

impl ColorScheme {
    pub const ALL: [Self; 4] = [
        Self::BlackOnWhite,
        Self::GreyOnWhite,
        Self::WhiteOnBlack,
        Self::RandomOnWhite,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BlackOnWhite => "black-on-white",
            Self::GreyOnWhite => "grey-on-white",
            Self::WhiteOnBlack => "white-on-black",
            Self::RandomOnWhite => "random-on-white",
        }
    }

    pub fn background(self) -> Rgba<u8> {
        match self {
            Self::WhiteOnBlack => BLACK,
            _ => WHITE,
        }
    }

    pub fn is_inverted(self) -> bool {
        self == Self::WhiteOnBlack
    }

    fn foreground<R: Rng + ?Sized>(self, rng: &mut R) -> Rgba<u8> {
        match self {
            Self::BlackOnWhite => BLACK,
            Self::GreyOnWhite => GREY,
            Self::WhiteOnBlack => WHITE,
            Self::RandomOnWhite => hue_to_rgba(rng.gen_range(0.0..360.0)),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = DotArtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| DotArtError::invalid("color_scheme", format!("unknown scheme '{s}'")))
    }
}

/// Parameters shared by every cell of one render pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Physical edge length of one cell.
    pub pixel_size_mm: f64,
    /// Scales the dot relative to its quantized fraction.
    pub dot_size_multiplier: f32,
    /// Number of brightness bands used when quantizing.
    pub total_bands: u32,
    pub style: DotStyle,
    pub color_scheme: ColorScheme,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pixel_size_mm: 10.0,
            dot_size_multiplier: 1.3,
            total_bands: 16,
            style: DotStyle::Round,
            color_scheme: ColorScheme::BlackOnWhite,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> crate::Result<()> {
        if !self.pixel_size_mm.is_finite() || self.pixel_size_mm <= 0.0 {
            return Err(DotArtError::invalid("pixel_size_mm", "must be a positive number"));
        }
        if !self.dot_size_multiplier.is_finite() || self.dot_size_multiplier <= 0.0 {
            return Err(DotArtError::invalid("dot_size_multiplier", "must be a positive number"));
        }
        if self.total_bands == 0 {
            return Err(DotArtError::invalid("total_bands", "must be at least 1"));
        }
        Ok(())
    }

    /// Cell edge length in screen pixels.
    pub fn cell_size_px(&self) -> f64 {
        mm_to_pixels(self.pixel_size_mm)
    }
}

/// Secondary image drawn inside each dot instead of a flat color.
#[derive(Debug, Clone)]
pub struct Stamp {
    pub image: RgbaImage,
    /// Spin each stamp by a random angle about the dot center.
    pub random_rotation: bool,
}

/// What the foreground of a dot is made of.
#[derive(Debug, Clone, Copy)]
pub enum DotFill<'a> {
    Shape(DotStyle),
    Stamp(&'a Stamp),
}

/// Draws single dot cells onto a target image.
///
/// Randomness (random hues, stamp rotation) comes from the injected `rng`,
/// so a seeded generator gives reproducible output.
pub struct DotRenderer<'a, R> {
    config: RenderConfig,
    fill: DotFill<'a>,
    rng: R,
}

impl<'a, R: Rng> DotRenderer<'a, R> {
    /// Shape renderer using `config.style`.
    pub fn new(config: RenderConfig, rng: R) -> Self {
        Self {
            fill: DotFill::Shape(config.style),
            config,
            rng,
        }
    }

    /// Draw `stamp` inside each dot instead of the configured shape.
    pub fn with_stamp(mut self, stamp: &'a Stamp) -> Self {
        self.fill = DotFill::Stamp(stamp);
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn fill(&self) -> DotFill<'a> {
        self.fill
    }

    /// Paint one cell whose top-left corner is at (`origin_x`, `origin_y`).
    ///
    /// The whole cell gets the background color, then a foreground whose
    /// edge is `cell_size * fraction * dot_size_multiplier`.
    pub fn render_cell(
        &mut self,
        target: &mut RgbaImage,
        origin_x: f64,
        origin_y: f64,
        cell_size: f64,
        fraction: f32,
    ) {
        let scheme = self.config.color_scheme;
        let background = scheme.background();
        fill_cell(target, origin_x, origin_y, cell_size, background);

        let fraction = if scheme.is_inverted() {
            1.0 - fraction
        } else {
            fraction
        };
        let multiplier = f64::from(self.config.dot_size_multiplier);
        let dot_size = cell_size * f64::from(fraction.clamp(0.0, 1.0)) * multiplier;
        if dot_size < 0.5 {
            return;
        }

        let cell = Cell {
            x: origin_x,
            y: origin_y,
            size: cell_size,
        };
        match self.fill {
            DotFill::Shape(style) => {
                let color = scheme.foreground(&mut self.rng);
                draw_shape(target, style, &cell, dot_size, color, background);
            }
            DotFill::Stamp(stamp) => {
                let angle = if stamp.random_rotation {
                    self.rng.gen_range(0.0..TAU)
                } else {
                    0.0
                };
                draw_stamp(target, &stamp.image, &cell, dot_size, angle);
            }
        }
    }
}

/// Cell geometry in target pixels.
struct Cell {
    x: f64,
    y: f64,
    size: f64,
}

impl Cell {
    fn center(&self) -> (f64, f64) {
        (self.x + self.size / 2.0, self.y + self.size / 2.0)
    }
}

fn fill_cell(target: &mut RgbaImage, x: f64, y: f64, size: f64, color: Rgba<u8>) {
    let (x0, y0) = (x.floor() as i32, y.floor() as i32);
    let (x1, y1) = ((x + size).ceil() as i32, (y + size).ceil() as i32);
    if x1 > x0 && y1 > y0 {
        let rect = Rect::at(x0, y0).of_size((x1 - x0) as u32, (y1 - y0) as u32);
        draw_filled_rect_mut(target, rect, color);
    }
}

fn draw_shape(
    target: &mut RgbaImage,
    style: DotStyle,
    cell: &Cell,
    dot_size: f64,
    color: Rgba<u8>,
    background: Rgba<u8>,
) {
    let (cx, cy) = cell.center();
    let center = (cx.round() as i32, cy.round() as i32);
    let radius = (dot_size / 2.0).round() as i32;

    match style {
        DotStyle::Round => draw_filled_circle_mut(target, center, radius, color),
        DotStyle::Square => {
            let side = (dot_size.round() as u32).max(1);
            let rect = Rect::at(cell.x.floor() as i32, cell.y.floor() as i32).of_size(side, side);
            draw_filled_rect_mut(target, rect, color);
        }
        DotStyle::Ring => {
            let stroke = ((dot_size / 8.0).round() as i32).max(1);
            draw_filled_circle_mut(target, center, radius, color);
            if radius > stroke {
                draw_filled_circle_mut(target, center, radius - stroke, background);
            }
        }
        DotStyle::Triangle | DotStyle::TriangleAlt => {
            let half = dot_size / 2.0;
            let (left, top) = ((cx - half).round() as i32, (cy - half).round() as i32);
            let (right, bottom) = ((cx + half).round() as i32, (cy + half).round() as i32);
            let points = if style == DotStyle::Triangle {
                [
                    Point::new(left, top),
                    Point::new(right, bottom),
                    Point::new(left, bottom),
                ]
            } else {
                [
                    Point::new(left, bottom),
                    Point::new(right, top),
                    Point::new(right, bottom),
                ]
            };
            if points[0] == points[2] {
                // collapsed to a point after rounding
                draw_filled_rect_mut(target, Rect::at(left, top).of_size(1, 1), color);
            } else {
                draw_polygon_mut(target, &points, color);
            }
        }
    }
}

/// Composite `stamp`, scaled to `dot_size` and rotated by `angle`, inside a
/// circle of diameter `dot_size`.
///
/// The dot box is anchored at the cell's top-left corner while it fits the
/// cell; larger dots are recentered so the overflow is even on all sides.
fn draw_stamp(target: &mut RgbaImage, stamp: &RgbaImage, cell: &Cell, dot_size: f64, angle: f64) {
    let (stamp_w, stamp_h) = stamp.dimensions();
    if stamp_w == 0 || stamp_h == 0 {
        return;
    }

    let overflow = (dot_size - cell.size).max(0.0) / 2.0;
    let (box_x, box_y) = (cell.x - overflow, cell.y - overflow);
    let radius = dot_size / 2.0;
    let (cx, cy) = (box_x + radius, box_y + radius);
    let (sin, cos) = angle.sin_cos();

    let x_range = pixel_span(box_x, dot_size, target.width());
    let y_range = pixel_span(box_y, dot_size, target.height());
    for py in y_range {
        for px in x_range.clone() {
            let dx = f64::from(px) + 0.5 - cx;
            let dy = f64::from(py) + 0.5 - cy;
            if dx * dx + dy * dy > radius * radius {
                continue;
            }

            // rotate back into stamp space
            let u = dx * cos + dy * sin + radius;
            let v = -dx * sin + dy * cos + radius;
            let sx = ((u / dot_size * f64::from(stamp_w)).floor().max(0.0) as u32).min(stamp_w - 1);
            let sy = ((v / dot_size * f64::from(stamp_h)).floor().max(0.0) as u32).min(stamp_h - 1);

            let top = stamp.get_pixel(sx, sy);
            let alpha = f32::from(top[3]) / 255.0;
            if alpha > 0.99 {
                target.put_pixel(px, py, *top);
            } else if alpha > 0.01 {
                let blended = blend_pixel(target.get_pixel(px, py), top, alpha);
                target.put_pixel(px, py, blended);
            }
        }
    }
}

/// Target pixel indices covered by `[start, start + len)`, clipped to `limit`.
fn pixel_span(start: f64, len: f64, limit: u32) -> std::ops::Range<u32> {
    let lo = start.floor().max(0.0).min(f64::from(limit)) as u32;
    let hi = (start + len).ceil().max(0.0).min(f64::from(limit)) as u32;
    lo..hi.max(lo)
}

fn blend_pixel(bg: &Rgba<u8>, fg: &Rgba<u8>, alpha: f32) -> Rgba<u8> {
    let inv = 1.0 - alpha;
    Rgba([
        (f32::from(fg[0]) * alpha + f32::from(bg[0]) * inv) as u8,
        (f32::from(fg[1]) * alpha + f32::from(bg[1]) * inv) as u8,
        (f32::from(fg[2]) * alpha + f32::from(bg[2]) * inv) as u8,
        255,
    ])
}

/// Fully saturated, half-lightness color for a hue in degrees.
fn hue_to_rgba(hue: f64) -> Rgba<u8> {
    let h = hue.rem_euclid(360.0) / 60.0;
    let x = 1.0 - (h % 2.0 - 1.0).abs();
    let (r, g, b) = match h as u32 {
        0 => (1.0, x, 0.0),
        1 => (x, 1.0, 0.0),
        2 => (0.0, 1.0, x),
        3 => (0.0, x, 1.0),
        4 => (x, 0.0, 1.0),
        _ => (1.0, 0.0, x),
    };
    let channel = |c: f64| (c * 255.0).round() as u8;
    Rgba([channel(r), channel(g), channel(b), 255])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn config(style: DotStyle, color_scheme: ColorScheme, multiplier: f32) -> RenderConfig {
        RenderConfig {
            dot_size_multiplier: multiplier,
            style,
            color_scheme,
            ..RenderConfig::default()
        }
    }

    fn render_one(config: RenderConfig, size: u32, fraction: f32) -> RgbaImage {
        let mut target = RgbaImage::from_pixel(size, size, Rgba([0, 255, 0, 255]));
        let mut renderer = DotRenderer::new(config, StdRng::seed_from_u64(7));
        renderer.render_cell(&mut target, 0.0, 0.0, f64::from(size), fraction);
        target
    }

    #[test]
    fn test_style_and_scheme_names_round_trip() {
        for style in DotStyle::ALL {
            assert_eq!(style.as_str().parse::<DotStyle>().unwrap(), style);
        }
        for scheme in ColorScheme::ALL {
            assert_eq!(scheme.to_string().parse::<ColorScheme>().unwrap(), scheme);
        }
        assert!("hexagon".parse::<DotStyle>().is_err());
        assert!("sepia".parse::<ColorScheme>().is_err());
    }

    #[test]
    fn test_config_validation() {
        assert!(RenderConfig::default().validate().is_ok());
        let bad = [
            RenderConfig {
                total_bands: 0,
                ..RenderConfig::default()
            },
            RenderConfig {
                pixel_size_mm: 0.0,
                ..RenderConfig::default()
            },
            RenderConfig {
                dot_size_multiplier: -1.0,
                ..RenderConfig::default()
            },
            RenderConfig {
                pixel_size_mm: f64::NAN,
                ..RenderConfig::default()
            },
        ];
        for config in bad {
            assert!(config.validate().is_err(), "{config:?}");
        }
    }

    #[test]
    fn test_zero_fraction_is_background_only() {
        let img = render_one(config(DotStyle::Round, ColorScheme::BlackOnWhite, 1.0), 10, 0.0);
        assert!(img.pixels().all(|p| *p == WHITE));
    }

    #[test]
    fn test_full_round_dot_spans_cell() {
        let img = render_one(config(DotStyle::Round, ColorScheme::BlackOnWhite, 1.0), 20, 1.0);
        assert_eq!(*img.get_pixel(10, 10), BLACK);
        assert_eq!(*img.get_pixel(10, 1), BLACK);
        assert_eq!(*img.get_pixel(1, 10), BLACK);
        assert_eq!(*img.get_pixel(0, 0), WHITE);
        assert_eq!(*img.get_pixel(19, 19), WHITE);
    }

    #[test]
    fn test_grey_scheme_uses_grey_dot() {
        let img = render_one(config(DotStyle::Round, ColorScheme::GreyOnWhite, 1.0), 20, 1.0);
        assert_eq!(*img.get_pixel(10, 10), GREY);
        assert_eq!(*img.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn test_white_on_black_inverts_polarity() {
        let scheme = config(DotStyle::Round, ColorScheme::WhiteOnBlack, 1.0);

        let light = render_one(scheme, 20, 0.0);
        assert_eq!(*light.get_pixel(10, 10), WHITE);
        assert_eq!(*light.get_pixel(0, 0), BLACK);

        let dark = render_one(scheme, 20, 1.0);
        assert!(dark.pixels().all(|p| *p == BLACK));
    }

    #[test]
    fn test_square_is_anchored_top_left() {
        let img = render_one(config(DotStyle::Square, ColorScheme::BlackOnWhite, 1.0), 10, 0.5);
        assert_eq!(*img.get_pixel(0, 0), BLACK);
        assert_eq!(*img.get_pixel(4, 4), BLACK);
        assert_eq!(*img.get_pixel(5, 5), WHITE);
        assert_eq!(*img.get_pixel(9, 9), WHITE);
    }

    #[test]
    fn test_ring_leaves_interior_empty() {
        let img = render_one(config(DotStyle::Ring, ColorScheme::BlackOnWhite, 1.0), 40, 1.0);
        assert_eq!(*img.get_pixel(20, 20), WHITE);
        assert_eq!(*img.get_pixel(20, 2), BLACK);
        assert_eq!(*img.get_pixel(2, 20), BLACK);
        assert_eq!(*img.get_pixel(0, 0), WHITE);
    }

    #[test]
    fn test_triangles_fill_opposite_halves() {
        let tri = render_one(config(DotStyle::Triangle, ColorScheme::BlackOnWhite, 1.0), 20, 1.0);
        assert_eq!(*tri.get_pixel(3, 16), BLACK);
        assert_eq!(*tri.get_pixel(16, 3), WHITE);

        let alt_config = config(DotStyle::TriangleAlt, ColorScheme::BlackOnWhite, 1.0);
        let alt = render_one(alt_config, 20, 1.0);
        assert_eq!(*alt.get_pixel(16, 16), BLACK);
        assert_eq!(*alt.get_pixel(3, 3), WHITE);
    }

    #[test]
    fn test_tiny_triangle_does_not_panic() {
        for fraction in [0.03, 0.05, 0.1] {
            render_one(config(DotStyle::Triangle, ColorScheme::BlackOnWhite, 1.0), 10, fraction);
            render_one(config(DotStyle::TriangleAlt, ColorScheme::BlackOnWhite, 1.0), 10, fraction);
        }
    }

    #[test]
    fn test_background_covers_fractional_cell() {
        let mut target = RgbaImage::from_pixel(20, 20, Rgba([0, 255, 0, 255]));
        let mut renderer = DotRenderer::new(RenderConfig::default(), StdRng::seed_from_u64(1));
        renderer.render_cell(&mut target, 5.0, 5.0, 7.5, 0.0);

        assert_eq!(*target.get_pixel(5, 5), WHITE);
        assert_eq!(*target.get_pixel(12, 12), WHITE);
        assert_eq!(*target.get_pixel(4, 5), Rgba([0, 255, 0, 255]));
        assert_eq!(*target.get_pixel(13, 5), Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn test_random_scheme_is_reproducible_with_seed() {
        let cfg = config(DotStyle::Round, ColorScheme::RandomOnWhite, 1.0);
        let draw = |seed: u64| {
            let mut target = RgbaImage::new(40, 10);
            let mut renderer = DotRenderer::new(cfg, StdRng::seed_from_u64(seed));
            for i in 0..4 {
                renderer.render_cell(&mut target, f64::from(i) * 10.0, 0.0, 10.0, 1.0);
            }
            target
        };

        assert_eq!(draw(42), draw(42));
        assert_ne!(draw(42), draw(43));
    }

    #[test]
    fn test_random_hues_are_saturated() {
        let mut rng = StdRng::seed_from_u64(99);
        for _ in 0..200 {
            let Rgba([r, g, b, a]) = ColorScheme::RandomOnWhite.foreground(&mut rng);
            assert_eq!(a, 255);
            assert_eq!(r.max(g).max(b), 255);
            assert_eq!(r.min(g).min(b), 0);
        }
    }

    #[test]
    fn test_hue_primaries() {
        assert_eq!(hue_to_rgba(0.0), Rgba([255, 0, 0, 255]));
        assert_eq!(hue_to_rgba(120.0), Rgba([0, 255, 0, 255]));
        assert_eq!(hue_to_rgba(240.0), Rgba([0, 0, 255, 255]));
        assert_eq!(hue_to_rgba(360.0), Rgba([255, 0, 0, 255]));
    }

    fn red_stamp(random_rotation: bool) -> Stamp {
        Stamp {
            image: RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255])),
            random_rotation,
        }
    }

    #[test]
    fn test_stamp_is_clipped_to_circle() {
        let stamp = red_stamp(false);
        let cfg = config(DotStyle::Round, ColorScheme::BlackOnWhite, 1.0);
        let mut target = RgbaImage::new(20, 20);
        let mut renderer = DotRenderer::new(cfg, StdRng::seed_from_u64(3)).with_stamp(&stamp);
        assert!(matches!(renderer.fill(), DotFill::Stamp(_)));

        renderer.render_cell(&mut target, 0.0, 0.0, 20.0, 1.0);
        assert_eq!(*target.get_pixel(10, 10), Rgba([255, 0, 0, 255]));
        assert_eq!(*target.get_pixel(0, 0), WHITE);
        assert_eq!(*target.get_pixel(19, 0), WHITE);
    }

    #[test]
    fn test_small_stamp_is_anchored_top_left() {
        let stamp = red_stamp(false);
        let cfg = config(DotStyle::Round, ColorScheme::BlackOnWhite, 1.0);
        let mut target = RgbaImage::new(20, 20);
        let mut renderer = DotRenderer::new(cfg, StdRng::seed_from_u64(3)).with_stamp(&stamp);

        renderer.render_cell(&mut target, 0.0, 0.0, 20.0, 0.5);
        // 10px dot centered at (5, 5)
        assert_eq!(*target.get_pixel(5, 5), Rgba([255, 0, 0, 255]));
        assert_eq!(*target.get_pixel(15, 15), WHITE);
    }

    #[test]
    fn test_oversized_stamp_is_recentered() {
        let stamp = red_stamp(false);
        let cfg = config(DotStyle::Round, ColorScheme::BlackOnWhite, 2.0);
        let mut target = RgbaImage::from_pixel(40, 40, WHITE);
        let mut renderer = DotRenderer::new(cfg, StdRng::seed_from_u64(3)).with_stamp(&stamp);

        // 20px dot on a 10px cell at (15, 15): box 10..30, centered on the cell
        renderer.render_cell(&mut target, 15.0, 15.0, 10.0, 1.0);
        let red = Rgba([255, 0, 0, 255]);
        assert_eq!(*target.get_pixel(20, 20), red);
        assert_eq!(*target.get_pixel(11, 20), red);
        assert_eq!(*target.get_pixel(28, 20), red);
        assert_eq!(*target.get_pixel(31, 20), WHITE);
    }

    #[test]
    fn test_rotated_stamp_still_fills_dot() {
        let stamp = red_stamp(true);
        let cfg = config(DotStyle::Round, ColorScheme::BlackOnWhite, 1.0);
        let mut target = RgbaImage::new(30, 30);
        let mut renderer = DotRenderer::new(cfg, StdRng::seed_from_u64(11)).with_stamp(&stamp);

        renderer.render_cell(&mut target, 0.0, 0.0, 30.0, 1.0);
        assert_eq!(*target.get_pixel(15, 15), Rgba([255, 0, 0, 255]));
        assert_eq!(*target.get_pixel(15, 2), Rgba([255, 0, 0, 255]));
    }

    #[test]
    fn test_transparent_stamp_pixels_show_background() {
        let stamp = Stamp {
            image: RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0])),
            random_rotation: false,
        };
        let cfg = config(DotStyle::Round, ColorScheme::BlackOnWhite, 1.0);
        let mut target = RgbaImage::new(10, 10);
        let mut renderer = DotRenderer::new(cfg, StdRng::seed_from_u64(3)).with_stamp(&stamp);

        renderer.render_cell(&mut target, 0.0, 0.0, 10.0, 1.0);
        assert!(target.pixels().all(|p| *p == WHITE));
    }
}
