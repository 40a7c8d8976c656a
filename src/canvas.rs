//! Raster page with the handful of primitives the templates draw with.
//!
//! Coordinates follow PIL conventions: rectangles are inclusive on both corners and text is
//! positioned by the top-left of its ascender line. The page is white and grows downward
//! when something is drawn below its nominal height.

use std::io::Cursor;

use image::{imageops, ImageOutputFormat, Rgb, RgbImage};

use crate::error::Result;
use crate::fonts::Typeface;

/// Pixel colour used throughout the crate.
pub type Color = Rgb<u8>;

pub const WHITE: Color = Rgb([255, 255, 255]);
pub const BLACK: Color = Rgb([0, 0, 0]);

/// Space kept below the lowest drawn pixel when a page outgrows its nominal height.
pub const BOTTOM_MARGIN: u32 = 30;

/// Shorthand for `Rgb([r, g, b])`.
pub const fn rgb(r: u8, g: u8, b: u8) -> Color {
    Rgb([r, g, b])
}

/// Inclusive pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl Rect {
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Rectangle spanning the full page width between two rows.
    pub const fn band(width: u32, y0: i32, y1: i32) -> Self {
        Self::new(0, y0, width as i32, y1)
    }
}

/// A white RGB page plus the typeface used for its text.
pub struct Canvas {
    image: RgbImage,
    min_height: u32,
    extent: u32,
    typeface: Typeface,
}

impl Canvas {
    pub fn new(width: u32, min_height: u32, typeface: Typeface) -> Self {
        Self {
            image: RgbImage::from_pixel(width, min_height, WHITE),
            min_height,
            extent: 0,
            typeface,
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    /// Nominal page height requested at construction.
    pub fn min_height(&self) -> u32 {
        self.min_height
    }

    pub fn typeface(&self) -> &Typeface {
        &self.typeface
    }

    /// Fills and/or outlines `rect`. The outline is drawn inside the rectangle.
    pub fn rect(&mut self, rect: Rect, fill: Option<Color>, outline: Option<Color>, outline_width: u32) {
        if let Some(color) = fill {
            for y in rect.y0..=rect.y1 {
                for x in rect.x0..=rect.x1 {
                    self.plot(x, y, color, 1.0);
                }
            }
        }

        if let Some(color) = outline {
            for inset in 0..outline_width as i32 {
                let (x0, y0, x1, y1) = (
                    rect.x0 + inset,
                    rect.y0 + inset,
                    rect.x1 - inset,
                    rect.y1 - inset,
                );
                if x0 > x1 || y0 > y1 {
                    break;
                }
                for x in x0..=x1 {
                    self.plot(x, y0, color, 1.0);
                    self.plot(x, y1, color, 1.0);
                }
                for y in y0..=y1 {
                    self.plot(x0, y, color, 1.0);
                    self.plot(x1, y, color, 1.0);
                }
            }
        }
    }

    /// Solid fill without an outline.
    pub fn fill(&mut self, rect: Rect, color: Color) {
        self.rect(rect, Some(color), None, 0);
    }

    /// One-pixel line between two points.
    pub fn line(&mut self, from: (i32, i32), to: (i32, i32), color: Color) {
        let (mut x, mut y) = from;
        let dx = (to.0 - x).abs();
        let dy = -(to.1 - y).abs();
        let sx = if x < to.0 { 1 } else { -1 };
        let sy = if y < to.1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.plot(x, y, color, 1.0);
            if x == to.0 && y == to.1 {
                break;
            }
            let doubled = 2 * err;
            if doubled >= dy {
                err += dy;
                x += sx;
            }
            if doubled <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Draws `text` at `size` pixels per em with the ascender line's top-left at `(x, y)`.
    pub fn text(&mut self, x: i32, y: i32, text: &str, size: f32, color: Color) {
        let typeface = self.typeface.clone();
        typeface.rasterize(text, size, x as f32, y as f32, |px, py, coverage| {
            self.plot(px, py, color, coverage);
        });
    }

    /// Advance width of `text` at `size`.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        self.typeface.advance_width(text, size)
    }

    /// Lowest row that received any drawing, exclusive.
    pub fn extent(&self) -> u32 {
        self.extent
    }

    /// Returns the finished page.
    ///
    /// Pages keep their nominal height unless content was drawn below it, in which case the
    /// page ends [`BOTTOM_MARGIN`] pixels under the lowest drawn row.
    pub fn finish(mut self) -> RgbImage {
        let height = if self.extent > self.min_height {
            self.extent + BOTTOM_MARGIN
        } else {
            self.min_height
        };
        self.ensure_height(height);
        imageops::crop_imm(&self.image, 0, 0, self.image.width(), height).to_image()
    }

    fn plot(&mut self, x: i32, y: i32, color: Color, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.image.width() || coverage <= 0.0 {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        self.ensure_height(y + 1);

        let pixel = self.image.get_pixel_mut(x, y);
        if coverage >= 1.0 {
            *pixel = color;
        } else {
            for (dst, src) in pixel.0.iter_mut().zip(color.0) {
                let blended = f32::from(*dst) * (1.0 - coverage) + f32::from(src) * coverage;
                *dst = blended.round().clamp(0.0, 255.0) as u8;
            }
        }
        self.extent = self.extent.max(y + 1);
    }

    fn ensure_height(&mut self, needed: u32) {
        let current = self.image.height();
        if needed <= current {
            return;
        }
        let grown_height = needed.max(current + current / 2);
        let mut grown = RgbImage::from_pixel(self.image.width(), grown_height, WHITE);
        imageops::replace(&mut grown, &self.image, 0, 0);
        self.image = grown;
    }
}

/// Encodes `image` as PNG bytes.
pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageOutputFormat::Png)?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: u32, height: u32) -> Canvas {
        Canvas::new(width, height, Typeface::Blocks)
    }

    #[test]
    fn rect_is_inclusive() {
        let mut page = canvas(20, 20);
        page.fill(Rect::new(2, 3, 5, 6), BLACK);
        let image = page.finish();
        assert_eq!(*image.get_pixel(2, 3), BLACK);
        assert_eq!(*image.get_pixel(5, 6), BLACK);
        assert_eq!(*image.get_pixel(6, 6), WHITE);
        assert_eq!(*image.get_pixel(5, 7), WHITE);
    }

    #[test]
    fn outline_stays_inside() {
        let red = rgb(200, 0, 0);
        let mut page = canvas(20, 20);
        page.rect(Rect::new(2, 2, 10, 10), Some(WHITE), Some(red), 2);
        let image = page.finish();
        assert_eq!(*image.get_pixel(2, 2), red);
        assert_eq!(*image.get_pixel(3, 3), red);
        assert_eq!(*image.get_pixel(4, 4), WHITE);
        assert_eq!(*image.get_pixel(1, 1), WHITE);
    }

    #[test]
    fn line_covers_endpoints() {
        let mut page = canvas(30, 30);
        page.line((1, 1), (20, 8), BLACK);
        let image = page.finish();
        assert_eq!(*image.get_pixel(1, 1), BLACK);
        assert_eq!(*image.get_pixel(20, 8), BLACK);
    }

    #[test]
    fn keeps_nominal_height_when_content_fits() {
        let mut page = canvas(100, 80);
        page.text(5, 5, "hello", 12.0, BLACK);
        let image = page.finish();
        assert_eq!(image.dimensions(), (100, 80));
    }

    #[test]
    fn grows_past_nominal_height() {
        let mut page = canvas(100, 80);
        page.fill(Rect::new(0, 70, 99, 119), BLACK);
        let image = page.finish();
        assert_eq!(image.dimensions(), (100, 120 + BOTTOM_MARGIN));
        assert_eq!(*image.get_pixel(50, 119), BLACK);
        assert_eq!(*image.get_pixel(50, 120), WHITE);
    }

    #[test]
    fn clips_horizontally() {
        let mut page = canvas(10, 10);
        page.fill(Rect::new(-5, 0, 50, 2), BLACK);
        page.text(8, 4, "wide text", 10.0, BLACK);
        let image = page.finish();
        assert_eq!(image.width(), 10);
    }

    #[test]
    fn text_is_drawn_below_anchor() {
        let mut page = canvas(60, 40);
        page.text(10, 10, "Hi", 16.0, BLACK);
        let image = page.finish();
        let inked: Vec<_> = image
            .enumerate_pixels()
            .filter(|(_, _, pixel)| **pixel != WHITE)
            .collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|(x, y, _)| *x >= 10 && *y >= 10));
    }

    #[test]
    fn png_encoding_has_signature() {
        let image = canvas(8, 8).finish();
        let bytes = encode_png(&image).expect("encode png");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
