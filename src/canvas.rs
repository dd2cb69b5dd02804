use crate::{
    error::{Error, Result},
    font::Typeface,
};
use image::{Rgb, RgbImage};
use std::path::Path;

/// Inclusive pixel bounds, as `[left, top, right, bottom]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Drawing primitives the month and page renderers are written against.
pub trait Surface {
    /// Outlines `rect`, growing the stroke inward by `width` pixels.
    fn draw_rect(&mut self, rect: Rect, color: Rgb<u8>, width: u32);
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Rgb<u8>, width: u32);
    fn draw_text(&mut self, pos: (i32, i32), text: &str, color: Rgb<u8>, font: &Typeface);
    fn measure_text(&self, text: &str, font: &Typeface) -> (u32, u32);
}

/// An in-memory RGB image that can be written to disk.
#[derive(Debug, Clone)]
pub struct Canvas(RgbImage);

impl Canvas {
    pub fn new(width: u32, height: u32, background: Rgb<u8>) -> Self {
        Self(RgbImage::from_pixel(width, height, background))
    }

    pub fn width(&self) -> u32 {
        self.0.width()
    }

    pub fn height(&self) -> u32 {
        self.0.height()
    }

    pub fn image(&self) -> &RgbImage {
        &self.0
    }

    /// Encodes the canvas in the format implied by `path`'s extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.0.save(path).map_err(|source| Error::Image {
            path: path.to_path_buf(),
            source,
        })
    }

    fn fill(&mut self, left: i32, top: i32, right: i32, bottom: i32, color: Rgb<u8>) {
        let (w, h) = (self.0.width() as i32, self.0.height() as i32);
        let (x0, x1) = (left.max(0), right.min(w - 1));
        let (y0, y1) = (top.max(0), bottom.min(h - 1));

        for y in y0..=y1 {
            for x in x0..=x1 {
                self.0.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

impl Surface for Canvas {
    fn draw_rect(&mut self, rect: Rect, color: Rgb<u8>, width: u32) {
        let w = width.max(1) as i32;
        let Rect {
            left,
            top,
            right,
            bottom,
        } = rect;

        self.fill(left, top, right, top + w - 1, color);
        self.fill(left, bottom - w + 1, right, bottom, color);
        self.fill(left, top, left + w - 1, bottom, color);
        self.fill(right - w + 1, top, right, bottom, color);
    }

    fn draw_line(&mut self, (x0, y0): (i32, i32), (x1, y1): (i32, i32), color: Rgb<u8>, width: u32) {
        let w = width.max(1) as i32;
        let half = (w - 1) / 2;
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).max(1);

        for i in 0..=steps {
            let x = x0 + (x1 - x0) * i / steps;
            let y = y0 + (y1 - y0) * i / steps;
            self.fill(x - half, y - half, x - half + w - 1, y - half + w - 1, color);
        }
    }

    fn draw_text(&mut self, pos: (i32, i32), text: &str, color: Rgb<u8>, font: &Typeface) {
        font.draw(&mut self.0, pos, text, color);
    }

    fn measure_text(&self, text: &str, font: &Typeface) -> (u32, u32) {
        font.measure(text)
    }
}
