//! Typeface acquisition with a built-in fallback.
//!
//! Outline fonts are rasterised with `ab_glyph`. When a configured font file is
//! missing or unparsable the renderer falls back to the 10x20 bitmap font that
//! ships inside `embedded-graphics`, so a render pass never fails for lack of fonts.

use crate::config::FontConfig;
use ab_glyph::{point, Font, FontVec, Glyph, GlyphId, PxScale, ScaleFont};
use embedded_graphics::{
    mono_font::{ascii::FONT_10X20, MonoFont, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    text::{Baseline, Text},
};
use image::{Rgb, RgbImage};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Why a preferred font could not be used.
#[derive(Error, Debug)]
pub enum FontUnavailable {
    #[error("cannot read font {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid font data in {}", path.display())]
    Parse { path: PathBuf },
}

fn builtin_font() -> &'static MonoFont<'static> {
    &FONT_10X20
}

/// A face at a fixed pixel size.
pub enum Typeface {
    Outline { font: FontVec, scale: PxScale },
    Builtin,
}

impl std::fmt::Debug for Typeface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { scale, .. } => f.debug_struct("Outline").field("size", &scale.y).finish(),
            Self::Builtin => f.write_str("Builtin"),
        }
    }
}

impl Typeface {
    pub fn from_bytes(data: Vec<u8>, size: f32, path: &Path) -> Result<Self, FontUnavailable> {
        let font = FontVec::try_from_vec_and_index(data, 0).map_err(|_| FontUnavailable::Parse {
            path: path.to_path_buf(),
        })?;

        Ok(Self::Outline {
            font,
            scale: PxScale::from(size),
        })
    }

    pub fn try_load(path: &Path, size: f32) -> Result<Self, FontUnavailable> {
        let data = std::fs::read(path).map_err(|source| FontUnavailable::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_bytes(data, size, path)
    }

    /// Loads `path`, substituting the built-in face on any failure.
    pub fn load(path: &Path, size: f32) -> Self {
        match Self::try_load(path, size) {
            Ok(face) => {
                debug!(path = %path.display(), size, "loaded font");
                face
            }
            Err(e) => {
                warn!(error = %e, "falling back to built-in font");
                Self::Builtin
            }
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin)
    }

    fn layout(font: &FontVec, scale: PxScale, text: &str) -> Vec<Glyph> {
        let scaled = font.as_scaled(scale);
        let mut caret = point(0.0, scaled.ascent());
        let mut last: Option<GlyphId> = None;
        let mut glyphs = Vec::new();

        for c in text.chars() {
            let mut glyph = scaled.scaled_glyph(c);
            if let Some(prev) = last {
                caret.x += scaled.kern(prev, glyph.id);
            }
            glyph.position = caret;
            caret.x += scaled.h_advance(glyph.id);
            last = Some(glyph.id);
            glyphs.push(glyph);
        }

        glyphs
    }

    /// Ink extent of `text` as `(width, height)`.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            Self::Outline { font, scale } => {
                let mut bounds: Option<ab_glyph::Rect> = None;

                for glyph in Self::layout(font, *scale, text) {
                    if let Some(outline) = font.outline_glyph(glyph) {
                        let b = outline.px_bounds();
                        bounds = Some(match bounds {
                            Some(acc) => ab_glyph::Rect {
                                min: point(acc.min.x.min(b.min.x), acc.min.y.min(b.min.y)),
                                max: point(acc.max.x.max(b.max.x), acc.max.y.max(b.max.y)),
                            },
                            None => b,
                        });
                    }
                }

                bounds
                    .map(|b| (b.width().ceil() as u32, b.height().ceil() as u32))
                    .unwrap_or((0, 0))
            }
            Self::Builtin => {
                let font = builtin_font();
                let n = text.chars().count() as u32;
                if n == 0 {
                    return (0, 0);
                }
                let width = n * font.character_size.width + (n - 1) * font.character_spacing;
                (width, font.character_size.height)
            }
        }
    }

    /// Draws `text` with its top-left corner at `(x, y)`.
    pub fn draw(&self, image: &mut RgbImage, (x, y): (i32, i32), text: &str, color: Rgb<u8>) {
        match self {
            Self::Outline { font, scale } => {
                for glyph in Self::layout(font, *scale, text) {
                    let Some(outline) = font.outline_glyph(glyph) else {
                        continue;
                    };

                    let bounds = outline.px_bounds();
                    outline.draw(|gx, gy, coverage| {
                        let px = x + bounds.min.x as i32 + gx as i32;
                        let py = y + bounds.min.y as i32 + gy as i32;
                        blend(image, px, py, color, coverage);
                    });
                }
            }
            Self::Builtin => {
                let style = MonoTextStyle::new(builtin_font(), Rgb888::new(color[0], color[1], color[2]));
                let mut target = ImageTarget(image);
                let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top)
                    .draw(&mut target);
            }
        }
    }
}

fn blend(image: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= image.width() || y as u32 >= image.height() {
        return;
    }

    let a = coverage.clamp(0.0, 1.0);
    if a == 0.0 {
        return;
    }

    let dst = image.get_pixel_mut(x as u32, y as u32);
    for i in 0..3 {
        dst.0[i] = (color.0[i] as f32 * a + dst.0[i] as f32 * (1.0 - a)).round() as u8;
    }
}

/// Lets `embedded-graphics` draw straight into an `RgbImage`.
struct ImageTarget<'a>(&'a mut RgbImage);

impl OriginDimensions for ImageTarget<'_> {
    fn size(&self) -> Size {
        Size::new(self.0.width(), self.0.height())
    }
}

impl DrawTarget for ImageTarget<'_> {
    type Color = Rgb888;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < self.0.width() && (p.y as u32) < self.0.height()
            {
                self.0.put_pixel(p.x as u32, p.y as u32, Rgb([c.r(), c.g(), c.b()]));
            }
        }
        Ok(())
    }
}

/// The three faces a render pass needs, acquired once and shared by every theme.
#[derive(Debug)]
pub struct Fonts {
    pub title: Typeface,
    pub year: Typeface,
    pub day: Typeface,
}

impl Fonts {
    pub fn load(config: &FontConfig) -> Self {
        Self {
            title: Typeface::load(&config.bold_path, config.title_size),
            year: Typeface::load(&config.bold_path, config.year_size),
            day: Typeface::load(&config.regular_path, config.day_size),
        }
    }

    pub fn builtin() -> Self {
        Self {
            title: Typeface::Builtin,
            year: Typeface::Builtin,
            day: Typeface::Builtin,
        }
    }
}
