//! Fixed 5x7 bitmap font used for the timestamp overlay.
//!
//! Each glyph is seven rows of five bits, most significant bit on the left.
//! Glyphs are scaled by an integer factor and drawn as filled squares, so the
//! output is crisp at any size and needs no font file on disk.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use crate::error::{CompositeError, CompositeResult};

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;
/// Horizontal cell size including one column of spacing
const ADVANCE: u32 = GLYPH_WIDTH + 1;

type Glyph = [u8; GLYPH_HEIGHT as usize];

fn glyph(c: char) -> Option<Glyph> {
    let rows = match c {
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '/' => [0x01, 0x01, 0x02, 0x04, 0x08, 0x10, 0x10],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ' ' => [0x00; GLYPH_HEIGHT as usize],
        _ => return None,
    };
    Some(rows)
}

/// Bitmap font with a fixed integer scale.
#[derive(Debug, Clone, Copy)]
pub struct BitmapFont {
    scale: u32,
    foreground: Rgb<u8>,
    background: Option<Rgb<u8>>,
}

impl Default for BitmapFont {
    /// 8x scale gives a 56 px cap height, close to a 64 px line.
    fn default() -> Self {
        Self::new(8)
    }
}

impl BitmapFont {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
            foreground: Rgb([255, 255, 255]),
            background: Some(Rgb([0, 0, 0])),
        }
    }

    pub fn with_colors(mut self, foreground: Rgb<u8>, background: Option<Rgb<u8>>) -> Self {
        self.foreground = foreground;
        self.background = background;
        self
    }

    pub fn scale(&self) -> u32 {
        self.scale
    }

    /// Rendered size of `text` in pixels, without the backing plate.
    pub fn text_size(&self, text: &str) -> (u32, u32) {
        let chars = text.chars().count() as u32;
        if chars == 0 {
            return (0, 0);
        }
        let width = (chars * ADVANCE - 1) * self.scale;
        (width, GLYPH_HEIGHT * self.scale)
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    ///
    /// All characters are checked before anything is drawn, so an unsupported
    /// character leaves the image untouched. Pixels outside the image are
    /// clipped.
    pub fn draw(&self, image: &mut RgbImage, x: i32, y: i32, text: &str) -> CompositeResult<()> {
        let glyphs = text
            .chars()
            .map(|c| glyph(c).ok_or(CompositeError::UnsupportedGlyph(c)))
            .collect::<CompositeResult<Vec<_>>>()?;

        if glyphs.is_empty() {
            return Ok(());
        }

        if let Some(background) = self.background {
            let (width, height) = self.text_size(text);
            let pad = self.scale as i32;
            let plate = Rect::at(x - pad, y - pad)
                .of_size(width + 2 * self.scale, height + 2 * self.scale);
            draw_filled_rect_mut(image, plate, background);
        }

        let step = self.scale as i32;
        for (index, rows) in glyphs.iter().enumerate() {
            let origin_x = x + (index as i32) * (ADVANCE as i32) * step;
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (1 << (GLYPH_WIDTH - 1 - col)) == 0 {
                        continue;
                    }
                    let cell = Rect::at(origin_x + col as i32 * step, y + row as i32 * step)
                        .of_size(self.scale, self.scale);
                    draw_filled_rect_mut(image, cell, self.foreground);
                }
            }
        }

        Ok(())
    }
}
