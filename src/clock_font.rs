use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::display::error::DashboardError;
use crate::glyphs::{bounding_box, Glyph};

pub const GRID_COLS: u32 = 5;
pub const GRID_ROWS: u32 = 7;

// 5x7 block digits; every one touches all four grid edges
const DIGITS: [Glyph; 10] = [
    Glyph::new(5, &[0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111]),
    Glyph::new(5, &[0b00100, 0b11100, 0b00100, 0b00100, 0b00100, 0b00100, 0b11111]),
    Glyph::new(5, &[0b11111, 0b00001, 0b00001, 0b11111, 0b10000, 0b10000, 0b11111]),
    Glyph::new(5, &[0b11111, 0b00001, 0b00001, 0b11111, 0b00001, 0b00001, 0b11111]),
    Glyph::new(5, &[0b10001, 0b10001, 0b10001, 0b11111, 0b00001, 0b00001, 0b00001]),
    Glyph::new(5, &[0b11111, 0b10000, 0b10000, 0b11111, 0b00001, 0b00001, 0b11111]),
    Glyph::new(5, &[0b11111, 0b10000, 0b10000, 0b11111, 0b10001, 0b10001, 0b11111]),
    Glyph::new(5, &[0b11111, 0b00001, 0b00001, 0b00001, 0b00001, 0b00001, 0b00001]),
    Glyph::new(5, &[0b11111, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b11111]),
    Glyph::new(5, &[0b11111, 0b10001, 0b10001, 0b11111, 0b00001, 0b00001, 0b11111]),
];

// two dots on rows 2 and 4
const COLON: Glyph = Glyph::new(1, &[0, 0, 1, 0, 1, 0, 0]);

/// Filled rectangles for one block digit scaled into `size` at `top_left`.
pub fn render_digit(digit: u32, top_left: Point, size: Size) -> Result<Vec<Rectangle>, DashboardError> {
    let glyph = DIGITS
        .get(digit as usize)
        .ok_or_else(|| DashboardError::UnknownGlyph(digit.to_string()))?;
    Ok(glyph.rasterize(top_left, size))
}

fn char_glyph(character: char) -> Result<&'static Glyph, DashboardError> {
    match character {
        '0'..='9' => Ok(&DIGITS[character as usize - '0' as usize]),
        ':' => Ok(&COLON),
        _ => Err(DashboardError::UnknownGlyph(format!("{:?}", character))),
    }
}

/// Like `render_digit` for a digit character or the colon
pub fn render_char(character: char, top_left: Point, size: Size) -> Result<Vec<Rectangle>, DashboardError> {
    Ok(char_glyph(character)?.rasterize(top_left, size))
}

/// Proportions of the hero clock, all derived from the digit height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockFontData {
    pub digit_width: u32,
    pub digit_height: u32,
    pub glyph_gap: u32,
    pub colon_width: u32,
}

impl ClockFontData {
    /// Digits at 4:5 aspect, a quarter-digit gap, colon dots roughly square
    pub fn for_height(digit_height: u32) -> Self {
        let digit_width = (digit_height * 4 / 5).max(GRID_COLS);
        ClockFontData {
            digit_width,
            digit_height,
            glyph_gap: digit_width / 4,
            colon_width: (digit_height / GRID_ROWS).max(1),
        }
    }

    /// Largest font whose "HH:MM" fits inside `max_width`, capped at `max_height`
    pub fn fitting(max_width: u32, max_height: u32) -> Self {
        // first guess from the ~4.15x width/height ratio, then walk down
        let h = max_height.min(max_width.saturating_mul(100) / 415);
        let mut font = Self::for_height(h.max(GRID_ROWS));
        while font.time_width() > max_width && font.digit_height > GRID_ROWS {
            font = Self::for_height(font.digit_height - 1);
        }
        font
    }

    /// Retrieves the grid for a given character from this font.
    pub fn get_char_glyph(&self, character: char) -> Result<&'static Glyph, DashboardError> {
        char_glyph(character)
    }

    fn advance(&self, character: char) -> u32 {
        if character == ':' { self.colon_width } else { self.digit_width }
    }

    /// Width of a fixed "HH:MM" string, gaps included
    pub fn time_width(&self) -> u32 {
        4 * self.digit_width + self.colon_width + 4 * self.glyph_gap
    }

    /// Width of an arbitrary string of digits and colons
    pub fn text_width(&self, text: &str) -> u32 {
        let n = text.chars().count() as u32;
        let glyphs: u32 = text.chars().map(|c| self.advance(c)).sum();
        glyphs + n.saturating_sub(1) * self.glyph_gap
    }

    /// All filled rectangles for `text` laid out left to right from `origin`.
    pub fn layout(&self, text: &str, origin: Point) -> Result<Vec<Rectangle>, DashboardError> {
        let mut rects = Vec::new();
        let mut x = origin.x;
        for c in text.chars() {
            let glyph = self.get_char_glyph(c)?;
            let w = self.advance(c);
            rects.extend(glyph.rasterize(Point::new(x, origin.y), Size::new(w, self.digit_height)));
            x += (w + self.glyph_gap) as i32;
        }
        Ok(rects)
    }
}

/// Bounding box of a rendered digit, None if it collapsed entirely
pub fn digit_bounds(digit: u32, top_left: Point, size: Size) -> Result<Option<Rectangle>, DashboardError> {
    Ok(bounding_box(&render_digit(digit, top_left, size)?))
}
