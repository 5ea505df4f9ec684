/*
 *  display/color.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Ink palette snapped to the panel's gray levels
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use embedded_graphics::pixelcolor::Gray8;

/// Ink used by the zone renderers
///
/// The named shades sit on the 16-level panel ramp (multiples of 17). The
/// post-processing tone curve pins each of them to a single panel level, so
/// flat text and rules come out of dithering as solid fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    /// Paper black (level 0)
    Black,

    /// Dark gray (level 4)
    DarkGray,

    /// Gray (level 7)
    Gray,

    /// Light gray (level 11)
    LightGray,

    /// Paper white (level 15)
    White,

    /// Custom grayscale value (0-255)
    Grayscale(u8),
}

impl Color {
    /// Every named shade, darkest first
    pub const INKS: [Color; 5] = [Color::Black, Color::DarkGray, Color::Gray, Color::LightGray, Color::White];

    /// Get luminance value (0-255)
    pub fn luminance(&self) -> u8 {
        match self {
            Color::Black => 0,
            Color::DarkGray => 68,
            Color::Gray => 119,
            Color::LightGray => 187,
            Color::White => 255,
            Color::Grayscale(val) => *val,
        }
    }

    /// Convert to the canvas pixel type
    pub fn to_gray8(&self) -> Gray8 {
        Gray8::new(self.luminance())
    }

    /// Foreground/background swap used by the calendar cursor
    pub fn inverted(&self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
            other => Color::Grayscale(255 - other.luminance()),
        }
    }
}

impl From<Color> for Gray8 {
    fn from(c: Color) -> Self {
        c.to_gray8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::pixelcolor::GrayColor;

    #[test]
    fn test_named_shades_sit_on_16_level_ramp() {
        for c in Color::INKS {
            assert_eq!(c.luminance() % 17, 0, "{:?} is off the panel ramp", c);
        }
    }

    #[test]
    fn test_inversion() {
        assert_eq!(Color::Black.inverted(), Color::White);
        assert_eq!(Color::White.inverted(), Color::Black);
        assert_eq!(Color::Grayscale(10).inverted(), Color::Grayscale(245));
        assert_eq!(Color::DarkGray.inverted().luminance(), 187);
    }

    #[test]
    fn test_gray8_conversion() {
        assert_eq!(Color::Gray.to_gray8().luma(), 119);
        assert_eq!(Gray8::from(Color::White), Gray8::WHITE);
    }
}
