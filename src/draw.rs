/*
 *  draw.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Label text and ruled-box helpers shared by the zone renderers
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

use std::borrow::Cow;

use embedded_graphics::{
    mono_font::{iso_8859_1::FONT_10X20, MonoFont, MonoTextStyle},
    pixelcolor::{BinaryColor, Gray8},
    prelude::*,
    primitives::{Line, PrimitiveStyleBuilder, Rectangle, StrokeAlignment},
    text::{Baseline, Text},
};
use embedded_text::{
    alignment::{HorizontalAlignment, VerticalAlignment},
    style::TextBoxStyleBuilder,
    TextBox,
};

use crate::display::color::Color;
use crate::vframebuf::Mask;

pub const LABEL_FONT: &MonoFont<'static> = &FONT_10X20;
pub const ELLIPSIS: &str = "...";

/// Mono-font text blown up by an integer factor.
///
/// The font is drawn once at 1:1 into a 1-bit mask, then each lit pixel
/// becomes a `scale`x`scale` block of ink, so large labels stay crisp and
/// use a single gray level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Label {
    pub scale: u32,
    pub color: Color,
}

impl Label {
    pub fn new(scale: u32, color: Color) -> Self {
        Label { scale: scale.max(1), color }
    }

    pub fn font(&self) -> &'static MonoFont<'static> {
        LABEL_FONT
    }

    pub fn with_scale(self, scale: u32) -> Self {
        Label { scale: scale.max(1), ..self }
    }

    pub fn with_color(self, color: Color) -> Self {
        Label { color, ..self }
    }

    /// Advance of one character, spacing included
    pub fn char_width(&self) -> u32 {
        (self.font().character_size.width + self.font().character_spacing) * self.scale
    }

    pub fn line_height(&self) -> u32 {
        self.font().character_size.height * self.scale
    }

    pub fn measure(&self, text: &str) -> Size {
        let n = text.chars().count() as u32;
        if n == 0 {
            return Size::new(0, self.line_height());
        }
        let w = n * self.font().character_size.width + (n - 1) * self.font().character_spacing;
        Size::new(w * self.scale, self.line_height())
    }

    /// Characters that fit in `max_width`
    pub fn capacity(&self, max_width: u32) -> usize {
        let (cw, sp) = (self.font().character_size.width, self.font().character_spacing);
        ((max_width / self.scale + sp) / (cw + sp)) as usize
    }

    /// Truncate with "..." so the text fits in `max_width`
    pub fn fit<'a>(&self, text: &'a str, max_width: u32) -> Cow<'a, str> {
        let cap = self.capacity(max_width);
        if text.chars().count() <= cap {
            return Cow::Borrowed(text);
        }
        if cap <= ELLIPSIS.len() {
            return Cow::Owned(ELLIPSIS.chars().take(cap).collect());
        }
        let head: String = text.chars().take(cap - ELLIPSIS.len()).collect();
        Cow::Owned(format!("{}{}", head.trim_end(), ELLIPSIS))
    }

    /// Largest scale up to `max_scale` at which `text` fits `max_width`
    pub fn largest_fitting(self, text: &str, max_width: u32, max_scale: u32) -> Self {
        let mut label = self.with_scale(max_scale);
        while label.scale > 1 && label.measure(text).width > max_width {
            label = label.with_scale(label.scale - 1);
        }
        label
    }

    /// Draw with the top-left corner at `top_left`; returns the drawn size
    pub fn draw<D>(&self, target: &mut D, text: &str, top_left: Point) -> Result<Size, D::Error>
    where
        D: DrawTarget<Color = Gray8>,
    {
        let size = self.measure(text);
        if size.width == 0 {
            return Ok(size);
        }
        if self.scale == 1 {
            let style = MonoTextStyle::new(self.font(), self.color.to_gray8());
            Text::with_baseline(text, top_left, style, Baseline::Top).draw(target)?;
            return Ok(size);
        }

        let unscaled = Size::new(size.width / self.scale, size.height / self.scale);
        let mut mask = Mask::new(unscaled.width, unscaled.height, BinaryColor::Off);
        let style = MonoTextStyle::new(self.font(), BinaryColor::On);
        // drawing into the mask cannot fail
        let _ = Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut mask);
        blit_mask(target, &mask, top_left, self.scale, self.color.to_gray8())?;
        Ok(size)
    }

    /// Draw horizontally centred in `width` starting at x = `left`
    pub fn draw_centered<D>(&self, target: &mut D, text: &str, left: i32, width: u32, y: i32) -> Result<Size, D::Error>
    where
        D: DrawTarget<Color = Gray8>,
    {
        let w = self.measure(text).width;
        let x = left + (width.saturating_sub(w) / 2) as i32;
        self.draw(target, text, Point::new(x, y))
    }
}

/// Paint every lit mask pixel as a `scale`-sized block, merging runs per row
pub fn blit_mask<D>(target: &mut D, mask: &Mask, top_left: Point, scale: u32, color: Gray8) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray8>,
{
    let s = scale as i32;
    for y in 0..mask.height() {
        let Some(row) = mask.row(y) else { break };
        let mut x = 0;
        while x < row.len() {
            if row[x] != BinaryColor::On {
                x += 1;
                continue;
            }
            let start = x;
            while x < row.len() && row[x] == BinaryColor::On {
                x += 1;
            }
            let r = Rectangle::new(
                top_left + Point::new(start as i32 * s, y as i32 * s),
                Size::new((x - start) as u32 * scale, scale),
            );
            target.fill_solid(&r, color)?;
        }
    }
    Ok(())
}

/// Unscaled text box, e.g. right-aligned footers
pub fn draw_text_align<D>(
    target: &mut D,
    text: &str,
    area: Rectangle,
    align: HorizontalAlignment,
    color: Color,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray8>,
{
    let character_style = MonoTextStyle::new(LABEL_FONT, color.to_gray8());
    let textbox_style = TextBoxStyleBuilder::new()
        .alignment(align)
        .vertical_alignment(VerticalAlignment::Middle)
        .build();
    TextBox::with_textbox_style(text, area, character_style, textbox_style).draw(target)?;
    Ok(())
}

pub fn draw_line<D>(target: &mut D, start: Point, end: Point, color: Color, width: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray8>,
{
    Line::new(start, end)
        .into_styled(PrimitiveStyleBuilder::new().stroke_width(width).stroke_color(color.to_gray8()).build())
        .draw(target)
}

/// Outline drawn inside `area`
pub fn draw_frame<D>(target: &mut D, area: Rectangle, color: Color, width: u32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray8>,
{
    area.into_styled(
        PrimitiveStyleBuilder::new()
            .stroke_color(color.to_gray8())
            .stroke_width(width)
            .stroke_alignment(StrokeAlignment::Inside)
            .build(),
    )
    .draw(target)
}

pub fn fill_region<D>(target: &mut D, area: Rectangle, color: Color) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Gray8>,
{
    target.fill_solid(&area, color.to_gray8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vframebuf::Canvas;

    #[test]
    fn test_measure() {
        let l = Label::new(2, Color::Black);
        assert_eq!(l.measure("Test"), Size::new(80, 40));
        assert_eq!(l.measure(""), Size::new(0, 40));
        assert_eq!(l.char_width(), 20);
        assert_eq!(Label::new(0, Color::Black).scale, 1);
    }

    #[test]
    fn test_fit_truncates_with_ellipsis() {
        let l = Label::new(1, Color::Black);
        assert_eq!(l.capacity(100), 10);
        assert_eq!(l.fit("short", 100), "short");
        let cut = l.fit("a very long reminder line", 100);
        assert_eq!(cut, "a very...");
        assert!(l.measure(&cut).width <= 100);
        assert_eq!(l.fit("abcdef", 20), "..");
    }

    #[test]
    fn test_largest_fitting() {
        let l = Label::new(1, Color::Black).largest_fitting("19°F", 170, 4);
        assert_eq!(l.scale, 4);
        let l = Label::new(1, Color::Black).largest_fitting("19°F", 100, 4);
        assert_eq!(l.scale, 2);
    }

    #[test]
    fn test_scaled_text_uses_one_ink() {
        let mut c = Canvas::white(200, 60);
        let l = Label::new(3, Color::DarkGray);
        let size = l.draw(&mut c, "8", Point::new(5, 5)).unwrap();
        assert_eq!(size, Size::new(30, 60));
        let inked: Vec<u8> = c.as_slice().iter().map(|p| p.luma()).filter(|v| *v != 255).collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|v| *v == 68));
        // nothing left of the label box
        assert!((0..60).all(|y| c.luma_at(4, y) == Some(255)));
    }

    #[test]
    fn test_frame_stays_inside() {
        let mut c = Canvas::white(20, 20);
        draw_frame(&mut c, Rectangle::new(Point::new(2, 2), Size::new(10, 10)), Color::Black, 2).unwrap();
        assert_eq!(c.luma_at(2, 2), Some(0));
        assert_eq!(c.luma_at(3, 3), Some(0));
        assert_eq!(c.luma_at(4, 4), Some(255));
        assert_eq!(c.luma_at(1, 1), Some(255));
        assert_eq!(c.luma_at(11, 11), Some(0));
        assert_eq!(c.luma_at(12, 12), Some(255));
    }
}
