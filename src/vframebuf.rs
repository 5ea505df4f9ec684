/*
 *  vframebuf.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Runtime-sized framebuffer, the canvas every zone draws into
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

use core::convert::Infallible;
use embedded_graphics::geometry::{OriginDimensions, Size};
use embedded_graphics::pixelcolor::{BinaryColor, Gray8, GrayColor, PixelColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use image::GrayImage;

/// A runtime-sized framebuffer for embedded-graphics.
#[derive(Debug, Clone)]
pub struct VarFrameBuf<C: PixelColor> {
    buf: Vec<C>,
    w: usize,
    h: usize,
}

/// The 8-bit grayscale composition canvas
pub type Canvas = VarFrameBuf<Gray8>;

/// 1-bit scratch buffer used for text masks
pub type Mask = VarFrameBuf<BinaryColor>;

impl<C: PixelColor + Clone> VarFrameBuf<C> {
    pub fn new(width: u32, height: u32, fill: C) -> Self {
        let (w, h) = (width as usize, height as usize);
        Self { buf: vec![fill; w * h], w, h }
    }

    pub fn width(&self) -> usize { self.w }
    pub fn height(&self) -> usize { self.h }

    pub fn as_slice(&self) -> &[C] { &self.buf }

    /// Clear to a color
    pub fn clear_color(&mut self, color: C) {
        self.buf.fill(color);
    }

    /// Pixel at (x,y), None outside the buffer
    pub fn get(&self, x: i32, y: i32) -> Option<C> {
        self.idx(Point::new(x, y)).map(|i| self.buf[i])
    }

    /// Row slice, None past the bottom
    pub fn row(&self, y: usize) -> Option<&[C]> {
        (y < self.h).then(|| &self.buf[y * self.w..(y + 1) * self.w])
    }

    /// Map (x,y) to linear index; returns None if out of bounds
    #[inline]
    fn idx(&self, p: Point) -> Option<usize> {
        if p.x >= 0 && p.y >= 0 {
            let (x, y) = (p.x as usize, p.y as usize);
            if x < self.w && y < self.h {
                return Some(y * self.w + x);
            }
        }
        None
    }
}

impl Canvas {
    /// Blank sheet of paper
    pub fn white(width: u32, height: u32) -> Self {
        Self::new(width, height, Gray8::WHITE)
    }

    /// Luma byte at (x,y)
    pub fn luma_at(&self, x: i32, y: i32) -> Option<u8> {
        self.get(x, y).map(|c| c.luma())
    }

    /// Hand the composed canvas to the post-processing stage
    pub fn to_gray_image(&self) -> GrayImage {
        let raw: Vec<u8> = self.buf.iter().map(|c| c.luma()).collect();
        GrayImage::from_raw(self.w as u32, self.h as u32, raw)
            .unwrap_or_else(|| GrayImage::new(self.w as u32, self.h as u32))
    }
}

impl<C: PixelColor> OriginDimensions for VarFrameBuf<C> {
    fn size(&self) -> Size {
        Size::new(self.w as u32, self.h as u32)
    }
}

impl<C: PixelColor + Clone> DrawTarget for VarFrameBuf<C> {
    type Color = C;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if let Some(i) = self.idx(p) {
                self.buf[i] = c;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.clear_color(color);
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        let Size { width, height } = area.size;
        if width == 0 || height == 0 { return Ok(()); }

        // colors arrive row-major over the whole area; skip the clipped ones
        let mut it = colors.into_iter();
        for row in 0..height as i32 {
            for col in 0..width as i32 {
                let Some(c) = it.next() else { return Ok(()); };
                if let Some(i) = self.idx(area.top_left + Point::new(col, row)) {
                    self.buf[i] = c;
                }
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        let Some(bottom_right) = clipped.bottom_right() else { return Ok(()); };
        let (x0, x1) = (clipped.top_left.x as usize, bottom_right.x as usize);
        for y in clipped.top_left.y as usize..=bottom_right.y as usize {
            let base = y * self.w;
            self.buf[base + x0..=base + x1].fill(color);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::PrimitiveStyle;

    #[test]
    fn test_new_canvas_is_white() {
        let c = Canvas::white(8, 4);
        assert_eq!(c.size(), Size::new(8, 4));
        assert!(c.as_slice().iter().all(|p| *p == Gray8::WHITE));
    }

    #[test]
    fn test_fill_solid_clips() {
        let mut c = Canvas::white(10, 10);
        c.fill_solid(&Rectangle::new(Point::new(-5, 8), Size::new(8, 8)), Gray8::BLACK)
            .unwrap();
        assert_eq!(c.luma_at(0, 9), Some(0));
        assert_eq!(c.luma_at(2, 8), Some(0));
        assert_eq!(c.luma_at(3, 8), Some(255));
        assert_eq!(c.luma_at(0, 7), Some(255));
    }

    #[test]
    fn test_fill_contiguous_skips_offscreen_columns() {
        let mut c = Canvas::white(4, 2);
        let area = Rectangle::new(Point::new(-1, 0), Size::new(3, 1));
        c.fill_contiguous(&area, [Gray8::new(1), Gray8::new(2), Gray8::new(3)]).unwrap();
        assert_eq!(c.luma_at(0, 0), Some(2));
        assert_eq!(c.luma_at(1, 0), Some(3));
        assert_eq!(c.luma_at(2, 0), Some(255));
    }

    #[test]
    fn test_cropped_draws_are_offset_and_clipped() {
        let mut c = Canvas::white(20, 20);
        {
            let mut cropped = c.cropped(&Rectangle::new(Point::new(5, 5), Size::new(4, 4)));
            let mut zone = cropped.clipped(&Rectangle::new(Point::zero(), Size::new(4, 4)));
            Rectangle::new(Point::new(2, 2), Size::new(10, 10))
                .into_styled(PrimitiveStyle::with_fill(Gray8::BLACK))
                .draw(&mut zone)
                .unwrap();
        }
        assert_eq!(c.luma_at(7, 7), Some(0));
        assert_eq!(c.luma_at(8, 8), Some(0));
        assert_eq!(c.luma_at(9, 9), Some(255));
        assert_eq!(c.luma_at(6, 6), Some(255));
    }

    #[test]
    fn test_to_gray_image_round_trips_pixels() {
        let mut c = Canvas::white(3, 2);
        Pixel(Point::new(1, 1), Gray8::new(68)).draw(&mut c).unwrap();
        let img = c.to_gray_image();
        assert_eq!(img.dimensions(), (3, 2));
        assert_eq!(img.get_pixel(1, 1).0[0], 68);
        assert_eq!(img.get_pixel(0, 0).0[0], 255);
    }
}
