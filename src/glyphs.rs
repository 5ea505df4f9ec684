/*
 *  glyphs.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Boolean cell grids and their rectangle rasterization
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
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// A fixed grid of on/off cells, one `u16` per row, MSB-left.
///
/// Grids are resolution independent: [`Glyph::rasterize`] stretches them
/// to any box, with cell edges at `floor(i * W / cols)` so the filled cells
/// of a glyph that touches all four grid edges span the whole box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyph {
    cols: u32,
    rows: &'static [u16],
}

impl Glyph {
    pub const fn new(cols: u32, rows: &'static [u16]) -> Self {
        Glyph { cols, rows }
    }

    pub fn cols(&self) -> u32 { self.cols }
    pub fn rows(&self) -> u32 { self.rows.len() as u32 }

    #[inline]
    pub fn is_on(&self, col: u32, row: u32) -> bool {
        col < self.cols
            && self
                .rows
                .get(row as usize)
                .is_some_and(|bits| (bits >> (self.cols - 1 - col)) & 1 == 1)
    }

    /// Filled pixel rectangles for this glyph scaled into `top_left`/`size`.
    /// Cells that collapse to zero pixels are dropped.
    pub fn rasterize(&self, top_left: Point, size: Size) -> Vec<Rectangle> {
        let xs = edges(top_left.x, size.width, self.cols);
        let ys = edges(top_left.y, size.height, self.rows());
        let mut out = Vec::new();
        for row in 0..self.rows() {
            let (y0, y1) = (ys[row as usize], ys[row as usize + 1]);
            if y1 == y0 { continue; }
            for col in 0..self.cols {
                let (x0, x1) = (xs[col as usize], xs[col as usize + 1]);
                if x1 == x0 || !self.is_on(col, row) { continue; }
                out.push(Rectangle::new(
                    Point::new(x0, y0),
                    Size::new((x1 - x0) as u32, (y1 - y0) as u32),
                ));
            }
        }
        out
    }

    /// Rasterize and fill in one go
    pub fn draw<D>(&self, target: &mut D, top_left: Point, size: Size, color: Gray8) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Gray8>,
    {
        for r in self.rasterize(top_left, size) {
            target.fill_solid(&r, color)?;
        }
        Ok(())
    }
}

fn edges(origin: i32, extent: u32, cells: u32) -> Vec<i32> {
    (0..=cells)
        .map(|i| origin + (i as u64 * extent as u64 / cells.max(1) as u64) as i32)
        .collect()
}

/// Smallest rectangle covering every rectangle in `rects`
pub fn bounding_box(rects: &[Rectangle]) -> Option<Rectangle> {
    let first = rects.first()?;
    let mut min = first.top_left;
    let mut max = first.top_left + first.size;
    for r in &rects[1..] {
        let br = r.top_left + r.size;
        min = Point::new(min.x.min(r.top_left.x), min.y.min(r.top_left.y));
        max = Point::new(max.x.max(br.x), max.y.max(br.y));
    }
    Some(Rectangle::with_corners(min, max - Point::new(1, 1)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLUS: Glyph = Glyph::new(3, &[0b010, 0b111, 0b010]);

    #[test]
    fn test_is_on() {
        assert!(PLUS.is_on(1, 0));
        assert!(!PLUS.is_on(0, 0));
        assert!(PLUS.is_on(2, 1));
        assert!(!PLUS.is_on(3, 1));
        assert!(!PLUS.is_on(0, 3));
    }

    #[test]
    fn test_rasterize_exact_multiple() {
        let rects = PLUS.rasterize(Point::new(10, 20), Size::new(30, 30));
        assert_eq!(rects.len(), 5);
        assert!(rects.contains(&Rectangle::new(Point::new(20, 20), Size::new(10, 10))));
        assert_eq!(
            bounding_box(&rects),
            Some(Rectangle::new(Point::new(10, 20), Size::new(30, 30)))
        );
    }

    #[test]
    fn test_rasterize_uneven_size_still_spans_box() {
        let rects = PLUS.rasterize(Point::zero(), Size::new(17, 11));
        assert_eq!(
            bounding_box(&rects),
            Some(Rectangle::new(Point::zero(), Size::new(17, 11)))
        );
    }

    #[test]
    fn test_rasterize_tiny_box_drops_empty_cells() {
        let rects = PLUS.rasterize(Point::zero(), Size::new(1, 1));
        assert!(rects.iter().all(|r| r.size.width > 0 && r.size.height > 0));
        assert!(rects.len() <= 1);
    }

    #[test]
    fn test_bounding_box_empty() {
        assert_eq!(bounding_box(&[]), None);
    }
}
