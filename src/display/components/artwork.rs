/*
 *  display/components/artwork.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Artwork zone: letterboxed grayscale image
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

use crate::artwork::fit_to_canvas;
use crate::display::compositor::RenderReport;
use crate::display::error::DashboardError;
use crate::postprocess::GrayscaleImage;

#[derive(Debug, Clone, Copy)]
pub struct ArtworkDisplay<'a> {
    pub image: &'a GrayscaleImage,
}

impl<'a> ArtworkDisplay<'a> {
    pub fn new(image: &'a GrayscaleImage) -> Self {
        Self { image }
    }

    pub fn render<D>(&self, target: &mut D, _report: &mut RenderReport) -> Result<(), DashboardError>
    where
        D: DrawTarget<Color = Gray8>,
        DashboardError: From<D::Error>,
    {
        let size = target.bounding_box().size;
        let fitted = fit_to_canvas(self.image, size.width, size.height);
        target.fill_contiguous(
            &Rectangle::new(Point::zero(), size),
            fitted.pixels().map(|p| Gray8::new(p.0[0])),
        )?;
        Ok(())
    }
}
