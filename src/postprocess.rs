/*
 *  postprocess.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Grayscale, contrast and gamma, then quantize for the panel
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

use image::{DynamicImage, GrayImage, Luma};
use log::debug;

use crate::config::EinkConfig;
use crate::display::color::Color;
use crate::display::error::DashboardError;
use crate::dither::{dither, DitherMode, Palette};
use crate::func_timer::FunctionTimer;

/// Single-channel working image
pub type GrayscaleImage = GrayImage;

pub const DEFAULT_CONTRAST: f32 = 1.25;
pub const SHARPEN_SIGMA: f32 = 0.5;
pub const SHARPEN_THRESHOLD: i32 = 2;

/// BT.601 luma, integer rounded
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    ((299 * r as u32 + 587 * g as u32 + 114 * b as u32 + 500) / 1000) as u8
}

/// Flatten any decoded image to gray, compositing alpha over white
pub fn to_grayscale(img: &DynamicImage) -> GrayscaleImage {
    if let DynamicImage::ImageLuma8(gray) = img {
        return gray.clone();
    }
    let rgba = img.to_rgba8();
    GrayImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let over_white = |c: u8| ((c as u32 * a as u32 + 255 * (255 - a as u32) + 127) / 255) as u8;
        Luma([luma(over_white(r), over_white(g), over_white(b))])
    })
}

/// (v - 128) * factor + 128, rounded and clamped
#[inline]
pub fn contrast_value(v: u8, factor: f32) -> u8 {
    ((v as f32 - 128.0) * factor + 128.0).round().clamp(0.0, 255.0) as u8
}

/// 255 * (v/255)^(1/gamma); gamma 1 or non-positive leaves v alone
#[inline]
pub fn gamma_value(v: u8, gamma: f32) -> u8 {
    if gamma == 1.0 || gamma <= 0.0 {
        return v;
    }
    (255.0 * (v as f32 / 255.0).powf(1.0 / gamma)).round().clamp(0.0, 255.0) as u8
}

fn apply_lut(img: &mut GrayscaleImage, lut: &[u8]) {
    for p in img.pixels_mut() {
        p.0[0] = lut[p.0[0] as usize];
    }
}

/// A grayscale image proven to hold only palette levels
#[derive(Debug, Clone, PartialEq)]
pub struct QuantizedRaster {
    image: GrayscaleImage,
    palette: Palette,
}

impl QuantizedRaster {
    pub fn new(image: GrayscaleImage, palette: Palette) -> Result<Self, DashboardError> {
        if let Some((x, y, p)) = image.enumerate_pixels().find(|(_, _, p)| !palette.contains(p.0[0])) {
            return Err(DashboardError::Unquantized { x, y, value: p.0[0] });
        }
        Ok(QuantizedRaster { image, palette })
    }

    pub fn image(&self) -> &GrayscaleImage { &self.image }
    pub fn palette(&self) -> Palette { self.palette }
    pub fn width(&self) -> u32 { self.image.width() }
    pub fn height(&self) -> u32 { self.image.height() }
}

/// Post-processing settings for one panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipeline {
    pub contrast: f32,
    pub gamma: f32,
    pub palette: Palette,
    pub dither: DitherMode,
    pub sharpen: bool,
}

impl Default for Pipeline {
    fn default() -> Self {
        Pipeline {
            contrast: DEFAULT_CONTRAST,
            gamma: 1.0,
            palette: Palette::default(),
            dither: DitherMode::default(),
            sharpen: true,
        }
    }
}

impl Pipeline {
    pub fn from_config(cfg: &EinkConfig) -> Self {
        Pipeline {
            contrast: cfg.contrast,
            gamma: cfg.gamma,
            palette: Palette::new(cfg.levels),
            dither: cfg.dither,
            sharpen: cfg.sharpen,
        }
    }

    /// Composed canvas -> panel raster (gamma, contrast, dither)
    pub fn process(&self, mut img: GrayscaleImage) -> Result<QuantizedRaster, DashboardError> {
        let _timer = FunctionTimer::new("postprocess");
        apply_lut(&mut img, &self.tone_curve());
        debug!(
            "quantizing {}x{} to {} levels ({:?})",
            img.width(),
            img.height(),
            self.palette.levels(),
            self.dither
        );
        let out = dither(&img, &self.palette, self.dither);
        QuantizedRaster::new(out, self.palette)
    }

    /// Gamma then contrast as one table. Each named ink maps to the panel
    /// level nearest its adjusted value so flat fills dither to one level.
    pub fn tone_curve(&self) -> Vec<u8> {
        let mut lut: Vec<u8> = (0..=255u8)
            .map(|v| contrast_value(gamma_value(v, self.gamma), self.contrast))
            .collect();
        for ink in Color::INKS {
            let v = ink.luminance() as usize;
            lut[v] = self.palette.nearest(lut[v] as f32);
        }
        lut
    }

    /// Sharpen step ahead of the tone adjustments; artwork only
    pub fn prepare_gray(&self, gray: GrayscaleImage) -> GrayscaleImage {
        if self.sharpen {
            image::imageops::unsharpen(&gray, SHARPEN_SIGMA, SHARPEN_THRESHOLD)
        } else {
            gray
        }
    }
}
