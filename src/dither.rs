/*
 *  dither.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Panel palette quantization and dithering kernels
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

use image::GrayImage;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DitherMode {
    #[default]
    FloydSteinberg,
    Atkinson,
    Bayer,
    None,
}

/// Evenly spaced gray levels the panel can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    levels: u16,
}

pub const MIN_LEVELS: u16 = 2;
pub const MAX_LEVELS: u16 = 256;

impl Palette {
    /// Level count is clamped into 2..=256
    pub fn new(levels: u16) -> Self {
        Palette { levels: levels.clamp(MIN_LEVELS, MAX_LEVELS) }
    }

    pub fn levels(&self) -> u16 { self.levels }

    #[inline]
    fn steps(&self) -> u32 { self.levels as u32 - 1 }

    /// round(i * 255 / (levels - 1))
    #[inline]
    pub fn level(&self, index: u32) -> u8 {
        let n = self.steps();
        ((index.min(n) * 255 + n / 2) / n) as u8
    }

    #[inline]
    fn index_of(&self, value: f32) -> u32 {
        (value.clamp(0.0, 255.0) * self.steps() as f32 / 255.0).round() as u32
    }

    /// Nearest palette level to an error-adjusted value
    #[inline]
    pub fn nearest(&self, value: f32) -> u8 {
        self.level(self.index_of(value))
    }

    pub fn contains(&self, value: u8) -> bool {
        self.nearest(value as f32) == value
    }

    pub fn values(&self) -> Vec<u8> {
        (0..self.levels as u32).map(|i| self.level(i)).collect()
    }

    /// Distance between adjacent levels
    pub fn step(&self) -> f32 {
        255.0 / self.steps() as f32
    }
}

impl Default for Palette {
    fn default() -> Self {
        Palette::new(16)
    }
}

/// Quantize `img` to `palette` with the chosen kernel. Raster order, single
/// threaded, deterministic.
pub fn dither(img: &GrayImage, palette: &Palette, mode: DitherMode) -> GrayImage {
    match mode {
        DitherMode::FloydSteinberg => diffuse(img, palette, FLOYD_STEINBERG, 16.0),
        DitherMode::Atkinson => diffuse(img, palette, ATKINSON, 8.0),
        DitherMode::Bayer => ordered(img, palette),
        DitherMode::None => nearest(img, palette),
    }
}

/// (dx, dy, weight) taps of an error-diffusion kernel
type Kernel = &'static [(i32, i32, f32)];

const FLOYD_STEINBERG: Kernel = &[(1, 0, 7.0), (-1, 1, 3.0), (0, 1, 5.0), (1, 1, 1.0)];

// 6/8 of the error is spread, the rest is dropped
const ATKINSON: Kernel = &[(1, 0, 1.0), (2, 0, 1.0), (-1, 1, 1.0), (0, 1, 1.0), (1, 1, 1.0), (0, 2, 1.0)];

fn diffuse(img: &GrayImage, palette: &Palette, kernel: Kernel, divisor: f32) -> GrayImage {
    let (w, h) = img.dimensions();
    let (wi, hi) = (w as i64, h as i64);
    let mut work: Vec<f32> = img.as_raw().iter().map(|&v| v as f32).collect();
    let mut out = vec![0u8; work.len()];

    for y in 0..hi {
        for x in 0..wi {
            let i = (y * wi + x) as usize;
            let old = work[i];
            let q = palette.nearest(old);
            out[i] = q;
            let err = old - q as f32;
            if err == 0.0 {
                continue;
            }
            for &(dx, dy, weight) in kernel {
                let (nx, ny) = (x + dx as i64, y + dy as i64);
                if nx < 0 || nx >= wi || ny >= hi {
                    continue;
                }
                work[(ny * wi + nx) as usize] += err * weight / divisor;
            }
        }
    }
    GrayImage::from_raw(w, h, out).unwrap_or_else(|| GrayImage::new(w, h))
}

const BAYER_4X4: [[u8; 4]; 4] = [
    [0, 8, 2, 10],
    [12, 4, 14, 6],
    [3, 11, 1, 9],
    [15, 7, 13, 5],
];

fn ordered(img: &GrayImage, palette: &Palette) -> GrayImage {
    let step = palette.step();
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        let t = BAYER_4X4[(y % 4) as usize][(x % 4) as usize] as f32;
        let offset = ((t + 0.5) / 16.0 - 0.5) * step;
        image::Luma([palette.nearest(img.get_pixel(x, y).0[0] as f32 + offset)])
    })
}

fn nearest(img: &GrayImage, palette: &Palette) -> GrayImage {
    let mut out = img.clone();
    for p in out.pixels_mut() {
        p.0[0] = palette.nearest(p.0[0] as f32);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_levels() {
        assert_eq!(Palette::new(16).values(), (0..16).map(|i| i * 17).collect::<Vec<u8>>());
        assert_eq!(Palette::new(2).values(), vec![0, 255]);
        assert_eq!(Palette::new(4).values(), vec![0, 85, 170, 255]);
        assert_eq!(Palette::new(3).values(), vec![0, 128, 255]);
        assert_eq!(Palette::new(1).levels(), 2);
        assert_eq!(Palette::new(999).levels(), 256);
        assert_eq!(Palette::new(256).values(), (0..=255).collect::<Vec<u8>>());
    }

    #[test]
    fn test_nearest() {
        let p = Palette::new(16);
        assert_eq!(p.nearest(0.0), 0);
        assert_eq!(p.nearest(8.0), 0);
        assert_eq!(p.nearest(9.0), 17);
        assert_eq!(p.nearest(-40.0), 0);
        assert_eq!(p.nearest(300.0), 255);
        assert!(p.contains(68));
        assert!(!p.contains(70));
    }

    #[test]
    fn test_flat_palette_image_is_untouched() {
        let img = GrayImage::from_pixel(9, 5, image::Luma([119]));
        for mode in [DitherMode::FloydSteinberg, DitherMode::Atkinson, DitherMode::Bayer, DitherMode::None] {
            assert_eq!(dither(&img, &Palette::new(16), mode), img, "{:?}", mode);
        }
    }

    #[test]
    fn test_floyd_steinberg_mid_gray_two_levels() {
        // 50% gray on a 1-bit palette settles into an even mix
        let img = GrayImage::from_pixel(16, 16, image::Luma([128]));
        let out = dither(&img, &Palette::new(2), DitherMode::FloydSteinberg);
        let black = out.pixels().filter(|p| p.0[0] == 0).count();
        assert!((100..=156).contains(&black), "black = {}", black);
    }

    #[test]
    fn test_floyd_steinberg_first_pixel_error_moves_right() {
        // 100 -> 85 on a 4-level palette, +15*7/16 carried to the right
        let img = GrayImage::from_raw(2, 1, vec![100, 125]).unwrap();
        let out = dither(&img, &Palette::new(4), DitherMode::FloydSteinberg);
        assert_eq!(out.get_pixel(0, 0).0[0], 85);
        // 125 alone would round down to 85; 131.56 rounds up
        assert_eq!(out.get_pixel(1, 0).0[0], 170);
        assert_eq!(dither(&img, &Palette::new(4), DitherMode::None).get_pixel(1, 0).0[0], 85);
    }

    #[test]
    fn test_atkinson_right_taps() {
        // 101 -> 85 leaves 16, so each tap gets exactly +2; 83 + 2 lands on 85 with no error
        let pal = Palette::new(4);
        let row = |last: u8| GrayImage::from_raw(3, 1, vec![101, 83, last]).unwrap();
        assert_eq!(dither(&row(41), &pal, DitherMode::Atkinson).as_raw(), &vec![85, 85, 85]);
        // 40 + 2 is still below the 42.5 threshold
        assert_eq!(dither(&row(40), &pal, DitherMode::Atkinson).as_raw(), &vec![85, 85, 0]);
        assert_eq!(dither(&row(41), &pal, DitherMode::None).as_raw(), &vec![85, 85, 0]);
    }

    #[test]
    fn test_atkinson_below_taps() {
        let pal = Palette::new(4);
        let column = |last: u8| GrayImage::from_raw(1, 3, vec![101, 83, last]).unwrap();
        assert_eq!(dither(&column(41), &pal, DitherMode::Atkinson).as_raw(), &vec![85, 85, 85]);
        assert_eq!(dither(&column(40), &pal, DitherMode::Atkinson).as_raw(), &vec![85, 85, 0]);
    }

    #[test]
    fn test_atkinson_below_left_tap() {
        let pal = Palette::new(4);
        // (1,0) spreads +2 down-left onto 41; 83 then absorbs -5.25 from (0,1) and still reads 85
        let img = GrayImage::from_raw(2, 2, vec![85, 101, 41, 83]).unwrap();
        assert_eq!(dither(&img, &pal, DitherMode::Atkinson).as_raw(), &vec![85, 85, 85, 85]);
    }

    #[test]
    fn test_bayer_is_stateless() {
        let img = GrayImage::from_fn(8, 8, |x, y| image::Luma([(x * 30 + y) as u8]));
        let a = dither(&img, &Palette::new(4), DitherMode::Bayer);
        let b = dither(&img, &Palette::new(4), DitherMode::Bayer);
        assert_eq!(a, b);
        assert!(a.pixels().all(|p| Palette::new(4).contains(p.0[0])));
    }

    #[test]
    fn test_mode_names() {
        let m: DitherMode = serde_yaml::from_str("floyd-steinberg").unwrap();
        assert_eq!(m, DitherMode::FloydSteinberg);
        let m: DitherMode = serde_yaml::from_str("none").unwrap();
        assert_eq!(m, DitherMode::None);
    }
}
