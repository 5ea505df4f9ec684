/*
 *  tests/dither_properties.rs
 *
 *  Quantization invariants for every dither kernel
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 */

use image::{GrayImage, Luma};
use proptest::prelude::*;

use inkboard::dither::{dither, DitherMode, Palette};
use inkboard::postprocess::{contrast_value, Pipeline};

fn mode() -> impl Strategy<Value = DitherMode> {
    prop_oneof![
        Just(DitherMode::FloydSteinberg),
        Just(DitherMode::Atkinson),
        Just(DitherMode::Bayer),
        Just(DitherMode::None),
    ]
}

fn image() -> impl Strategy<Value = GrayImage> {
    (1u32..24, 1u32..24).prop_flat_map(|(w, h)| {
        proptest::collection::vec(any::<u8>(), (w * h) as usize)
            .prop_map(move |raw| GrayImage::from_raw(w, h, raw).unwrap())
    })
}

proptest! {
    #[test]
    fn output_uses_only_palette_levels(img in image(), levels in 2u16..=32, mode in mode()) {
        let palette = Palette::new(levels);
        let out = dither(&img, &palette, mode);
        prop_assert_eq!(out.dimensions(), img.dimensions());
        prop_assert!(out.pixels().all(|p| palette.contains(p.0[0])));
    }

    #[test]
    fn dithering_is_deterministic(img in image(), mode in mode()) {
        let palette = Palette::default();
        prop_assert_eq!(dither(&img, &palette, mode), dither(&img, &palette, mode));
    }

    #[test]
    fn contrast_pushes_away_from_mid_gray(v in any::<u8>(), lo in 1.0f32..2.0, extra in 0.0f32..2.0) {
        let a = contrast_value(v, lo) as i32 - 128;
        let b = contrast_value(v, lo + extra) as i32 - 128;
        prop_assert!(b.abs() >= a.abs());
        prop_assert!(a.signum() * b.signum() >= 0);
    }
}

#[test]
fn uniform_and_checkerboard_inputs() {
    let palette = Palette::default();
    let uniform = GrayImage::from_pixel(32, 32, Luma([100]));
    let checker = GrayImage::from_fn(32, 32, |x, y| Luma([if (x + y) % 2 == 0 { 30 } else { 220 }]));
    for mode in [DitherMode::FloydSteinberg, DitherMode::Atkinson, DitherMode::Bayer, DitherMode::None] {
        for img in [&uniform, &checker] {
            assert!(dither(img, &palette, mode).pixels().all(|p| palette.contains(p.0[0])));
        }
    }
}

#[test]
fn unit_contrast_is_identity() {
    assert!((0..=255u8).all(|v| contrast_value(v, 1.0) == v));
}

#[test]
fn pipeline_output_is_quantized() {
    let img = GrayImage::from_fn(40, 30, |x, y| Luma([((x * 7 + y * 3) % 256) as u8]));
    let raster = Pipeline::default().process(img).unwrap();
    assert!(raster.image().pixels().all(|p| raster.palette().contains(p.0[0])));
}
