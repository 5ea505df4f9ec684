/*
 *  tests/artwork_rotation.rs
 *
 *  Artwork pool discovery, persisted rotation and pre-processing
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 */

use image::{GrayImage, Luma, Rgb, RgbImage};
use std::fs;
use std::path::Path;

use inkboard::artwork::{prepare, prepare_many, select, ArtworkPool, RotationState};
use inkboard::dither::Palette;
use inkboard::postprocess::Pipeline;

fn touch_image(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    GrayImage::from_pixel(4, 4, Luma([128])).save(path).unwrap();
}

#[test]
fn scan_sorts_and_filters() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    touch_image(&root.join("cats/b.png"));
    touch_image(&root.join("cats/a.png"));
    touch_image(&root.join("dogs/c.png"));
    fs::write(root.join("cats/notes.txt"), "not art").unwrap();
    fs::write(root.join("dogs/D.JPG"), "renamed").unwrap();

    let all = ArtworkPool::scan(root, &[]);
    let names: Vec<String> = all
        .files()
        .iter()
        .map(|p| p.strip_prefix(root).unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["cats/a.png", "cats/b.png", "dogs/D.JPG", "dogs/c.png"]);

    let cats = ArtworkPool::scan(root, &["cats".to_string(), "missing".to_string()]);
    assert_eq!(cats.len(), 2);
}

#[test]
fn persisted_rotation_follows_interval() {
    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("state/rotation.json");
    let pool = ArtworkPool::from_files(vec!["z.png".into(), "x.png".into(), "y.png".into()]);

    let mut picks = Vec::new();
    for _ in 0..7 {
        let state = RotationState::load(&state_file);
        let sel = select(&pool, state, 2).unwrap();
        picks.push(sel.path.to_string_lossy().into_owned());
        sel.state.save(&state_file).unwrap();
    }
    assert_eq!(picks, vec!["x.png", "x.png", "y.png", "y.png", "z.png", "z.png", "x.png"]);
}

#[test]
fn corrupt_state_starts_over() {
    let dir = tempfile::tempdir().unwrap();
    let state_file = dir.path().join("rotation.json");
    fs::write(&state_file, "{ not json").unwrap();
    assert_eq!(RotationState::load(&state_file), RotationState::default());
    assert_eq!(RotationState::load(&dir.path().join("absent.json")), RotationState::default());
}

#[test]
fn prepared_artwork_is_letterboxed_and_quantized() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("sunset.png");
    RgbImage::from_fn(60, 30, |x, _| Rgb([(x * 4) as u8, 90, 200])).save(&src).unwrap();
    let out = dir.path().join("out/sunset.png");

    prepare(&src, &out, 40, 40, &Pipeline::default()).unwrap();
    let img = image::open(&out).unwrap().to_luma8();
    assert_eq!(img.dimensions(), (40, 40));
    let palette = Palette::default();
    assert!(img.pixels().all(|p| palette.contains(p.0[0])));
    // bars above and below the 40x20 picture stay paper white
    assert!((0..40).all(|x| img.get_pixel(x, 0).0[0] == 255));
}

#[test]
fn prepare_many_reports_each_input() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.png");
    touch_image(&good);
    let bad = dir.path().join("bad.png");
    fs::write(&bad, "not a png").unwrap();
    let out_dir = dir.path().join("prepared");

    let results = prepare_many(&[good.clone(), bad.clone()], &out_dir, 16, 16, &Pipeline::default());
    assert_eq!(results.len(), 2);
    assert_eq!(results[0].0, good);
    assert_eq!(results[0].1.as_ref().unwrap(), &out_dir.join("good.png"));
    assert!(results[1].1.is_err());
}
