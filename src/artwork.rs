/*
 *  artwork.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Artwork pool, rotation policy and pre-processing
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

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::thread;
use walkdir::WalkDir;

use crate::display::error::DashboardError;
use crate::output;
use crate::postprocess::{to_grayscale, GrayscaleImage, Pipeline, QuantizedRaster};

pub const ARTWORK_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

/// Rotation cursor carried between passes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationState {
    pub cursor: usize,
    pub calls: u32,
}

impl RotationState {
    /// Pick the image for this pass and advance the rotation.
    ///
    /// The same image is shown for `rotation_interval` passes before the
    /// cursor moves on; interval 0 behaves as 1.
    pub fn next(self, pool_size: usize, rotation_interval: u32) -> Result<(usize, RotationState), DashboardError> {
        if pool_size == 0 {
            return Err(DashboardError::NoArtworkAvailable);
        }
        let selected = self.cursor % pool_size;
        let mut state = RotationState { cursor: selected, calls: self.calls.saturating_add(1) };
        if state.calls >= rotation_interval.max(1) {
            state.cursor = (selected + 1) % pool_size;
            state.calls = 0;
        }
        Ok((selected, state))
    }

    /// Missing or unreadable state starts the rotation over
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => serde_json::from_str(&text).unwrap_or_else(|e| {
                warn!("rotation state {} unreadable ({}), starting over", path.display(), e);
                RotationState::default()
            }),
            Err(_) => {
                debug!("no rotation state at {}", path.display());
                RotationState::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), DashboardError> {
        let json = serde_json::to_vec_pretty(self)?;
        output::write_atomic(path, &json)
    }
}

/// Sorted list of candidate images
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ArtworkPool {
    files: Vec<PathBuf>,
}

pub fn is_artwork(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| ARTWORK_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

impl ArtworkPool {
    pub fn from_files(mut files: Vec<PathBuf>) -> Self {
        files.sort();
        ArtworkPool { files }
    }

    /// Walk `dir` (or only its named category subdirectories) for images
    pub fn scan(dir: &Path, categories: &[String]) -> Self {
        let roots: Vec<PathBuf> = if categories.is_empty() {
            vec![dir.to_path_buf()]
        } else {
            categories.iter().map(|c| dir.join(c)).collect()
        };
        let mut files = Vec::new();
        for root in roots {
            if !root.is_dir() {
                warn!("artwork directory {} not found", root.display());
                continue;
            }
            files.extend(
                WalkDir::new(&root)
                    .follow_links(true)
                    .into_iter()
                    .filter_map(Result::ok)
                    .filter(|e| e.file_type().is_file() && is_artwork(e.path()))
                    .map(|e| e.into_path()),
            );
        }
        let pool = Self::from_files(files);
        debug!("artwork pool: {} images under {}", pool.len(), dir.display());
        pool
    }

    pub fn len(&self) -> usize { self.files.len() }
    pub fn is_empty(&self) -> bool { self.files.is_empty() }
    pub fn files(&self) -> &[PathBuf] { &self.files }
    pub fn get(&self, index: usize) -> Option<&Path> { self.files.get(index).map(PathBuf::as_path) }
}

/// Outcome of one rotation step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtworkSelection {
    pub index: usize,
    pub path: PathBuf,
    pub state: RotationState,
}

pub fn select(pool: &ArtworkPool, state: RotationState, rotation_interval: u32) -> Result<ArtworkSelection, DashboardError> {
    let (index, state) = state.next(pool.len(), rotation_interval)?;
    let path = pool.get(index).ok_or(DashboardError::NoArtworkAvailable)?.to_path_buf();
    Ok(ArtworkSelection { index, path, state })
}

/// Aspect-preserving fit onto a white sheet of `width`x`height`
pub fn fit_to_canvas(img: &GrayscaleImage, width: u32, height: u32) -> GrayscaleImage {
    let mut sheet = GrayImage::from_pixel(width, height, Luma([255]));
    let (iw, ih) = img.dimensions();
    if iw == 0 || ih == 0 || width == 0 || height == 0 {
        return sheet;
    }
    // compare aspect ratios without floating point
    let (nw, nh) = if iw as u64 * height as u64 > ih as u64 * width as u64 {
        (width, ((ih as u64 * width as u64) / iw as u64).max(1) as u32)
    } else {
        (((iw as u64 * height as u64) / ih as u64).max(1) as u32, height)
    };
    let resized = if (nw, nh) == (iw, ih) {
        img.clone()
    } else {
        imageops::resize(img, nw, nh, FilterType::Lanczos3)
    };
    let x = (width - nw) / 2;
    let y = (height - nh) / 2;
    imageops::overlay(&mut sheet, &resized, x as i64, y as i64);
    sheet
}

/// Decode an image from disk as grayscale
pub fn load_gray(path: &Path) -> Result<GrayscaleImage, DashboardError> {
    Ok(to_grayscale(&image::open(path)?))
}

/// Source image -> letterboxed, sharpened, tone-mapped, dithered raster
pub fn prepare_raster(src: &DynamicImage, width: u32, height: u32, pipeline: &Pipeline) -> Result<QuantizedRaster, DashboardError> {
    let fitted = fit_to_canvas(&to_grayscale(src), width, height);
    pipeline.process(pipeline.prepare_gray(fitted))
}

/// Convert one file and publish it as a rotation-ready PNG
pub fn prepare(input: &Path, out: &Path, width: u32, height: u32, pipeline: &Pipeline) -> Result<(), DashboardError> {
    let src = image::open(input)?;
    let raster = prepare_raster(&src, width, height, pipeline)?;
    output::publish(&raster, out)
}

/// Output name for a prepared image: `<stem>.png` in `out_dir`
pub fn prepared_path(input: &Path, out_dir: &Path) -> PathBuf {
    let stem = input.file_stem().map(|s| s.to_os_string()).unwrap_or_else(|| "artwork".into());
    out_dir.join(stem).with_extension("png")
}

/// Prepare several images concurrently, one scoped worker per input,
/// in batches of the available parallelism. An input whose output name is
/// already taken by an earlier input is reported and skipped.
pub fn prepare_many(
    inputs: &[PathBuf],
    out_dir: &Path,
    width: u32,
    height: u32,
    pipeline: &Pipeline,
) -> Vec<(PathBuf, Result<PathBuf, DashboardError>)> {
    let mut taken = HashSet::new();
    let jobs: Vec<(&PathBuf, PathBuf, bool)> = inputs
        .iter()
        .map(|input| {
            let out = prepared_path(input, out_dir);
            let duplicate = !taken.insert(out.clone());
            (input, out, duplicate)
        })
        .collect();

    let workers = thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    let mut results = Vec::with_capacity(inputs.len());
    for batch in jobs.chunks(workers.max(1)) {
        thread::scope(|s| {
            let handles: Vec<_> = batch
                .iter()
                .map(|(input, out, duplicate)| {
                    (!duplicate).then(move || {
                        s.spawn(move || prepare(input, out, width, height, pipeline).map(|_| out.clone()))
                    })
                })
                .collect();
            for ((input, out, _), handle) in batch.iter().zip(handles) {
                let res = match handle {
                    Some(handle) => handle.join().unwrap_or_else(|_| {
                        Err(DashboardError::Io(std::io::Error::other("artwork worker panicked")))
                    }),
                    None => Err(DashboardError::DuplicateOutput(out.clone())),
                };
                match &res {
                    Ok(out) => info!("prepared {} -> {}", input.display(), out.display()),
                    Err(e) => warn!("could not prepare {}: {}", input.display(), e),
                }
                results.push(((*input).clone(), res));
            }
        });
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_sequence() {
        let mut state = RotationState::default();
        let mut seen = Vec::new();
        for _ in 0..8 {
            let (i, next) = state.next(3, 2).unwrap();
            seen.push(i);
            state = next;
        }
        assert_eq!(seen, vec![0, 0, 1, 1, 2, 2, 0, 0]);
    }

    #[test]
    fn test_zero_interval_advances_every_pass() {
        let mut state = RotationState::default();
        let mut seen = Vec::new();
        for _ in 0..4 {
            let (i, next) = state.next(3, 0).unwrap();
            seen.push(i);
            state = next;
        }
        assert_eq!(seen, vec![0, 1, 2, 0]);
    }

    #[test]
    fn test_empty_pool() {
        assert!(matches!(
            RotationState::default().next(0, 2),
            Err(DashboardError::NoArtworkAvailable)
        ));
    }

    #[test]
    fn test_cursor_beyond_shrunken_pool_wraps() {
        let (i, next) = RotationState { cursor: 7, calls: 0 }.next(3, 5).unwrap();
        assert_eq!(i, 1);
        assert_eq!(next, RotationState { cursor: 1, calls: 1 });
    }

    #[test]
    fn test_saturated_call_count_still_advances() {
        let (i, next) = RotationState { cursor: 0, calls: u32::MAX }.next(3, 5).unwrap();
        assert_eq!(i, 0);
        assert_eq!(next, RotationState { cursor: 1, calls: 0 });
    }

    #[test]
    fn test_shared_stem_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        let out = dir.path().join("out");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&out).unwrap();
        GrayImage::from_pixel(8, 8, Luma([0])).save(src.join("cat.png")).unwrap();
        let inputs = vec![src.join("cat.png"), src.join("cat.jpg")];

        let results = prepare_many(&inputs, &out, 16, 16, &Pipeline::default());
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, inputs[0]);
        assert_eq!(results[0].1.as_ref().unwrap(), &out.join("cat.png"));
        assert_eq!(results[1].0, inputs[1]);
        assert!(matches!(&results[1].1, Err(DashboardError::DuplicateOutput(p)) if *p == out.join("cat.png")));
    }

    #[test]
    fn test_extensions() {
        assert!(is_artwork(Path::new("a/b/cat.PNG")));
        assert!(is_artwork(Path::new("dog.jpeg")));
        assert!(!is_artwork(Path::new("notes.txt")));
        assert!(!is_artwork(Path::new("README")));
    }

    #[test]
    fn test_fit_letterboxes_wide_image() {
        let img = GrayImage::from_pixel(200, 100, Luma([0]));
        let out = fit_to_canvas(&img, 100, 100);
        assert_eq!(out.dimensions(), (100, 100));
        assert_eq!(out.get_pixel(50, 10).0[0], 255);
        assert_eq!(out.get_pixel(50, 50).0[0], 0);
        assert_eq!(out.get_pixel(50, 89).0[0], 255);
    }

    #[test]
    fn test_prepared_path() {
        assert_eq!(
            prepared_path(Path::new("/src/art/cat.jpg"), Path::new("/out")),
            PathBuf::from("/out/cat.png")
        );
    }
}
