/*
 *  output.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  PNG encode and atomic publish of the panel raster
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

use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ExtendedColorType, ImageEncoder};
use log::info;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

use crate::display::error::DashboardError;
use crate::postprocess::QuantizedRaster;

/// Lossless 8-bit single channel PNG
pub fn encode_png(raster: &QuantizedRaster) -> Result<Vec<u8>, DashboardError> {
    let img = raster.image();
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive).write_image(
        img.as_raw(),
        img.width(),
        img.height(),
        ExtendedColorType::L8,
    )?;
    Ok(buf)
}

/// Write `bytes` beside `path` and rename into place, so readers only ever
/// see the old file or the complete new one.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), DashboardError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Encode and publish the dashboard image
pub fn publish(raster: &QuantizedRaster, path: &Path) -> Result<(), DashboardError> {
    let png = encode_png(raster)?;
    write_atomic(path, &png)?;
    info!(
        "published {}x{} dashboard ({} bytes) to {}",
        raster.width(),
        raster.height(),
        png.len(),
        path.display()
    );
    Ok(())
}
