/*
 *  display/error.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Unified error types for the composition pipeline
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

use std::convert::Infallible;
use thiserror::Error;

/// Unified error type for every stage of a composition pass
#[derive(Debug, Error)]
pub enum DashboardError {
    /// Canvas (after margins) is below the minimum usable size
    #[error("canvas {width}x{height} is too small for the dashboard layout")]
    LayoutTooSmall { width: u32, height: u32 },

    /// Digit or icon outside the atlas
    #[error("no glyph for {0}")]
    UnknownGlyph(String),

    /// Artwork pool is empty; composition carries on without it
    #[error("no artwork available")]
    NoArtworkAvailable,

    /// Month outside 1..=12 or a year chrono cannot represent
    #[error("invalid calendar month {year}-{month:02}")]
    InvalidCalendarDate { year: i32, month: u32 },

    /// A raster handed to the writer holds a value outside the panel palette
    #[error("pixel ({x}, {y}) = {value} is not a panel gray level")]
    Unquantized { x: u32, y: u32, value: u8 },

    /// Two artwork inputs would be prepared to the same file
    #[error("{} would be written by more than one input", .0.display())]
    DuplicateOutput(std::path::PathBuf),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state file error: {0}")]
    State(#[from] serde_json::Error),
}

// The in-memory canvas never fails to draw
impl From<Infallible> for DashboardError {
    fn from(err: Infallible) -> Self {
        match err {}
    }
}
