/*
 *  lib.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Dashboard composition and e-ink post-processing
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

pub mod artwork;
pub mod calendar;
pub mod clock_font;
pub mod config;
pub mod dashboard;
pub mod display;
pub mod dither;
pub mod draw;
pub mod func_timer;
pub mod glyphs;
pub mod output;
pub mod postprocess;
pub mod reminders;
pub mod vframebuf;
pub mod weather;
pub mod weather_glyph;

pub use display::{render_dashboard, DashboardError, DashboardInputs, LayoutSpec, Notice, RenderReport};
pub use postprocess::{GrayscaleImage, Pipeline, QuantizedRaster};
