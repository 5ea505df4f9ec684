/*
 *  display/mod.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem - layout, zone renderers and the compositor
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

pub mod color;
pub mod error;

// Zone geometry
pub mod layout;

// UI components
pub mod components;

pub mod compositor;

// Re-exports for convenience
pub use color::Color;
pub use compositor::{render_dashboard, Compositor, CompositorOptions, DashboardInputs, Notice, Panel, RenderReport};
pub use error::DashboardError;
pub use layout::{ArtworkPlacement, DashboardLayout, LayoutSpec, Zone, ZoneKind};
