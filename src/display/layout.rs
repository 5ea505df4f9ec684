/*
 *  display/layout.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Zone geometry: tiles the margin-inset canvas for each panel
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

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use serde::{Deserialize, Serialize};

use crate::display::error::DashboardError;

pub const HERO_HEIGHT_PERCENT: u32 = 20;
pub const REMINDERS_HEIGHT_PERCENT: u32 = 14;
pub const WEATHER_WIDTH_PERCENT: u32 = 30;
/// Share of the middle band kept by weather when artwork sits below it
pub const WEATHER_SPLIT_PERCENT: u32 = 55;

pub const MIN_USABLE_WIDTH: u32 = 320;
pub const MIN_USABLE_HEIGHT: u32 = 400;
pub const MIN_ZONE_EXTENT: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneKind {
    Clock,
    Weather,
    Calendar,
    Reminders,
    Artwork,
}

/// Where the optional artwork goes
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkPlacement {
    #[default]
    None,
    /// Below the weather column
    Panel,
    /// Full-bleed behind everything
    Background,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Zone {
    pub kind: ZoneKind,
    pub bounds: Rectangle,
}

impl Zone {
    fn new(kind: ZoneKind, x: u32, y: u32, width: u32, height: u32) -> Self {
        Zone {
            kind,
            bounds: Rectangle::new(Point::new(x as i32, y as i32), Size::new(width, height)),
        }
    }

    pub fn size(&self) -> Size { self.bounds.size }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutSpec {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub gutter: u32,
    pub artwork: ArtworkPlacement,
}

impl LayoutSpec {
    pub fn new(width: u32, height: u32, margin: u32) -> Self {
        LayoutSpec { width, height, margin, gutter: 0, artwork: ArtworkPlacement::None }
    }

    pub fn with_gutter(self, gutter: u32) -> Self {
        LayoutSpec { gutter, ..self }
    }

    pub fn with_artwork(self, artwork: ArtworkPlacement) -> Self {
        LayoutSpec { artwork, ..self }
    }
}

/// Absolute zone rectangles for one canvas
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardLayout {
    pub canvas: Size,
    pub usable: Rectangle,
    pub gutter: u32,
    pub placement: ArtworkPlacement,
    pub clock: Zone,
    pub weather: Zone,
    pub calendar: Zone,
    pub reminders: Zone,
    pub artwork: Option<Zone>,
}

impl DashboardLayout {
    /// Hero clock across the top, reminders strip along the bottom, weather
    /// column and calendar sharing the band between them.
    pub fn compute(spec: &LayoutSpec) -> Result<Self, DashboardError> {
        let too_small = || DashboardError::LayoutTooSmall { width: spec.width, height: spec.height };
        let (m, g) = (spec.margin, spec.gutter);

        let uw = spec.width.checked_sub(m.saturating_mul(2)).ok_or_else(too_small)?;
        let uh = spec.height.checked_sub(m.saturating_mul(2)).ok_or_else(too_small)?;
        if uw < MIN_USABLE_WIDTH || uh < MIN_USABLE_HEIGHT {
            return Err(too_small());
        }

        let hero_h = uh * HERO_HEIGHT_PERCENT / 100;
        let reminders_h = uh * REMINDERS_HEIGHT_PERCENT / 100;
        let band_h = uh
            .checked_sub(hero_h + reminders_h)
            .and_then(|v| v.checked_sub(g.saturating_mul(2)))
            .ok_or_else(too_small)?;
        let weather_w = uw * WEATHER_WIDTH_PERCENT / 100;
        let calendar_w = uw.checked_sub(weather_w).and_then(|v| v.checked_sub(g)).ok_or_else(too_small)?;

        let band_y = m + hero_h + g;
        let clock = Zone::new(ZoneKind::Clock, m, m, uw, hero_h);
        let calendar = Zone::new(ZoneKind::Calendar, m + weather_w + g, band_y, calendar_w, band_h);
        let reminders = Zone::new(ZoneKind::Reminders, m, band_y + band_h + g, uw, reminders_h);

        let (weather, artwork) = match spec.artwork {
            ArtworkPlacement::Panel => {
                let weather_h = band_h * WEATHER_SPLIT_PERCENT / 100;
                let art_h = band_h.checked_sub(weather_h).and_then(|v| v.checked_sub(g)).ok_or_else(too_small)?;
                (
                    Zone::new(ZoneKind::Weather, m, band_y, weather_w, weather_h),
                    Some(Zone::new(ZoneKind::Artwork, m, band_y + weather_h + g, weather_w, art_h)),
                )
            }
            ArtworkPlacement::Background => (
                Zone::new(ZoneKind::Weather, m, band_y, weather_w, band_h),
                Some(Zone::new(ZoneKind::Artwork, 0, 0, spec.width, spec.height)),
            ),
            ArtworkPlacement::None => (Zone::new(ZoneKind::Weather, m, band_y, weather_w, band_h), None),
        };

        let layout = DashboardLayout {
            canvas: Size::new(spec.width, spec.height),
            usable: Rectangle::new(Point::new(m as i32, m as i32), Size::new(uw, uh)),
            gutter: g,
            placement: spec.artwork,
            clock,
            weather,
            calendar,
            reminders,
            artwork,
        };

        if layout
            .tiles()
            .iter()
            .any(|z| z.bounds.size.width < MIN_ZONE_EXTENT || z.bounds.size.height < MIN_ZONE_EXTENT)
        {
            return Err(too_small());
        }
        Ok(layout)
    }

    /// Zones that tile the usable area (background artwork excluded)
    pub fn tiles(&self) -> Vec<Zone> {
        let mut zones = vec![self.clock, self.weather, self.calendar, self.reminders];
        if self.placement == ArtworkPlacement::Panel {
            zones.extend(self.artwork);
        }
        zones
    }

    /// Every zone in paint order: artwork first, then the four panels
    pub fn paint_order(&self) -> Vec<Zone> {
        let mut zones: Vec<Zone> = self.artwork.into_iter().collect();
        zones.extend([self.clock, self.weather, self.calendar, self.reminders]);
        zones
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(z: &Zone) -> u32 {
        z.bounds.size.width * z.bounds.size.height
    }

    #[test]
    fn test_default_panel_geometry() {
        let l = DashboardLayout::compute(&LayoutSpec::new(1236, 1648, 30)).unwrap();
        assert_eq!(l.usable, Rectangle::new(Point::new(30, 30), Size::new(1176, 1588)));
        assert_eq!(l.clock.bounds, Rectangle::new(Point::new(30, 30), Size::new(1176, 317)));
        assert_eq!(l.reminders.bounds.size, Size::new(1176, 222));
        assert_eq!(l.weather.bounds.size.width, 352);
        assert_eq!(l.calendar.bounds.top_left.x, 30 + 352);
        assert_eq!(l.calendar.bounds.size.width, 1176 - 352);
        assert_eq!(l.reminders.bounds.top_left.y + 222, 30 + 1588);
        assert!(l.artwork.is_none());
    }

    #[test]
    fn test_tiles_cover_usable_area() {
        let l = DashboardLayout::compute(&LayoutSpec::new(1236, 1648, 30).with_gutter(12)).unwrap();
        let band_h = l.weather.bounds.size.height;
        let gutters = 2 * 12 * l.usable.size.width + 12 * band_h;
        let sum: u32 = l.tiles().iter().map(area).sum();
        assert_eq!(sum + gutters, l.usable.size.width * l.usable.size.height);
    }

    #[test]
    fn test_panel_artwork_splits_weather_column() {
        let spec = LayoutSpec::new(1236, 1648, 30).with_gutter(10).with_artwork(ArtworkPlacement::Panel);
        let l = DashboardLayout::compute(&spec).unwrap();
        let art = l.artwork.unwrap();
        assert_eq!(art.kind, ZoneKind::Artwork);
        assert_eq!(art.bounds.size.width, l.weather.bounds.size.width);
        assert_eq!(
            art.bounds.top_left.y,
            l.weather.bounds.top_left.y + l.weather.bounds.size.height as i32 + 10
        );
        assert_eq!(
            art.bounds.top_left.y + art.bounds.size.height as i32,
            l.calendar.bounds.top_left.y + l.calendar.bounds.size.height as i32
        );
        assert_eq!(l.tiles().len(), 5);
    }

    #[test]
    fn test_background_artwork_is_full_bleed() {
        let spec = LayoutSpec::new(800, 1000, 20).with_artwork(ArtworkPlacement::Background);
        let l = DashboardLayout::compute(&spec).unwrap();
        assert_eq!(
            l.artwork.unwrap().bounds,
            Rectangle::new(Point::zero(), Size::new(800, 1000))
        );
        assert_eq!(l.tiles().len(), 4);
        assert_eq!(l.paint_order()[0].kind, ZoneKind::Artwork);
    }

    #[test]
    fn test_too_small() {
        for spec in [
            LayoutSpec::new(319, 1000, 0),
            LayoutSpec::new(1000, 399, 0),
            LayoutSpec::new(400, 500, 50),
            LayoutSpec::new(100, 100, 80),
            LayoutSpec::new(320, 400, 0).with_gutter(150),
        ] {
            assert!(
                matches!(DashboardLayout::compute(&spec), Err(DashboardError::LayoutTooSmall { .. })),
                "{:?}",
                spec
            );
        }
        assert!(DashboardLayout::compute(&LayoutSpec::new(320, 400, 0)).is_ok());
    }
}
