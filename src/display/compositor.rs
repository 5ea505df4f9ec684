/*
 *  display/compositor.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Paints every zone onto one canvas in a fixed order
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

use chrono::NaiveDateTime;
use embedded_graphics::pixelcolor::Gray8;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::{debug, warn};
use std::fmt;

use crate::calendar::CalendarMonth;
use crate::display::components::{
    ArtworkDisplay, CalendarDisplay, ClockDisplay, RemindersDisplay, WeatherDisplay,
};
use crate::display::error::DashboardError;
use crate::display::layout::{DashboardLayout, LayoutSpec, Zone, ZoneKind};
use crate::func_timer::FunctionTimer;
use crate::postprocess::{GrayscaleImage, Pipeline, QuantizedRaster};
use crate::reminders::ReminderItem;
use crate::vframebuf::Canvas;
use crate::weather::WeatherSnapshot;

/// Non-fatal condition met while composing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    ArtworkUnavailable,
    ClockDateOmitted,
    WeatherUnavailable,
    WeatherLinesDropped { count: usize },
    RemindersDropped { count: usize },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::ArtworkUnavailable => write!(f, "no artwork available, zone left blank"),
            Notice::ClockDateOmitted => write!(f, "date line does not fit the clock zone"),
            Notice::WeatherUnavailable => write!(f, "no weather snapshot, showing placeholder"),
            Notice::WeatherLinesDropped { count } => write!(f, "{} weather line(s) dropped", count),
            Notice::RemindersDropped { count } => write!(f, "{} reminder(s) did not fit", count),
        }
    }
}

/// What happened during one composition pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderReport {
    pub notices: Vec<Notice>,
    /// Inverted calendar cell in canvas coordinates
    pub cursor: Option<Rectangle>,
}

impl RenderReport {
    pub fn notice(&mut self, notice: Notice) {
        warn!("{}", notice);
        self.notices.push(notice);
    }
}

/// Everything a pass draws, already gathered
#[derive(Debug, Clone)]
pub struct DashboardInputs {
    pub now: NaiveDateTime,
    pub weather: Option<WeatherSnapshot>,
    pub reminders: Vec<ReminderItem>,
    pub artwork: Option<GrayscaleImage>,
}

impl DashboardInputs {
    pub fn new(now: NaiveDateTime) -> Self {
        Self { now, weather: None, reminders: Vec::new(), artwork: None }
    }
}

/// Presentation switches that are not geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompositorOptions {
    pub format_24h: bool,
    pub refresh_minutes: u32,
    pub max_reminders: usize,
    pub exit_hint: bool,
}

impl Default for CompositorOptions {
    fn default() -> Self {
        Self { format_24h: false, refresh_minutes: 15, max_reminders: 6, exit_hint: false }
    }
}

/// One zone renderer
#[derive(Debug, Clone)]
pub enum Panel<'a> {
    Artwork(ArtworkDisplay<'a>),
    Clock(ClockDisplay),
    Weather(WeatherDisplay<'a>),
    Calendar(CalendarDisplay),
    Reminders(RemindersDisplay<'a>),
}

impl Panel<'_> {
    pub fn kind(&self) -> ZoneKind {
        match self {
            Panel::Artwork(_) => ZoneKind::Artwork,
            Panel::Clock(_) => ZoneKind::Clock,
            Panel::Weather(_) => ZoneKind::Weather,
            Panel::Calendar(_) => ZoneKind::Calendar,
            Panel::Reminders(_) => ZoneKind::Reminders,
        }
    }

    pub fn render<D>(&self, target: &mut D, report: &mut RenderReport) -> Result<(), DashboardError>
    where
        D: DrawTarget<Color = Gray8>,
        DashboardError: From<D::Error>,
    {
        match self {
            Panel::Artwork(p) => p.render(target, report),
            Panel::Clock(p) => p.render(target, report),
            Panel::Weather(p) => p.render(target, report),
            Panel::Calendar(p) => p.render(target, report),
            Panel::Reminders(p) => p.render(target, report),
        }
    }
}

pub struct Compositor {
    layout: DashboardLayout,
    options: CompositorOptions,
}

impl Compositor {
    pub fn new(layout: DashboardLayout, options: CompositorOptions) -> Self {
        Self { layout, options }
    }

    /// Panels in paint order, paired with their zones
    pub fn panels<'a>(
        &self,
        inputs: &'a DashboardInputs,
        report: &mut RenderReport,
    ) -> Result<Vec<(Zone, Panel<'a>)>, DashboardError> {
        let opts = &self.options;
        let month = CalendarMonth::for_date(inputs.now.date())?;
        let mut panels = Vec::with_capacity(5);
        for zone in self.layout.paint_order() {
            let panel = match zone.kind {
                ZoneKind::Artwork => match inputs.artwork.as_ref() {
                    Some(image) => Panel::Artwork(ArtworkDisplay::new(image)),
                    None => {
                        report.notice(Notice::ArtworkUnavailable);
                        continue;
                    }
                },
                ZoneKind::Clock => Panel::Clock(ClockDisplay::new(inputs.now, opts.format_24h, opts.refresh_minutes)),
                ZoneKind::Weather => Panel::Weather(WeatherDisplay::new(inputs.weather.as_ref())),
                ZoneKind::Calendar => Panel::Calendar(CalendarDisplay::new(month.clone())),
                ZoneKind::Reminders => Panel::Reminders(RemindersDisplay::new(
                    &inputs.reminders,
                    opts.max_reminders,
                    inputs.now,
                    opts.exit_hint,
                )),
            };
            panels.push((zone, panel));
        }
        Ok(panels)
    }

    /// Paint every zone onto a fresh white canvas
    pub fn compose(&self, inputs: &DashboardInputs) -> Result<(Canvas, RenderReport), DashboardError> {
        let _timer = FunctionTimer::new("compose");
        let mut report = RenderReport::default();
        let mut canvas = Canvas::white(self.layout.canvas.width, self.layout.canvas.height);

        for (zone, panel) in self.panels(inputs, &mut report)? {
            debug_assert_eq!(zone.kind, panel.kind());
            debug!("painting {:?} at {:?}", zone.kind, zone.bounds);
            // cropped only moves the origin; clipped keeps ink inside the zone
            let mut cropped = canvas.cropped(&zone.bounds);
            let mut target = cropped.clipped(&Rectangle::new(Point::zero(), zone.size()));
            panel.render(&mut target, &mut report)?;
            if let Panel::Calendar(calendar) = &panel {
                report.cursor = calendar
                    .cursor(zone.size())
                    .map(|c| Rectangle::new(c.top_left + zone.bounds.top_left, c.size).intersection(&zone.bounds));
            }
        }
        Ok((canvas, report))
    }
}

/// Layout, compose and post-process one pass
pub fn render_dashboard(
    spec: &LayoutSpec,
    options: CompositorOptions,
    pipeline: &Pipeline,
    inputs: &DashboardInputs,
) -> Result<(QuantizedRaster, RenderReport), DashboardError> {
    let layout = DashboardLayout::compute(spec)?;
    let compositor = Compositor::new(layout, options);
    let (canvas, report) = compositor.compose(inputs)?;
    let raster = pipeline.process(canvas.to_gray_image())?;
    Ok((raster, report))
}
