/*
 *  display/components/clock.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Hero clock: block digits, meridiem, date line and refresh note
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

use arrayvec::ArrayString;
use chrono::{NaiveDateTime, Timelike};
use core::fmt::Write;
use embedded_graphics::pixelcolor::Gray8;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use embedded_text::alignment::HorizontalAlignment;

use crate::clock_font::ClockFontData;
use crate::display::color::Color;
use crate::display::compositor::{Notice, RenderReport};
use crate::display::error::DashboardError;
use crate::draw::{draw_text_align, Label};

/// "HH:MM" plus the AM/PM marker in 12-hour mode
pub fn clock_digits(hour: u32, minute: u32, format_24h: bool) -> (ArrayString<5>, Option<&'static str>) {
    let (h, meridiem) = if format_24h {
        (hour % 24, None)
    } else {
        match hour % 24 {
            0 => (12, Some("AM")),
            h @ 1..=11 => (h, Some("AM")),
            12 => (12, Some("PM")),
            h => (h - 12, Some("PM")),
        }
    };
    let mut text = ArrayString::<5>::new();
    // five ASCII characters always fit
    let _ = write!(text, "{:02}:{:02}", h, minute % 60);
    (text, meridiem)
}

/// Clock zone renderer
#[derive(Debug, Clone, Copy)]
pub struct ClockDisplay {
    pub now: NaiveDateTime,
    pub format_24h: bool,
    /// Refresh cadence shown in the corner, 0 hides it
    pub refresh_minutes: u32,
}

impl ClockDisplay {
    pub fn new(now: NaiveDateTime, format_24h: bool, refresh_minutes: u32) -> Self {
        Self { now, format_24h, refresh_minutes }
    }

    pub fn date_text(&self) -> String {
        self.now.format("%A, %b %-d").to_string()
    }

    pub fn render<D>(&self, target: &mut D, report: &mut RenderReport) -> Result<(), DashboardError>
    where
        D: DrawTarget<Color = Gray8>,
        DashboardError: From<D::Error>,
    {
        let size = target.bounding_box().size;
        let (text, meridiem) = clock_digits(self.now.hour(), self.now.minute(), self.format_24h);

        let pad = (size.width / 24).max(4);
        let max_digit_h = size.height * 5 / 16;
        let label = Label::new((max_digit_h / 50).max(1), Color::Black);
        let label_gap = label.char_width();
        let meridiem_w = meridiem.map_or(0, |m| label.measure(m).width + label_gap);

        let font = ClockFontData::fitting(size.width.saturating_sub(2 * pad + meridiem_w), max_digit_h);
        let origin = Point::new(pad as i32, (size.height * 3 / 16) as i32);
        for r in font.layout(&text, origin)? {
            target.fill_solid(&r, Color::Black.to_gray8())?;
        }

        let mid_y = origin.y + (font.digit_height.saturating_sub(label.line_height()) / 2) as i32;
        let mut x = origin.x + (font.time_width() + label_gap) as i32;
        if let Some(m) = meridiem {
            let drawn = label.draw(target, m, Point::new(x, mid_y))?;
            x += (drawn.width + label_gap) as i32;
        }

        // date to the right of the time if it fits, otherwise underneath
        let date = self.date_text();
        let date_w = label.measure(&date).width;
        let footer_h = if self.refresh_minutes > 0 { label.font().character_size.height + pad / 2 } else { 0 };
        let below_y = origin.y + (font.digit_height + font.glyph_gap) as i32;
        if x + (date_w + pad) as i32 <= size.width as i32 {
            label.draw(target, &date, Point::new(x + label_gap as i32, mid_y))?;
        } else if below_y + (label.line_height() + footer_h) as i32 <= size.height as i32 {
            let fitted = label.fit(&date, size.width.saturating_sub(2 * pad));
            label.draw(target, &fitted, Point::new(origin.x, below_y))?;
        } else {
            report.notice(Notice::ClockDateOmitted);
        }

        if self.refresh_minutes > 0 {
            let note = format!("Refresh: every {} min", self.refresh_minutes);
            let line_h = label.font().character_size.height;
            let area = Rectangle::new(
                Point::new(pad as i32, size.height.saturating_sub(line_h + pad / 2) as i32),
                Size::new(size.width.saturating_sub(2 * pad), line_h),
            );
            draw_text_align(target, &note, area, HorizontalAlignment::Right, Color::Gray)?;
        }
        Ok(())
    }
}
