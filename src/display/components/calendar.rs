/*
 *  display/components/calendar.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Month grid with an inverted cursor on today
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

use embedded_graphics::pixelcolor::Gray8;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::calendar::{CalendarMonth, DayCell, WEEKDAY_LABELS, WEEK_COLUMNS, WEEK_ROWS};
use crate::display::color::Color;
use crate::display::compositor::RenderReport;
use crate::display::error::DashboardError;
use crate::draw::{draw_frame, draw_line, fill_region, Label};

/// Fixed padding between day text and the edge of the cursor
pub const CURSOR_PADDING: u32 = 8;
const RULE_WIDTH: u32 = 2;

/// Pixel geometry of the grid for one zone size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarGeometry {
    pub size: Size,
    pub header_height: u32,
    pub weekday_height: u32,
    pub column_width: u32,
    pub row_height: u32,
    pub title_label: Label,
    pub day_label: Label,
}

impl CalendarGeometry {
    pub fn new(size: Size) -> Self {
        let s = if size.height >= 600 { 2 } else { 1 };
        let header_height = 25 * s;
        let weekday_height = 20 * s;
        let column_width = size.width / WEEK_COLUMNS;
        let row_height = size.height.saturating_sub(header_height + weekday_height) / WEEK_ROWS;
        let roomy = row_height >= 2 * (20 + CURSOR_PADDING) && column_width >= 2 * (20 + CURSOR_PADDING);
        CalendarGeometry {
            size,
            header_height,
            weekday_height,
            column_width,
            row_height,
            title_label: Label::new(s, Color::Black),
            day_label: Label::new(if roomy { 2 } else { 1 }, Color::Black),
        }
    }

    pub fn grid_top(&self) -> u32 {
        self.header_height + self.weekday_height
    }

    pub fn cell(&self, column: u32, row: u32) -> Rectangle {
        Rectangle::new(
            Point::new(
                (column * self.column_width) as i32,
                (self.grid_top() + row * self.row_height) as i32,
            ),
            Size::new(self.column_width, self.row_height),
        )
    }

    /// Box the day number occupies, centred in its cell
    pub fn day_text_box(&self, cell: &DayCell) -> Rectangle {
        let text = self.day_label.measure(&cell.day.to_string());
        let area = self.cell(cell.column, cell.row);
        Rectangle::new(
            area.top_left
                + Point::new(
                    (area.size.width.saturating_sub(text.width) / 2) as i32,
                    (area.size.height.saturating_sub(text.height) / 2) as i32,
                ),
            text,
        )
    }

    pub fn cursor(&self, cell: &DayCell) -> Rectangle {
        let text = self.day_text_box(cell);
        let p = CURSOR_PADDING as i32;
        Rectangle::new(
            text.top_left - Point::new(p, p),
            text.size + Size::new(2 * CURSOR_PADDING, 2 * CURSOR_PADDING),
        )
    }
}

/// Calendar zone renderer
#[derive(Debug, Clone)]
pub struct CalendarDisplay {
    pub month: CalendarMonth,
}

impl CalendarDisplay {
    pub fn new(month: CalendarMonth) -> Self {
        Self { month }
    }

    /// Inverted cell, zone-relative; None when today is outside the month
    pub fn cursor(&self, size: Size) -> Option<Rectangle> {
        let geom = CalendarGeometry::new(size);
        self.month.highlighted().map(|c| geom.cursor(c))
    }

    pub fn render<D>(&self, target: &mut D, _report: &mut RenderReport) -> Result<(), DashboardError>
    where
        D: DrawTarget<Color = Gray8>,
        DashboardError: From<D::Error>,
    {
        let size = target.bounding_box().size;
        let geom = CalendarGeometry::new(size);
        let w = size.width as i32;

        draw_frame(target, Rectangle::new(Point::zero(), size), Color::Black, RULE_WIDTH)?;

        let title = self.month.title();
        let title_label = geom.title_label.largest_fitting(&title, size.width, geom.title_label.scale);
        let title = title_label.fit(&title, size.width);
        let y = geom.header_height.saturating_sub(title_label.line_height()) / 2;
        title_label.draw_centered(target, &title, 0, size.width, y as i32)?;

        let sep = geom.header_height as i32;
        draw_line(target, Point::new(0, sep), Point::new(w - 1, sep), Color::Black, RULE_WIDTH)?;

        let dow_label = geom.title_label.largest_fitting("Su", geom.column_width, geom.title_label.scale);
        let dow_y = geom.header_height + geom.weekday_height.saturating_sub(dow_label.line_height()) / 2;
        for (col, name) in WEEKDAY_LABELS.iter().enumerate() {
            let left = (col as u32 * geom.column_width) as i32;
            dow_label.draw_centered(target, name, left, geom.column_width, dow_y as i32)?;
        }

        let sep = geom.grid_top() as i32;
        draw_line(target, Point::new(0, sep), Point::new(w - 1, sep), Color::Black, RULE_WIDTH)?;

        let today = self.month.highlighted();
        for cell in &self.month.days {
            let text = cell.day.to_string();
            let text_box = geom.day_text_box(cell);
            if today == Some(cell) {
                let ink = geom.day_label.color;
                fill_region(target, geom.cursor(cell), ink)?;
                geom.day_label.with_color(ink.inverted()).draw(target, &text, text_box.top_left)?;
            } else {
                geom.day_label.draw(target, &text, text_box.top_left)?;
            }
        }
        Ok(())
    }
}
