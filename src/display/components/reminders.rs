/*
 *  display/components/reminders.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Two-column reminders strip along the bottom of the panel
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
use embedded_text::alignment::HorizontalAlignment;

use crate::display::color::Color;
use crate::display::compositor::{Notice, RenderReport};
use crate::display::error::DashboardError;
use crate::draw::{draw_frame, draw_text_align, fill_region, Label};
use crate::reminders::{select_columns, ReminderItem, ReminderStatus};

pub const TITLE: &str = "REMINDERS";
pub const EXIT_HINT: &str = "[ TAP HERE TO EXIT ]";
const PAD: u32 = 20;

/// Reminders zone renderer
#[derive(Debug, Clone, Copy)]
pub struct RemindersDisplay<'a> {
    pub items: &'a [ReminderItem],
    pub max_items: usize,
    pub updated: NaiveDateTime,
    pub exit_hint: bool,
}

impl<'a> RemindersDisplay<'a> {
    pub fn new(items: &'a [ReminderItem], max_items: usize, updated: NaiveDateTime, exit_hint: bool) -> Self {
        Self { items, max_items, updated, exit_hint }
    }

    fn ink(status: ReminderStatus) -> Color {
        match status {
            ReminderStatus::Priority => Color::Black,
            _ => Color::DarkGray,
        }
    }

    pub fn render<D>(&self, target: &mut D, report: &mut RenderReport) -> Result<(), DashboardError>
    where
        D: DrawTarget<Color = Gray8>,
        DashboardError: From<D::Error>,
    {
        let columns = select_columns(self.items, self.max_items);
        if columns.is_empty() {
            return Ok(());
        }
        let size = target.bounding_box().size;

        let title = Label::new(1, Color::Black);
        let title_h = title.line_height();
        let frame = Rectangle::new(
            Point::new(0, (title_h / 2) as i32),
            Size::new(size.width, size.height.saturating_sub(title_h / 2)),
        );
        draw_frame(target, frame, Color::Black, 2)?;

        // title sits on the top rule with a paper gap either side
        let title_w = title.measure(TITLE).width;
        let title_x = (size.width.saturating_sub(title_w) / 2) as i32;
        fill_region(
            target,
            Rectangle::new(Point::new(title_x - 8, 0), Size::new(title_w + 16, title_h)),
            Color::White,
        )?;
        title.draw(target, TITLE, Point::new(title_x, 0))?;

        let footer_h = title_h + 8;
        let items_top = title_h + 12;
        let avail = size.height.saturating_sub(items_top + footer_h);
        let rows_for = |label: &Label| avail / (label.line_height() + 5 * label.scale);
        let mut label = Label::new(if size.height >= 180 { 2 } else { 1 }, Color::DarkGray);
        if rows_for(&label) == 0 {
            label = label.with_scale(1);
        }
        let rows = rows_for(&label) as usize;
        let line_h = label.line_height() + 5 * label.scale;
        let col_w = size.width.saturating_sub(3 * PAD) / 2;

        let mut dropped = 0;
        for (col, list) in [&columns.left, &columns.right].into_iter().enumerate() {
            let x = (PAD + col as u32 * (col_w + PAD)) as i32;
            for (row, item) in list.iter().enumerate() {
                if row >= rows {
                    dropped += 1;
                    continue;
                }
                let line = item.display_line();
                let text = label.fit(&line, col_w);
                let y = (items_top + row as u32 * line_h) as i32;
                label.with_color(Self::ink(item.status)).draw(target, &text, Point::new(x, y))?;
            }
        }
        if dropped > 0 {
            report.notice(Notice::RemindersDropped { count: dropped });
        }

        let footer = Rectangle::new(
            Point::new(PAD as i32, size.height.saturating_sub(footer_h) as i32),
            Size::new(size.width.saturating_sub(2 * PAD), title_h),
        );
        let stamp = format!("Updated {}", self.updated.format("%H:%M"));
        draw_text_align(target, &stamp, footer, HorizontalAlignment::Right, Color::Gray)?;
        if self.exit_hint {
            draw_text_align(target, EXIT_HINT, footer, HorizontalAlignment::Left, Color::Gray)?;
        }
        Ok(())
    }
}
