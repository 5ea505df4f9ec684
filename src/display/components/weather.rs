/*
 *  display/components/weather.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Weather column: icon, temperature, description, high/low
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

use crate::display::color::Color;
use crate::display::compositor::{Notice, RenderReport};
use crate::display::error::DashboardError;
use crate::draw::Label;
use crate::weather::WeatherSnapshot;
use crate::weather_glyph::ICON_GRID;

/// One stacked line of the weather block, lowest priority last in `rank`
#[derive(Debug, Clone, PartialEq)]
enum Line {
    Icon { side: u32 },
    Text { text: String, label: Label, rank: u8 },
}

impl Line {
    fn height(&self) -> u32 {
        match self {
            Line::Icon { side } => *side,
            Line::Text { label, .. } => label.line_height(),
        }
    }

    // drop order: extras (3), high/low (2), description (1), icon (0);
    // the temperature (u8::MAX) is never dropped
    fn rank(&self) -> u8 {
        match self {
            Line::Icon { .. } => 0,
            Line::Text { rank, .. } => *rank,
        }
    }
}

const RANK_DESCRIPTION: u8 = 1;
const RANK_HIGH_LOW: u8 = 2;
const RANK_EXTRA: u8 = 3;
const RANK_TEMPERATURE: u8 = u8::MAX;

/// Weather zone renderer
#[derive(Debug, Clone, Copy)]
pub struct WeatherDisplay<'a> {
    pub snapshot: Option<&'a WeatherSnapshot>,
}

impl<'a> WeatherDisplay<'a> {
    pub fn new(snapshot: Option<&'a WeatherSnapshot>) -> Self {
        Self { snapshot }
    }

    pub fn render<D>(&self, target: &mut D, report: &mut RenderReport) -> Result<(), DashboardError>
    where
        D: DrawTarget<Color = Gray8>,
        DashboardError: From<D::Error>,
    {
        let size = target.bounding_box().size;
        let Some(weather) = self.snapshot else {
            report.notice(Notice::WeatherUnavailable);
            return self.render_placeholder(target, size);
        };

        let pad = (size.width / 20).max(2);
        let inner_w = size.width.saturating_sub(2 * pad);
        let spacing = (size.height / 50).clamp(4, 20);

        let temp_scale = (size.height / 100).clamp(1, 4);
        let body_scale = (temp_scale / 2).max(1);

        let mut lines = Vec::new();
        let side = (inner_w * 45 / 100).min(size.height * 30 / 100) / ICON_GRID * ICON_GRID;
        if side >= ICON_GRID {
            lines.push(Line::Icon { side });
        }
        let temp = weather.temperature_text();
        lines.push(Line::Text {
            label: Label::new(1, Color::Black).largest_fitting(&temp, inner_w, temp_scale),
            text: temp,
            rank: RANK_TEMPERATURE,
        });
        let desc_label = Label::new(body_scale, Color::Black);
        lines.push(Line::Text {
            text: desc_label.fit(&weather.description_text(), inner_w).into_owned(),
            label: desc_label,
            rank: RANK_DESCRIPTION,
        });
        let hl = weather.high_low_text();
        lines.push(Line::Text {
            label: Label::new(1, Color::Gray).largest_fitting(&hl, inner_w, body_scale),
            text: hl,
            rank: RANK_HIGH_LOW,
        });
        let extra_label = Label::new(1, Color::DarkGray);
        for extra in weather.extra_lines() {
            lines.push(Line::Text {
                text: extra_label.fit(&extra, inner_w).into_owned(),
                label: extra_label,
                rank: RANK_EXTRA,
            });
        }

        let block_height = |lines: &[Line]| -> u32 {
            let sum: u32 = lines.iter().map(Line::height).sum();
            sum + spacing * (lines.len() as u32).saturating_sub(1)
        };

        let mut dropped = 0;
        while block_height(&lines) > size.height {
            // last line of the lowest priority still present
            let victim = lines
                .iter()
                .enumerate()
                .filter(|(_, l)| l.rank() != RANK_TEMPERATURE)
                .max_by_key(|(i, l)| (l.rank(), *i))
                .map(|(i, _)| i);
            match victim {
                Some(i) => {
                    lines.remove(i);
                    dropped += 1;
                }
                None => break,
            }
        }
        if dropped > 0 {
            report.notice(Notice::WeatherLinesDropped { count: dropped });
        }

        let mut y = (size.height.saturating_sub(block_height(&lines)) / 2) as i32;
        for line in &lines {
            match line {
                Line::Icon { side } => {
                    let x = (size.width.saturating_sub(*side) / 2) as i32;
                    weather
                        .icon()
                        .glyph()
                        .draw(target, Point::new(x, y), Size::new(*side, *side), Color::Black.to_gray8())?;
                }
                Line::Text { text, label, .. } => {
                    label.draw_centered(target, text, 0, size.width, y)?;
                }
            }
            y += (line.height() + spacing) as i32;
        }
        Ok(())
    }

    fn render_placeholder<D>(&self, target: &mut D, size: Size) -> Result<(), DashboardError>
    where
        D: DrawTarget<Color = Gray8>,
        DashboardError: From<D::Error>,
    {
        let label = Label::new(1, Color::Gray).largest_fitting("unavailable", size.width, 2);
        let h = label.line_height();
        let y = (size.height.saturating_sub(2 * h + h / 2) / 2) as i32;
        label.draw_centered(target, "Weather", 0, size.width, y)?;
        label.draw_centered(target, "unavailable", 0, size.width, y + (h + h / 2) as i32)?;
        Ok(())
    }
}
