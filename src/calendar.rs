/*
 *  calendar.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Month grid model: Sunday-first, six week rows
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

use chrono::{Datelike, NaiveDate};

use crate::display::error::DashboardError;

pub const WEEKDAY_LABELS: [&str; 7] = ["Su", "Mo", "Tu", "We", "Th", "Fr", "Sa"];
pub const WEEK_ROWS: u32 = 6;
pub const WEEK_COLUMNS: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    /// 0 = Sunday
    pub column: u32,
    pub row: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<DayCell>,
    highlight: Option<u32>,
}

impl CalendarMonth {
    /// Build the grid for `year`-`month`, highlighting `highlight_day` if it
    /// falls inside the month. An out-of-range day simply highlights nothing.
    pub fn new(year: i32, month: u32, highlight_day: u32) -> Result<Self, DashboardError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(DashboardError::InvalidCalendarDate { year, month })?;
        let n = days_in_month(year, month).ok_or(DashboardError::InvalidCalendarDate { year, month })?;
        let lead = first.weekday().num_days_from_sunday();

        let days = (1..=n)
            .map(|day| {
                let slot = lead + day - 1;
                DayCell { day, column: slot % WEEK_COLUMNS, row: slot / WEEK_COLUMNS }
            })
            .collect();

        Ok(CalendarMonth {
            year,
            month,
            days,
            highlight: (1..=n).contains(&highlight_day).then_some(highlight_day),
        })
    }

    /// Month containing `date`, with `date` highlighted
    pub fn for_date(date: NaiveDate) -> Result<Self, DashboardError> {
        Self::new(date.year(), date.month(), date.day())
    }

    pub fn len(&self) -> usize { self.days.len() }
    pub fn is_empty(&self) -> bool { self.days.is_empty() }

    pub fn highlighted(&self) -> Option<&DayCell> {
        let day = self.highlight?;
        self.days.iter().find(|c| c.day == day)
    }

    /// "FEBRUARY 2026"
    pub fn title(&self) -> String {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .map(|d| d.format("%B %Y").to_string().to_uppercase())
            .unwrap_or_default()
    }

    /// Rows x columns view with blanks outside the month
    pub fn grid(&self) -> [[Option<u32>; WEEK_COLUMNS as usize]; WEEK_ROWS as usize] {
        let mut g = [[None; WEEK_COLUMNS as usize]; WEEK_ROWS as usize];
        for c in &self.days {
            g[c.row as usize][c.column as usize] = Some(c.day);
        }
        g
    }
}

pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some(next.signed_duration_since(first).num_days() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_february_2026_starts_sunday() {
        let m = CalendarMonth::new(2026, 2, 4).unwrap();
        assert_eq!(m.len(), 28);
        assert_eq!(m.days[0], DayCell { day: 1, column: 0, row: 0 });
        assert_eq!(m.highlighted(), Some(&DayCell { day: 4, column: 3, row: 0 }));
        assert_eq!(m.title(), "FEBRUARY 2026");
        // exactly four rows used, last two blank
        let g = m.grid();
        assert!(g[4].iter().all(Option::is_none));
        assert!(g[5].iter().all(Option::is_none));
    }

    #[test]
    fn test_every_day_once() {
        for (y, mo) in [(2024, 2), (2025, 8), (2026, 3), (1900, 2), (2000, 2)] {
            let m = CalendarMonth::new(y, mo, 1).unwrap();
            let n = days_in_month(y, mo).unwrap();
            assert_eq!(m.len() as u32, n);
            let cells: Vec<u32> = m.grid().iter().flatten().flatten().copied().collect();
            assert_eq!(cells, (1..=n).collect::<Vec<_>>());
        }
    }

    #[test]
    fn test_leap_years() {
        assert_eq!(days_in_month(2024, 2), Some(29));
        assert_eq!(days_in_month(1900, 2), Some(28));
        assert_eq!(days_in_month(2000, 2), Some(29));
        assert_eq!(days_in_month(2026, 12), Some(31));
    }

    #[test]
    fn test_six_rows_is_enough() {
        // August 2026 starts on Saturday and has 31 days
        let m = CalendarMonth::new(2026, 8, 31).unwrap();
        assert_eq!(m.days[0].column, 6);
        assert_eq!(m.highlighted().map(|c| c.row), Some(5));
    }

    #[test]
    fn test_highlight_out_of_range() {
        let m = CalendarMonth::new(2026, 2, 30).unwrap();
        assert_eq!(m.highlighted(), None);
        let m = CalendarMonth::new(2026, 2, 0).unwrap();
        assert_eq!(m.highlighted(), None);
    }

    #[test]
    fn test_invalid_month() {
        assert!(matches!(
            CalendarMonth::new(2026, 13, 1),
            Err(DashboardError::InvalidCalendarDate { year: 2026, month: 13 })
        ));
        assert!(CalendarMonth::new(2026, 0, 1).is_err());
    }
}
