/*
 *  reminders.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Reminders list: file parsing and two-column selection
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

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::display::error::DashboardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderStatus {
    Pending,
    Done,
    Priority,
}

impl ReminderStatus {
    pub fn marker(&self) -> &'static str {
        match self {
            ReminderStatus::Pending => "[ ]",
            ReminderStatus::Done => "[x]",
            ReminderStatus::Priority => "[!]",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderItem {
    pub text: String,
    pub status: ReminderStatus,
}

impl ReminderItem {
    pub fn new(text: impl Into<String>, status: ReminderStatus) -> Self {
        ReminderItem { text: text.into(), status }
    }

    pub fn pending(text: impl Into<String>) -> Self {
        Self::new(text, ReminderStatus::Pending)
    }

    /// One line of the reminders file; None for blanks and comments
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }
        let (status, rest) = if let Some(rest) = line.strip_prefix("[x]").or_else(|| line.strip_prefix("[X]")) {
            (ReminderStatus::Done, rest)
        } else if let Some(rest) = line.strip_prefix("[!]") {
            (ReminderStatus::Priority, rest)
        } else if let Some(rest) = line.strip_prefix("[ ]") {
            (ReminderStatus::Pending, rest)
        } else {
            (ReminderStatus::Pending, line)
        };
        let text = rest.trim();
        (!text.is_empty()).then(|| ReminderItem::new(text, status))
    }

    /// "[ ] text" as drawn in the zone
    pub fn display_line(&self) -> String {
        format!("{} {}", self.status.marker(), self.text)
    }
}

pub fn parse_reminders(text: &str) -> Vec<ReminderItem> {
    text.lines().filter_map(ReminderItem::parse_line).collect()
}

pub fn load_reminders(path: &Path) -> Result<Vec<ReminderItem>, DashboardError> {
    let items = parse_reminders(&fs::read_to_string(path)?);
    debug!("loaded {} reminders from {}", items.len(), path.display());
    Ok(items)
}

/// Items split across the two reminder columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderColumns<'a> {
    pub left: Vec<&'a ReminderItem>,
    pub right: Vec<&'a ReminderItem>,
}

impl ReminderColumns<'_> {
    pub fn is_empty(&self) -> bool {
        self.left.is_empty() && self.right.is_empty()
    }

    pub fn len(&self) -> usize {
        self.left.len() + self.right.len()
    }
}

/// First `max_items` open items in file order, left column filled first.
/// Capacities are ceil(K/2) left and floor(K/2) right.
pub fn select_columns(items: &[ReminderItem], max_items: usize) -> ReminderColumns<'_> {
    let left_cap = max_items.div_ceil(2);
    let mut open = items.iter().filter(|i| i.status != ReminderStatus::Done).take(max_items);
    let left = open.by_ref().take(left_cap).collect();
    let right = open.collect();
    ReminderColumns { left, right }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_file() {
        let items = parse_reminders(
            "# groceries\n\n[ ] Milk\n[x] Bread\n[X] Eggs\n[!] Call plumber\nWater plants\n  [ ]   \n",
        );
        assert_eq!(
            items,
            vec![
                ReminderItem::pending("Milk"),
                ReminderItem::new("Bread", ReminderStatus::Done),
                ReminderItem::new("Eggs", ReminderStatus::Done),
                ReminderItem::new("Call plumber", ReminderStatus::Priority),
                ReminderItem::pending("Water plants"),
            ]
        );
    }

    #[test]
    fn test_select_skips_done_and_caps() {
        let items: Vec<ReminderItem> = (0..10)
            .map(|i| {
                let status = if i % 3 == 0 { ReminderStatus::Done } else { ReminderStatus::Pending };
                ReminderItem::new(format!("item {}", i), status)
            })
            .collect();
        let cols = select_columns(&items, 5);
        let left: Vec<&str> = cols.left.iter().map(|i| i.text.as_str()).collect();
        let right: Vec<&str> = cols.right.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(left, vec!["item 1", "item 2", "item 4"]);
        assert_eq!(right, vec!["item 5", "item 7"]);
    }

    #[test]
    fn test_left_fills_first() {
        let items = vec![ReminderItem::pending("a"), ReminderItem::pending("b")];
        let cols = select_columns(&items, 6);
        assert_eq!(cols.left.len(), 2);
        assert!(cols.right.is_empty());
    }

    #[test]
    fn test_empty_selection() {
        let items = vec![ReminderItem::new("done", ReminderStatus::Done)];
        assert!(select_columns(&items, 6).is_empty());
        assert!(select_columns(&[], 6).is_empty());
    }

    #[test]
    fn test_display_line() {
        assert_eq!(ReminderItem::pending("Test").display_line(), "[ ] Test");
        assert_eq!(ReminderItem::new("Now", ReminderStatus::Priority).display_line(), "[!] Now");
    }
}
