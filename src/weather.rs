/*
 *  weather.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Weather snapshot as dropped by an external fetcher
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

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::display::error::DashboardError;
use crate::weather_glyph::WeatherIcon;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TemperatureUnit {
    #[default]
    #[serde(alias = "f", alias = "fahrenheit", alias = "imperial")]
    F,
    #[serde(alias = "c", alias = "celsius", alias = "metric")]
    C,
}

impl TemperatureUnit {
    pub fn suffix(&self) -> &'static str {
        match self {
            TemperatureUnit::F => "°F",
            TemperatureUnit::C => "°C",
        }
    }
}

/// Current conditions, already in the display unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: f64,
    pub high: f64,
    pub low: f64,
    #[serde(default)]
    pub unit: TemperatureUnit,
    #[serde(default)]
    pub condition: String,
    /// WMO interpretation code, used when `condition` is blank
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precip_chance: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind: Option<String>,
}

impl WeatherSnapshot {
    pub fn new(temperature: f64, high: f64, low: f64, condition: impl Into<String>) -> Self {
        WeatherSnapshot {
            temperature,
            high,
            low,
            unit: TemperatureUnit::F,
            condition: condition.into(),
            code: None,
            description: None,
            precip_chance: None,
            wind: None,
        }
    }

    /// Condition text, falling back to the WMO description
    pub fn condition_text(&self) -> &str {
        if self.condition.trim().is_empty() {
            if let Some(desc) = self.code.and_then(wmo_description) {
                return desc;
            }
        }
        &self.condition
    }

    pub fn icon(&self) -> WeatherIcon {
        WeatherIcon::for_condition(self.condition_text())
    }

    /// Description line; explicit text wins, otherwise the condition title-cased
    pub fn description_text(&self) -> String {
        match &self.description {
            Some(d) if !d.trim().is_empty() => d.trim().to_string(),
            _ => title_case(self.condition_text()),
        }
    }

    pub fn temperature_text(&self) -> String {
        format!("{:.0}{}", self.temperature, self.unit.suffix())
    }

    pub fn high_low_text(&self) -> String {
        let u = self.unit.suffix();
        format!("H:{:.0}{} L:{:.0}{}", self.high, u, self.low, u)
    }

    /// Precipitation and wind lines, in that order
    pub fn extra_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if let Some(p) = self.precip_chance {
            lines.push(format!("Precip {}%", p.min(100)));
        }
        if let Some(w) = self.wind.as_deref().filter(|w| !w.trim().is_empty()) {
            lines.push(format!("Wind {}", w.trim()));
        }
        lines
    }

    pub fn from_json_str(text: &str) -> Result<Self, DashboardError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, DashboardError> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Read an optional snapshot; any failure leaves the zone on its placeholder
pub fn load_snapshot(path: Option<&Path>) -> Option<WeatherSnapshot> {
    let path = path?;
    match WeatherSnapshot::from_json_file(path) {
        Ok(snap) => {
            debug!("weather snapshot {}: {} {}", path.display(), snap.temperature_text(), snap.condition_text());
            Some(snap)
        }
        Err(e) => {
            warn!("weather snapshot {} unusable: {}", path.display(), e);
            None
        }
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(|c| c.to_lowercase())).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// WMO weather interpretation codes
pub fn wmo_description(code: u16) -> Option<&'static str> {
    let desc = match code {
        0 => "Clear",
        1 => "Mainly Clear",
        2 => "Partly Cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing Rime Fog",
        51 => "Light Drizzle",
        53 => "Moderate Drizzle",
        55 => "Dense Drizzle",
        61 => "Slight Rain",
        63 => "Moderate Rain",
        65 => "Heavy Rain",
        71 => "Slight Snow",
        73 => "Moderate Snow",
        75 => "Heavy Snow",
        77 => "Snow Grains",
        80 => "Slight Rain Showers",
        81 => "Moderate Rain Showers",
        82 => "Violent Rain Showers",
        85 => "Slight Snow Showers",
        86 => "Heavy Snow Showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with Slight Hail",
        99 => "Thunderstorm with Heavy Hail",
        _ => return None,
    };
    Some(desc)
}
