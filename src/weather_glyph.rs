/*
 *  weather_glyph.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Weather icon atlas and condition keyword mapping
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

use crate::glyphs::Glyph;

pub const ICON_GRID: u32 = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WeatherIcon {
    Clear,
    PartlyCloudy,
    Cloudy,
    Rain,
    Snow,
    Thunderstorm,
    Fog,
}

/// Ordered keyword table; exact matches are tried over the whole table
/// before any substring match, and the first substring hit wins.
const CONDITION_KEYWORDS: &[(&str, WeatherIcon)] = &[
    ("thunderstorm", WeatherIcon::Thunderstorm),
    ("thunder", WeatherIcon::Thunderstorm),
    ("storm", WeatherIcon::Thunderstorm),
    ("lightning", WeatherIcon::Thunderstorm),
    ("snow", WeatherIcon::Snow),
    ("snowy", WeatherIcon::Snow),
    ("sleet", WeatherIcon::Snow),
    ("flurries", WeatherIcon::Snow),
    ("ice", WeatherIcon::Snow),
    ("hail", WeatherIcon::Snow),
    ("rain", WeatherIcon::Rain),
    ("rainy", WeatherIcon::Rain),
    ("drizzle", WeatherIcon::Rain),
    ("showers", WeatherIcon::Rain),
    ("fog", WeatherIcon::Fog),
    ("foggy", WeatherIcon::Fog),
    ("mist", WeatherIcon::Fog),
    ("haze", WeatherIcon::Fog),
    ("partly cloudy", WeatherIcon::PartlyCloudy),
    ("partly sunny", WeatherIcon::PartlyCloudy),
    ("mostly sunny", WeatherIcon::PartlyCloudy),
    ("mostly clear", WeatherIcon::PartlyCloudy),
    ("mainly clear", WeatherIcon::PartlyCloudy),
    ("partly", WeatherIcon::PartlyCloudy),
    ("mostly cloudy", WeatherIcon::Cloudy),
    ("cloudy", WeatherIcon::Cloudy),
    ("cloud", WeatherIcon::Cloudy),
    ("overcast", WeatherIcon::Cloudy),
    ("clear", WeatherIcon::Clear),
    ("sunny", WeatherIcon::Clear),
    ("fair", WeatherIcon::Clear),
];

impl WeatherIcon {
    /// Map a free-text condition to an icon.
    ///
    /// Empty text is Clear, anything unrecognised falls back to Cloudy.
    pub fn for_condition(condition: &str) -> WeatherIcon {
        let key = condition.trim().to_lowercase();
        if key.is_empty() {
            return WeatherIcon::Clear;
        }
        if let Some((_, icon)) = CONDITION_KEYWORDS.iter().find(|(k, _)| *k == key) {
            return *icon;
        }
        CONDITION_KEYWORDS
            .iter()
            .find(|(k, _)| key.contains(k))
            .map(|(_, icon)| *icon)
            .unwrap_or(WeatherIcon::Cloudy)
    }

    pub fn glyph(&self) -> &'static Glyph {
        match self {
            WeatherIcon::Clear => &CLEAR,
            WeatherIcon::PartlyCloudy => &PARTLY_CLOUDY,
            WeatherIcon::Cloudy => &CLOUDY,
            WeatherIcon::Rain => &RAIN,
            WeatherIcon::Snow => &SNOW,
            WeatherIcon::Thunderstorm => &THUNDERSTORM,
            WeatherIcon::Fog => &FOG,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            WeatherIcon::Clear => "clear",
            WeatherIcon::PartlyCloudy => "partly cloudy",
            WeatherIcon::Cloudy => "cloudy",
            WeatherIcon::Rain => "rain",
            WeatherIcon::Snow => "snow",
            WeatherIcon::Thunderstorm => "thunderstorm",
            WeatherIcon::Fog => "fog",
        }
    }
}

const CLEAR: Glyph = Glyph::new(ICON_GRID, &[
    0b0000000110000000,
    0b0000000110000000,
    0b0011000000001100,
    0b0011001111001100,
    0b0000011111100000,
    0b0000111111110000,
    0b0000111111110000,
    0b1100111111110011,
    0b1100111111110011,
    0b0000111111110000,
    0b0000111111110000,
    0b0000011111100000,
    0b0011001111001100,
    0b0011000000001100,
    0b0000000110000000,
    0b0000000110000000,
]);

const PARTLY_CLOUDY: Glyph = Glyph::new(ICON_GRID, &[
    0b0001000000000000,
    0b1001001000000000,
    0b0111110000000000,
    0b0111111000000000,
    0b1111110011110000,
    0b0111100111111000,
    0b0100011111111000,
    0b0001111111111100,
    0b0011111111111110,
    0b0111111111111111,
    0b0111111111111111,
    0b0011111111111110,
    0b0000000000000000,
    0b0000000000000000,
    0b0000000000000000,
    0b0000000000000000,
]);

const CLOUDY: Glyph = Glyph::new(ICON_GRID, &[
    0b0000000000000000,
    0b0000000000000000,
    0b0000000000000000,
    0b0000000000000000,
    0b0000001111000000,
    0b0000011111100000,
    0b0000111111110000,
    0b0011111111111000,
    0b0111111111111100,
    0b1111111111111110,
    0b1111111111111111,
    0b1111111111111111,
    0b0111111111111110,
    0b0000000000000000,
    0b0000000000000000,
    0b0000000000000000,
]);

const RAIN: Glyph = Glyph::new(ICON_GRID, &[
    0b0000000000000000,
    0b0000001111000000,
    0b0000011111100000,
    0b0000111111110000,
    0b0011111111111000,
    0b0111111111111100,
    0b1111111111111110,
    0b1111111111111111,
    0b0111111111111110,
    0b0000000000000000,
    0b0010001000100010,
    0b0100010001000100,
    0b0000000000000000,
    0b0010001000100010,
    0b0100010001000100,
    0b0000000000000000,
]);

const SNOW: Glyph = Glyph::new(ICON_GRID, &[
    0b0000000000000000,
    0b0000001111000000,
    0b0000011111100000,
    0b0000111111110000,
    0b0011111111111000,
    0b0111111111111100,
    0b1111111111111110,
    0b1111111111111111,
    0b0111111111111110,
    0b0000000000000000,
    0b0100010001000100,
    0b1110111011101110,
    0b0100010001000100,
    0b0000000000000000,
    0b0001000100010000,
    0b0000000000000000,
]);

const THUNDERSTORM: Glyph = Glyph::new(ICON_GRID, &[
    0b0000000000000000,
    0b0000001111000000,
    0b0000011111100000,
    0b0000111111110000,
    0b0011111111111000,
    0b0111111111111100,
    0b1111111111111110,
    0b1111111111111111,
    0b0111111111111110,
    0b0000000111000000,
    0b0000001110000000,
    0b0000011111110000,
    0b0000000011100000,
    0b0000000111000000,
    0b0000001100000000,
    0b0000010000000000,
]);

const FOG: Glyph = Glyph::new(ICON_GRID, &[
    0b0000000000000000,
    0b0000000000000000,
    0b1111111111110000,
    0b0000000000000000,
    0b0000000000000000,
    0b0011111111111111,
    0b0000000000000000,
    0b0000000000000000,
    0b1111111111111100,
    0b0000000000000000,
    0b0000000000000000,
    0b0011111111111100,
    0b0000000000000000,
    0b0000000000000000,
    0b1111111111110000,
    0b0000000000000000,
]);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_matches() {
        assert_eq!(WeatherIcon::for_condition("Clear"), WeatherIcon::Clear);
        assert_eq!(WeatherIcon::for_condition("Partly Cloudy"), WeatherIcon::PartlyCloudy);
        assert_eq!(WeatherIcon::for_condition("Mainly Clear"), WeatherIcon::PartlyCloudy);
        assert_eq!(WeatherIcon::for_condition("Mostly Cloudy"), WeatherIcon::Cloudy);
        assert_eq!(WeatherIcon::for_condition("  overcast "), WeatherIcon::Cloudy);
        assert_eq!(WeatherIcon::for_condition("FOG"), WeatherIcon::Fog);
    }

    #[test]
    fn test_substring_matches() {
        assert_eq!(WeatherIcon::for_condition("Light Rain"), WeatherIcon::Rain);
        assert_eq!(WeatherIcon::for_condition("Snow Showers"), WeatherIcon::Snow);
        assert_eq!(WeatherIcon::for_condition("Thunderstorm with Hail"), WeatherIcon::Thunderstorm);
        assert_eq!(WeatherIcon::for_condition("Dense Drizzle"), WeatherIcon::Rain);
        assert_eq!(WeatherIcon::for_condition("Depositing rime fog"), WeatherIcon::Fog);
    }

    #[test]
    fn test_fallbacks() {
        assert_eq!(WeatherIcon::for_condition(""), WeatherIcon::Clear);
        assert_eq!(WeatherIcon::for_condition("   "), WeatherIcon::Clear);
        assert_eq!(WeatherIcon::for_condition("volcanic ash"), WeatherIcon::Cloudy);
    }

    #[test]
    fn test_icons_are_square_and_nonempty() {
        for icon in [
            WeatherIcon::Clear,
            WeatherIcon::PartlyCloudy,
            WeatherIcon::Cloudy,
            WeatherIcon::Rain,
            WeatherIcon::Snow,
            WeatherIcon::Thunderstorm,
            WeatherIcon::Fog,
        ] {
            let g = icon.glyph();
            assert_eq!(g.cols(), ICON_GRID);
            assert_eq!(g.rows(), ICON_GRID, "{}", icon.name());
            assert!((0..ICON_GRID).any(|r| (0..ICON_GRID).any(|c| g.is_on(c, r))));
        }
    }
}
