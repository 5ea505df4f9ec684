/*
 *  display/components/mod.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Zone renderers
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

pub mod artwork;
pub mod calendar;
pub mod clock;
pub mod reminders;
pub mod weather;

// Re-exports
pub use artwork::ArtworkDisplay;
pub use calendar::CalendarDisplay;
pub use clock::ClockDisplay;
pub use reminders::RemindersDisplay;
pub use weather::WeatherDisplay;
