/*
 *  func_timer.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  Scope timer for the slow stages of a pass
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
use std::time::{Duration, Instant};

/// Logs how long a pipeline stage took when it goes out of scope
pub struct FunctionTimer {
    stage: &'static str,
    start: Instant,
}

impl FunctionTimer {
    pub fn new(stage: &'static str) -> Self {
        FunctionTimer {
            stage,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for FunctionTimer {
    fn drop(&mut self) {
        debug!("{} took {:?}", self.stage, self.start.elapsed());
    }
}
