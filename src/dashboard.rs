/*
 *  dashboard.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  One composition pass: gather inputs, compose, publish, advance rotation
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
use log::{debug, info, warn};
use std::path::PathBuf;

use crate::artwork::{self, ArtworkPool, RotationState};
use crate::config::{ArtworkConfig, Config};
use crate::display::compositor::{render_dashboard, DashboardInputs, RenderReport};
use crate::display::error::DashboardError;
use crate::display::layout::ArtworkPlacement;
use crate::func_timer::FunctionTimer;
use crate::output;
use crate::postprocess::{GrayscaleImage, Pipeline, QuantizedRaster};
use crate::reminders::{load_reminders, ReminderItem};
use crate::weather::load_snapshot;

/// Rotation step to persist once the pass has been published
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRotation {
    pub state_file: PathBuf,
    pub state: RotationState,
}

#[derive(Debug)]
pub struct PassOutcome {
    pub raster: QuantizedRaster,
    pub report: RenderReport,
    pub rotation: Option<PendingRotation>,
}

fn gather_reminders(cfg: &Config) -> Vec<ReminderItem> {
    if !cfg.reminders.enabled {
        return Vec::new();
    }
    let Some(path) = cfg.reminders.file.as_deref() else {
        return Vec::new();
    };
    load_reminders(path).unwrap_or_else(|e| {
        warn!("reminders {} unreadable: {}", path.display(), e);
        Vec::new()
    })
}

/// Pick and decode this pass's artwork; the rotation advances even when
/// the chosen file turns out to be unreadable so the pool cannot stall.
fn gather_artwork(art: &ArtworkConfig) -> (Option<GrayscaleImage>, Option<PendingRotation>) {
    if art.placement == ArtworkPlacement::None {
        return (None, None);
    }
    let Some(dir) = art.dir.as_deref() else {
        debug!("artwork placement {:?} without a directory", art.placement);
        return (None, None);
    };
    let pool = ArtworkPool::scan(dir, &art.categories);
    let state_file = art.state_path();
    let state = state_file.as_deref().map(RotationState::load).unwrap_or_default();

    let selection = match artwork::select(&pool, state, art.rotation_interval) {
        Ok(s) => s,
        Err(e) => {
            debug!("artwork selection: {}", e);
            return (None, None);
        }
    };
    info!("artwork {} of {}: {}", selection.index + 1, pool.len(), selection.path.display());
    let pending = state_file.map(|state_file| PendingRotation { state_file, state: selection.state });
    match artwork::load_gray(&selection.path) {
        Ok(img) => (Some(img), pending),
        Err(e) => {
            warn!("artwork {} unreadable: {}", selection.path.display(), e);
            (None, pending)
        }
    }
}

pub fn gather_inputs(cfg: &Config, now: NaiveDateTime) -> (DashboardInputs, Option<PendingRotation>) {
    let mut inputs = DashboardInputs::new(now);
    inputs.weather = load_snapshot(cfg.weather.snapshot.as_deref());
    inputs.reminders = gather_reminders(cfg);
    let (art, rotation) = gather_artwork(&cfg.artwork);
    inputs.artwork = art;
    (inputs, rotation)
}

/// Compose and post-process; nothing is written yet
pub fn run_pass(cfg: &Config, now: NaiveDateTime) -> Result<PassOutcome, DashboardError> {
    let _timer = FunctionTimer::new("pass");
    let (inputs, rotation) = gather_inputs(cfg, now);
    let pipeline = Pipeline::from_config(&cfg.eink);
    let (raster, report) = render_dashboard(&cfg.layout_spec(), cfg.compositor_options(), &pipeline, &inputs)?;
    Ok(PassOutcome { raster, report, rotation })
}

/// Publish the raster, then persist the rotation step
pub fn publish_pass(cfg: &Config, outcome: &PassOutcome) -> Result<(), DashboardError> {
    output::publish(&outcome.raster, &cfg.output.path)?;
    if let Some(pending) = &outcome.rotation {
        pending.state.save(&pending.state_file)?;
        debug!("rotation state {:?} saved to {}", pending.state, pending.state_file.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::compositor::Notice;
    use chrono::NaiveDate;
    use image::{GrayImage, Luma};
    use std::fs;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 4).unwrap().and_hms_opt(9, 41, 0).unwrap()
    }

    #[test]
    fn test_pass_without_inputs() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.output.path = dir.path().join("out/dashboard.png");
        let outcome = run_pass(&cfg, now()).unwrap();
        assert_eq!((outcome.raster.width(), outcome.raster.height()), (1236, 1648));
        assert!(outcome.rotation.is_none());
        publish_pass(&cfg, &outcome).unwrap();
        assert!(cfg.output.path.exists());
    }

    #[test]
    fn test_rotation_saved_after_publish() {
        let dir = tempfile::tempdir().unwrap();
        let art = dir.path().join("art");
        fs::create_dir_all(&art).unwrap();
        for name in ["a.png", "b.png"] {
            GrayImage::from_pixel(8, 8, Luma([90])).save(art.join(name)).unwrap();
        }
        let mut cfg = Config::default();
        cfg.output.path = dir.path().join("dashboard.png");
        cfg.artwork.dir = Some(art.clone());
        cfg.artwork.placement = ArtworkPlacement::Panel;

        let outcome = run_pass(&cfg, now()).unwrap();
        assert!(!outcome.report.notices.contains(&Notice::ArtworkUnavailable));
        let pending = outcome.rotation.clone().unwrap();
        assert!(!pending.state_file.exists());
        publish_pass(&cfg, &outcome).unwrap();
        assert_eq!(RotationState::load(&pending.state_file), RotationState { cursor: 1, calls: 0 });
    }

    #[test]
    fn test_disabled_reminders_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("todo.txt");
        fs::write(&file, "[ ] Test\n").unwrap();
        let mut cfg = Config::default();
        cfg.reminders.file = Some(file);
        assert_eq!(gather_inputs(&cfg, now()).0.reminders.len(), 1);
        cfg.reminders.enabled = false;
        assert!(gather_inputs(&cfg, now()).0.reminders.is_empty());
    }
}
