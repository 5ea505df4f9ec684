/*
 *  main.rs
 *
 *  InkBoard - paper that keeps time
 *  (c) 2020-26 Stuart Hunter
 *
 *  One pass per invocation; the scheduler lives outside
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

use anyhow::{bail, Context, Result};
use chrono::Local;
use env_logger::Env;
use log::{error, info};
use std::fs;
use std::path::Path;

use inkboard::artwork;
use inkboard::config::{self, Command, Config};
use inkboard::dashboard;
use inkboard::postprocess::Pipeline;

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

fn render(cfg: &Config, now: chrono::NaiveDateTime) -> Result<()> {
    info!("composing dashboard for {}", now.format("%Y-%m-%d %H:%M"));
    let outcome = dashboard::run_pass(cfg, now).context("composition pass failed")?;
    if !outcome.report.notices.is_empty() {
        info!("{} notice(s) this pass", outcome.report.notices.len());
    }
    dashboard::publish_pass(cfg, &outcome)
        .with_context(|| format!("publishing {}", cfg.output.path.display()))?;
    info!("published {}", cfg.output.path.display());
    Ok(())
}

fn prepare(cfg: &Config, inputs: &[std::path::PathBuf], out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("creating {}", out_dir.display()))?;
    let pipeline = Pipeline::from_config(&cfg.eink);
    let (w, h) = (cfg.display.width, cfg.display.height);
    info!("preparing {} image(s) at {}x{} into {}", inputs.len(), w, h, out_dir.display());
    let results = artwork::prepare_many(inputs, out_dir, w, h, &pipeline);
    let failed = results.iter().filter(|(_, r)| r.is_err()).count();
    if failed > 0 {
        bail!("{} of {} image(s) could not be prepared", failed, results.len());
    }
    Ok(())
}

fn main() -> Result<()> {
    let (cfg, cli) = config::load().context("loading configuration")?;

    env_logger::Builder::from_env(Env::default().default_filter_or(if cli.debug { "debug" } else { "info" }))
        .format_timestamp_secs()
        .init();

    info!("{} v.{} built {} ({})", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), BUILD_DATE, BUILD_PROFILE);

    if cli.dump_config {
        println!("{}", config::dump(&cfg)?);
        return Ok(());
    }

    let result = match cli.command.as_ref().unwrap_or(&Command::Render) {
        Command::Render => render(&cfg, cli.now.unwrap_or_else(|| Local::now().naive_local())),
        Command::Prepare { inputs, out_dir } => prepare(&cfg, inputs, out_dir),
    };
    if let Err(e) = &result {
        error!("{:#}", e);
    }
    result
}
