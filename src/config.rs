use serde::{Deserialize, Serialize};
use chrono::NaiveDateTime;
use clap::{ArgAction, Parser, Subcommand, ValueHint};
use dirs_next::home_dir;
use std::{fs, path::{Path, PathBuf}};
use thiserror::Error;

use crate::display::compositor::CompositorOptions;
use crate::display::layout::{ArtworkPlacement, LayoutSpec};
use crate::dither::{DitherMode, MAX_LEVELS, MIN_LEVELS};
use crate::postprocess::DEFAULT_CONTRAST;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Top-level app configuration. Every section falls back to its defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub weather: WeatherConfig,
    pub reminders: RemindersConfig,
    pub artwork: ArtworkConfig,
    pub eink: EinkConfig,
    pub output: OutputConfig,
}

/// panel geometry & presentation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub width: u32,
    pub height: u32,
    pub margin: u32,
    pub gutter: u32,
    pub format_24h: bool,
    pub refresh_minutes: u32,
    pub exit_hint: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            width: 1236,
            height: 1648,
            margin: 30,
            gutter: 0,
            format_24h: false,
            refresh_minutes: 15,
            exit_hint: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct WeatherConfig {
    /// JSON snapshot dropped by an external fetcher
    pub snapshot: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemindersConfig {
    pub enabled: bool,
    pub file: Option<PathBuf>,
    pub max_items: usize,
}

impl Default for RemindersConfig {
    fn default() -> Self {
        RemindersConfig { enabled: true, file: None, max_items: 6 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtworkConfig {
    pub dir: Option<PathBuf>,
    /// subdirectories of `dir` to draw from, empty = all of it
    pub categories: Vec<String>,
    pub state_file: Option<PathBuf>,
    pub rotation_interval: u32,
    pub placement: ArtworkPlacement,
}

impl Default for ArtworkConfig {
    fn default() -> Self {
        ArtworkConfig {
            dir: None,
            categories: Vec::new(),
            state_file: None,
            rotation_interval: 1,
            placement: ArtworkPlacement::None,
        }
    }
}

pub const DEFAULT_STATE_FILE: &str = ".inkboard-rotation.json";

impl ArtworkConfig {
    /// Rotation state lives beside the artwork unless configured otherwise
    pub fn state_path(&self) -> Option<PathBuf> {
        self.state_file
            .clone()
            .or_else(|| self.dir.as_ref().map(|d| d.join(DEFAULT_STATE_FILE)))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EinkConfig {
    pub contrast: f32,
    pub gamma: f32,
    pub levels: u16,
    pub dither: DitherMode,
    pub sharpen: bool,
}

impl Default for EinkConfig {
    fn default() -> Self {
        EinkConfig {
            contrast: DEFAULT_CONTRAST,
            gamma: 1.0,
            levels: 16,
            dither: DitherMode::FloydSteinberg,
            sharpen: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig { path: PathBuf::from("dashboard.png") }
    }
}

impl Config {
    pub fn layout_spec(&self) -> LayoutSpec {
        let d = &self.display;
        LayoutSpec::new(d.width, d.height, d.margin)
            .with_gutter(d.gutter)
            .with_artwork(self.artwork.placement)
    }

    pub fn compositor_options(&self) -> CompositorOptions {
        CompositorOptions {
            format_24h: self.display.format_24h,
            refresh_minutes: self.display.refresh_minutes,
            max_reminders: self.reminders.max_items,
            exit_hint: self.display.exit_hint,
        }
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone)]
#[command(name = "inkboard", version, about = "InkBoard e-ink dashboard compositor")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// debug logging
    #[arg(short = 'v', long, global = true, action = ArgAction::SetTrue)]
    pub debug: bool,
    /// where to publish the dashboard PNG
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub output: Option<PathBuf>,
    /// reference time instead of the local clock, YYYY-MM-DDTHH:MM[:SS]
    #[arg(long, global = true, value_parser = parse_now)]
    pub now: Option<NaiveDateTime>,
    /// weather snapshot JSON
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub weather: Option<PathBuf>,
    /// reminders text file
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub reminders: Option<PathBuf>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, global = true, action = ArgAction::SetTrue)]
    pub dump_config: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand, Clone, PartialEq, Eq)]
pub enum Command {
    /// Compose and publish one dashboard (default)
    Render,
    /// Convert source images into rotation-ready grayscale PNGs
    Prepare {
        #[arg(required = true, value_hint = ValueHint::FilePath)]
        inputs: Vec<PathBuf>,
        #[arg(long, value_hint = ValueHint::DirPath)]
        out_dir: PathBuf,
    },
}

pub fn parse_now(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM[:SS]: {e}"))
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Config, Cli), ConfigError> {
    let cli = Cli::parse();
    let cfg = load_with(&cli)?;
    Ok((cfg, cli))
}

/// Layer defaults, YAML and the given CLI overrides, then validate.
pub fn load_with(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults come from serde(default), 2) YAML file (explicit path or search)
    let mut cfg = if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            read_yaml(p)?
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        read_yaml(&p)?
    } else {
        Config::default()
    };

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    validate(&cfg)?;
    Ok(cfg)
}

/// Pretty YAML of effective config (nice for debugging)
pub fn dump(cfg: &Config) -> Result<String, ConfigError> {
    Ok(serde_yaml::to_string(cfg)?)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/inkboard/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/inkboard/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/inkboard.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["inkboard.yaml", "config.yaml", "config/inkboard.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

pub fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    parse_yaml(&s)
}

pub fn parse_yaml(s: &str) -> Result<Config, ConfigError> {
    // an empty file is valid and means all defaults
    if s.trim().is_empty() {
        return Ok(Config::default());
    }
    Ok(serde_yaml::from_str(s)?)
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if let Some(p) = &cli.output    { cfg.output.path = p.clone(); }
    if let Some(p) = &cli.weather   { cfg.weather.snapshot = Some(p.clone()); }
    if let Some(p) = &cli.reminders {
        cfg.reminders.file = Some(p.clone());
        cfg.reminders.enabled = true;
    }
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    let d = &cfg.display;
    if d.width == 0 || d.height == 0 {
        return Err(ConfigError::Validation("display width/height must be > 0".into()));
    }
    if d.margin.saturating_mul(2) >= d.width || d.margin.saturating_mul(2) >= d.height {
        return Err(ConfigError::Validation("display margin must be under half of width and height".into()));
    }
    let e = &cfg.eink;
    if !(MIN_LEVELS..=MAX_LEVELS).contains(&e.levels) {
        return Err(ConfigError::Validation(format!("eink levels must be {MIN_LEVELS}..={MAX_LEVELS}")));
    }
    if !(e.contrast > 0.0 && e.contrast <= 4.0) {
        return Err(ConfigError::Validation("eink contrast must be in (0, 4]".into()));
    }
    if !(e.gamma > 0.0 && e.gamma.is_finite()) {
        return Err(ConfigError::Validation("eink gamma must be > 0".into()));
    }
    if cfg.reminders.max_items == 0 {
        return Err(ConfigError::Validation("reminders max_items must be >= 1".into()));
    }
    Ok(())
}
