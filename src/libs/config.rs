use super::face::Point;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::env::var;
use std::path::{Path, PathBuf};
use std::time::Duration;

const MIN_INTERVAL_MS: u64 = 10;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TickSource {
    /// tokio worker thread, marshaled onto the main loop over a channel
    #[default]
    Tokio,
    /// glib timeout on the main loop
    Glib,
}

/// Dial dimensions in logical units. The dial scales the whole face to its
/// allocation, so only the proportions matter.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct FaceLayout {
    pub radius: f64,
    pub center_x: f64,
    pub center_y: f64,
    pub hour_mark_radius: f64,
    pub hour_mark_length: f64,
    pub hour_mark_width: f64,
    pub minute_mark_radius: f64,
    pub minute_mark_length: f64,
    pub minute_mark_width: f64,
    pub numeral_radius: f64,
    pub numeral_size: f64,
    pub hour_hand_length: f64,
    pub minute_hand_length: f64,
    pub second_hand_length: f64,
}

impl Default for FaceLayout {
    fn default() -> Self {
        Self {
            radius: 150.0,
            center_x: 150.0,
            center_y: 150.0,
            hour_mark_radius: 135.0,
            hour_mark_length: 15.0,
            hour_mark_width: 3.0,
            minute_mark_radius: 140.0,
            minute_mark_length: 8.0,
            minute_mark_width: 2.0,
            numeral_radius: 115.0,
            numeral_size: 16.0,
            hour_hand_length: 70.0,
            minute_hand_length: 100.0,
            second_hand_length: 120.0,
        }
    }
}

impl FaceLayout {
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub tick_source: TickSource,
    pub interval_ms: u64,
    pub show_clock: bool,
    pub layer_shell: bool,
    pub numeral_font: String,
    pub layout: FaceLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tick_source: TickSource::default(),
            interval_ms: 100,
            show_clock: true,
            layer_shell: false,
            numeral_font: "Google Sans Code".to_string(),
            layout: FaceLayout::default(),
        }
    }
}

impl Config {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms.max(MIN_INTERVAL_MS))
    }

    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("invalid clock configuration")
    }

    /// `Ok(None)` when there is no file at `path`.
    pub fn read(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("could not read {}", path.display()))?;
        Self::parse(&json)
            .with_context(|| format!("in {}", path.display()))
            .map(Some)
    }

    /// Loads the user's config, falling back to defaults on any problem.
    pub fn load() -> Self {
        let Some(path) = default_path() else {
            log::info!("no config directory, using defaults");
            return Self::default();
        };
        match Self::read(&path) {
            Ok(Some(config)) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Ok(None) => {
                log::info!("{} not found, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("{err:#}; using defaults");
                Self::default()
            }
        }
    }
}

pub fn default_path() -> Option<PathBuf> {
    let mut dir = match var("XDG_CONFIG_HOME") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => {
            let mut home = PathBuf::from(var("HOME").ok()?);
            home.push(".config");
            home
        }
    };
    dir.push("gtk-clock");
    dir.push("config.json");
    Some(dir)
}
