//! User settings persisted as JSON in the platform config directory.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use crate::core::scheduler::{clamp_interval_ms, DEFAULT_INTERVAL_MS};
use crate::core::sink::NoteDuration;
use crate::core::tuning::FretRange;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub interval_ms: u64,
    pub fret_range: FretRange,
    pub volume: f32,
    pub note_duration: NoteDuration,
    pub tempo_bpm: f32,
    pub reveal_answer: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_INTERVAL_MS,
            fret_range: FretRange::default(),
            volume: 0.5,
            note_duration: NoteDuration::Eighth,
            tempo_bpm: 120.0,
            reveal_answer: true,
        }
    }
}

impl AppSettings {
    /// Pull every value back into the range the rest of the app accepts.
    pub fn sanitized(mut self) -> Self {
        self.interval_ms = clamp_interval_ms(self.interval_ms.min(i64::MAX as u64) as i64);
        self.fret_range = FretRange::clamped(self.fret_range.ceiling());
        self.volume = if self.volume.is_finite() { self.volume.clamp(0.0, 1.0) } else { 0.5 };
        self.tempo_bpm = if self.tempo_bpm.is_finite() { self.tempo_bpm.clamp(20.0, 300.0) } else { 120.0 };
        self
    }

    pub fn settings_dir() -> Result<PathBuf> {
        let mut path = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        path.push("fret-trainer");
        Ok(path)
    }

    /// Load from the default location, falling back to defaults on any problem.
    pub fn load_or_default() -> Self {
        let loaded = Self::settings_dir().and_then(|dir| Self::load_from(&dir));
        match loaded {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings: {:#}", e);
                Self::default()
            }
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::settings_dir()?).map(|_| ())
    }

    /// Read `settings.json` from `dir`. A missing file yields defaults.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(SETTINGS_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let file = File::open(&path)
            .with_context(|| format!("Failed to open {}", path.display()))?;
        let settings: Self = serde_json::from_reader(file)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(settings.sanitized())
    }

    pub fn save_to(&self, dir: &Path) -> Result<PathBuf> {
        fs::create_dir_all(dir)
            .context("Failed to create settings directory")?;

        let path = dir.join(SETTINGS_FILE);
        let file = File::create(&path)
            .context("Failed to create settings file")?;
        serde_json::to_writer_pretty(file, self)
            .context("Failed to write settings")?;
        Ok(path)
    }
}
