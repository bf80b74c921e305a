use serde_derive::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::warn;

use crate::error::Error;
use crate::render::MIN_GRID_STEP;
use crate::track::{default_specs, TrackSpec};

#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub scene: SceneConfig,
    pub playback: PlaybackConfig,
    pub canvas: CanvasConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct SceneConfig {
    /// Simulated sequence length
    pub total_frames: u32,
    /// Frame rate used for frame timestamps
    pub fps: f32,
    /// Fixes the random walk when set
    pub seed: Option<u64>,
    pub tracks: Vec<TrackSpec>,
}
impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            total_frames: 120,
            fps: 24.0,
            seed: None,
            tracks: default_specs(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PlaybackConfig {
    pub detection_interval_ms: u64,
    pub tracking_interval_ms: u64,
}
impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            detection_interval_ms: 100,
            tracking_interval_ms: 80,
        }
    }
}

impl PlaybackConfig {
    #[inline]
    pub fn detection_interval(&self) -> Duration {
        Duration::from_millis(self.detection_interval_ms)
    }

    #[inline]
    pub fn tracking_interval(&self) -> Duration {
        Duration::from_millis(self.tracking_interval_ms)
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
    /// Background grid spacing in px
    pub grid_step: f32,
    /// Samples drawn behind the current position
    pub trail_len: usize,
}
impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 640.0,
            height: 400.0,
            grid_step: 30.0,
            trail_len: 30,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ExportConfig {
    pub path: String,
}
impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: "tracking_results.csv".into(),
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), Error> {
        if self.scene.total_frames == 0 {
            return Err(Error::Config("scene.total_frames must be at least 1".into()));
        }

        if self.scene.fps <= 0.0 {
            return Err(Error::Config("scene.fps must be positive".into()));
        }

        if self.playback.detection_interval_ms == 0 || self.playback.tracking_interval_ms == 0 {
            return Err(Error::Config("playback intervals must be positive".into()));
        }

        let c = &self.canvas;
        if !(c.width.is_finite() && c.height.is_finite()) || c.width <= 0.0 || c.height <= 0.0 {
            return Err(Error::Config("canvas dimensions must be positive".into()));
        }

        if !c.grid_step.is_finite() || c.grid_step < MIN_GRID_STEP {
            return Err(Error::Config(format!(
                "canvas.grid_step must be at least {}",
                MIN_GRID_STEP
            )));
        }

        for spec in &self.scene.tracks {
            spec.validate()?;
        }

        Ok(())
    }
}

fn env_source() -> config::Environment {
    config::Environment::with_prefix("SIMTRACK")
        .separator("__")
        .try_parsing(true)
}

/// Layers `simtrack.toml` (or `path`) and `SIMTRACK__*` env vars over the
/// built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, Error> {
    load_layered(path, env_source())
}

/// Like [`load_config`], but any failure falls back to the defaults.
pub fn load_or_default(path: Option<&Path>) -> AppConfig {
    load_config(path).unwrap_or_else(|e| {
        warn!("Config load failed ({}), using defaults", e);
        AppConfig::default()
    })
}

fn load_layered(path: Option<&Path>, env: config::Environment) -> Result<AppConfig, Error> {
    let file = match path {
        Some(p) => config::File::from(p).required(true),
        None => config::File::with_name("simtrack").required(false),
    };

    let cfg = config::Config::builder()
        .add_source(file)
        .add_source(env)
        .build()?;

    let app: AppConfig = cfg.try_deserialize()?;
    app.validate()?;

    Ok(app)
}
