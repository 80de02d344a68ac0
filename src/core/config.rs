//! Game configuration types.
//!
//! - `GameConfig`: movement detection and light timing parameters
//! - `AudioConfig`: where cue assets live and which device plays them
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```
//! use red_light::core::GameConfig;
//!
//! let config: GameConfig = serde_json::from_str(r#"{"movement_threshold": 80.0}"#).unwrap();
//! assert_eq!(config.movement_threshold, 80.0);
//! assert_eq!(config.buffer_size, 10);
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::error::ConfigError;
use crate::cues::Cue;

/// Samples kept per joint series.
pub const DEFAULT_BUFFER_SIZE: usize = 10;
/// Pixel delta from the joint average that counts as movement.
pub const DEFAULT_MOVEMENT_THRESHOLD: f32 = 50.0;
/// Shortest phase dwell, in ticks (inclusive).
pub const DEFAULT_MIN_TIME_WAIT: i32 = 1;
/// Longest phase dwell, in ticks (exclusive).
pub const DEFAULT_MAX_TIME_WAIT: i32 = 50;
/// Grace ticks after entering red.
pub const DEFAULT_RED_TRANSITION_WAIT: i32 = 1;
/// Pending cues the worker queue holds before dropping new ones.
pub const DEFAULT_CUE_QUEUE_CAPACITY: usize = 4;

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window length of each joint's running average.
    pub buffer_size: usize,

    /// Movement threshold in frame pixels, compared per axis.
    pub movement_threshold: f32,

    /// Lower bound of the phase dwell draw (inclusive).
    pub min_time_wait: i32,

    /// Upper bound of the phase dwell draw (exclusive).
    pub max_time_wait: i32,

    /// Ticks after entering red during which movement is ignored.
    pub red_transition_wait: i32,

    /// Seed for the dwell RNG. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Cue playback settings.
    pub audio: AudioConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            buffer_size: DEFAULT_BUFFER_SIZE,
            movement_threshold: DEFAULT_MOVEMENT_THRESHOLD,
            min_time_wait: DEFAULT_MIN_TIME_WAIT,
            max_time_wait: DEFAULT_MAX_TIME_WAIT,
            red_transition_wait: DEFAULT_RED_TRANSITION_WAIT,
            seed: None,
            audio: AudioConfig::default(),
        }
    }
}

impl GameConfig {
    /// Create a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Set the running-average window length.
    #[must_use]
    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the movement threshold.
    #[must_use]
    pub fn with_movement_threshold(mut self, threshold: f32) -> Self {
        self.movement_threshold = threshold;
        self
    }

    /// Set the dwell bounds `[min, max)`.
    #[must_use]
    pub fn with_time_wait(mut self, min: i32, max: i32) -> Self {
        self.min_time_wait = min;
        self.max_time_wait = max;
        self
    }

    /// Set the red grace period.
    #[must_use]
    pub fn with_red_transition_wait(mut self, ticks: i32) -> Self {
        self.red_transition_wait = ticks;
        self
    }

    /// Set the dwell RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the audio settings.
    #[must_use]
    pub fn with_audio(mut self, audio: AudioConfig) -> Self {
        self.audio = audio;
        self
    }

    /// Check that the values describe a playable game.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_size == 0 {
            return Err(ConfigError::Invalid(
                "buffer_size must be at least 1".to_string(),
            ));
        }
        if !self.movement_threshold.is_finite() || self.movement_threshold < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "movement_threshold must be a non-negative number, got {}",
                self.movement_threshold
            )));
        }
        if self.min_time_wait >= self.max_time_wait {
            return Err(ConfigError::Invalid(format!(
                "dwell range [{}, {}) is empty",
                self.min_time_wait, self.max_time_wait
            )));
        }
        if self.red_transition_wait < 0 {
            return Err(ConfigError::Invalid(format!(
                "red_transition_wait must not be negative, got {}",
                self.red_transition_wait
            )));
        }
        if self.audio.queue_capacity == 0 {
            return Err(ConfigError::Invalid(
                "audio.queue_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// File names of the four cues, relative to the asset directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CueFiles {
    pub intro: String,
    pub red_light: String,
    pub green_light: String,
    pub gunshot: String,
}

impl Default for CueFiles {
    fn default() -> Self {
        Self {
            intro: Cue::Intro.default_file_name().to_string(),
            red_light: Cue::RedLight.default_file_name().to_string(),
            green_light: Cue::GreenLight.default_file_name().to_string(),
            gunshot: Cue::Gunshot.default_file_name().to_string(),
        }
    }
}

impl CueFiles {
    /// File name configured for a cue.
    #[must_use]
    pub fn get(&self, cue: Cue) -> &str {
        match cue {
            Cue::Intro => &self.intro,
            Cue::RedLight => &self.red_light,
            Cue::GreenLight => &self.green_light,
            Cue::Gunshot => &self.gunshot,
        }
    }
}

/// Cue playback settings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Directory holding the cue files.
    pub asset_dir: PathBuf,

    /// Output device, by index or by name substring. `None` uses the default.
    pub output_device: Option<String>,

    /// Pending cues held by the worker queue.
    pub queue_capacity: usize,

    /// Per-cue file names.
    pub files: CueFiles,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            asset_dir: PathBuf::from("sounds"),
            output_device: None,
            queue_capacity: DEFAULT_CUE_QUEUE_CAPACITY,
            files: CueFiles::default(),
        }
    }
}

impl AudioConfig {
    /// Set the asset directory.
    #[must_use]
    pub fn with_asset_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.asset_dir = dir.into();
        self
    }

    /// Select an output device by index or name substring.
    #[must_use]
    pub fn with_output_device(mut self, device: impl Into<String>) -> Self {
        self.output_device = Some(device.into());
        self
    }

    /// Full path of a cue's asset.
    #[must_use]
    pub fn resolve(&self, cue: Cue) -> PathBuf {
        self.asset_dir.join(self.files.get(cue))
    }
}
