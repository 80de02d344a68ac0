//! Error types.
//!
//! None of these are fatal to a running game: cue errors are logged by the
//! cue worker and configuration/frame errors surface to the host before or
//! between ticks.

use std::path::PathBuf;

use thiserror::Error;

use crate::cues::Cue;

/// Failure to play a sound cue.
#[derive(Debug, Error)]
pub enum CueError {
    /// The cue's asset could not be opened or decoded.
    #[error("cue {cue} asset unavailable at {}: {reason}", path.display())]
    AssetUnavailable {
        cue: Cue,
        path: PathBuf,
        reason: String,
    },

    /// The output device failed while playing the cue.
    #[error("cue {cue} playback failed: {reason}")]
    PlaybackFailure { cue: Cue, reason: String },

    /// No usable output device.
    #[error("output device unavailable: {0}")]
    DeviceUnavailable(String),
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Malformed pose frame input.
#[derive(Debug, Error)]
pub enum FrameError {
    #[error("failed to read frame: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed frame on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
