//! Core types: subject/joint IDs, configuration, errors, RNG.
//!
//! Everything here is independent of the game rules; the `phase`, `tracking`
//! and `game` modules build on it.

pub mod config;
pub mod error;
pub mod rng;
pub mod subject;

pub use config::{AudioConfig, CueFiles, GameConfig};
pub use error::{ConfigError, CueError, FrameError};
pub use rng::{DwellSource, GameRng};
pub use subject::{JointId, JointKey, Keypoint, SubjectId, TrackedSubject};
