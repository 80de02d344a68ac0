//! # red-light
//!
//! Game engine for a pose-tracked "red light, green light" motion game.
//!
//! A light alternates between green (move) and red (freeze) on a randomized
//! timer. While the light is red, every tracked player's joints are compared
//! with their recent average position, and anyone who moves too far is
//! eliminated with a gunshot cue.
//!
//! ## Design Principles
//!
//! 1. **Single owner**: one `GameLoop` owns all game state and is driven one
//!    frame at a time. No global state, no internal locking.
//!
//! 2. **Deterministic**: the dwell timer is the only random input and it comes
//!    from an injectable `DwellSource`, so a seed replays a session exactly.
//!
//! 3. **Audio never blocks play**: cues are queued to a worker thread; a
//!    failed or dropped cue is logged and the game carries on.
//!
//! ## Modules
//!
//! - `core`: subject/joint IDs, configuration, errors, RNG
//! - `phase`: red/green light controller
//! - `tracking`: joint averages, movement detection, eliminations
//! - `cues`: cue names, playback traits, the cue worker
//! - `game`: the per-frame game loop and JSON-lines frame input
//!
//! ## Example
//!
//! ```
//! use crossbeam_channel::unbounded;
//! use red_light::{Cue, GameConfig, GameLoop, GamePhase, SubjectId, TrackedSubject};
//!
//! let config = GameConfig::default().with_seed(7);
//! let (cues, played) = unbounded::<Cue>();
//! let mut game = GameLoop::from_config(&config, cues);
//!
//! let frame = vec![TrackedSubject::new(SubjectId::new(1)).with_keypoint(0, 320.0, 240.0)];
//! let report = game.tick(&frame);
//!
//! assert_eq!(report.phase, GamePhase::Green);
//! assert_eq!(played.try_recv(), Ok(Cue::GreenLight));
//! ```

pub mod core;
pub mod cues;
pub mod game;
pub mod phase;
pub mod tracking;

// Re-export commonly used types
pub use crate::core::{
    AudioConfig, ConfigError, CueError, CueFiles, DwellSource, FrameError, GameConfig, GameRng,
    JointId, JointKey, Keypoint, SubjectId, TrackedSubject,
};

pub use crate::cues::{Cue, CueEmitter, CuePlayer, CueSink, SilentPlayer};
#[cfg(feature = "audio")]
pub use crate::cues::{list_output_devices, RodioPlayer};

pub use crate::game::{Frame, FrameReader, GameLoop, TickReport};

pub use crate::phase::{GamePhase, LightPhaseController, PhaseEvent};

pub use crate::tracking::{Axis, EliminationRegistry, Movement, MovementTracker, RunningAverage};
