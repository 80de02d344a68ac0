//! Sound cues.
//!
//! The game loop emits cues through a [`CueSink`]; in a live session that is
//! a [`CueEmitter`], which plays them on a worker thread through a
//! [`CuePlayer`]. With the `audio` feature, `RodioPlayer` plays the cue files
//! on a real output device.

pub mod cue;
pub mod emitter;
pub mod player;
#[cfg(feature = "audio")]
pub mod rodio_player;

pub use cue::Cue;
pub use emitter::CueEmitter;
pub use player::{CuePlayer, CueSink, SilentPlayer};
#[cfg(feature = "audio")]
pub use rodio_player::{list_output_devices, RodioPlayer};
