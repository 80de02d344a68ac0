//! Cue playback and dispatch traits.
//!
//! - [`CuePlayer`] is the blocking audio collaborator: it resolves a cue to an
//!   asset and plays it to completion.
//! - [`CueSink`] is what the game loop talks to: a non-blocking request to
//!   play a cue at some point.

use crossbeam_channel::{Sender, TrySendError};

use super::cue::Cue;
use crate::core::CueError;

/// Blocking cue playback.
pub trait CuePlayer {
    /// Play a cue, returning once playback has finished.
    fn play(&mut self, cue: Cue) -> Result<(), CueError>;
}

impl<P: CuePlayer + ?Sized> CuePlayer for Box<P> {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        (**self).play(cue)
    }
}

/// Fire-and-forget cue requests.
///
/// Implementations must not block the caller on playback, and must not
/// report playback failures back to it.
pub trait CueSink {
    fn emit(&self, cue: Cue);
}

impl<S: CueSink + ?Sized> CueSink for &S {
    fn emit(&self, cue: Cue) {
        (**self).emit(cue)
    }
}

impl CueSink for Sender<Cue> {
    fn emit(&self, cue: Cue) {
        match self.try_send(cue) {
            Ok(()) => {}
            Err(TrySendError::Full(cue)) => log::warn!("cue queue full, dropping {cue}"),
            Err(TrySendError::Disconnected(cue)) => {
                log::warn!("cue receiver gone, dropping {cue}")
            }
        }
    }
}

/// Player that only logs cues. Used when no audio output is wanted.
#[derive(Clone, Debug, Default)]
pub struct SilentPlayer {
    played: u64,
}

impl SilentPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cues "played" so far.
    #[must_use]
    pub fn played(&self) -> u64 {
        self.played
    }
}

impl CuePlayer for SilentPlayer {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        self.played += 1;
        log::info!("[silent] {cue}");
        Ok(())
    }
}
