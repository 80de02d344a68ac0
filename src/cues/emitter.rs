//! Background cue playback.
//!
//! One worker thread owns the player (and with it the output device) and
//! plays queued cues one at a time, so cues never overlap. The game loop only
//! enqueues; a full queue drops the new cue rather than stall a tick.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use std::thread;

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use super::cue::Cue;
use super::player::{CuePlayer, CueSink};
use crate::core::CueError;

/// Handle to the cue worker thread.
#[derive(Debug)]
pub struct CueEmitter {
    tx: Option<Sender<Cue>>,
    handle: Option<thread::JoinHandle<()>>,
    dropped: Arc<AtomicU64>,
}

impl CueEmitter {
    /// Start the worker with a queue of `capacity` pending cues.
    ///
    /// The player is built by `factory` on the worker thread, since audio
    /// output streams usually cannot move between threads. If the factory
    /// fails the error is logged and every later cue is dropped.
    pub fn spawn<P, F>(capacity: usize, factory: F) -> Self
    where
        P: CuePlayer + 'static,
        F: FnOnce() -> Result<P, CueError> + Send + 'static,
    {
        let (tx, rx) = bounded(capacity.max(1));

        let handle = thread::Builder::new()
            .name("cue-player".to_string())
            .spawn(move || run_worker(factory, rx));
        let handle = match handle {
            Ok(handle) => Some(handle),
            Err(err) => {
                log::error!("failed to start cue worker: {err}");
                None
            }
        };

        Self {
            tx: Some(tx),
            handle,
            dropped: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Start the worker with an already-built player.
    pub fn with_player<P>(capacity: usize, player: P) -> Self
    where
        P: CuePlayer + Send + 'static,
    {
        Self::spawn(capacity, move || Ok(player))
    }

    /// Cues that could not be queued.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    /// Close the queue, let the worker finish what is queued, and join it.
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                log::error!("cue worker panicked");
            }
        }
    }
}

impl Drop for CueEmitter {
    fn drop(&mut self) {
        self.close();
    }
}

impl CueSink for CueEmitter {
    fn emit(&self, cue: Cue) {
        let Some(tx) = self.tx.as_ref() else {
            return;
        };

        match tx.try_send(cue) {
            Ok(()) => {}
            Err(TrySendError::Full(cue)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                log::warn!("cue worker busy, dropping {cue}");
            }
            Err(TrySendError::Disconnected(cue)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                log::debug!("cue worker not running, dropping {cue}");
            }
        }
    }
}

fn run_worker<P, F>(factory: F, rx: Receiver<Cue>)
where
    P: CuePlayer,
    F: FnOnce() -> Result<P, CueError>,
{
    let mut player = match factory() {
        Ok(player) => player,
        Err(err) => {
            log::error!("failed to open cue player: {err}");
            return;
        }
    };

    for cue in rx.iter() {
        match player.play(cue) {
            Ok(()) => log::info!("{cue} playback finished"),
            Err(err) => log::warn!("{err}"),
        }
    }
}
