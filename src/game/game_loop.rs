//! Per-frame game orchestration.

use serde::Serialize;

use crate::core::{DwellSource, GameConfig, GameRng, SubjectId, TrackedSubject};
use crate::cues::{Cue, CueSink};
use crate::phase::{GamePhase, LightPhaseController, PhaseEvent};
use crate::tracking::{EliminationRegistry, MovementTracker};

/// What happened on one tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u64,

    /// Phase after this tick's transition (if any).
    pub phase: GamePhase,

    /// Transition that happened on this tick.
    pub transition: Option<PhaseEvent>,

    /// Whether movement detection ran on this tick.
    pub evaluated: bool,

    /// Subjects eliminated on this tick, in frame order.
    pub eliminated: Vec<SubjectId>,

    /// Subjects skipped because they were already eliminated this round.
    pub skipped: Vec<SubjectId>,
}

/// A red light, green light session.
///
/// Owns the light controller, the joint averages and the elimination registry;
/// the host feeds it one frame of tracked subjects per [`tick`](Self::tick).
///
/// ## Tick order
///
/// 1. Advance the light timer. Entering red plays `red_light`; entering green
///    plays `green_light` and wipes all averages and eliminations.
/// 2. Count down the red grace period.
/// 3. If the light is red and the grace period is over, check every subject
///    not yet eliminated against its averages, eliminate movers, then fold
///    the frame into their averages. One `gunshot` plays if anyone moved.
pub struct GameLoop<S, R = GameRng> {
    lights: LightPhaseController<R>,
    tracker: MovementTracker,
    registry: EliminationRegistry,
    cues: S,
    ticks: u64,
    rounds: u64,
    total_eliminations: u64,
}

impl<S: CueSink> GameLoop<S, GameRng> {
    /// Create a session with the config's seed, or an entropy seed if unset.
    pub fn from_config(config: &GameConfig, cues: S) -> Self {
        let rng = match config.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        log::debug!("dwell rng seed {}", rng.seed());
        Self::new(config, cues, rng)
    }
}

impl<S: CueSink, R: DwellSource> GameLoop<S, R> {
    /// Create a session with an explicit dwell source.
    pub fn new(config: &GameConfig, cues: S, dwell: R) -> Self {
        Self {
            lights: LightPhaseController::new(config, dwell),
            tracker: MovementTracker::new(config.buffer_size, config.movement_threshold),
            registry: EliminationRegistry::new(),
            cues,
            ticks: 0,
            rounds: 0,
            total_eliminations: 0,
        }
    }

    /// Play the intro cue. Hosts call this once before the first frame.
    pub fn announce_intro(&self) {
        self.cues.emit(Cue::Intro);
    }

    /// Process one frame of tracked subjects.
    pub fn tick(&mut self, subjects: &[TrackedSubject]) -> TickReport {
        self.ticks += 1;

        let transition = self.lights.tick();
        match transition {
            Some(PhaseEvent::EnteredRed) => {
                self.rounds += 1;
                self.cues.emit(Cue::RedLight);
            }
            Some(PhaseEvent::EnteredGreen) => {
                self.cues.emit(Cue::GreenLight);
                self.clear_values();
            }
            None => {}
        }

        self.lights.advance_grace();

        let mut report = TickReport {
            tick: self.ticks,
            phase: self.lights.phase(),
            transition,
            evaluated: false,
            eliminated: Vec::new(),
            skipped: Vec::new(),
        };

        if !self.lights.detection_active() {
            return report;
        }
        report.evaluated = true;

        for subject in subjects {
            if self.registry.is_eliminated(subject.id) {
                log::debug!("{} already eliminated", subject.id);
                report.skipped.push(subject.id);
                continue;
            }

            if let Some(movement) = self.tracker.detect(subject.id, &subject.keypoints) {
                log::debug!(
                    "{:?} movement: {} avg {} observed {}",
                    movement.axis,
                    movement.key,
                    movement.average,
                    movement.observed
                );
                self.registry.mark_eliminated(subject.id);
                report.eliminated.push(subject.id);
            }

            self.tracker.update(subject.id, &subject.keypoints);
        }

        if !report.eliminated.is_empty() {
            self.total_eliminations += report.eliminated.len() as u64;
            log::info!("eliminated: {:?}", report.eliminated);
            self.cues.emit(Cue::Gunshot);
        }

        report
    }

    /// Forget all joint history and eliminations.
    fn clear_values(&mut self) {
        self.tracker.clear();
        self.registry.clear();
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.lights.phase()
    }

    #[must_use]
    pub fn lights(&self) -> &LightPhaseController<R> {
        &self.lights
    }

    #[must_use]
    pub fn tracker(&self) -> &MovementTracker {
        &self.tracker
    }

    #[must_use]
    pub fn registry(&self) -> &EliminationRegistry {
        &self.registry
    }

    #[must_use]
    pub fn is_eliminated(&self, subject: SubjectId) -> bool {
        self.registry.is_eliminated(subject)
    }

    #[must_use]
    pub fn cues(&self) -> &S {
        &self.cues
    }

    /// Ticks processed so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Red phases entered so far.
    #[must_use]
    pub fn rounds(&self) -> u64 {
        self.rounds
    }

    /// Eliminations across all rounds.
    #[must_use]
    pub fn total_eliminations(&self) -> u64 {
        self.total_eliminations
    }

    /// Stop the session and hand back the cue sink.
    pub fn into_cues(self) -> S {
        self.cues
    }
}
