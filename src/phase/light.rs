//! Red/green light state machine.

use serde::{Deserialize, Serialize};

use crate::core::{DwellSource, GameConfig, GameRng};

/// Current light color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Freeze: movement is penalized.
    Red,
    /// Move freely.
    Green,
}

impl GamePhase {
    /// The other color.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            GamePhase::Red => GamePhase::Green,
            GamePhase::Green => GamePhase::Red,
        }
    }

    #[must_use]
    pub const fn is_red(self) -> bool {
        matches!(self, GamePhase::Red)
    }
}

impl std::fmt::Display for GamePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GamePhase::Red => write!(f, "Red Light"),
            GamePhase::Green => write!(f, "Green Light"),
        }
    }
}

/// Transition reported by [`LightPhaseController::tick`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseEvent {
    EnteredRed,
    EnteredGreen,
}

impl PhaseEvent {
    /// Phase in effect after this transition.
    #[must_use]
    pub const fn phase(self) -> GamePhase {
        match self {
            PhaseEvent::EnteredRed => GamePhase::Red,
            PhaseEvent::EnteredGreen => GamePhase::Green,
        }
    }
}

/// Owns the light color, the dwell timer and the red grace period.
///
/// The controller only reports transitions; cue playback and state resets are
/// the caller's job.
///
/// ## Timing
///
/// - The timer starts expired, so the first `tick` always transitions. The
///   session starts in red, so that first transition enters green.
/// - Each transition reseeds the timer from `[min_time_wait, max_time_wait)`.
/// - Entering red resets the grace counter to `red_transition_wait`; movement
///   checks are allowed once it drops below zero.
#[derive(Clone, Debug)]
pub struct LightPhaseController<R = GameRng> {
    phase: GamePhase,
    timer: i32,
    grace: i32,
    min_time_wait: i32,
    max_time_wait: i32,
    red_transition_wait: i32,
    dwell: R,
}

impl<R: DwellSource> LightPhaseController<R> {
    /// Create a controller from the timing fields of `config`.
    ///
    /// `config` is expected to have passed [`GameConfig::validate`]; an empty
    /// dwell range would make every reseed invalid.
    pub fn new(config: &GameConfig, dwell: R) -> Self {
        debug_assert!(
            config.min_time_wait < config.max_time_wait,
            "dwell range must not be empty"
        );
        Self {
            phase: GamePhase::Red,
            timer: 0,
            grace: 0,
            min_time_wait: config.min_time_wait,
            max_time_wait: config.max_time_wait,
            red_transition_wait: config.red_transition_wait,
            dwell,
        }
    }

    /// Advance the dwell timer by one tick.
    ///
    /// Returns the transition if the timer expired on this tick.
    pub fn tick(&mut self) -> Option<PhaseEvent> {
        self.timer = self.timer.saturating_sub(1);
        if self.timer > 0 {
            return None;
        }

        self.phase = self.phase.flipped();
        self.timer = self.dwell.draw(self.min_time_wait..self.max_time_wait);

        let event = match self.phase {
            GamePhase::Red => {
                self.grace = self.red_transition_wait;
                PhaseEvent::EnteredRed
            }
            GamePhase::Green => PhaseEvent::EnteredGreen,
        };
        log::info!("{} (next change in {} ticks)", self.phase, self.timer);
        Some(event)
    }

    /// Count down the grace period by one tick.
    pub fn advance_grace(&mut self) {
        self.grace = self.grace.saturating_sub(1);
    }

    /// True while the light is red and the grace period has run out.
    #[must_use]
    pub fn detection_active(&self) -> bool {
        self.phase.is_red() && self.grace < 0
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Ticks left before the next transition check.
    #[must_use]
    pub fn timer(&self) -> i32 {
        self.timer
    }

    /// Remaining grace ticks; negative once detection may run.
    #[must_use]
    pub fn grace(&self) -> i32 {
        self.grace
    }

    /// Dwell bounds `[min, max)`.
    #[must_use]
    pub fn dwell_range(&self) -> std::ops::Range<i32> {
        self.min_time_wait..self.max_time_wait
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ops::Range;

    fn fixed(ticks: i32) -> impl FnMut(Range<i32>) -> i32 {
        move |_| ticks
    }

    #[test]
    fn test_first_tick_enters_green() {
        let mut lights = LightPhaseController::new(&GameConfig::default(), GameRng::new(42));

        assert_eq!(lights.phase(), GamePhase::Red);
        assert_eq!(lights.timer(), 0);
        assert_eq!(lights.tick(), Some(PhaseEvent::EnteredGreen));
        assert_eq!(lights.phase(), GamePhase::Green);
    }

    #[test]
    fn test_timer_counts_down_before_flip() {
        let mut lights = LightPhaseController::new(&GameConfig::default(), fixed(3));

        assert_eq!(lights.tick(), Some(PhaseEvent::EnteredGreen));
        assert_eq!(lights.timer(), 3);
        assert_eq!(lights.tick(), None);
        assert_eq!(lights.tick(), None);
        assert_eq!(lights.tick(), Some(PhaseEvent::EnteredRed));
        assert_eq!(lights.phase(), GamePhase::Red);
    }

    #[test]
    fn test_entering_red_resets_grace() {
        let config = GameConfig::default().with_red_transition_wait(2);
        let mut lights = LightPhaseController::new(&config, fixed(1));

        lights.tick(); // green
        assert_eq!(lights.tick(), Some(PhaseEvent::EnteredRed));
        assert_eq!(lights.grace(), 2);
        assert!(!lights.detection_active());

        lights.advance_grace();
        lights.advance_grace();
        assert_eq!(lights.grace(), 0);
        assert!(!lights.detection_active());

        lights.advance_grace();
        assert!(lights.detection_active());
    }

    #[test]
    fn test_detection_never_active_in_green() {
        let mut lights = LightPhaseController::new(&GameConfig::default(), fixed(100));
        lights.tick();

        for _ in 0..10 {
            lights.advance_grace();
        }
        assert_eq!(lights.phase(), GamePhase::Green);
        assert!(!lights.detection_active());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(format!("{}", GamePhase::Red), "Red Light");
        assert_eq!(format!("{}", GamePhase::Green), "Green Light");
        assert_eq!(PhaseEvent::EnteredRed.phase(), GamePhase::Red);
        assert_eq!(GamePhase::Green.flipped(), GamePhase::Red);
    }
}
