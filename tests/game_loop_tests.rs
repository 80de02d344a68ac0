//! Game loop tests.
//!
//! These tests drive full sessions tick by tick with a scripted light
//! schedule and check eliminations, grace periods, round resets and cues.

use std::collections::VecDeque;
use std::ops::Range;
use std::sync::{Arc, Mutex};

use crossbeam_channel::{unbounded, Receiver, Sender};
use proptest::prelude::*;
use red_light::{
    Cue, CueEmitter, CueError, CuePlayer, GameConfig, GameLoop, GamePhase, JointId, JointKey,
    PhaseEvent, SubjectId, TrackedSubject,
};

/// Dwell source that replays a fixed schedule, repeating the last entry.
fn schedule(dwells: &[i32]) -> impl FnMut(Range<i32>) -> i32 {
    let mut queue: VecDeque<i32> = dwells.iter().copied().collect();
    move |_| {
        if queue.len() > 1 {
            queue.pop_front().unwrap_or(1)
        } else {
            queue.front().copied().unwrap_or(1)
        }
    }
}

fn session(
    config: &GameConfig,
    dwells: &[i32],
) -> (
    GameLoop<Sender<Cue>, impl FnMut(Range<i32>) -> i32>,
    Receiver<Cue>,
) {
    let (tx, rx) = unbounded();
    (GameLoop::new(config, tx, schedule(dwells)), rx)
}

fn subject(id: u32, x: f32, y: f32) -> TrackedSubject {
    TrackedSubject::new(SubjectId::new(id)).with_keypoint(7, x, y)
}

/// Window of 2, threshold 50: subject 1 holds still at (0, 0) and then jumps
/// to (100, 0) during red.
#[test]
fn test_jump_after_still_samples_eliminates() {
    let config = GameConfig::default()
        .with_buffer_size(2)
        .with_movement_threshold(50.0);
    // green for 1 tick, then a long red
    let (mut game, rx) = session(&config, &[1, 100]);

    assert_eq!(game.tick(&[]).transition, Some(PhaseEvent::EnteredGreen));
    let entering = game.tick(&[subject(1, 0.0, 0.0)]);
    assert_eq!(entering.transition, Some(PhaseEvent::EnteredRed));
    assert!(!entering.evaluated);

    for _ in 0..2 {
        let report = game.tick(&[subject(1, 0.0, 0.0)]);
        assert!(report.evaluated);
        assert!(report.eliminated.is_empty());
    }
    let key = JointKey::new(SubjectId::new(1), JointId::new(7));
    assert_eq!(game.tracker().average(key), Some((0.0, 0.0)));

    let report = game.tick(&[subject(1, 100.0, 0.0)]);
    assert_eq!(report.eliminated, vec![SubjectId::new(1)]);
    assert!(game.is_eliminated(SubjectId::new(1)));

    let cues: Vec<Cue> = rx.try_iter().collect();
    assert_eq!(cues, vec![Cue::GreenLight, Cue::RedLight, Cue::Gunshot]);
}

/// With one grace tick, the tick that enters red does not evaluate and the
/// next one does.
#[test]
fn test_grace_tick_after_red() {
    let config = GameConfig::default().with_red_transition_wait(1);
    let (mut game, _rx) = session(&config, &[1, 100]);

    game.tick(&[]);
    let entering = game.tick(&[subject(1, 0.0, 0.0)]);
    assert_eq!(entering.phase, GamePhase::Red);
    assert!(!entering.evaluated);
    assert!(game.tracker().is_empty());

    let next = game.tick(&[subject(1, 0.0, 0.0)]);
    assert!(next.evaluated);
    assert_eq!(game.tracker().len(), 1);
}

/// A longer grace period suppresses exactly that many extra ticks.
#[test]
fn test_longer_grace_period() {
    let config = GameConfig::default().with_red_transition_wait(3);
    let (mut game, _rx) = session(&config, &[1, 100]);

    game.tick(&[]);
    let evaluated: Vec<bool> = (0..6)
        .map(|_| game.tick(&[subject(1, 0.0, 0.0)]).evaluated)
        .collect();
    assert_eq!(evaluated, vec![false, false, false, true, true, true]);
}

/// An eliminated subject gets a fresh start after green, and can be
/// eliminated again in the next red phase.
#[test]
fn test_elimination_resets_each_round() {
    let config = GameConfig::default();
    // green 1, red 3, green 1, red forever
    let (mut game, rx) = session(&config, &[1, 3, 1, 100]);

    game.tick(&[]); // green
    game.tick(&[subject(2, 100.0, 100.0)]); // red, grace
    game.tick(&[subject(2, 100.0, 100.0)]); // baseline
    let hit = game.tick(&[subject(2, 300.0, 100.0)]);
    assert_eq!(hit.eliminated, vec![SubjectId::new(2)]);

    let green = game.tick(&[subject(2, 300.0, 100.0)]);
    assert_eq!(green.transition, Some(PhaseEvent::EnteredGreen));
    assert!(!game.is_eliminated(SubjectId::new(2)));
    assert!(game.tracker().is_empty());

    let red = game.tick(&[subject(2, 300.0, 100.0)]);
    assert_eq!(red.transition, Some(PhaseEvent::EnteredRed));

    // fresh evaluation: first sighting is only a baseline
    let fresh = game.tick(&[subject(2, 300.0, 100.0)]);
    assert!(fresh.evaluated);
    assert!(fresh.skipped.is_empty());
    assert!(fresh.eliminated.is_empty());

    let again = game.tick(&[subject(2, 100.0, 100.0)]);
    assert_eq!(again.eliminated, vec![SubjectId::new(2)]);
    assert_eq!(game.total_eliminations(), 2);
    assert_eq!(game.rounds(), 2);

    let gunshots = rx.try_iter().filter(|c| *c == Cue::Gunshot).count();
    assert_eq!(gunshots, 2);
}

/// Several subjects moving on the same tick produce one gunshot.
#[test]
fn test_one_gunshot_per_tick() {
    let config = GameConfig::default().with_red_transition_wait(0);
    let (mut game, rx) = session(&config, &[1, 100]);

    game.tick(&[]);
    let still: Vec<_> = (1..=4).map(|id| subject(id, 0.0, 0.0)).collect();
    game.tick(&still);

    let moving: Vec<_> = (1..=4).map(|id| subject(id, 0.0, 400.0)).collect();
    let report = game.tick(&moving);
    assert_eq!(report.eliminated.len(), 4);

    let cues: Vec<Cue> = rx.try_iter().collect();
    assert_eq!(cues, vec![Cue::GreenLight, Cue::RedLight, Cue::Gunshot]);
}

/// Only the subjects that moved are eliminated; a mover earlier in the frame
/// does not hide a mover later in it.
#[test]
fn test_any_mover_triggers_gunshot() {
    let config = GameConfig::default().with_red_transition_wait(0);
    let (mut game, rx) = session(&config, &[1, 100]);

    game.tick(&[]);
    game.tick(&[subject(1, 0.0, 0.0), subject(2, 0.0, 0.0)]);
    let report = game.tick(&[subject(1, 400.0, 0.0), subject(2, 0.0, 0.0)]);

    assert_eq!(report.eliminated, vec![SubjectId::new(1)]);
    assert!(!game.is_eliminated(SubjectId::new(2)));
    assert_eq!(rx.try_iter().last(), Some(Cue::Gunshot));
}

/// Eliminated subjects are skipped and their averages are frozen.
#[test]
fn test_eliminated_subject_is_frozen() {
    let config = GameConfig::default()
        .with_red_transition_wait(0)
        .with_buffer_size(1);
    let (mut game, _rx) = session(&config, &[1, 100]);
    let key = JointKey::new(SubjectId::new(5), JointId::new(7));

    game.tick(&[]);
    game.tick(&[subject(5, 0.0, 0.0)]);
    game.tick(&[subject(5, 90.0, 0.0)]);
    assert!(game.is_eliminated(SubjectId::new(5)));
    // the eliminating frame is still folded in
    assert_eq!(game.tracker().average(key), Some((90.0, 0.0)));

    for x in [0.0, 500.0, -500.0] {
        let report = game.tick(&[subject(5, x, x)]);
        assert_eq!(report.skipped, vec![SubjectId::new(5)]);
        assert!(report.eliminated.is_empty());
        assert_eq!(game.tracker().average(key), Some((90.0, 0.0)));
    }
}

/// A subject with no keypoints never moves.
#[test]
fn test_empty_keypoints_are_harmless() {
    let config = GameConfig::default().with_red_transition_wait(0);
    let (mut game, _rx) = session(&config, &[1, 100]);

    game.tick(&[]);
    for _ in 0..5 {
        let report = game.tick(&[TrackedSubject::new(SubjectId::new(1))]);
        assert!(report.eliminated.is_empty());
    }
}

/// Every tick flips the light when the dwell range is [1, 2).
#[test]
fn test_alternating_session_cues() {
    let config = GameConfig::default().with_time_wait(1, 2).with_seed(3);
    let (tx, rx) = unbounded();
    let mut game = GameLoop::from_config(&config, tx);

    let n = 12;
    let transitions = (0..n).filter(|_| game.tick(&[]).transition.is_some()).count();
    assert_eq!(transitions, n);

    let cues: Vec<Cue> = rx.try_iter().collect();
    assert_eq!(cues.len(), n);
    for (i, cue) in cues.iter().enumerate() {
        let expected = if i % 2 == 0 { Cue::GreenLight } else { Cue::RedLight };
        assert_eq!(*cue, expected);
    }
}

/// Seeded sessions replay identically.
#[test]
fn test_seeded_sessions_replay() {
    let config = GameConfig::default().with_seed(77).with_time_wait(1, 8);
    let (tx_a, _rx_a) = unbounded();
    let (tx_b, _rx_b) = unbounded();
    let mut a = GameLoop::from_config(&config, tx_a);
    let mut b = GameLoop::from_config(&config, tx_b);

    for t in 0..300 {
        let x = if t % 7 == 0 { 300.0 } else { 0.0 };
        let frame = [subject(1, x, 0.0), subject(2, 0.0, x)];
        assert_eq!(a.tick(&frame), b.tick(&frame));
    }
}

struct BrokenSpeaker(Arc<Mutex<Vec<Cue>>>);

impl CuePlayer for BrokenSpeaker {
    fn play(&mut self, cue: Cue) -> Result<(), CueError> {
        self.0.lock().unwrap().push(cue);
        Err(CueError::PlaybackFailure {
            cue,
            reason: "speaker unplugged".to_string(),
        })
    }
}

/// Failing cue playback does not stop detection.
#[test]
fn test_cue_failures_do_not_block_detection() {
    let attempted = Arc::new(Mutex::new(Vec::new()));
    let emitter = CueEmitter::with_player(16, BrokenSpeaker(attempted.clone()));
    let config = GameConfig::default().with_red_transition_wait(0);
    let mut game = GameLoop::new(&config, emitter, schedule(&[1, 100]));

    game.announce_intro();
    game.tick(&[]);
    game.tick(&[subject(1, 0.0, 0.0)]);
    let report = game.tick(&[subject(1, 0.0, 200.0)]);
    assert_eq!(report.eliminated, vec![SubjectId::new(1)]);

    game.into_cues().shutdown();
    assert_eq!(
        *attempted.lock().unwrap(),
        vec![Cue::Intro, Cue::GreenLight, Cue::RedLight, Cue::Gunshot]
    );
}

proptest! {
    /// Within one red phase an eliminated subject is never evaluated again:
    /// it is reported as skipped and its averages stay frozen.
    #[test]
    fn prop_eliminated_never_reevaluated(
        positions in prop::collection::vec((-300.0f32..300.0, -300.0f32..300.0), 1..60),
    ) {
        let config = GameConfig::default().with_red_transition_wait(0).with_buffer_size(3);
        let (mut game, _rx) = session(&config, &[1, 1000]);
        let id = SubjectId::new(1);
        let key = JointKey::new(id, JointId::new(7));

        game.tick(&[]);
        game.tick(&[subject(1, 0.0, 0.0)]);

        let mut frozen = None;
        for &(x, y) in &positions {
            let report = game.tick(&[subject(1, x, y)]);
            prop_assert_eq!(game.phase(), GamePhase::Red);

            if let Some(series) = frozen.as_ref() {
                prop_assert_eq!(&report.skipped, &vec![id]);
                prop_assert!(report.eliminated.is_empty());
                prop_assert_eq!(game.tracker().series(key), Some(series));
                continue;
            }
            if report.eliminated.contains(&id) {
                frozen = game.tracker().series(key).cloned();
            }
        }
    }

    /// After green, history is gone: the first red evaluation never eliminates,
    /// however far a subject is from where it was before.
    #[test]
    fn prop_green_forgets_history(
        before in (-500.0f32..500.0, -500.0f32..500.0),
        after in (-500.0f32..500.0, -500.0f32..500.0),
    ) {
        let config = GameConfig::default().with_red_transition_wait(0);
        // green 1, red 3, green 1, red long
        let (mut game, _rx) = session(&config, &[1, 3, 1, 100]);

        game.tick(&[]);
        for _ in 0..3 {
            game.tick(&[subject(1, before.0, before.1)]);
        }
        let green = game.tick(&[subject(1, before.0, before.1)]);
        prop_assert_eq!(green.transition, Some(PhaseEvent::EnteredGreen));
        prop_assert!(game.tracker().is_empty());

        let red = game.tick(&[subject(1, after.0, after.1)]);
        prop_assert_eq!(red.transition, Some(PhaseEvent::EnteredRed));
        prop_assert!(red.evaluated);
        prop_assert!(red.eliminated.is_empty());
    }
}
