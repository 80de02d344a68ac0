//! Movement detection against per-joint running averages.

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::average::RunningAverage;
use crate::core::{JointKey, Keypoint, SubjectId};

/// Axis on which a joint left its average.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

/// First joint of a subject found outside the movement threshold.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Movement {
    pub key: JointKey,
    pub axis: Axis,
    pub average: f32,
    pub observed: f32,
}

/// Rolling per-joint averages and the movement test against them.
///
/// Detection and averaging are separate steps. [`detect`](Self::detect) only
/// reads the averages as they were before the current frame, and
/// [`update`](Self::update) then folds the frame into every joint's window,
/// including joints that detection never looked at because an earlier joint
/// already tripped the threshold.
#[derive(Clone, Debug)]
pub struct MovementTracker {
    averages: FxHashMap<JointKey, RunningAverage>,
    buffer_size: usize,
    threshold: f32,
}

impl MovementTracker {
    /// Create a tracker with the given window length and pixel threshold.
    pub fn new(buffer_size: usize, threshold: f32) -> Self {
        assert!(buffer_size > 0, "buffer_size must be at least 1");
        Self {
            averages: FxHashMap::default(),
            buffer_size,
            threshold,
        }
    }

    /// Find the first joint that moved past the threshold.
    ///
    /// Joints without history yet contribute nothing. Evaluation stops at the
    /// first violating joint, checking x before y.
    #[must_use]
    pub fn detect(&self, subject: SubjectId, keypoints: &[Keypoint]) -> Option<Movement> {
        keypoints.iter().find_map(|kp| {
            let key = JointKey::new(subject, kp.joint);
            let (avg_x, avg_y) = self.averages.get(&key)?.mean();

            if (avg_x - kp.x).abs() > self.threshold {
                Some(Movement {
                    key,
                    axis: Axis::X,
                    average: avg_x,
                    observed: kp.x,
                })
            } else if (avg_y - kp.y).abs() > self.threshold {
                Some(Movement {
                    key,
                    axis: Axis::Y,
                    average: avg_y,
                    observed: kp.y,
                })
            } else {
                None
            }
        })
    }

    /// Whether any joint of the subject moved past the threshold.
    #[must_use]
    pub fn evaluate(&self, subject: SubjectId, keypoints: &[Keypoint]) -> bool {
        self.detect(subject, keypoints).is_some()
    }

    /// Fold one frame's keypoints into their joint windows.
    pub fn update(&mut self, subject: SubjectId, keypoints: &[Keypoint]) {
        for kp in keypoints {
            let key = JointKey::new(subject, kp.joint);
            match self.averages.get_mut(&key) {
                Some(avg) => avg.push((kp.x, kp.y)),
                None => {
                    self.averages
                        .insert(key, RunningAverage::new(self.buffer_size, (kp.x, kp.y)));
                }
            }
        }
    }

    /// Drop all joint history.
    pub fn clear(&mut self) {
        self.averages.clear();
    }

    /// Current average of one joint series, if it exists.
    #[must_use]
    pub fn average(&self, key: JointKey) -> Option<(f32, f32)> {
        self.averages.get(&key).map(RunningAverage::mean)
    }

    /// Full series for one joint.
    #[must_use]
    pub fn series(&self, key: JointKey) -> Option<&RunningAverage> {
        self.averages.get(&key)
    }

    /// Number of joint series being tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.averages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.averages.is_empty()
    }

    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    #[must_use]
    pub fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}
