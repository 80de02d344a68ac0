//! Pose input types: tracked subjects and their keypoints.
//!
//! ## SubjectId / JointId
//!
//! Opaque identifiers supplied by the pose estimator. A subject keeps its ID
//! while it stays visible; a joint ID names the same physical joint on every
//! frame.
//!
//! ## JointKey
//!
//! `(SubjectId, JointId)` pair naming one averaged joint series.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Typical body-pose models report 18 keypoints per subject.
pub const INLINE_KEYPOINTS: usize = 18;

/// Identifier of a tracked subject (player).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(pub u32);

impl SubjectId {
    /// Create a new subject ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for SubjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Subject {}", self.0)
    }
}

/// Identifier of a joint type (nose, left wrist, ...).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointId(pub u32);

impl JointId {
    /// Create a new joint ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

/// Composite key of one averaged joint series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JointKey {
    pub subject: SubjectId,
    pub joint: JointId,
}

impl JointKey {
    #[must_use]
    pub const fn new(subject: SubjectId, joint: JointId) -> Self {
        Self { subject, joint }
    }
}

impl std::fmt::Display for JointKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.subject.0, self.joint.0)
    }
}

/// One joint observation in frame-pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypoint {
    pub joint: JointId,
    pub x: f32,
    pub y: f32,
}

impl Keypoint {
    #[must_use]
    pub const fn new(joint: JointId, x: f32, y: f32) -> Self {
        Self { joint, x, y }
    }
}

/// A subject as seen on one frame.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackedSubject {
    pub id: SubjectId,
    #[serde(default)]
    pub keypoints: SmallVec<[Keypoint; INLINE_KEYPOINTS]>,
}

impl TrackedSubject {
    /// Create a subject with no keypoints.
    #[must_use]
    pub fn new(id: SubjectId) -> Self {
        Self {
            id,
            keypoints: SmallVec::new(),
        }
    }

    /// Add a keypoint (builder pattern).
    #[must_use]
    pub fn with_keypoint(mut self, joint: u32, x: f32, y: f32) -> Self {
        self.keypoints.push(Keypoint::new(JointId(joint), x, y));
        self
    }

    /// Key of the series for one of this subject's joints.
    #[must_use]
    pub fn key(&self, joint: JointId) -> JointKey {
        JointKey::new(self.id, joint)
    }
}
