//! Movement tracking and elimination bookkeeping.
//!
//! - `RunningAverage`: bounded per-joint sample window with a delayed mean
//! - `MovementTracker`: joint series keyed by `(subject, joint)` and the
//!   threshold test against them
//! - `EliminationRegistry`: subjects already hit this round

pub mod average;
pub mod elimination;
pub mod tracker;

pub use average::RunningAverage;
pub use elimination::EliminationRegistry;
pub use tracker::{Axis, Movement, MovementTracker};
