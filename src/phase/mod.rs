//! Light phase control.
//!
//! `LightPhaseController` alternates the light between red and green on a
//! randomized dwell timer and tracks the grace period after each red
//! transition.

pub mod light;

pub use light::{GamePhase, LightPhaseController, PhaseEvent};
