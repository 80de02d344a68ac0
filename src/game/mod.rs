//! Game session orchestration and frame input.

pub mod frames;
pub mod game_loop;

pub use frames::{Frame, FrameReader};
pub use game_loop::{GameLoop, TickReport};
