//! Per-frame animation update
//!
//! Scene time comes from a [`FrameClock`]; `tick` then advances every animated
//! entity in one pass. Runtime randomness (crab turns, fish scheduling) is
//! drawn from the scene's own seeded RNG, so a scene replayed with the same
//! seed and the same clock samples evolves identically.

pub mod clock;
pub mod tick;

pub use clock::{FrameClock, FrameTime};
pub use tick::{animate, step, tick};
