//! Cube Dash simulation.
//!
//! A cube auto-runs along the ground while spikes and blocks scroll in from
//! the right. Jumping clears them; the first hit ends the run. Everything
//! here is deterministic given the random source passed in.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
