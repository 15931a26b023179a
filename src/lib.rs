//! Cube Dash - a terminal side-scrolling reflex game.
//!
//! This module exposes the game logic for testing and for the binary.

pub mod audio;
pub mod build_info;
pub mod config;
pub mod constants;
pub mod game;
pub mod input;
pub mod logging;
pub mod ui;

pub use constants::*;
pub use game::{DashInput, GamePhase, GameState, InputEffect};
