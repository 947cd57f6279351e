//! Quizcade: a terminal arcade of quizzes and puzzles for kids.
//!
//! The reusable part is [`round`]: a generic round-based quiz session
//! (generator, state machine, cooperative timers, completion tiers). The
//! games in [`games`] instantiate it, and [`app`] / [`ui`] host them in a
//! ratatui shell.

pub mod app;
pub mod config;
pub mod error;
pub mod event;
pub mod games;
pub mod logging;
pub mod progress;
pub mod round;
pub mod ui;

pub use error::{Error, Result};
