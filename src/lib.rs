//! Brainiac: MENACE (Matchbox Educable Noughts And Crosses Engine) for
//! tic-tac-toe
//!
//! This crate provides:
//! - A tic-tac-toe engine for square boards up to 3×3
//! - A matchbox learning agent with one weighted action pool per valid board
//! - Random and human agents behind a common [`ports::Agent`] trait
//! - A game controller that publishes moves and outcomes to observers
//! - Statistics trackers with CSV export

pub mod agents;
pub mod cli;
pub mod error;
pub mod menace;
pub mod pipeline;
pub mod ports;
pub mod statistics;
pub mod tictactoe;
pub mod utils;

pub use error::{Error, Result};
