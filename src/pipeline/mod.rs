//! Game session pipeline
//!
//! This module provides:
//! - The [`GameController`] that alternates two agents on a board
//! - Observers that render games and report progress

pub mod controller;
pub mod observers;

pub use controller::{GameController, GameRecord, SessionConfig, SessionSummary};
pub use observers::{ConsoleView, ProgressObserver, ViewConfig};

pub use crate::ports::{Agent, GameObserver};
