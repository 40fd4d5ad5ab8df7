//! Session statistics
//!
//! Every tracker is a [`GameObserver`](crate::ports::GameObserver) that
//! accumulates per-game figures and can write them to a CSV file.

pub mod length;
pub mod rolling;
pub mod tracker;
pub mod wins;

pub use length::{GameLengthTracker, LengthRow};
pub use rolling::{BatchWinTracker, RollingWinRateTracker};
pub use tracker::{ExportConfig, StatisticsTracker, WinCounts, wilson_interval};
pub use wins::{RateRow, WinRateTracker, WinStreakTracker, WinTracker};
