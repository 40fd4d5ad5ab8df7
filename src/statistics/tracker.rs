//! Tracker trait, shared counters and CSV export

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use statrs::function::erf::erf_inv;
use tracing::debug;

use crate::{
    Result,
    ports::GameObserver,
    tictactoe::{GameOutcome, Player},
};

/// Where tracker output is written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub directory: PathBuf,
}

impl ExportConfig {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Create the directory if missing and return the path of `file_name`
    /// inside it.
    pub fn prepare(&self, file_name: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory).map_err(|source| crate::Error::Io {
            operation: format!("create directory {}", self.directory.display()),
            source,
        })?;
        Ok(self.directory.join(file_name))
    }
}

/// A statistics collector fed by the game loop
pub trait StatisticsTracker: GameObserver {
    /// Short human-readable name
    fn name(&self) -> &str;

    /// Games seen so far
    fn total_games(&self) -> usize;

    /// Write the collected figures as CSV into `export.directory`.
    ///
    /// Returns the path of the written file.
    fn write_csv(&self, export: &ExportConfig) -> Result<PathBuf>;
}

/// Serialize `rows` into `file_name` inside the export directory
pub(crate) fn write_rows<T, I>(export: &ExportConfig, file_name: &str, rows: I) -> Result<PathBuf>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let path = export.prepare(file_name)?;
    let mut writer = csv::Writer::from_path(&path)?;
    let mut count = 0usize;
    for row in rows {
        writer.serialize(row)?;
        count += 1;
    }
    writer.flush()?;

    debug!(path = %path.display(), rows = count, "statistics written");
    Ok(path)
}

/// Win and tie counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinCounts {
    pub x_wins: usize,
    pub o_wins: usize,
    pub ties: usize,
}

impl WinCounts {
    pub fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Tie => self.ties += 1,
        }
    }

    /// Undo a previously recorded outcome
    pub fn forget(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins = self.x_wins.saturating_sub(1),
            GameOutcome::Win(Player::O) => self.o_wins = self.o_wins.saturating_sub(1),
            GameOutcome::Tie => self.ties = self.ties.saturating_sub(1),
        }
    }

    pub fn total(&self) -> usize {
        self.x_wins + self.o_wins + self.ties
    }

    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::X => self.x_wins,
            Player::O => self.o_wins,
        }
    }

    pub fn win_rate(&self, player: Player) -> f64 {
        ratio(self.wins(player), self.total())
    }

    pub fn tie_rate(&self) -> f64 {
        ratio(self.ties, self.total())
    }
}

pub(crate) fn ratio(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Wilson score interval for `successes` out of `trials` at the given
/// two-sided `confidence` (e.g. 0.95).
///
/// With no trials the interval is `(0.0, 1.0)`.
pub fn wilson_interval(successes: usize, trials: usize, confidence: f64) -> (f64, f64) {
    if trials == 0 {
        return (0.0, 1.0);
    }

    let z = std::f64::consts::SQRT_2 * erf_inv(confidence);
    let n = trials as f64;
    let p = successes as f64 / n;
    let z2 = z * z;

    let denominator = 1.0 + z2 / n;
    let center = (p + z2 / (2.0 * n)) / denominator;
    let half_width = z * (p * (1.0 - p) / n + z2 / (4.0 * n * n)).sqrt() / denominator;

    ((center - half_width).max(0.0), (center + half_width).min(1.0))
}

/// Reject a zero window or batch size
pub(crate) fn require_positive(value: usize, what: &str) -> Result<usize> {
    if value == 0 {
        Err(crate::Error::InvalidConfiguration {
            message: format!("{what} must be at least 1"),
        })
    } else {
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wilson_interval_brackets_the_rate() {
        let (low, high) = wilson_interval(50, 100, 0.95);
        assert!((low - 0.4038).abs() < 1e-3);
        assert!((high - 0.5962).abs() < 1e-3);
    }

    #[test]
    fn wilson_interval_stays_in_unit_range() {
        let (low, high) = wilson_interval(0, 10, 0.95);
        assert!(low.abs() < 1e-12);
        assert!(high > 0.0 && high < 1.0);

        let (low, high) = wilson_interval(10, 10, 0.95);
        assert!(low > 0.0 && low < 1.0);
        assert!((high - 1.0).abs() < 1e-12);

        assert_eq!(wilson_interval(0, 0, 0.95), (0.0, 1.0));
    }

    #[test]
    fn counts_track_outcomes() {
        let mut counts = WinCounts::default();
        counts.record(GameOutcome::Win(Player::X));
        counts.record(GameOutcome::Tie);
        counts.record(GameOutcome::Win(Player::X));
        assert_eq!(counts.total(), 3);
        assert!((counts.win_rate(Player::X) - 2.0 / 3.0).abs() < 1e-12);

        counts.forget(GameOutcome::Win(Player::X));
        assert_eq!(counts.x_wins, 1);
        assert_eq!(counts.win_rate(Player::O), 0.0);
    }

    #[test]
    fn export_creates_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let export = ExportConfig::new(dir.path().join("nested").join("stats"));
        let path = export.prepare("out.csv").unwrap();
        assert!(export.directory.is_dir());
        assert_eq!(path.file_name().unwrap(), "out.csv");
    }
}
