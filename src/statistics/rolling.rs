//! Windowed and batched outcome statistics

use std::{collections::VecDeque, path::PathBuf};

use serde::Serialize;

use super::{
    tracker::{ExportConfig, StatisticsTracker, WinCounts, require_positive, write_rows},
    wins::RateRow,
};
use crate::{
    Result,
    ports::GameObserver,
    tictactoe::{BoardState, GameOutcome, Player},
};

#[derive(Debug, Serialize)]
struct BatchRow {
    batch: usize,
    x_wins: usize,
    o_wins: usize,
    ties: usize,
}

/// Outcome counts per consecutive batch of `batch_size` games.
///
/// The last batch may be partial.
#[derive(Debug, Clone)]
pub struct BatchWinTracker {
    batch_size: usize,
    batches: Vec<WinCounts>,
    total: usize,
}

impl BatchWinTracker {
    pub fn new(batch_size: usize) -> Result<Self> {
        Ok(Self {
            batch_size: require_positive(batch_size, "batch size")?,
            batches: Vec::new(),
            total: 0,
        })
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn batches(&self) -> &[WinCounts] {
        &self.batches
    }
}

impl GameObserver for BatchWinTracker {
    fn on_game_end(
        &mut self,
        _game_num: usize,
        outcome: GameOutcome,
        _board: &BoardState,
    ) -> Result<()> {
        if self.total % self.batch_size == 0 {
            self.batches.push(WinCounts::default());
        }
        if let Some(batch) = self.batches.last_mut() {
            batch.record(outcome);
        }
        self.total += 1;
        Ok(())
    }
}

impl StatisticsTracker for BatchWinTracker {
    fn name(&self) -> &str {
        "batch wins"
    }

    fn total_games(&self) -> usize {
        self.total
    }

    fn write_csv(&self, export: &ExportConfig) -> Result<PathBuf> {
        let rows = self.batches.iter().enumerate().map(|(i, counts)| BatchRow {
            batch: i + 1,
            x_wins: counts.x_wins,
            o_wins: counts.o_wins,
            ties: counts.ties,
        });
        write_rows(export, "win_statistics_by_batch.csv", rows)
    }
}

/// Win and tie rates over the most recent `window` games.
///
/// Until `window` games have been played the rates cover every game so far.
#[derive(Debug, Clone)]
pub struct RollingWinRateTracker {
    window: usize,
    recent: VecDeque<GameOutcome>,
    counts: WinCounts,
    history: Vec<RateRow>,
}

impl RollingWinRateTracker {
    pub fn new(window: usize) -> Result<Self> {
        let window = require_positive(window, "rolling window")?;
        Ok(Self {
            window,
            recent: VecDeque::new(),
            counts: WinCounts::default(),
            history: Vec::new(),
        })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    /// Counts inside the current window
    pub fn window_counts(&self) -> WinCounts {
        self.counts
    }

    pub fn history(&self) -> &[RateRow] {
        &self.history
    }
}

impl GameObserver for RollingWinRateTracker {
    fn on_game_end(
        &mut self,
        _game_num: usize,
        outcome: GameOutcome,
        _board: &BoardState,
    ) -> Result<()> {
        if self.recent.len() == self.window
            && let Some(oldest) = self.recent.pop_front()
        {
            self.counts.forget(oldest);
        }
        self.recent.push_back(outcome);
        self.counts.record(outcome);

        self.history.push(RateRow {
            game: self.history.len() + 1,
            x_win_rate: self.counts.win_rate(Player::X),
            o_win_rate: self.counts.win_rate(Player::O),
            tie_rate: self.counts.tie_rate(),
        });
        Ok(())
    }
}

impl StatisticsTracker for RollingWinRateTracker {
    fn name(&self) -> &str {
        "rolling win rate"
    }

    fn total_games(&self) -> usize {
        self.history.len()
    }

    fn write_csv(&self, export: &ExportConfig) -> Result<PathBuf> {
        write_rows(
            export,
            &format!("rolling_win_rate_{}.csv", self.window),
            self.history.iter().copied(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const X: GameOutcome = GameOutcome::Win(Player::X);
    const O: GameOutcome = GameOutcome::Win(Player::O);
    const T: GameOutcome = GameOutcome::Tie;

    fn feed(observer: &mut dyn GameObserver, outcomes: &[GameOutcome]) {
        let board = BoardState::new(3);
        for (n, outcome) in outcomes.iter().enumerate() {
            observer.on_game_end(n, *outcome, &board).unwrap();
        }
    }

    #[test]
    fn batches_split_consecutive_games() {
        let mut tracker = BatchWinTracker::new(2).unwrap();
        feed(&mut tracker, &[X, X, O, T, X]);

        let batches = tracker.batches();
        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].x_wins, 2);
        assert_eq!((batches[1].o_wins, batches[1].ties), (1, 1));
        assert_eq!(batches[2].total(), 1);
        assert_eq!(tracker.total_games(), 5);
    }

    #[test]
    fn rolling_rates_use_partial_window_first() {
        let mut tracker = RollingWinRateTracker::new(2).unwrap();
        feed(&mut tracker, &[X, O, O, T]);

        let history = tracker.history();
        assert_eq!(history[0].x_win_rate, 1.0);
        assert_eq!(history[1].x_win_rate, 0.5);
        assert_eq!(history[2].x_win_rate, 0.0);
        assert_eq!(history[2].o_win_rate, 1.0);
        assert_eq!(history[3].tie_rate, 0.5);
        assert_eq!(tracker.window_counts().total(), 2);
    }

    #[test]
    fn zero_sizes_are_rejected() {
        assert!(BatchWinTracker::new(0).is_err());
        assert!(RollingWinRateTracker::new(0).is_err());
    }

    #[test]
    fn huge_window_grows_with_the_games_played() {
        let mut tracker = RollingWinRateTracker::new(usize::MAX).unwrap();
        feed(&mut tracker, &[X, O, T]);

        assert_eq!(tracker.window(), usize::MAX);
        assert_eq!(tracker.window_counts().total(), 3);
        assert_eq!(tracker.history()[2].tie_rate, 1.0 / 3.0);
    }

    #[test]
    fn rolling_csv_is_named_after_window() {
        let dir = tempfile::tempdir().unwrap();
        let mut tracker = RollingWinRateTracker::new(5).unwrap();
        feed(&mut tracker, &[X, T]);

        let path = tracker.write_csv(&ExportConfig::new(dir.path())).unwrap();
        assert_eq!(path.file_name().unwrap(), "rolling_win_rate_5.csv");
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.starts_with("game,x_win_rate,o_win_rate,tie_rate\n"));
        assert_eq!(text.lines().count(), 3);
    }
}
