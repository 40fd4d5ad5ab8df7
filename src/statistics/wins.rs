//! Cumulative win counts, win rates and win streaks

use std::path::PathBuf;

use serde::Serialize;

use super::tracker::{ExportConfig, StatisticsTracker, WinCounts, wilson_interval, write_rows};
use crate::{
    Result,
    ports::GameObserver,
    tictactoe::{BoardState, GameOutcome, Player},
};

#[derive(Debug, Serialize)]
struct CountRow {
    outcome: &'static str,
    games: usize,
}

/// Cumulative X wins, O wins and ties
#[derive(Debug, Clone, Default)]
pub struct WinTracker {
    counts: WinCounts,
}

impl WinTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> WinCounts {
        self.counts
    }
}

impl GameObserver for WinTracker {
    fn on_game_end(
        &mut self,
        _game_num: usize,
        outcome: GameOutcome,
        _board: &BoardState,
    ) -> Result<()> {
        self.counts.record(outcome);
        Ok(())
    }
}

impl StatisticsTracker for WinTracker {
    fn name(&self) -> &str {
        "wins"
    }

    fn total_games(&self) -> usize {
        self.counts.total()
    }

    fn write_csv(&self, export: &ExportConfig) -> Result<PathBuf> {
        let rows = [
            CountRow {
                outcome: "X",
                games: self.counts.x_wins,
            },
            CountRow {
                outcome: "O",
                games: self.counts.o_wins,
            },
            CountRow {
                outcome: "Tie",
                games: self.counts.ties,
            },
        ];
        write_rows(export, "win_statistics.csv", rows)
    }
}

/// Win and tie rates after one game
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateRow {
    pub game: usize,
    pub x_win_rate: f64,
    pub o_win_rate: f64,
    pub tie_rate: f64,
}

/// Cumulative win and tie rates after every game
#[derive(Debug, Clone, Default)]
pub struct WinRateTracker {
    counts: WinCounts,
    history: Vec<RateRow>,
}

impl WinRateTracker {
    /// Confidence level of [`win_rate_interval`](Self::win_rate_interval)
    pub const CONFIDENCE: f64 = 0.95;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn counts(&self) -> WinCounts {
        self.counts
    }

    /// Rates after each game, in order
    pub fn history(&self) -> &[RateRow] {
        &self.history
    }

    pub fn win_rate(&self, player: Player) -> f64 {
        self.counts.win_rate(player)
    }

    pub fn tie_rate(&self) -> f64 {
        self.counts.tie_rate()
    }

    /// 95% Wilson interval of `player`'s current win rate
    pub fn win_rate_interval(&self, player: Player) -> (f64, f64) {
        wilson_interval(
            self.counts.wins(player),
            self.counts.total(),
            Self::CONFIDENCE,
        )
    }
}

impl GameObserver for WinRateTracker {
    fn on_game_end(
        &mut self,
        _game_num: usize,
        outcome: GameOutcome,
        _board: &BoardState,
    ) -> Result<()> {
        self.counts.record(outcome);
        self.history.push(RateRow {
            game: self.counts.total(),
            x_win_rate: self.counts.win_rate(Player::X),
            o_win_rate: self.counts.win_rate(Player::O),
            tie_rate: self.counts.tie_rate(),
        });
        Ok(())
    }
}

impl StatisticsTracker for WinRateTracker {
    fn name(&self) -> &str {
        "win rate"
    }

    fn total_games(&self) -> usize {
        self.counts.total()
    }

    fn write_csv(&self, export: &ExportConfig) -> Result<PathBuf> {
        write_rows(export, "win_rate_stats.csv", self.history.iter().copied())
    }
}

#[derive(Debug, Serialize)]
struct StreakRow {
    player: Player,
    wins: usize,
    current_streak: usize,
    longest_streak: usize,
}

/// Current and longest consecutive-win streaks per player.
///
/// A win extends the winner's streak and ends the opponent's; a tie ends
/// both.
#[derive(Debug, Clone, Default)]
pub struct WinStreakTracker {
    counts: WinCounts,
    current: [usize; 2],
    longest: [usize; 2],
}

fn slot(player: Player) -> usize {
    match player {
        Player::X => 0,
        Player::O => 1,
    }
}

impl WinStreakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_streak(&self, player: Player) -> usize {
        self.current[slot(player)]
    }

    pub fn longest_streak(&self, player: Player) -> usize {
        self.longest[slot(player)]
    }
}

impl GameObserver for WinStreakTracker {
    fn on_game_end(
        &mut self,
        _game_num: usize,
        outcome: GameOutcome,
        _board: &BoardState,
    ) -> Result<()> {
        self.counts.record(outcome);
        match outcome {
            GameOutcome::Win(winner) => {
                let w = slot(winner);
                self.current[w] += 1;
                self.longest[w] = self.longest[w].max(self.current[w]);
                self.current[slot(winner.opponent())] = 0;
            }
            GameOutcome::Tie => self.current = [0, 0],
        }
        Ok(())
    }
}

impl StatisticsTracker for WinStreakTracker {
    fn name(&self) -> &str {
        "win streaks"
    }

    fn total_games(&self) -> usize {
        self.counts.total()
    }

    fn write_csv(&self, export: &ExportConfig) -> Result<PathBuf> {
        let rows = [Player::X, Player::O].map(|player| StreakRow {
            player,
            wins: self.counts.wins(player),
            current_streak: self.current_streak(player),
            longest_streak: self.longest_streak(player),
        });
        write_rows(export, "win_streak_stats.csv", rows)
    }
}
