//! Game length statistics

use std::path::PathBuf;

use serde::Serialize;

use super::tracker::{ExportConfig, StatisticsTracker, require_positive, write_rows};
use crate::{
    Result,
    ports::GameObserver,
    tictactoe::{BoardState, GameOutcome, Player},
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LengthRow {
    pub game: usize,
    pub moves: usize,
    pub rolling_mean: f64,
}

/// Number of moves per game and its mean over the last `window` games
#[derive(Debug, Clone)]
pub struct GameLengthTracker {
    window: usize,
    current: usize,
    lengths: Vec<usize>,
    history: Vec<LengthRow>,
}

impl GameLengthTracker {
    pub fn new(window: usize) -> Result<Self> {
        Ok(Self {
            window: require_positive(window, "game length window")?,
            current: 0,
            lengths: Vec::new(),
            history: Vec::new(),
        })
    }

    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    pub fn history(&self) -> &[LengthRow] {
        &self.history
    }

    /// Mean length over the most recent window, 0 before any game
    pub fn rolling_mean(&self) -> f64 {
        self.history.last().map_or(0.0, |row| row.rolling_mean)
    }
}

impl GameObserver for GameLengthTracker {
    fn on_move(
        &mut self,
        _game_num: usize,
        _board: &BoardState,
        _position: usize,
        _player: Player,
    ) -> Result<()> {
        self.current += 1;
        Ok(())
    }

    fn on_game_end(
        &mut self,
        _game_num: usize,
        _outcome: GameOutcome,
        _board: &BoardState,
    ) -> Result<()> {
        let moves = std::mem::take(&mut self.current);
        self.lengths.push(moves);

        let start = self.lengths.len().saturating_sub(self.window);
        let recent = &self.lengths[start..];
        let rolling_mean = recent.iter().sum::<usize>() as f64 / recent.len() as f64;

        self.history.push(LengthRow {
            game: self.lengths.len(),
            moves,
            rolling_mean,
        });
        Ok(())
    }
}

impl StatisticsTracker for GameLengthTracker {
    fn name(&self) -> &str {
        "game length"
    }

    fn total_games(&self) -> usize {
        self.lengths.len()
    }

    fn write_csv(&self, export: &ExportConfig) -> Result<PathBuf> {
        write_rows(export, "game_length_stats.csv", self.history.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(tracker: &mut GameLengthTracker, game_num: usize, moves: usize) {
        let board = BoardState::new(3);
        for position in 0..moves {
            tracker.on_move(game_num, &board, position, Player::X).unwrap();
        }
        tracker.on_game_end(game_num, GameOutcome::Tie, &board).unwrap();
    }

    #[test]
    fn rolling_mean_over_window() {
        let mut tracker = GameLengthTracker::new(2).unwrap();
        play(&mut tracker, 0, 5);
        assert_eq!(tracker.rolling_mean(), 5.0);
        play(&mut tracker, 1, 9);
        assert_eq!(tracker.rolling_mean(), 7.0);
        play(&mut tracker, 2, 7);
        assert_eq!(tracker.rolling_mean(), 8.0);

        assert_eq!(tracker.lengths(), &[5, 9, 7]);
        assert_eq!(tracker.total_games(), 3);
    }
}
