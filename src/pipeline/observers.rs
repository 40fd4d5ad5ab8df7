//! Observers for game sessions
//!
//! Observers allow composable output during a session without coupling the
//! game loop to a terminal or a file format.

use std::io::Write;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use crate::{
    Result,
    ports::GameObserver,
    tictactoe::{BoardState, Cell, GameOutcome, Player},
};

/// Progress bar observer - Shows session progress
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    x_wins: usize,
    o_wins: usize,
    ties: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            x_wins: 0,
            o_wins: 0,
            ties: 0,
        }
    }

    fn message(&self) -> String {
        format!("X:{} O:{} T:{}", self.x_wins, self.o_wins, self.ties)
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl GameObserver for ProgressObserver {
    fn on_session_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games ({msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(
        &mut self,
        game_num: usize,
        outcome: GameOutcome,
        _board: &BoardState,
    ) -> Result<()> {
        match outcome {
            GameOutcome::Win(Player::X) => self.x_wins += 1,
            GameOutcome::Win(Player::O) => self.o_wins += 1,
            GameOutcome::Tie => self.ties += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_session_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        Ok(())
    }
}

/// How boards are drawn by [`ConsoleView`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Glyph drawn for an empty cell
    pub empty_glyph: char,

    /// Separator between cells of a row
    pub cell_separator: String,

    /// Separator between consecutive boards of one game
    pub board_separator: String,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            empty_glyph: ' ',
            cell_separator: " | ".to_string(),
            board_separator: "\t".to_string(),
        }
    }
}

impl ViewConfig {
    /// Draw one row of `board`
    pub fn render_row(&self, board: &BoardState, row: usize) -> String {
        let size = board.size();
        board.cells()[row * size..(row + 1) * size]
            .iter()
            .map(|cell| match cell {
                Cell::Empty => self.empty_glyph.to_string(),
                other => other.to_char().to_string(),
            })
            .collect::<Vec<_>>()
            .join(&self.cell_separator)
    }
}

/// Text view of each game.
///
/// Collects the board after every move and, when the game ends, prints the
/// whole sequence side by side followed by the result line.
pub struct ConsoleView<W: Write + Send> {
    writer: W,
    config: ViewConfig,
    history: Vec<BoardState>,
}

impl<W: Write + Send> ConsoleView<W> {
    pub fn new(writer: W, config: ViewConfig) -> Self {
        Self {
            writer,
            config,
            history: Vec::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl ConsoleView<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout(), ViewConfig::default())
    }
}

impl<W: Write + Send> GameObserver for ConsoleView<W> {
    fn on_move(
        &mut self,
        _game_num: usize,
        board: &BoardState,
        _position: usize,
        _player: Player,
    ) -> Result<()> {
        self.history.push(board.clone());
        Ok(())
    }

    fn on_game_end(
        &mut self,
        game_num: usize,
        outcome: GameOutcome,
        board: &BoardState,
    ) -> Result<()> {
        writeln!(self.writer, "Game {}", game_num + 1)?;

        let size = board.size();
        for row in 0..size {
            let line: Vec<String> = self
                .history
                .iter()
                .map(|b| self.config.render_row(b, row))
                .collect();
            writeln!(self.writer, "{}", line.join(&self.config.board_separator))?;
        }

        match outcome {
            GameOutcome::Win(player) => writeln!(self.writer, "Game over! {player} Won!")?,
            GameOutcome::Tie => writeln!(self.writer, "Game over! Tie!")?,
        }
        writeln!(self.writer)?;
        self.writer.flush()?;

        self.history.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_view_prints_boards_and_result() {
        let mut view = ConsoleView::new(Vec::new(), ViewConfig::default());

        let mut board = BoardState::new(2);
        for (position, player) in [(0, Player::X), (1, Player::O), (2, Player::X)] {
            board = board.with_move(position, player).unwrap();
            view.on_move(0, &board, position, player).unwrap();
        }
        view.on_game_end(0, GameOutcome::Win(Player::X), &board)
            .unwrap();

        let text = String::from_utf8(view.into_inner()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Game 1");
        assert_eq!(lines[1], "X |  \tX | O\tX | O");
        assert_eq!(lines[2], "  |  \t  |  \tX |  ");
        assert_eq!(lines[3], "Game over! X Won!");
    }

    #[test]
    fn tie_message() {
        let mut view = ConsoleView::new(Vec::new(), ViewConfig::default());
        let board = BoardState::from_string("XOX/XOO/OXX").unwrap();
        view.on_game_end(3, GameOutcome::Tie, &board).unwrap();
        let text = String::from_utf8(view.into_inner()).unwrap();
        assert!(text.contains("Game over! Tie!"));
    }

    #[test]
    fn custom_glyphs() {
        let config = ViewConfig {
            empty_glyph: '.',
            cell_separator: " ".to_string(),
            ..ViewConfig::default()
        };
        let board = BoardState::from_string("X.O/.../...").unwrap();
        assert_eq!(config.render_row(&board, 0), "X . O");
    }
}
