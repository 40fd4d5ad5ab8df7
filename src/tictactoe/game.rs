//! High-level game management

use serde::{Deserialize, Serialize};

use super::board::{BoardState, Player};

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Tie,
}

impl GameOutcome {
    /// Judge the outcome from one player's perspective.
    pub fn for_player(self, player: Player) -> EpisodeResult {
        match self {
            GameOutcome::Win(winner) if winner == player => EpisodeResult::Win,
            GameOutcome::Win(_) => EpisodeResult::Loss,
            GameOutcome::Tie => EpisodeResult::Tie,
        }
    }

    pub fn winner(self) -> Option<Player> {
        match self {
            GameOutcome::Win(player) => Some(player),
            GameOutcome::Tie => None,
        }
    }
}

/// Terminal outcome as seen by a single agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EpisodeResult {
    Win,
    Loss,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    GameOver,
}

/// A game of tic-tac-toe on a square board. X always opens.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    board: BoardState,
    status: GameStatus,
    outcome: Option<GameOutcome>,
    moves: Vec<usize>,
}

impl TicTacToe {
    pub fn new(board_size: usize) -> Self {
        TicTacToe {
            board: BoardState::new(board_size),
            status: GameStatus::InProgress,
            outcome: None,
            moves: Vec::new(),
        }
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Final outcome, `None` while the game is in progress
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn current_turn(&self) -> Player {
        self.board.current_turn()
    }

    /// Positions played so far, in order
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    pub fn move_count(&self) -> usize {
        self.moves.len()
    }

    pub fn legal_moves(&self) -> Vec<usize> {
        match self.status {
            GameStatus::InProgress => self.board.empty_cells(),
            GameStatus::GameOver => Vec::new(),
        }
    }

    /// Place `player`'s symbol at `position` and update status and outcome.
    ///
    /// # Errors
    ///
    /// Returns error if the game is over, it is not `player`'s turn, or the
    /// position is off the board or occupied.
    pub fn place_symbol(&mut self, position: usize, player: Player) -> crate::Result<()> {
        if self.status == GameStatus::GameOver {
            return Err(crate::Error::GameOver);
        }
        let expected = self.current_turn();
        if player != expected {
            return Err(crate::Error::WrongTurn {
                expected,
                got: player,
            });
        }

        self.board = self.board.with_move(position, player)?;
        self.moves.push(position);

        if let Some(winner) = self.board.winner() {
            self.outcome = Some(GameOutcome::Win(winner));
            self.status = GameStatus::GameOver;
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Tie);
            self.status = GameStatus::GameOver;
        }

        Ok(())
    }

    /// Clear the board for the next game.
    pub fn reset(&mut self) {
        *self = TicTacToe::new(self.board.size());
    }
}
