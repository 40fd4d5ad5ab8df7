//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;

pub use board::{BoardState, Cell, Player};
pub use game::{EpisodeResult, GameOutcome, GameStatus, TicTacToe};
