//! Error types for the brainiac crate

use thiserror::Error;

use crate::menace::StateIndex;

/// Main error type for the brainiac crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("cell {position} is already occupied")]
    CellOccupied { position: usize },

    #[error("position {position} is out of bounds (board has {cells} cells)")]
    InvalidPosition { position: usize, cells: usize },

    #[error("game already over")]
    GameOver,

    #[error("it is {expected}'s turn, not {got}'s")]
    WrongTurn {
        expected: crate::tictactoe::Player,
        got: crate::tictactoe::Player,
    },

    #[error("no legal moves available on board '{board}'")]
    NoLegalMoves { board: String },

    #[error("board string has {got} cells, expected a square board in '{context}'")]
    InvalidBoardLength { got: usize, context: String },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("board size {size} is not supported (must be between 1 and {max})")]
    UnsupportedBoardSize { size: usize, max: usize },

    #[error("board size mismatch: agent plays {expected}x{expected}, board is {got}x{got}")]
    BoardSizeMismatch { expected: usize, got: usize },

    #[error("board '{board}' is not part of the enumerated state space")]
    StateNotFound { board: String },

    #[error("state index {} is not part of the policy store ({len} states)", .index.value())]
    UnknownStateIndex { index: StateIndex, len: usize },

    #[error("action {action} is not in the catalogue (pool holds {len} actions)")]
    UnknownAction { action: usize, len: usize },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid agent kind '{input}'. Expected one of: {expected}")]
    ParseAgentKind { input: String, expected: String },

    #[error("input stream closed while waiting for a move from {player}")]
    InputClosed { player: String },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },

    #[error("failed to {operation}: {source}")]
    Io {
        operation: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io {
            operation: "IO operation".to_string(),
            source,
        }
    }
}
