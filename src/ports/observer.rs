//! Observer port - watching games without coupling to the game loop

use crate::{
    Result,
    tictactoe::{BoardState, GameOutcome, Player},
};

/// Observer of a session of games
///
/// Views, progress bars and statistics trackers all implement this trait.
///
/// # Event Sequence
///
/// 1. `on_session_start(total_games)` - once
/// 2. For each game:
///    - `on_move(...)` - after every placed symbol
///    - `on_game_end(...)` - after both agents have learned from the outcome
/// 3. `on_session_end()` - once
///
/// # Examples
///
/// ```
/// use brainiac::{
///     ports::GameObserver,
///     tictactoe::{BoardState, GameOutcome},
/// };
///
/// struct TieCounter {
///     ties: usize,
/// }
///
/// impl GameObserver for TieCounter {
///     fn on_game_end(
///         &mut self,
///         _game_num: usize,
///         outcome: GameOutcome,
///         _board: &BoardState,
///     ) -> brainiac::Result<()> {
///         if outcome == GameOutcome::Tie {
///             self.ties += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait GameObserver: Send {
    /// Called once before the first game.
    fn on_session_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after `player` placed a symbol at `position`.
    ///
    /// `board` is the board after the move.
    fn on_move(
        &mut self,
        _game_num: usize,
        _board: &BoardState,
        _position: usize,
        _player: Player,
    ) -> Result<()> {
        Ok(())
    }

    /// Called when a game reaches a terminal board.
    fn on_game_end(
        &mut self,
        _game_num: usize,
        _outcome: GameOutcome,
        _board: &BoardState,
    ) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game.
    fn on_session_end(&mut self) -> Result<()> {
        Ok(())
    }
}
