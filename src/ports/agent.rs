//! Agent port - the capability every player kind implements

use crate::{
    Result,
    tictactoe::{BoardState, GameOutcome, Player},
};

/// A participant in a game of tic-tac-toe.
///
/// The controller asks the side to move for a position with [`get_move`] and,
/// once the game is over, reports the outcome to both sides through
/// [`update_strategy`]. Calls are strictly sequential.
///
/// # Examples
///
/// ```
/// use brainiac::{
///     ports::Agent,
///     tictactoe::{BoardState, Player},
/// };
///
/// /// Always takes the lowest free cell.
/// struct FirstFree(Player);
///
/// impl Agent for FirstFree {
///     fn get_move(&mut self, board: &BoardState) -> brainiac::Result<usize> {
///         board
///             .empty_cells()
///             .first()
///             .copied()
///             .ok_or(brainiac::Error::NoLegalMoves { board: board.encode() })
///     }
///
///     fn name(&self) -> &str {
///         "first-free"
///     }
///
///     fn player(&self) -> Player {
///         self.0
///     }
/// }
/// ```
///
/// [`get_move`]: Agent::get_move
/// [`update_strategy`]: Agent::update_strategy
pub trait Agent: Send {
    /// Choose a legal position (an empty cell) on the given board.
    ///
    /// # Errors
    ///
    /// Returns an error if no legal move exists or the board does not fit
    /// the agent.
    fn get_move(&mut self, board: &BoardState) -> Result<usize>;

    /// Learn from the outcome of the game that just ended.
    ///
    /// The default implementation does nothing, suitable for non-adaptive
    /// agents.
    fn update_strategy(&mut self, _outcome: GameOutcome) -> Result<()> {
        Ok(())
    }

    /// Name used in logs and summaries
    fn name(&self) -> &str;

    /// Symbol this agent plays
    fn player(&self) -> Player;
}
