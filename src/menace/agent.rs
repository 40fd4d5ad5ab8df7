//! MENACE agent that learns to play Tic-Tac-Toe with matchboxes.

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{
    builder::MenaceAgentBuilder,
    config::LearningConfig,
    policy::PolicyStore,
    state_space::StateSpace,
    trajectory::Trajectory,
};
use crate::{
    ports::Agent,
    tictactoe::{BoardState, EpisodeResult, GameOutcome, Player},
};

/// Matchbox learning agent.
///
/// Each turn the agent looks up the matchbox of the current board, draws a
/// cell from it and records the (state, action) pair. Draws that land on an
/// occupied cell are punished with `invalid_move_penalty` and redrawn from
/// the same box. When the game ends every recorded pair is rewarded,
/// punished or (on a tie) has its whole box punished, and the trajectory is
/// cleared.
pub struct MenaceAgent {
    pub(crate) name: String,
    pub(crate) player: Player,
    pub(crate) config: LearningConfig,
    pub(crate) state_space: Arc<StateSpace>,
    pub(crate) policy: PolicyStore,
    pub(crate) trajectory: Trajectory,
    pub(crate) rng: StdRng,
    pub(crate) episodes_trained: usize,
    pub(crate) illegal_samples: usize,
}

impl std::fmt::Debug for MenaceAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenaceAgent")
            .field("name", &self.name)
            .field("player", &self.player)
            .field("config", &self.config)
            .field("matchboxes", &self.policy.len())
            .field("trajectory", &self.trajectory.len())
            .finish()
    }
}

impl MenaceAgent {
    /// Create a new builder for constructing a MENACE agent.
    ///
    /// # Example
    /// ```
    /// use brainiac::{menace::MenaceAgent, tictactoe::Player};
    ///
    /// let agent = MenaceAgent::builder()
    ///     .seed(42)
    ///     .player(Player::O)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(agent.policy().len(), 8953);
    /// ```
    pub fn builder() -> MenaceAgentBuilder {
        MenaceAgentBuilder::new()
    }

    /// Create a 3×3 agent with default configuration.
    ///
    /// # Errors
    /// Returns an error if state enumeration fails.
    pub fn new(player: Player, seed: Option<u64>) -> crate::Result<Self> {
        let mut builder = Self::builder().player(player);
        if let Some(s) = seed {
            builder = builder.seed(s);
        }
        builder.build()
    }

    /// Set or reset the agent's RNG seed
    pub fn reseed(&mut self, seed: Option<u64>) {
        self.rng = match seed {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };
    }

    pub fn config(&self) -> &LearningConfig {
        &self.config
    }

    pub fn board_size(&self) -> usize {
        self.state_space.board_size()
    }

    pub fn state_space(&self) -> &StateSpace {
        &self.state_space
    }

    pub fn policy(&self) -> &PolicyStore {
        &self.policy
    }

    pub fn policy_mut(&mut self) -> &mut PolicyStore {
        &mut self.policy
    }

    /// Moves recorded since the last outcome
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Draw a legal move for `board` and record it in the trajectory.
    ///
    /// # Errors
    ///
    /// Returns `BoardSizeMismatch` for a board of another size,
    /// `NoLegalMoves` for a full board and `StateNotFound` for a board that
    /// breaks the turn-alternation invariant.
    pub fn select_move(&mut self, board: &BoardState) -> crate::Result<usize> {
        if board.size() != self.board_size() {
            return Err(crate::Error::BoardSizeMismatch {
                expected: self.board_size(),
                got: board.size(),
            });
        }
        if board.empty_cells().is_empty() {
            return Err(crate::Error::NoLegalMoves {
                board: board.encode(),
            });
        }

        let index = self.state_space.index_of(board)?;
        let pool = self.policy.for_state_mut(index)?;

        loop {
            let action = pool.sample(&mut self.rng);
            if board.is_empty_cell(action) {
                trace!(agent = %self.name, state = %index, action, "move selected");
                self.trajectory.push(index, action);
                return Ok(action);
            }

            pool.punish(action, self.config.invalid_move_penalty)?;
            self.illegal_samples += 1;
            debug!(
                agent = %self.name,
                state = %index,
                action,
                weight = pool.weight(action).unwrap_or_default(),
                "rejected sample on occupied cell"
            );
        }
    }

    /// Apply the episode-end rule to every recorded move and clear the
    /// trajectory.
    ///
    /// With an empty trajectory this is a no-op.
    pub fn apply_outcome(&mut self, result: EpisodeResult) -> crate::Result<()> {
        let steps = self.trajectory.take();
        if steps.is_empty() {
            return Ok(());
        }

        for step in &steps {
            let pool = self.policy.for_state_mut(step.state)?;
            match result {
                EpisodeResult::Win => pool.reinforce(step.action, self.config.win_reward)?,
                EpisodeResult::Loss => pool.punish(step.action, self.config.loss_penalty)?,
                EpisodeResult::Tie => pool.punish_all(self.config.tie_penalty),
            }
        }

        self.episodes_trained += 1;
        debug!(
            agent = %self.name,
            ?result,
            moves = steps.len(),
            episodes = self.episodes_trained,
            "matchboxes updated"
        );
        Ok(())
    }

    /// Get statistics about the agent
    pub fn stats(&self) -> AgentStats {
        let entropies: Vec<f64> = self
            .policy
            .iter()
            .filter(|(_, pool)| pool.total_weight() > 0)
            .map(|(_, pool)| pool.entropy())
            .collect();

        let avg_entropy = if entropies.is_empty() {
            0.0
        } else {
            entropies.iter().sum::<f64>() / entropies.len() as f64
        };

        AgentStats {
            total_matchboxes: self.policy.len(),
            depleted_matchboxes: self.policy.len() - entropies.len(),
            total_weight: self.policy.total_weight(),
            avg_entropy,
            episodes_trained: self.episodes_trained,
            illegal_samples: self.illegal_samples,
        }
    }

    /// Reset all matchboxes and counters to their initial state
    pub fn reset(&mut self) {
        self.policy.reset();
        self.trajectory.clear();
        self.episodes_trained = 0;
        self.illegal_samples = 0;
    }
}

impl Agent for MenaceAgent {
    fn get_move(&mut self, board: &BoardState) -> crate::Result<usize> {
        self.select_move(board)
    }

    fn update_strategy(&mut self, outcome: GameOutcome) -> crate::Result<()> {
        self.apply_outcome(outcome.for_player(self.player))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn player(&self) -> Player {
        self.player
    }
}

/// Statistics about a MENACE agent
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentStats {
    pub total_matchboxes: usize,
    pub depleted_matchboxes: usize,
    pub total_weight: u64,
    pub avg_entropy: f64,
    pub episodes_trained: usize,
    pub illegal_samples: usize,
}
