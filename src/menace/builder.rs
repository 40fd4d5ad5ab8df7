//! Builder pattern for MenaceAgent construction

use std::sync::Arc;

use rand::{SeedableRng, rngs::StdRng};

use super::{
    agent::MenaceAgent, config::LearningConfig, policy::PolicyStore, state_space::StateSpace,
    trajectory::Trajectory,
};
use crate::tictactoe::Player;

/// Builder for constructing MenaceAgent instances with custom configuration.
///
/// # Examples
///
/// ```
/// use brainiac::menace::{LearningConfig, MenaceAgentBuilder};
/// use brainiac::tictactoe::Player;
///
/// // Defaults: 3×3 board, playing X, unseeded
/// let agent = MenaceAgentBuilder::new().build().unwrap();
///
/// // Custom rewards on a 2×2 board
/// let agent = MenaceAgentBuilder::new()
///     .seed(42)
///     .player(Player::O)
///     .board_size(2)
///     .config(LearningConfig {
///         win_reward: 3,
///         ..LearningConfig::for_board_size(2)
///     })
///     .build()
///     .unwrap();
/// assert_eq!(agent.policy().len(), 51);
/// ```
#[derive(Debug)]
pub struct MenaceAgentBuilder {
    seed: Option<u64>,
    player: Player,
    board_size: usize,
    config: Option<LearningConfig>,
    state_space: Option<Arc<StateSpace>>,
    name: Option<String>,
}

impl Default for MenaceAgentBuilder {
    fn default() -> Self {
        Self {
            seed: None,
            player: Player::X,
            board_size: 3,
            config: None,
            state_space: None,
            name: None,
        }
    }
}

impl MenaceAgentBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the random seed for deterministic behavior.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the symbol the agent plays; outcomes are judged from its side.
    pub fn player(mut self, player: Player) -> Self {
        self.player = player;
        self
    }

    /// Set the board side length.
    pub fn board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Set rewards and pool bounds. Defaults to
    /// [`LearningConfig::for_board_size`].
    pub fn config(mut self, config: LearningConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Reuse an already enumerated state space (its size wins over
    /// [`board_size`](Self::board_size)).
    pub fn state_space(mut self, space: Arc<StateSpace>) -> Self {
        self.state_space = Some(space);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Build the agent, allocating one matchbox per valid state.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid, the pool size does
    /// not match the number of cells, or the board size is unsupported.
    pub fn build(self) -> crate::Result<MenaceAgent> {
        let state_space = match self.state_space {
            Some(space) => space,
            None => Arc::new(StateSpace::enumerate(self.board_size)?),
        };
        let board_size = state_space.board_size();

        let config = self
            .config
            .unwrap_or_else(|| LearningConfig::for_board_size(board_size));
        config.validate()?;

        let cells = board_size * board_size;
        if config.pool_size != cells {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "pool_size {} does not match the {cells} cells of a {board_size}x{board_size} board",
                    config.pool_size
                ),
            });
        }

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random::<u64>()),
        };

        let policy = PolicyStore::new(&state_space, &config);

        Ok(MenaceAgent {
            name: self
                .name
                .unwrap_or_else(|| format!("MENACE-{}", self.player)),
            player: self.player,
            config,
            state_space,
            policy,
            trajectory: Trajectory::new(),
            rng,
            episodes_trained: 0,
            illegal_samples: 0,
        })
    }
}
