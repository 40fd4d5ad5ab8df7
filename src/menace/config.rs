//! Learning configuration for matchbox agents

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Reward magnitudes and pool bounds for a matchbox agent.
///
/// Every field has a default, so a JSON file only needs the keys it changes:
///
/// ```
/// use brainiac::menace::LearningConfig;
///
/// let config: LearningConfig = serde_json::from_str(r#"{ "loss_penalty": 3 }"#).unwrap();
/// assert_eq!(config.loss_penalty, 3);
/// assert_eq!(config.win_reward, 1);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearningConfig {
    /// Added to the chosen action of every visited state after a win
    pub win_reward: u32,
    /// Removed from the chosen action of every visited state after a loss
    pub loss_penalty: u32,
    /// Removed from every action of every visited state after a tie
    pub tie_penalty: u32,
    /// Actions per matchbox; one per board cell
    pub pool_size: usize,
    /// Initial weight of every action
    pub start_weight: u32,
    /// Upper bound of any action weight
    pub max_weight: u32,
    /// Removed from an action each time it is sampled on an occupied cell
    pub invalid_move_penalty: u32,
}

impl Default for LearningConfig {
    fn default() -> Self {
        LearningConfig {
            win_reward: 1,
            loss_penalty: 2,
            tie_penalty: 1,
            pool_size: 9,
            start_weight: 10,
            max_weight: 20,
            invalid_move_penalty: 100,
        }
    }
}

impl LearningConfig {
    /// Defaults with one action per cell of a `board_size × board_size` board.
    pub fn for_board_size(board_size: usize) -> Self {
        LearningConfig {
            pool_size: board_size * board_size,
            ..Self::default()
        }
    }

    /// Load a configuration for a `board_size × board_size` board from a
    /// JSON file.
    pub fn load<P: AsRef<std::path::Path>>(path: P, board_size: usize) -> crate::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| crate::Error::Io {
            operation: format!("open config '{}'", path.display()),
            source,
        })?;
        let value: serde_json::Value = serde_json::from_reader(std::io::BufReader::new(file))?;
        Self::from_json(value, board_size)
    }

    /// Build a validated configuration from parsed JSON.
    ///
    /// Missing fields take the defaults of [`LearningConfig::for_board_size`],
    /// so a file without `pool_size` gets one action per cell.
    pub fn from_json(value: serde_json::Value, board_size: usize) -> crate::Result<Self> {
        let pool_given = value.get("pool_size").is_some();
        let mut config: LearningConfig = serde_json::from_value(value)?;
        if !pool_given {
            config.pool_size = board_size * board_size;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check the internal consistency of the bounds.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if the pool is empty, the maximum weight
    /// is zero, the start weight exceeds the maximum or occupied cells are
    /// never punished.
    pub fn validate(&self) -> crate::Result<()> {
        let invalid = |message: String| Err(crate::Error::InvalidConfiguration { message });

        if self.pool_size == 0 {
            return invalid("pool_size must be at least 1".to_string());
        }
        if self.max_weight == 0 {
            return invalid("max_weight must be at least 1".to_string());
        }
        if self.start_weight > self.max_weight {
            return invalid(format!(
                "start_weight ({}) must not exceed max_weight ({})",
                self.start_weight, self.max_weight
            ));
        }
        if self.invalid_move_penalty == 0 {
            return invalid("invalid_move_penalty must be at least 1".to_string());
        }
        if self.invalid_move_penalty < self.max_weight {
            warn!(
                invalid_move_penalty = self.invalid_move_penalty,
                max_weight = self.max_weight,
                "occupied cells may be sampled repeatedly before their weight is exhausted"
            );
        }
        if self.win_reward == 0 && self.loss_penalty == 0 && self.tie_penalty == 0 {
            warn!("all rewards are zero; matchboxes will not learn from outcomes");
        }
        Ok(())
    }
}
