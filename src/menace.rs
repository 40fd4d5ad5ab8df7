//! MENACE learning system
//!
//! Matchbox reinforcement learning: a [`StateSpace`] indexes every valid
//! board, a [`PolicyStore`] holds one [`ActionPool`] per state, and the
//! [`MenaceAgent`] samples moves from those pools and updates them once a
//! game ends.

pub mod agent;
pub mod builder;
pub mod config;
pub mod matchbox;
pub mod policy;
pub mod state_space;
pub mod trajectory;

// Re-export main types
pub use agent::{AgentStats, MenaceAgent};
pub use builder::MenaceAgentBuilder;
pub use config::LearningConfig;
pub use matchbox::ActionPool;
pub use policy::PolicyStore;
pub use state_space::{MAX_BOARD_SIZE, StateIndex, StateSpace};
pub use trajectory::{Step, Trajectory};
