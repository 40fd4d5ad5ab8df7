//! Ports (trait boundaries) between the game loop and its participants.
//!
//! Agents play the game; observers watch it. Both are owned by the caller and
//! driven by the [`GameController`](crate::pipeline::GameController).

pub mod agent;
pub mod observer;

pub use agent::Agent;
pub use observer::GameObserver;
