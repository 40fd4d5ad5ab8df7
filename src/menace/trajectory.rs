//! Per-episode history of (state, action) pairs

use serde::{Deserialize, Serialize};

use super::state_space::StateIndex;

/// One accepted move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub state: StateIndex,
    pub action: usize,
}

/// Moves taken by one agent during the current episode, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Trajectory {
    steps: Vec<Step>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, state: StateIndex, action: usize) {
        self.steps.push(Step { state, action });
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Move the steps out, leaving the trajectory empty.
    pub fn take(&mut self) -> Vec<Step> {
        std::mem::take(&mut self.steps)
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }
}
