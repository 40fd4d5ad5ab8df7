//! Policy store: one matchbox per enumerated state

use super::{
    config::LearningConfig,
    matchbox::ActionPool,
    state_space::{StateIndex, StateSpace},
};

/// Mapping from [`StateIndex`] to its [`ActionPool`].
///
/// Fully populated at construction; pools are never added or removed
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyStore {
    pools: Vec<ActionPool>,
}

impl PolicyStore {
    /// Allocate one pool per state of the space.
    pub fn new(space: &StateSpace, config: &LearningConfig) -> Self {
        let pools = (0..space.len())
            .map(|_| ActionPool::new(config.pool_size, config.start_weight, config.max_weight))
            .collect();
        PolicyStore { pools }
    }

    /// Number of matchboxes
    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    /// # Errors
    ///
    /// Returns `UnknownStateIndex` if the index lies outside the store.
    pub fn for_state(&self, index: StateIndex) -> crate::Result<&ActionPool> {
        let len = self.pools.len();
        self.pools
            .get(index.value())
            .ok_or(crate::Error::UnknownStateIndex { index, len })
    }

    /// # Errors
    ///
    /// Returns `UnknownStateIndex` if the index lies outside the store.
    pub fn for_state_mut(&mut self, index: StateIndex) -> crate::Result<&mut ActionPool> {
        let len = self.pools.len();
        self.pools
            .get_mut(index.value())
            .ok_or(crate::Error::UnknownStateIndex { index, len })
    }

    pub fn iter(&self) -> impl Iterator<Item = (StateIndex, &ActionPool)> + '_ {
        self.pools
            .iter()
            .enumerate()
            .map(|(i, pool)| (StateIndex::new(i), pool))
    }

    /// Sum of all weights across all pools
    pub fn total_weight(&self) -> u64 {
        self.pools.iter().map(ActionPool::total_weight).sum()
    }

    /// Restore every pool to its start weights
    pub fn reset(&mut self) {
        self.pools.iter_mut().for_each(ActionPool::reset);
    }
}
