//! Matchbox (action pool) implementation

use serde::{Deserialize, Serialize};

use crate::utils::{entropy_from_weights, normalize_weights, weighted_index};

/// A matchbox: one bounded integer weight per action.
///
/// Actions are the board cells `0..len()`. Weights stay within
/// `[0, max_weight]`. A weight may belong to a cell that is already occupied
/// in the box's state; the agent filters such samples and punishes them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionPool {
    weights: Vec<u32>,
    start_weight: u32,
    max_weight: u32,
}

impl ActionPool {
    /// Create a pool of `size` actions, each holding `start_weight`.
    ///
    /// The start weight is clamped to `max_weight`.
    pub fn new(size: usize, start_weight: u32, max_weight: u32) -> Self {
        let start_weight = start_weight.min(max_weight);
        ActionPool {
            weights: vec![start_weight; size],
            start_weight,
            max_weight,
        }
    }

    /// Number of actions in the catalogue
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }

    pub fn max_weight(&self) -> u32 {
        self.max_weight
    }

    pub fn start_weight(&self) -> u32 {
        self.start_weight
    }

    /// Weight of one action, `None` outside the catalogue
    pub fn weight(&self, action: usize) -> Option<u32> {
        self.weights.get(action).copied()
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    pub fn total_weight(&self) -> u64 {
        self.weights.iter().map(|&w| u64::from(w)).sum()
    }

    /// Draw an action proportionally to the weights.
    ///
    /// A pool whose weights are all zero draws uniformly over the whole
    /// catalogue instead of failing.
    pub fn sample(&self, rng: &mut impl rand::Rng) -> usize {
        weighted_index(rng, &self.weights).unwrap_or_default()
    }

    /// Add `amount` to an action, saturating at `max_weight`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAction` if the action is outside the catalogue.
    pub fn reinforce(&mut self, action: usize, amount: u32) -> crate::Result<()> {
        let max_weight = self.max_weight;
        let weight = self.weight_mut(action)?;
        *weight = weight.saturating_add(amount).min(max_weight);
        Ok(())
    }

    /// Remove `amount` from an action, saturating at zero.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAction` if the action is outside the catalogue.
    pub fn punish(&mut self, action: usize, amount: u32) -> crate::Result<()> {
        let weight = self.weight_mut(action)?;
        *weight = weight.saturating_sub(amount);
        Ok(())
    }

    /// Remove `amount` from every action.
    pub fn punish_all(&mut self, amount: u32) {
        for weight in &mut self.weights {
            *weight = weight.saturating_sub(amount);
        }
    }

    /// Overwrite one weight, clamped to `max_weight`.
    ///
    /// # Errors
    ///
    /// Returns `UnknownAction` if the action is outside the catalogue.
    pub fn set_weight(&mut self, action: usize, value: u32) -> crate::Result<()> {
        let max_weight = self.max_weight;
        *self.weight_mut(action)? = value.min(max_weight);
        Ok(())
    }

    /// Selection probabilities; uniform when the pool is depleted.
    pub fn distribution(&self) -> Vec<f64> {
        normalize_weights(self.weights.iter().map(|&w| f64::from(w)))
            .unwrap_or_else(|| vec![1.0 / self.len() as f64; self.len()])
    }

    /// Shannon entropy of the weight distribution (0 for a depleted pool)
    pub fn entropy(&self) -> f64 {
        entropy_from_weights(self.weights.iter().map(|&w| f64::from(w)))
    }

    /// Restore every action to the start weight
    pub fn reset(&mut self) {
        self.weights.fill(self.start_weight);
    }

    fn weight_mut(&mut self, action: usize) -> crate::Result<&mut u32> {
        let len = self.weights.len();
        self.weights
            .get_mut(action)
            .ok_or(crate::Error::UnknownAction { action, len })
    }
}
