//! Utility functions for the brainiac crate

use rand::Rng;

/// Calculate Shannon entropy from weights (normalizes first).
///
/// Returns 0.0 if the total weight is zero.
///
/// # Examples
///
/// ```
/// use brainiac::utils::entropy_from_weights;
///
/// let entropy = entropy_from_weights([1.0, 1.0]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 0.001);
///
/// assert_eq!(entropy_from_weights([0.0, 0.0]), 0.0);
/// ```
pub fn entropy_from_weights<I>(weights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    normalize_weights(weights)
        .map(|probabilities| {
            probabilities
                .into_iter()
                .filter(|&p| p > 0.0)
                .map(|p| -p * p.ln())
                .sum()
        })
        .unwrap_or(0.0)
}

/// Normalize weights to probabilities that sum to 1.0.
///
/// Returns `None` if the total weight is zero, negative or non-finite.
///
/// ```
/// use brainiac::utils::normalize_weights;
///
/// assert_eq!(normalize_weights([1.0, 2.0, 1.0]), Some(vec![0.25, 0.5, 0.25]));
/// assert_eq!(normalize_weights([0.0, 0.0]), None);
/// ```
pub fn normalize_weights<I>(weights: I) -> Option<Vec<f64>>
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    let sum: f64 = weights.iter().sum();
    if weights.is_empty() || !sum.is_finite() || sum <= 0.0 {
        return None;
    }
    Some(weights.iter().map(|&w| w / sum).collect())
}

/// Draw an index with probability proportional to its weight.
///
/// Integer weights keep the draw exact: a ticket is drawn uniformly from
/// `[0, total)` and walked down the cumulative weights. When every weight is
/// zero the draw is uniform over all indices. Returns `None` only for an
/// empty slice.
///
/// ```
/// use rand::{SeedableRng, rngs::StdRng};
/// use brainiac::utils::weighted_index;
///
/// let mut rng = StdRng::seed_from_u64(42);
/// assert_eq!(weighted_index(&mut rng, &[0, 5, 0]), Some(1));
/// assert_eq!(weighted_index(&mut rng, &[]), None);
/// ```
pub fn weighted_index<R: Rng>(rng: &mut R, weights: &[u32]) -> Option<usize> {
    if weights.is_empty() {
        return None;
    }

    let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
    if total == 0 {
        return Some(rng.random_range(0..weights.len()));
    }

    let mut ticket = rng.random_range(0..total);
    for (index, &weight) in weights.iter().enumerate() {
        let weight = u64::from(weight);
        if ticket < weight {
            return Some(index);
        }
        ticket -= weight;
    }

    // Unreachable while ticket < total
    weights.iter().rposition(|&w| w > 0)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn test_weighted_index_single_item() {
        let mut rng = StdRng::seed_from_u64(42);
        assert_eq!(weighted_index(&mut rng, &[7]), Some(0));
    }

    #[test]
    fn test_weighted_index_zero_weights_fall_back_to_uniform() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [false; 3];
        for _ in 0..200 {
            let index = weighted_index(&mut rng, &[0, 0, 0]).unwrap();
            seen[index] = true;
        }
        assert!(seen.iter().all(|&s| s), "every index should be drawn: {seen:?}");
    }

    #[test]
    fn test_weighted_index_never_draws_zero_weight_when_total_positive() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let index = weighted_index(&mut rng, &[0, 3, 0, 1]).unwrap();
            assert!(index == 1 || index == 3, "drew zero-weight index {index}");
        }
    }

    #[test]
    fn test_weighted_index_distribution() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts = HashMap::new();
        for _ in 0..1000 {
            *counts.entry(weighted_index(&mut rng, &[1, 2, 1]).unwrap()).or_insert(0) += 1;
        }
        let count_a = counts.get(&0).copied().unwrap_or(0);
        let count_b = counts.get(&1).copied().unwrap_or(0);
        let count_c = counts.get(&2).copied().unwrap_or(0);
        assert!(count_b > count_a, "b should appear more than a");
        assert!(count_b > count_c, "b should appear more than c");
    }

    #[test]
    fn test_weighted_index_deterministic() {
        let weights = [1, 2, 1];
        let mut rng1 = StdRng::seed_from_u64(12345);
        let mut rng2 = StdRng::seed_from_u64(12345);
        assert_eq!(
            weighted_index(&mut rng1, &weights),
            weighted_index(&mut rng2, &weights)
        );
    }

    #[test]
    fn normalize_weights_returns_none_for_zero_total() {
        assert!(normalize_weights(vec![0.0, 0.0]).is_none());
        assert!(normalize_weights(Vec::new()).is_none());
    }
}
