//! Adaptive mutation rate.
//!
//! With adaptive mutation enabled, individuals at or below the population
//! average mutate at the base rate. Above-average individuals mutate less the
//! closer they are to the best score, so the current leaders are disturbed the
//! least. A population with no spread between average and best mutates at the
//! full rate to break out of stagnation.

/// Computes the mutation rate for an individual scoring `score`.
///
/// ```rust
/// use genetic::evolution::adaptive_mutation_rate;
///
/// // Below average: base rate.
/// assert_eq!(adaptive_mutation_rate(0.2, 3.0, 4.0, 10.0), 0.2);
/// // Halfway between average and best: half the base rate.
/// assert_eq!(adaptive_mutation_rate(0.2, 7.0, 4.0, 10.0), 0.1);
/// ```
pub fn adaptive_mutation_rate(base_rate: f64, score: f64, avg_fitness: f64, fittest_score: f64) -> f64 {
    if score <= avg_fitness {
        return base_rate;
    }

    let spread = fittest_score - avg_fitness;
    if spread == 0.0 {
        1.0
    } else {
        (fittest_score - score) / spread * base_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_or_below_average_uses_base_rate() {
        assert_eq!(adaptive_mutation_rate(0.3, 4.0, 4.0, 10.0), 0.3);
        assert_eq!(adaptive_mutation_rate(0.3, -2.0, 4.0, 10.0), 0.3);
    }

    #[test]
    fn test_above_average_is_scaled_by_distance_to_best() {
        assert_eq!(adaptive_mutation_rate(0.8, 7.0, 4.0, 10.0), 0.4);
        assert_eq!(adaptive_mutation_rate(1.0, 7.0, 4.0, 10.0), 0.5);
        assert_eq!(adaptive_mutation_rate(0.8, 10.0, 4.0, 10.0), 0.0);
    }

    #[test]
    fn test_no_spread_forces_full_mutation() {
        for base in [0.0, 0.25, 0.9] {
            assert_eq!(adaptive_mutation_rate(base, 6.0, 5.0, 5.0), 1.0);
        }
    }
}
