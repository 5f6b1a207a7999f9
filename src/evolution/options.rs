//! # Params
//!
//! `Params` holds everything a search is configured with: operator
//! probabilities, elitism, the target fitness, evaluator width, the selection
//! strategy, an optional seed and the initial population. It is assembled with
//! `Params::builder()` and handed to `Controller::new`, which validates it once.
//!
//! ## Example
//!
//! ```rust
//! use genetic::error::Result;
//! use genetic::evolution::Params;
//! use genetic::individual::Individual;
//! use genetic::rng::RandomNumberGenerator;
//! use genetic::selection::TournamentSelection;
//!
//! #[derive(Clone, Debug)]
//! struct Value(f64);
//!
//! impl Individual for Value {
//!     fn fitness(&self) -> Result<f64> {
//!         Ok(self.0)
//!     }
//!
//!     fn mutate(&self, _rate: f64, _rng: &mut RandomNumberGenerator) -> Result<Self> {
//!         Ok(self.clone())
//!     }
//!
//!     fn crossover(&self, partner: &Self, _rng: &mut RandomNumberGenerator) -> Result<Self> {
//!         Ok(Value((self.0 + partner.0) / 2.0))
//!     }
//! }
//!
//! let params = Params::builder()
//!     .elitism(2)
//!     .mutation(0.8)
//!     .crossover(0.7)
//!     .adaptive_mutation(true)
//!     .target_fitness(10.0)
//!     .parallelism(4)
//!     .selection(TournamentSelection::new(3))
//!     .seed(42)
//!     .initial_population(vec![Value(1.0), Value(2.0), Value(3.0)])
//!     .build();
//!
//! assert!(params.validate().is_ok());
//! assert_eq!(params.get_elitism(), 2);
//! ```

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::selection::SelectionStrategy;

/// Configuration of a single search.
#[derive(Debug)]
pub struct Params<I: Individual> {
    /// How many of the top-ranked individuals pass to the next generation unchanged.
    pub(crate) elitism: usize,
    /// Probability in `[0, 1]` that a non-elite individual is mutated.
    pub(crate) mutation: f64,
    /// Scale each individual's mutation rate by how far it is from the best score.
    pub(crate) adaptive_mutation: bool,
    /// Probability in `[0, 1]` that a non-elite individual breeds.
    pub(crate) crossover: f64,
    /// The search stops once any individual scores at least this much.
    pub(crate) target_fitness: f64,
    /// Number of workers scoring each generation.
    pub(crate) parallelism: usize,
    pub(crate) selection: Option<Box<dyn SelectionStrategy<I>>>,
    pub(crate) seed: Option<u64>,
    pub(crate) initial_population: Vec<I>,
}

impl<I: Individual> Params<I> {
    /// Returns a builder for creating a `Params` instance.
    pub fn builder() -> ParamsBuilder<I> {
        ParamsBuilder::default()
    }

    pub fn get_elitism(&self) -> usize {
        self.elitism
    }

    pub fn get_mutation(&self) -> f64 {
        self.mutation
    }

    pub fn is_adaptive_mutation(&self) -> bool {
        self.adaptive_mutation
    }

    pub fn get_crossover(&self) -> f64 {
        self.crossover
    }

    pub fn get_target_fitness(&self) -> f64 {
        self.target_fitness
    }

    /// Returns the evaluator width, never less than one.
    pub fn get_parallelism(&self) -> usize {
        self.parallelism.max(1)
    }

    pub fn get_seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn get_initial_population(&self) -> &[I] {
        &self.initial_population
    }

    /// Checks every parameter, returning the first problem found.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if:
    /// - `mutation` or `crossover` is outside `[0, 1]`
    /// - no selection strategy was given
    /// - the initial population is empty
    /// - `elitism` exceeds the population size
    /// - `target_fitness` is NaN
    pub fn validate(&self) -> Result<()> {
        if !is_probability(self.crossover) {
            return Err(GeneticError::Configuration(format!(
                "Crossover probability must be between 0 and 1, inclusive; got {}",
                self.crossover
            )));
        }

        if !is_probability(self.mutation) {
            return Err(GeneticError::Configuration(format!(
                "Mutation probability must be between 0 and 1, inclusive; got {}",
                self.mutation
            )));
        }

        if self.selection.is_none() {
            return Err(GeneticError::Configuration(
                "Selection strategy not specified".to_string(),
            ));
        }

        if self.initial_population.is_empty() {
            return Err(GeneticError::Configuration(
                "Failed to initialize population: initial population is empty".to_string(),
            ));
        }

        if self.elitism > self.initial_population.len() {
            return Err(GeneticError::Configuration(format!(
                "Elitism ({}) cannot exceed population size ({})",
                self.elitism,
                self.initial_population.len()
            )));
        }

        if self.target_fitness.is_nan() {
            return Err(GeneticError::Configuration(
                "Target fitness cannot be NaN".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_probability(value: f64) -> bool {
    (0.0..=1.0).contains(&value)
}

/// Builder for `Params`.
///
/// Provides a fluent interface for constructing `Params` instances. Unset
/// values default to zero, adaptive mutation off, one worker and no seed.
#[derive(Debug)]
pub struct ParamsBuilder<I: Individual> {
    elitism: Option<usize>,
    mutation: Option<f64>,
    adaptive_mutation: Option<bool>,
    crossover: Option<f64>,
    target_fitness: Option<f64>,
    parallelism: Option<usize>,
    selection: Option<Box<dyn SelectionStrategy<I>>>,
    seed: Option<u64>,
    initial_population: Vec<I>,
}

impl<I: Individual> Default for ParamsBuilder<I> {
    fn default() -> Self {
        Self {
            elitism: None,
            mutation: None,
            adaptive_mutation: None,
            crossover: None,
            target_fitness: None,
            parallelism: None,
            selection: None,
            seed: None,
            initial_population: Vec::new(),
        }
    }
}

impl<I: Individual> ParamsBuilder<I> {
    pub fn elitism(mut self, value: usize) -> Self {
        self.elitism = Some(value);
        self
    }

    pub fn mutation(mut self, value: f64) -> Self {
        self.mutation = Some(value);
        self
    }

    pub fn adaptive_mutation(mut self, value: bool) -> Self {
        self.adaptive_mutation = Some(value);
        self
    }

    pub fn crossover(mut self, value: f64) -> Self {
        self.crossover = Some(value);
        self
    }

    pub fn target_fitness(mut self, value: f64) -> Self {
        self.target_fitness = Some(value);
        self
    }

    /// Sets the number of workers scoring each generation. Zero means one.
    pub fn parallelism(mut self, value: usize) -> Self {
        self.parallelism = Some(value);
        self
    }

    pub fn selection<S>(mut self, strategy: S) -> Self
    where
        S: SelectionStrategy<I> + 'static,
    {
        self.selection = Some(Box::new(strategy));
        self
    }

    /// Seeds the controller's random number generator for a reproducible search.
    pub fn seed(mut self, value: u64) -> Self {
        self.seed = Some(value);
        self
    }

    pub fn initial_population(mut self, individuals: Vec<I>) -> Self {
        self.initial_population = individuals;
        self
    }

    /// Builds the `Params` instance. Validation is left to `Controller::new`.
    pub fn build(self) -> Params<I> {
        Params {
            elitism: self.elitism.unwrap_or(0),
            mutation: self.mutation.unwrap_or(0.0),
            adaptive_mutation: self.adaptive_mutation.unwrap_or(false),
            crossover: self.crossover.unwrap_or(0.0),
            target_fitness: self.target_fitness.unwrap_or(0.0),
            parallelism: self.parallelism.unwrap_or(1),
            selection: self.selection,
            seed: self.seed,
            initial_population: self.initial_population,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomNumberGenerator;
    use crate::selection::RouletteWheelSelection;

    #[derive(Clone, Debug, Default)]
    struct Blank;

    impl Individual for Blank {
        fn fitness(&self) -> Result<f64> {
            Ok(0.0)
        }

        fn mutate(&self, _rate: f64, _rng: &mut RandomNumberGenerator) -> Result<Self> {
            Ok(Blank)
        }

        fn crossover(&self, _partner: &Self, _rng: &mut RandomNumberGenerator) -> Result<Self> {
            Ok(Blank)
        }
    }

    fn valid() -> ParamsBuilder<Blank> {
        Params::builder()
            .selection(RouletteWheelSelection::new())
            .initial_population(vec![Blank; 3])
    }

    #[test]
    fn test_defaults() {
        let params = valid().build();

        assert_eq!(params.get_elitism(), 0);
        assert_eq!(params.get_mutation(), 0.0);
        assert_eq!(params.get_crossover(), 0.0);
        assert!(!params.is_adaptive_mutation());
        assert_eq!(params.get_parallelism(), 1);
        assert_eq!(params.get_seed(), None);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_zero_parallelism_reads_as_one() {
        let params = valid().parallelism(0).build();
        assert_eq!(params.get_parallelism(), 1);
    }

    #[test]
    fn test_invalid_params_are_rejected() {
        let cases: Vec<(&str, Params<Blank>)> = vec![
            ("negative mutation", valid().mutation(-0.5).build()),
            ("mutation above one", valid().mutation(30.0).build()),
            ("NaN mutation", valid().mutation(f64::NAN).build()),
            ("negative crossover", valid().crossover(-0.5).build()),
            ("crossover above one", valid().crossover(30.0).build()),
            ("elitism above size", valid().elitism(4).build()),
            ("NaN target", valid().target_fitness(f64::NAN).build()),
            (
                "missing selection",
                Params::builder().initial_population(vec![Blank; 3]).build(),
            ),
            (
                "empty population",
                Params::builder()
                    .selection(RouletteWheelSelection::new())
                    .build(),
            ),
        ];

        for (label, params) in cases {
            match params.validate() {
                Err(GeneticError::Configuration(_)) => {}
                other => panic!("{}: expected Configuration error, got {:?}", label, other),
            }
        }
    }
}
