//! # Individual Trait
//!
//! The `Individual` trait is the whole contract between the engine and a caller's
//! representation of a candidate solution. The engine never looks inside a genome;
//! it only asks an individual for its fitness, for a mutated copy, and for a child
//! bred with a partner.
//!
//! Individuals are values: `mutate` and `crossover` take `&self` and return a new
//! individual, so nothing the engine holds is ever changed behind its back.
//!
//! ## Example
//!
//! ```rust
//! use genetic::error::Result;
//! use genetic::individual::Individual;
//! use genetic::rng::RandomNumberGenerator;
//!
//! #[derive(Clone, Debug)]
//! struct Bits(Vec<bool>);
//!
//! impl Individual for Bits {
//!     fn fitness(&self) -> Result<f64> {
//!         Ok(self.0.iter().filter(|b| **b).count() as f64)
//!     }
//!
//!     fn mutate(&self, rate: f64, rng: &mut RandomNumberGenerator) -> Result<Self> {
//!         Ok(Bits(self.0.iter().map(|b| if rng.probability() < rate { !b } else { *b }).collect()))
//!     }
//!
//!     fn crossover(&self, partner: &Self, rng: &mut RandomNumberGenerator) -> Result<Self> {
//!         let cut = rng.gen_range(0..=self.0.len());
//!         let mut genes = self.0[..cut].to_vec();
//!         genes.extend_from_slice(&partner.0[cut..]);
//!         Ok(Bits(genes))
//!     }
//! }
//!
//! let mut rng = RandomNumberGenerator::from_seed(1);
//! let parent = Bits(vec![false; 8]);
//! let child = parent.mutate(1.0, &mut rng).unwrap();
//! assert_eq!(child.fitness().unwrap(), 8.0);
//! assert_eq!(parent.fitness().unwrap(), 0.0);
//! ```

use std::fmt::Debug;

use crate::error::Result;
use crate::rng::RandomNumberGenerator;

/// Trait for types that represent candidate solutions in a genetic search.
///
/// Implementors must be `Clone`, `Debug`, `Send`, `Sync` and `'static` so that
/// populations can be scored on a worker pool and searches can run on a
/// background thread.
///
/// Any error returned from these methods aborts the generation that invoked
/// it and is returned to the caller of the search unchanged.
pub trait Individual: Clone + Debug + Send + Sync + 'static {
    /// Scores this individual. Higher is better.
    ///
    /// Implementations report failures as `GeneticError::Evaluation`. NaN is
    /// rejected by the evaluator; infinities are ordinary scores.
    fn fitness(&self) -> Result<f64>;

    /// Returns a mutated copy of this individual.
    ///
    /// `rate` is the mutation intensity in `[0, 1]`; how it is interpreted
    /// (e.g. per-gene flip probability) is up to the implementation.
    fn mutate(&self, rate: f64, rng: &mut RandomNumberGenerator) -> Result<Self>;

    /// Breeds a child from this individual and `partner`.
    ///
    /// Partners always have the same concrete type as the receiver. If the
    /// two genomes are nevertheless incompatible, return
    /// `GeneticError::ContractViolation`.
    fn crossover(&self, partner: &Self, rng: &mut RandomNumberGenerator) -> Result<Self>;
}
