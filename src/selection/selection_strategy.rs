use std::fmt::Debug;

use crate::error::Result;
use crate::individual::Individual;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;

/// Trait for the strategies that choose a crossover partner.
///
/// A strategy is picked once when the search is configured and is then asked
/// for one partner per individual that breeds. The population it receives has
/// been scored and sorted, fittest first.
///
/// # Examples
///
/// ```
/// use genetic::error::Result;
/// use genetic::individual::Individual;
/// use genetic::population::{Population, ScoredIndividual};
/// use genetic::rng::RandomNumberGenerator;
/// use genetic::selection::{SelectionStrategy, TournamentSelection};
///
/// #[derive(Clone, Debug, PartialEq)]
/// struct Value(f64);
///
/// impl Individual for Value {
///     fn fitness(&self) -> Result<f64> {
///         Ok(self.0)
///     }
///
///     fn mutate(&self, _rate: f64, _rng: &mut RandomNumberGenerator) -> Result<Self> {
///         Ok(self.clone())
///     }
///
///     fn crossover(&self, partner: &Self, _rng: &mut RandomNumberGenerator) -> Result<Self> {
///         Ok(Value((self.0 + partner.0) / 2.0))
///     }
/// }
///
/// fn main() -> Result<()> {
///     let population = Population::from_members(vec![
///         ScoredIndividual::new(Value(0.9), 0.9),
///         ScoredIndividual::new(Value(0.5), 0.5),
///         ScoredIndividual::new(Value(0.1), 0.1),
///     ])?;
///     let mut rng = RandomNumberGenerator::from_seed(42);
///
///     let selection = TournamentSelection::new(2);
///     let partner = selection.select(&population, &mut rng)?;
///
///     assert_eq!(partner, &Value(0.9));
///
///     Ok(())
/// }
/// ```
pub trait SelectionStrategy<I>: Debug + Send + Sync
where
    I: Individual,
{
    /// Chooses one individual from `population`.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Selection` if the strategy cannot be applied to
    /// this population.
    fn select<'a>(
        &self,
        population: &'a Population<I>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a I>;
}
