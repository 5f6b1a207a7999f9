use crate::error::{GeneticError, OptionExt, Result};
use crate::individual::Individual;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that picks a partner by spinning a roulette wheel.
///
/// Each individual owns a slice of the wheel as wide as its score, so the
/// chance of being picked is proportional to fitness. A uniform draw in
/// `[0, total_fitness)` is walked through the population, accumulating scores,
/// and the first individual at which the running sum reaches the draw wins.
///
/// Scores must be positive for the weighting to mean anything. With a total
/// of zero or less the draw collapses onto the start of the walk and the
/// selection is no longer fitness-proportionate. Searches whose fitness
/// function produces negative scores should use
/// [`TournamentSelection`](crate::selection::TournamentSelection) instead.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouletteWheelSelection;

impl RouletteWheelSelection {
    /// Creates a new RouletteWheelSelection strategy.
    pub fn new() -> Self {
        Self
    }

    /// Returns the individual whose slice of the wheel contains `position`.
    ///
    /// `position` is an absolute point on the wheel, i.e. in `[0, total_fitness)`.
    /// If rounding leaves the running sum short of `position`, the last member wins.
    pub fn spin<I: Individual>(population: &Population<I>, position: f64) -> Result<&I> {
        let mut wheel = 0.0;
        for member in population {
            wheel += member.score;
            if wheel >= position {
                return Ok(&member.individual);
            }
        }

        population
            .members()
            .last()
            .map(|member| &member.individual)
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }
}

impl<I> SelectionStrategy<I> for RouletteWheelSelection
where
    I: Individual,
{
    fn select<'a>(
        &self,
        population: &'a Population<I>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a I> {
        let position = rng.probability() * population.total_fitness();
        Self::spin(population, position)
    }
}
