use crate::error::{GeneticError, OptionExt, Result};
use crate::individual::Individual;
use crate::population::Population;
use crate::rng::RandomNumberGenerator;
use crate::selection::selection_strategy::SelectionStrategy;

/// A selection strategy that holds a tournament among the top of the ranking.
///
/// The tournament is contested by the first `tournament_size` members of the
/// population and won by the highest score among them. Because the population
/// handed to a selection strategy is sorted fittest first, the winner is always
/// the fittest individual; the prefix is not a random sample.
///
/// Unlike roulette wheel selection this works with any sign of fitness.
///
/// # Examples
///
/// ```
/// use genetic::selection::TournamentSelection;
///
/// let selection = TournamentSelection::new(10);
/// assert_eq!(selection.tournament_size(), 10);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// The size is checked against the population when selecting: a size of
    /// zero, or one larger than the population, makes `select` fail.
    pub fn new(tournament_size: usize) -> Self {
        Self { tournament_size }
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self::new(2)
    }
}

impl<I> SelectionStrategy<I> for TournamentSelection
where
    I: Individual,
{
    fn select<'a>(
        &self,
        population: &'a Population<I>,
        _rng: &mut RandomNumberGenerator,
    ) -> Result<&'a I> {
        if self.tournament_size == 0 {
            return Err(GeneticError::Selection(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        if self.tournament_size > population.len() {
            return Err(GeneticError::Selection(format!(
                "Tournament size ({}) exceeds population size ({})",
                self.tournament_size,
                population.len()
            )));
        }

        let mut contestants = population.members()[..self.tournament_size].iter();
        let first = contestants
            .next()
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)?;

        let winner = contestants.fold(first, |best, contestant| {
            if contestant.score > best.score {
                contestant
            } else {
                best
            }
        });

        Ok(&winner.individual)
    }
}
