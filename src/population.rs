//! # Population
//!
//! A `Population` is the non-empty, fixed-size set of individuals under
//! consideration in one generation, each paired with its score. Freshly built
//! populations carry a score of zero for every member until they are scored;
//! after `score_and_sort` the fittest member sits at index 0.
//!
//! Populations are replaced wholesale every generation. The only in-place
//! change the engine makes is writing scores.
//!
//! ## Example
//!
//! ```rust
//! use genetic::error::Result;
//! use genetic::fitness::FitnessEvaluator;
//! use genetic::individual::Individual;
//! use genetic::population::Population;
//! use genetic::rng::RandomNumberGenerator;
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
//! let mut population = Population::new(vec![Value(1.0), Value(4.0), Value(2.0)]).unwrap();
//! assert!(!population.target_met(3.0));
//!
//! population.score_and_sort(&FitnessEvaluator::new(2).unwrap()).unwrap();
//! assert!(population.target_met(3.0));
//! assert_eq!(population.fittest_score().unwrap(), 4.0);
//! assert_eq!(population.total_fitness(), 7.0);
//! ```

use crate::error::{GeneticError, OptionExt, Result};
use crate::fitness::{sort_descending, FitnessEvaluator};
use crate::individual::Individual;

/// An individual paired with the score it was given within its population.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredIndividual<I> {
    /// The candidate solution.
    pub individual: I,
    /// Its fitness, or zero if it has not been scored yet.
    pub score: f64,
}

impl<I> ScoredIndividual<I> {
    pub fn new(individual: I, score: f64) -> Self {
        Self { individual, score }
    }

    /// Pairs an individual with the placeholder score used before scoring.
    pub fn unscored(individual: I) -> Self {
        Self::new(individual, 0.0)
    }
}

/// Summary statistics of a population's scores.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopulationStats {
    pub size: usize,
    pub best: f64,
    pub average: f64,
    pub total: f64,
}

/// The individuals of one generation together with their scores.
#[derive(Debug, Clone)]
pub struct Population<I: Individual> {
    members: Vec<ScoredIndividual<I>>,
}

impl<I: Individual> Population<I> {
    /// Builds an unscored population from the given individuals.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if `individuals` is empty.
    pub fn new(individuals: Vec<I>) -> Result<Self> {
        Self::from_members(individuals.into_iter().map(ScoredIndividual::unscored).collect())
    }

    /// Builds a population from already paired members, keeping their order and scores.
    pub fn from_members(members: Vec<ScoredIndividual<I>>) -> Result<Self> {
        if members.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false` for a constructed population.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Members in their current order; fittest first once scored.
    pub fn members(&self) -> &[ScoredIndividual<I>] {
        &self.members
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScoredIndividual<I>> {
        self.members.iter()
    }

    pub fn into_members(self) -> Vec<ScoredIndividual<I>> {
        self.members
    }

    /// Returns `true` if any member's score meets or exceeds `threshold`.
    pub fn target_met(&self, threshold: f64) -> bool {
        self.members.iter().any(|member| member.score >= threshold)
    }

    /// Returns the member with the highest score.
    ///
    /// Scans every member rather than trusting the order, so it is also
    /// correct on a population that has not been sorted. Ties go to the
    /// earliest member.
    pub fn fittest_member(&self) -> Result<&ScoredIndividual<I>> {
        self.members
            .iter()
            .fold(None, |best: Option<&ScoredIndividual<I>>, member| match best {
                Some(current) if current.score >= member.score => Some(current),
                _ => Some(member),
            })
            .ok_or_else_genetic(|| GeneticError::EmptyPopulation)
    }

    /// Returns the individual with the highest score.
    pub fn fittest(&self) -> Result<&I> {
        self.fittest_member().map(|member| &member.individual)
    }

    /// Returns the highest score in the population.
    pub fn fittest_score(&self) -> Result<f64> {
        self.fittest_member().map(|member| member.score)
    }

    /// Sum of all scores.
    pub fn total_fitness(&self) -> f64 {
        self.members.iter().map(|member| member.score).sum()
    }

    /// Mean score.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::EmptyPopulation` if there are no members.
    pub fn avg_fitness(&self) -> Result<f64> {
        if self.members.is_empty() {
            return Err(GeneticError::EmptyPopulation);
        }
        Ok(self.total_fitness() / self.members.len() as f64)
    }

    pub fn stats(&self) -> Result<PopulationStats> {
        Ok(PopulationStats {
            size: self.len(),
            best: self.fittest_score()?,
            average: self.avg_fitness()?,
            total: self.total_fitness(),
        })
    }

    /// Scores every member with `evaluator` and sorts them fittest first.
    ///
    /// On error the population keeps its previous scores and order.
    pub fn score_and_sort(&mut self, evaluator: &FitnessEvaluator) -> Result<()> {
        self.rescore(evaluator)?;
        sort_descending(&mut self.members);
        Ok(())
    }

    /// Scores every member with `evaluator` without reordering them.
    pub(crate) fn rescore(&mut self, evaluator: &FitnessEvaluator) -> Result<()> {
        let scores = evaluator.score_by(&self.members, |member| &member.individual)?;
        for (member, score) in self.members.iter_mut().zip(scores) {
            member.score = score;
        }
        Ok(())
    }
}

impl<I: Individual> TryFrom<Vec<I>> for Population<I> {
    type Error = GeneticError;

    fn try_from(individuals: Vec<I>) -> Result<Self> {
        Self::new(individuals)
    }
}

impl<'a, I: Individual> IntoIterator for &'a Population<I> {
    type Item = &'a ScoredIndividual<I>;
    type IntoIter = std::slice::Iter<'a, ScoredIndividual<I>>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}
