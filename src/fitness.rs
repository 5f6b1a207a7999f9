//! # Fitness Evaluation
//!
//! `FitnessEvaluator` runs `Individual::fitness` over a whole population on a
//! fixed-width rayon pool. Workers share nothing but the input slice; every
//! individual is scored exactly once and the pool is idle again by the time a
//! call returns. The first failing evaluation fails the whole call and no
//! partial scores are handed back.
//!
//! A width of one skips the pool and scores on the calling thread.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::trace;

use crate::error::{GeneticError, Result};
use crate::individual::Individual;
use crate::population::ScoredIndividual;

/// Scores individuals on a bounded worker pool.
#[derive(Debug)]
pub struct FitnessEvaluator {
    workers: usize,
    pool: Option<ThreadPool>,
}

impl FitnessEvaluator {
    /// Creates an evaluator with `workers` threads. Values below one are clamped to one.
    ///
    /// # Errors
    ///
    /// Returns a `Configuration` error if the worker pool cannot be built.
    pub fn new(workers: usize) -> Result<Self> {
        let workers = workers.max(1);
        let pool = if workers > 1 {
            let pool = ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(|index| format!("genetic-fitness-{}", index))
                .build()
                .map_err(|e| {
                    GeneticError::Configuration(format!(
                        "Failed to build fitness worker pool with {} threads: {}",
                        workers, e
                    ))
                })?;
            Some(pool)
        } else {
            None
        };

        Ok(Self { workers, pool })
    }

    /// Returns the number of workers used for scoring.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Scores `individuals`, returning one score per input in input order.
    pub fn score<I: Individual>(&self, individuals: &[I]) -> Result<Vec<f64>> {
        self.score_by(individuals, |individual| individual)
    }

    /// Scores `individuals` and returns them paired with their scores, fittest first.
    ///
    /// The relative order of equal scores is unspecified.
    pub fn score_and_sort<I: Individual>(
        &self,
        individuals: Vec<I>,
    ) -> Result<Vec<ScoredIndividual<I>>> {
        let scores = self.score(&individuals)?;
        let mut scored: Vec<ScoredIndividual<I>> = individuals
            .into_iter()
            .zip(scores)
            .map(|(individual, score)| ScoredIndividual::new(individual, score))
            .collect();
        sort_descending(&mut scored);
        Ok(scored)
    }

    /// Scores the individual each item points at, preserving item order.
    pub(crate) fn score_by<T, I, F>(&self, items: &[T], individual_of: F) -> Result<Vec<f64>>
    where
        T: Sync,
        I: Individual,
        F: Fn(&T) -> &I + Send + Sync,
    {
        trace!(count = items.len(), workers = self.workers, "scoring individuals");
        match &self.pool {
            Some(pool) => pool.install(|| {
                items
                    .par_iter()
                    .map(|item| evaluate(individual_of(item)))
                    .collect()
            }),
            None => items.iter().map(|item| evaluate(individual_of(item))).collect(),
        }
    }
}

/// Sorts scored individuals by score, highest first.
pub(crate) fn sort_descending<I>(scored: &mut [ScoredIndividual<I>]) {
    scored.sort_unstable_by(|a, b| b.score.total_cmp(&a.score));
}

fn evaluate<I: Individual>(individual: &I) -> Result<f64> {
    let score = individual.fitness()?;
    if score.is_nan() {
        return Err(GeneticError::InvalidNumericValue(
            "Fitness function returned NaN".to_string(),
        ));
    }
    Ok(score)
}
