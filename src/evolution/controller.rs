//! # Controller
//!
//! The `Controller` drives the generational loop. It scores the initial
//! population and then, until some individual meets the target fitness,
//! repeats one generation at a time:
//!
//! 1. **Crossover.** The top `elitism` individuals pass through unchanged. Every
//!    other individual breeds, with probability `crossover`, with a partner
//!    picked by the selection strategy; the child takes its place.
//! 2. **Mutation.** Same elitism carve-out. Every other individual is mutated
//!    with probability `mutation`, or with its adaptive rate when adaptive
//!    mutation is on.
//! 3. **Scoring.** The new population is scored and sorted, fittest first.
//!
//! Cancellation is checked between generations. There is no generation cap:
//! an unreachable target runs until the search is cancelled.
//!
//! A search runs either in the foreground with [`Controller::run`], or on a
//! background thread with [`Controller::start`] and [`Controller::wait`].
//! Dropping a controller with a background search still pending cancels that
//! search and joins its thread.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, RwLock};
use std::thread::{self, JoinHandle};

use tracing::{debug, info, trace, warn};

use super::adaptive::adaptive_mutation_rate;
use super::cancellation::CancellationToken;
use super::options::Params;
use crate::error::{GeneticError, Result, ResultExt};
use crate::fitness::FitnessEvaluator;
use crate::individual::Individual;
use crate::population::{Population, PopulationStats, ScoredIndividual};
use crate::rng::RandomNumberGenerator;
use crate::selection::SelectionStrategy;

/// Coordinates a genetic search over individuals of type `I`.
#[derive(Debug)]
pub struct Controller<I: Individual> {
    search: Arc<Search<I>>,
    pending: Option<Pending>,
}

/// A background search that has not been waited for yet.
#[derive(Debug)]
struct Pending {
    cancel: CancellationToken,
    handle: JoinHandle<Result<()>>,
}

impl<I: Individual> Controller<I> {
    /// Creates a controller from validated `params`.
    ///
    /// The random number generator is seeded from `params` if a seed was
    /// given, otherwise from system entropy.
    ///
    /// # Errors
    ///
    /// Returns `GeneticError::Configuration` if any parameter is invalid or
    /// the fitness worker pool cannot be built.
    pub fn new(params: Params<I>) -> Result<Self> {
        let rng = match params.get_seed() {
            Some(seed) => RandomNumberGenerator::from_seed(seed),
            None => RandomNumberGenerator::new(),
        };
        Self::with_rng(params, rng)
    }

    /// Creates a controller that draws from `rng`, ignoring any seed in `params`.
    pub fn with_rng(params: Params<I>, rng: RandomNumberGenerator) -> Result<Self> {
        params.validate()?;

        let Params {
            elitism,
            mutation,
            adaptive_mutation,
            crossover,
            target_fitness,
            parallelism,
            selection,
            initial_population,
            ..
        } = params;

        let selection = selection.ok_or_else(|| {
            GeneticError::Configuration("Selection strategy not specified".to_string())
        })?;
        let population = Population::new(initial_population).map_err(|e| {
            GeneticError::Configuration(format!("Failed to initialize population: {}", e))
        })?;
        let evaluator = FitnessEvaluator::new(parallelism)?;

        debug!(
            population = population.len(),
            elitism,
            mutation,
            crossover,
            adaptive_mutation,
            target_fitness,
            workers = evaluator.workers(),
            "controller created"
        );

        Ok(Self {
            search: Arc::new(Search {
                elitism,
                mutation,
                adaptive_mutation,
                crossover,
                target_fitness,
                selection,
                evaluator,
                rng: Mutex::new(rng),
                population: RwLock::new(Arc::new(population)),
                generation: AtomicUsize::new(0),
            }),
            pending: None,
        })
    }

    /// Runs the search on the calling thread until the target fitness is met.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by an individual, the selection
    /// strategy or the evaluator. Fails with `GeneticError::Evolution` if a
    /// background search started with [`start`](Self::start) has not been
    /// waited for.
    pub fn run(&mut self) -> Result<()> {
        self.ensure_idle()?;
        self.search.run(&CancellationToken::new())
    }

    /// Starts the search on a background thread and returns immediately.
    ///
    /// The search stops early, with `GeneticError::Cancelled`, once `cancel`
    /// is triggered. Collect the outcome with [`wait`](Self::wait). Dropping the
    /// controller first cancels the search and blocks until its thread exits.
    pub fn start(&mut self, cancel: CancellationToken) -> Result<()> {
        self.ensure_idle()?;

        let search = Arc::clone(&self.search);
        let token = cancel.clone();
        let handle = thread::Builder::new()
            .name("genetic-search".to_string())
            .spawn(move || search.run(&token))
            .context("Failed to spawn search thread")?;

        self.pending = Some(Pending { cancel, handle });
        Ok(())
    }

    /// Blocks until the background search finishes and returns its outcome.
    ///
    /// The outcome is delivered once. Waiting again, or waiting without a
    /// started search, returns `GeneticError::NoResult` instead of blocking.
    pub fn wait(&mut self) -> Result<()> {
        let pending = self.pending.take().ok_or(GeneticError::NoResult)?;
        pending
            .handle
            .join()
            .map_err(|_| GeneticError::Evolution("Search thread panicked".to_string()))?
    }

    /// Returns the fittest individual of the most recently scored population.
    ///
    /// Safe to call while a background search is running.
    pub fn fittest(&self) -> Result<I> {
        self.search.current()?.fittest().cloned()
    }

    pub fn fittest_score(&self) -> Result<f64> {
        self.search.current()?.fittest_score()
    }

    /// Returns a snapshot of the current population.
    pub fn population(&self) -> Result<Arc<Population<I>>> {
        self.search.current()
    }

    pub fn population_stats(&self) -> Result<PopulationStats> {
        self.search.current()?.stats()
    }

    /// Number of full generations completed so far.
    pub fn generation(&self) -> usize {
        self.search.generation.load(Ordering::SeqCst)
    }

    fn ensure_idle(&self) -> Result<()> {
        if self.pending.is_some() {
            return Err(GeneticError::Evolution(
                "A search is already pending; call wait() first".to_string(),
            ));
        }
        Ok(())
    }
}

impl<I: Individual> Drop for Controller<I> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.cancel.cancel();
            if pending.handle.join().is_err() {
                warn!("search thread panicked before the controller was dropped");
            } else {
                debug!("pending search cancelled on drop");
            }
        }
    }
}

/// State shared between a controller and its background search thread.
#[derive(Debug)]
struct Search<I: Individual> {
    elitism: usize,
    mutation: f64,
    adaptive_mutation: bool,
    crossover: f64,
    target_fitness: f64,
    selection: Box<dyn SelectionStrategy<I>>,
    evaluator: FitnessEvaluator,
    rng: Mutex<RandomNumberGenerator>,
    population: RwLock<Arc<Population<I>>>,
    generation: AtomicUsize,
}

impl<I: Individual> Search<I> {
    fn run(&self, cancel: &CancellationToken) -> Result<()> {
        self.evolve(cancel).inspect_err(|err| {
            if !err.is_cancelled() {
                warn!(error = %err, generation = self.generation.load(Ordering::SeqCst), "search aborted");
            }
        })
    }

    fn evolve(&self, cancel: &CancellationToken) -> Result<()> {
        let mut rng = self.lock_rng()?;

        let mut initial = Population::clone(&*self.current()?);
        initial.score_and_sort(&self.evaluator)?;
        let mut current = self.publish(initial)?;

        loop {
            if current.target_met(self.target_fitness) {
                info!(
                    score = current.fittest_score()?,
                    target = self.target_fitness,
                    generation = self.generation.load(Ordering::SeqCst),
                    "target fitness met"
                );
                return Ok(());
            }

            if cancel.is_cancelled() {
                info!(
                    generation = self.generation.load(Ordering::SeqCst),
                    "search cancelled"
                );
                return Err(GeneticError::Cancelled);
            }

            let crossed = self.crossover_pass(&current, &mut rng)?;
            let mut next = self.mutation_pass(crossed, &mut rng)?;
            next.score_and_sort(&self.evaluator)?;

            let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            current = self.publish(next)?;

            let stats = current.stats()?;
            debug!(
                generation,
                best = stats.best,
                average = stats.average,
                "generation complete"
            );
        }
    }

    /// Builds the next population by breeding non-elite members with selected partners.
    fn crossover_pass(
        &self,
        population: &Population<I>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<I>> {
        let mut next = Vec::with_capacity(population.len());
        let mut children = 0usize;

        for (rank, member) in population.iter().enumerate() {
            if rank >= self.elitism && rng.probability() < self.crossover {
                let partner = self.selection.select(population, rng)?;
                let child = member.individual.crossover(partner, rng)?;
                next.push(ScoredIndividual::unscored(child));
                children += 1;
            } else {
                next.push(member.clone());
            }
        }

        trace!(children, "crossover pass complete");
        Population::from_members(next)
    }

    /// Builds the next population by mutating non-elite members.
    fn mutation_pass(
        &self,
        mut population: Population<I>,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Population<I>> {
        // Children from the crossover pass are unscored; adaptive rates need real scores.
        let spread = if self.adaptive_mutation {
            population.rescore(&self.evaluator)?;
            Some((population.avg_fitness()?, population.fittest_score()?))
        } else {
            None
        };

        let mut next = Vec::with_capacity(population.len());
        let mut mutants = 0usize;

        for (rank, member) in population.into_members().into_iter().enumerate() {
            if rank < self.elitism {
                next.push(member);
                continue;
            }

            let rate = match spread {
                Some((avg_fitness, fittest_score)) => {
                    adaptive_mutation_rate(self.mutation, member.score, avg_fitness, fittest_score)
                }
                None => self.mutation,
            };

            if rng.probability() < rate {
                let mutant = member.individual.mutate(rate, rng)?;
                next.push(ScoredIndividual::unscored(mutant));
                mutants += 1;
            } else {
                next.push(member);
            }
        }

        trace!(mutants, "mutation pass complete");
        Population::from_members(next)
    }

    fn current(&self) -> Result<Arc<Population<I>>> {
        self.population
            .read()
            .map(|population| Arc::clone(&population))
            .map_err(|_| GeneticError::Evolution("Population lock poisoned".to_string()))
    }

    fn publish(&self, population: Population<I>) -> Result<Arc<Population<I>>> {
        let population = Arc::new(population);
        let mut slot = self
            .population
            .write()
            .map_err(|_| GeneticError::Evolution("Population lock poisoned".to_string()))?;
        *slot = Arc::clone(&population);
        Ok(population)
    }

    fn lock_rng(&self) -> Result<MutexGuard<'_, RandomNumberGenerator>> {
        self.rng
            .lock()
            .map_err(|_| GeneticError::Evolution("Random number generator lock poisoned".to_string()))
    }
}
