use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use genetic::{
    error::{GeneticError, Result},
    evolution::{CancellationToken, Controller, Params},
    individual::Individual,
    rng::RandomNumberGenerator,
    selection::{RouletteWheelSelection, TournamentSelection},
};

#[derive(Clone, Debug, Default, PartialEq)]
struct FakeIndividual {
    id: usize,
    fitness: f64,
    fail_fitness: bool,
    fail_crossover: bool,
}

impl FakeIndividual {
    fn new(id: usize, fitness: f64) -> Self {
        Self {
            id,
            fitness,
            ..Self::default()
        }
    }
}

impl Individual for FakeIndividual {
    fn fitness(&self) -> Result<f64> {
        if self.fail_fitness {
            return Err(GeneticError::Evaluation(format!("individual {} cannot be scored", self.id)));
        }
        Ok(self.fitness)
    }

    fn mutate(&self, _rate: f64, _rng: &mut RandomNumberGenerator) -> Result<Self> {
        Ok(self.clone())
    }

    fn crossover(&self, partner: &Self, _rng: &mut RandomNumberGenerator) -> Result<Self> {
        if self.fail_crossover {
            return Err(GeneticError::ContractViolation(format!(
                "individual {} refuses to breed with {}",
                self.id, partner.id
            )));
        }
        Ok(self.clone())
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn population(scores: &[f64]) -> Vec<FakeIndividual> {
    scores
        .iter()
        .enumerate()
        .map(|(id, &fitness)| FakeIndividual::new(id, fitness))
        .collect()
}

#[test]
fn test_invalid_params_never_build_a_controller() {
    let cases: Vec<(&str, Params<FakeIndividual>)> = vec![
        (
            "negative mutation",
            Params::builder()
                .mutation(-0.5)
                .selection(RouletteWheelSelection::new())
                .initial_population(vec![FakeIndividual::default(); 3])
                .build(),
        ),
        (
            "out of bounds crossover",
            Params::builder()
                .crossover(30.0)
                .selection(RouletteWheelSelection::new())
                .initial_population(vec![FakeIndividual::default(); 3])
                .build(),
        ),
        (
            "selection strategy missing",
            Params::builder()
                .initial_population(vec![FakeIndividual::default(); 3])
                .build(),
        ),
        (
            "empty initial population",
            Params::builder()
                .selection(RouletteWheelSelection::new())
                .build(),
        ),
    ];

    for (label, params) in cases {
        match Controller::new(params) {
            Err(GeneticError::Configuration(_)) => {}
            Err(other) => panic!("{}: expected Configuration error, got {}", label, other),
            Ok(_) => panic!("{}: controller should not have been built", label),
        }
    }
}

#[test]
fn test_run_converges_without_any_generation_when_target_already_met() {
    init_logging();
    let fittest = FakeIndividual::new(4, 5.0);
    let mut controller = Controller::new(
        Params::builder()
            .target_fitness(4.0)
            .selection(RouletteWheelSelection::new())
            .initial_population(population(&[0.0, 1.0, 2.0, 3.0, 5.0]))
            .build(),
    )
    .unwrap();

    controller.run().unwrap();

    assert_eq!(controller.fittest().unwrap(), fittest);
    assert_eq!(controller.fittest_score().unwrap(), 5.0);
    assert_eq!(controller.generation(), 0);

    let stats = controller.population_stats().unwrap();
    assert_eq!(stats.size, 5);
    assert_eq!(stats.total, 11.0);
    assert_eq!(controller.population().unwrap().members()[0].individual, fittest);
}

#[test]
fn test_cancelled_search_reports_cancellation() {
    init_logging();
    let mut controller = Controller::new(
        Params::builder()
            .elitism(1)
            .mutation(0.5)
            .crossover(0.5)
            .target_fitness(100.0)
            .parallelism(2)
            .selection(TournamentSelection::new(3))
            .initial_population(population(&[1.0, 2.0, 3.0, 4.0, 5.0]))
            .build(),
    )
    .unwrap();

    let cancel = CancellationToken::new();
    controller.start(cancel.clone()).unwrap();

    let (done_tx, done_rx) = mpsc::channel();
    thread::spawn(move || {
        let outcome = controller.wait();
        let _ = done_tx.send((outcome, controller.generation()));
    });

    thread::sleep(Duration::from_millis(50));
    cancel.cancel();

    let (outcome, generations) = done_rx
        .recv_timeout(Duration::from_secs(10))
        .expect("search did not stop after cancellation");

    assert!(matches!(outcome, Err(GeneticError::Cancelled)));
    assert!(outcome.unwrap_err().is_cancelled());
    assert!(generations > 0);
}

#[test]
fn test_wait_delivers_the_result_once() {
    let mut controller = Controller::new(
        Params::builder()
            .target_fitness(1.0)
            .selection(RouletteWheelSelection::new())
            .initial_population(population(&[0.0, 1.0]))
            .build(),
    )
    .unwrap();

    controller.start(CancellationToken::new()).unwrap();
    assert!(controller.wait().is_ok());
    assert!(matches!(controller.wait(), Err(GeneticError::NoResult)));
}

#[test]
fn test_start_while_pending_is_rejected() {
    let mut controller = Controller::new(
        Params::builder()
            .target_fitness(1.0)
            .selection(RouletteWheelSelection::new())
            .initial_population(population(&[0.0, 1.0]))
            .build(),
    )
    .unwrap();

    controller.start(CancellationToken::new()).unwrap();
    assert!(matches!(
        controller.start(CancellationToken::new()),
        Err(GeneticError::Evolution(_))
    ));
    assert!(matches!(controller.run(), Err(GeneticError::Evolution(_))));
    assert!(controller.wait().is_ok());
}

#[test]
fn test_evaluation_error_aborts_the_search() {
    let mut individuals = population(&[1.0, 2.0, 3.0]);
    individuals[1].fail_fitness = true;

    let mut controller = Controller::new(
        Params::builder()
            .target_fitness(10.0)
            .parallelism(3)
            .selection(RouletteWheelSelection::new())
            .initial_population(individuals)
            .build(),
    )
    .unwrap();

    assert!(matches!(controller.run(), Err(GeneticError::Evaluation(_))));
}

#[test]
fn test_contract_violation_aborts_the_search() {
    let mut individuals = population(&[1.0, 2.0, 3.0]);
    for individual in &mut individuals {
        individual.fail_crossover = true;
    }

    let mut controller = Controller::new(
        Params::builder()
            .crossover(1.0)
            .target_fitness(10.0)
            .selection(RouletteWheelSelection::new())
            .initial_population(individuals)
            .build(),
    )
    .unwrap();

    assert!(matches!(controller.run(), Err(GeneticError::ContractViolation(_))));
}

#[test]
fn test_oversized_tournament_aborts_the_search() {
    let mut controller = Controller::new(
        Params::builder()
            .crossover(1.0)
            .target_fitness(10.0)
            .selection(TournamentSelection::new(10))
            .initial_population(population(&[1.0, 2.0, 3.0, 4.0, 5.0]))
            .build(),
    )
    .unwrap();

    assert!(matches!(controller.run(), Err(GeneticError::Selection(_))));
}

/// Scored by closeness to zero; an exact hit scores positive infinity.
#[derive(Clone, Debug, PartialEq)]
struct Distance(f64);

impl Individual for Distance {
    fn fitness(&self) -> Result<f64> {
        Ok(1.0 / self.0)
    }

    fn mutate(&self, _rate: f64, _rng: &mut RandomNumberGenerator) -> Result<Self> {
        Ok(self.clone())
    }

    fn crossover(&self, partner: &Self, _rng: &mut RandomNumberGenerator) -> Result<Self> {
        Ok(Distance((self.0 + partner.0) / 2.0))
    }
}

#[test]
fn test_infinite_fitness_meets_the_target() {
    let mut controller = Controller::new(
        Params::builder()
            .target_fitness(10.0)
            .selection(TournamentSelection::new(2))
            .initial_population(vec![Distance(2.0), Distance(0.0), Distance(4.0)])
            .build(),
    )
    .unwrap();

    controller.run().unwrap();

    assert_eq!(controller.fittest().unwrap(), Distance(0.0));
    assert_eq!(controller.fittest_score().unwrap(), f64::INFINITY);
    assert_eq!(controller.generation(), 0);
}

/// Counts every fitness evaluation, so a test can tell whether a search is still running.
#[derive(Clone, Debug)]
struct Counting {
    fitness: f64,
    evaluations: Arc<AtomicUsize>,
}

impl Individual for Counting {
    fn fitness(&self) -> Result<f64> {
        self.evaluations.fetch_add(1, Ordering::SeqCst);
        Ok(self.fitness)
    }

    fn mutate(&self, _rate: f64, _rng: &mut RandomNumberGenerator) -> Result<Self> {
        Ok(self.clone())
    }

    fn crossover(&self, _partner: &Self, _rng: &mut RandomNumberGenerator) -> Result<Self> {
        Ok(self.clone())
    }
}

#[test]
fn test_dropping_a_started_controller_stops_its_search() {
    init_logging();
    let evaluations = Arc::new(AtomicUsize::new(0));
    let initial: Vec<Counting> = [1.0, 2.0, 3.0, 4.0]
        .iter()
        .map(|&fitness| Counting {
            fitness,
            evaluations: Arc::clone(&evaluations),
        })
        .collect();

    let mut controller = Controller::new(
        Params::builder()
            .mutation(0.5)
            .crossover(0.5)
            .target_fitness(100.0)
            .parallelism(2)
            .selection(TournamentSelection::new(2))
            .initial_population(initial)
            .build(),
    )
    .unwrap();

    let cancel = CancellationToken::new();
    controller.start(cancel.clone()).unwrap();
    thread::sleep(Duration::from_millis(20));

    let (dropped_tx, dropped_rx) = mpsc::channel();
    thread::spawn(move || {
        drop(controller);
        let _ = dropped_tx.send(());
    });
    dropped_rx
        .recv_timeout(Duration::from_secs(10))
        .expect("dropping the controller did not stop its search");

    assert!(cancel.is_cancelled());
    let after_drop = evaluations.load(Ordering::SeqCst);
    assert!(after_drop > 0);

    thread::sleep(Duration::from_millis(50));
    assert_eq!(evaluations.load(Ordering::SeqCst), after_drop);
}
