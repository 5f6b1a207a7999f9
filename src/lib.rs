pub mod error;
pub mod evolution;
pub mod fitness;
pub mod individual;
pub mod population;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use error::{GeneticError, OptionExt, Result, ResultExt};
pub use evolution::{CancellationToken, Controller, Params};
pub use individual::Individual;
pub use population::{Population, ScoredIndividual};
pub use selection::{RouletteWheelSelection, SelectionStrategy, TournamentSelection};
