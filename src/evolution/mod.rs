pub mod adaptive;
pub mod cancellation;
pub mod controller;
pub mod options;

pub use adaptive::adaptive_mutation_rate;
pub use cancellation::CancellationToken;
pub use controller::Controller;
pub use options::{Params, ParamsBuilder};
