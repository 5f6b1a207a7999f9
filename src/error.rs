//! # Error Types
//!
//! This module defines the error type shared by every part of the search engine.
//! Each variant corresponds to one failure kind; none of them is recovered from
//! inside the engine. Whatever goes wrong aborts the current generation and is
//! handed back to the caller of the search.
//!
//! ## Examples
//!
//! Telling a cancelled search apart from a broken one:
//!
//! ```rust
//! use genetic::error::GeneticError;
//!
//! fn describe(err: &GeneticError) -> &'static str {
//!     if err.is_cancelled() {
//!         "nothing found yet"
//!     } else {
//!         "search failed"
//!     }
//! }
//!
//! assert_eq!(describe(&GeneticError::Cancelled), "nothing found yet");
//! assert_eq!(describe(&GeneticError::EmptyPopulation), "search failed");
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use genetic::error::{GeneticError, OptionExt};
//!
//! fn best_score(scores: &[i32]) -> genetic::error::Result<i32> {
//!     scores.iter().max().cloned().ok_or_else_genetic(|| GeneticError::EmptyPopulation)
//! }
//!
//! assert!(best_score(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while configuring or running a search.
#[derive(Error, Debug)]
pub enum GeneticError {
    /// Invalid parameters or initial population; the search never starts.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An individual could not honour its contract, e.g. a crossover partner
    /// whose genome is incompatible with the receiver.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    /// A fitness computation failed.
    #[error("Evaluation error: {0}")]
    Evaluation(String),

    /// A selection strategy could not pick a partner.
    #[error("Selection error: {0}")]
    Selection(String),

    /// The search was stopped through its cancellation token before any
    /// individual met the target fitness.
    #[error("Search cancelled before the target fitness was reached")]
    Cancelled,

    /// Error that occurs when an empty population is encountered.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// A fitness function returned NaN.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// `wait` was called with no search pending, or after its result was consumed.
    #[error("No result available: no search is pending or its result was already consumed")]
    NoResult,

    /// The background search could not be started or did not finish normally.
    #[error("Evolution error: {0}")]
    Evolution(String),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

impl GeneticError {
    /// Returns `true` if this error reports a cancelled search rather than a failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GeneticError::Cancelled)
    }
}

/// A specialized Result type for genetic search operations.
pub type Result<T> = std::result::Result<T, GeneticError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use genetic::error::ResultExt;
///
/// fn parse_seed(raw: &str) -> genetic::error::Result<u64> {
///     raw.parse::<u64>().context("Failed to parse seed")
/// }
///
/// assert!(parse_seed("forty-two").is_err());
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to a `GeneticError::Other` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| GeneticError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T>` using a closure to generate the error.
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_genetic<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> GeneticError,
    {
        self.ok_or_else(err_fn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_is_distinct() {
        assert!(GeneticError::Cancelled.is_cancelled());
        assert!(!GeneticError::Evaluation("boom".to_string()).is_cancelled());
        assert!(!GeneticError::NoResult.is_cancelled());
    }

    #[test]
    fn test_context_wraps_message() {
        let err = "x".parse::<u32>().context("reading worker count").unwrap_err();
        match err {
            GeneticError::Other(msg) => assert!(msg.starts_with("reading worker count: ")),
            other => panic!("Expected Other error, got {:?}", other),
        }
    }
}
