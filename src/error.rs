//! Error taxonomy for the scheduler library boundary.

use thiserror::Error;

/// Errors that can surface from [`crate::scheduler::Scheduler::generate_variants`].
///
/// Infeasibility is *not* represented here: an unsatisfiable instance is a normal
/// outcome of the search, not a fault, and is reported as
/// [`crate::scheduler::GenerationOutcome::Infeasible`] instead.
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// The catalog produced data the model cannot be built from: dangling ids,
    /// out-of-range fixed slots, or a `num_variants` argument outside `[1, 5]`.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The solver's time cap was reached. Carries how many solutions had already
    /// been collected, so callers can distinguish "ran out of time but still got
    /// something" from "ran out of time with nothing at all". Part of the
    /// caller-facing taxonomy; `generate_variants` itself always folds a timeout
    /// into `Ok(GenerationOutcome::Infeasible)` or `Ok(GenerationOutcome::Solutions)`
    /// rather than raising this variant, since a timeout is not a fault any more
    /// than proven infeasibility is. Reserved for callers or future search modes
    /// that need to surface the distinction as an `Err`.
    #[error("solver timed out after collecting {collected} solution(s)")]
    SolverTimeout { collected: usize },

    /// The solver API misbehaved, or an internal invariant check failed. Always
    /// fatal: no partial result is ever returned alongside this variant.
    #[error("internal scheduler error: {0}")]
    Internal(String),
}

pub type SchedulerResult<T> = Result<T, SchedulerError>;
