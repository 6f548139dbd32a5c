//! Weekly academic timetable scheduler core.
//!
//! Builds a CP-SAT model over `(batch, subject, period, room, faculty)` decision
//! variables, enforces the hard scheduling constraints, optimizes a
//! lexicographic objective (idle gaps, then room utilization, then
//! teaching-load balance), and returns several distinct feasible solutions — or,
//! when the instance is unsatisfiable, a diagnostic pointing at the likely
//! cause. Persistence, authentication, rendering and HTTP transport are left to
//! the host application; this crate consumes only a [`catalog::Catalog`] and
//! returns plain data.

pub mod catalog;
pub mod config;
pub mod decode;
pub mod error;
pub mod explain;
mod index;
mod model;
mod scheduler;
mod search;
mod snapshot;

pub use config::SchedulerConfig;
pub use decode::PeriodRecord;
pub use error::{SchedulerError, SchedulerResult};
pub use explain::{Diagnostic, Suggestion, SuggestionKind};
pub use index::IndexSpace;
pub use scheduler::{GenerationOutcome, Scheduler, SolutionRecord};
