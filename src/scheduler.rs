//! Top-level entry point: ties every component together into one
//! `generate_variants` call.

use log::info;

use crate::catalog::Catalog;
use crate::config::SchedulerConfig;
use crate::decode::PeriodRecord;
use crate::error::{SchedulerError, SchedulerResult};
use crate::explain::{Diagnostic, InfeasibilityExplainer};
use crate::model::{ModelBuilder, ObjectiveBuilder};
use crate::search::{SearchDriver, SearchOutcome};
use crate::snapshot::InputSnapshot;

/// One solution, ready for a persistence layer to wrap in a `Timetable` with
/// `status = draft`, a sequential `version`, and `created_by` set to the
/// caller's user id — none of which this crate touches.
pub type SolutionRecord = Vec<PeriodRecord>;

pub enum GenerationOutcome {
    /// `0..=num_variants` distinct solutions, in solver discovery order.
    Solutions(Vec<SolutionRecord>),
    /// The instance is unsatisfiable, or the solver timed out without finding
    /// anything. `diagnostic.error` distinguishes the two causes in its message.
    Infeasible(Diagnostic),
}

/// A single `generate_variants` call: constructs its model, drives the solver
/// synchronously, collects solutions, and returns. Reentrant — holds no state
/// across calls.
pub struct Scheduler<'a> {
    catalog: &'a dyn Catalog,
    config: SchedulerConfig,
}

impl<'a> Scheduler<'a> {
    pub fn new(catalog: &'a dyn Catalog, config: SchedulerConfig) -> Self {
        Self { catalog, config }
    }

    pub fn generate_variants(&self, num_variants: usize) -> SchedulerResult<GenerationOutcome> {
        if num_variants < 1 || num_variants > 5 {
            return Err(SchedulerError::InvalidInput(format!(
                "num_variants must be in [1, 5], got {}",
                num_variants
            )));
        }

        info!("generating up to {} timetable variant(s)", num_variants);

        let snapshot =
            InputSnapshot::build(self.catalog, self.config.days, self.config.periods_per_day)?;

        let mut builder = ModelBuilder::build(&snapshot, &self.config)?;
        ObjectiveBuilder::apply(&mut builder, &snapshot);

        match SearchDriver::run(builder, &snapshot, num_variants, &self.config) {
            SearchOutcome::Solutions(solutions) => Ok(GenerationOutcome::Solutions(solutions)),
            SearchOutcome::Infeasible => {
                Ok(GenerationOutcome::Infeasible(InfeasibilityExplainer::explain(&snapshot, false)))
            }
            SearchOutcome::TimedOutEmpty => {
                Ok(GenerationOutcome::Infeasible(InfeasibilityExplainer::explain(&snapshot, true)))
            }
        }
    }
}
