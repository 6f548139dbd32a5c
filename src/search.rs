//! Runs the solver with a time cap and a callback that captures distinct
//! solutions, single-threaded, synchronous.

use cp_sat::proto::{CpSolverStatus, SatParameters};
use log::{info, warn};
use std::time::Instant;

use crate::config::SchedulerConfig;
use crate::decode::{PeriodRecord, SolutionDecoder};
use crate::model::ModelBuilder;
use crate::snapshot::InputSnapshot;

/// Outcome of one solver invocation, before being folded into the public
/// [`crate::scheduler::GenerationOutcome`].
pub enum SearchOutcome {
    /// `solutions.len()` is in `[0, num_variants]`.
    Solutions(Vec<Vec<PeriodRecord>>),
    /// Proved UNSAT by the solver.
    Infeasible,
    /// Time cap reached with zero solutions collected.
    TimedOutEmpty,
}

pub struct SearchDriver;

impl SearchDriver {
    pub fn run(
        builder: ModelBuilder,
        snapshot: &InputSnapshot,
        num_variants: usize,
        config: &SchedulerConfig,
    ) -> SearchOutcome {
        let mut params = SatParameters::default();
        params.max_time_in_seconds = Some(config.max_time_seconds);

        let mut collected: Vec<Vec<PeriodRecord>> = Vec::new();
        let started = Instant::now();

        let ModelBuilder { mut model, vars, index } = builder;
        let response = model.solve_with_callback(&params, |response| {
            if collected.len() < num_variants {
                collected.push(SolutionDecoder::decode(&vars, index, snapshot, response));
            }
        });

        let elapsed = started.elapsed();
        info!(
            "search finished in {:.2?} with {} solution(s) collected, status={:?}",
            elapsed,
            collected.len(),
            response.status()
        );

        match response.status() {
            CpSolverStatus::Infeasible => SearchOutcome::Infeasible,
            CpSolverStatus::Optimal | CpSolverStatus::Feasible => SearchOutcome::Solutions(collected),
            _ => {
                if collected.is_empty() {
                    warn!("solver stopped ({:?}) with no solutions collected", response.status());
                    SearchOutcome::TimedOutEmpty
                } else {
                    SearchOutcome::Solutions(collected)
                }
            }
        }
    }
}
