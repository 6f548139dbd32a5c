//! Tunables for a generation run.

/// Knobs controlling a [`crate::scheduler::Scheduler::generate_variants`] call.
///
/// The defaults reproduce observed bit-compatible behaviour: faculty qualifications
/// are loaded but not enforced, and subjects may be scheduled on batches outside
/// their semester. Both can be tightened via the two `enforce_*` flags without
/// touching the constraint-emission code.
#[derive(Debug, Clone, PartialEq)]
pub struct SchedulerConfig {
    /// Wall-clock cap handed to the solver, in seconds.
    pub max_time_seconds: f64,
    /// Days per week the timetable spans.
    pub days: usize,
    /// Periods per day.
    pub periods_per_day: usize,
    /// When `true`, gate `X[b,s,p,r,f]` to zero whenever `f` is not in the
    /// qualified-faculty set of subject `s`. Off by default for bit-compat with
    /// observed behaviour.
    pub enforce_qualifications: bool,
    /// When `true`, gate `X[b,s,*,*,*]` to zero whenever `batch[b].semester !=
    /// subject[s].semester`. Off by default, same rationale.
    pub enforce_semester_match: bool,
}

impl SchedulerConfig {
    pub fn total_periods(&self) -> usize {
        self.days * self.periods_per_day
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_time_seconds: 120.0,
            days: 6,
            periods_per_day: 8,
            enforce_qualifications: false,
            enforce_semester_match: false,
        }
    }
}
