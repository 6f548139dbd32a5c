//! Dense zero-based index space shared by every model-building component.
//!
//! `slot`/`unslot` are the only place the day/period-per-day packing is encoded;
//! everything else goes through this type rather than repeating the arithmetic.

#[derive(Debug, Clone, Copy)]
pub struct IndexSpace {
    pub num_batches: usize,
    pub num_subjects: usize,
    pub num_rooms: usize,
    pub num_faculty: usize,
    pub days: usize,
    pub periods_per_day: usize,
}

impl IndexSpace {
    pub fn new(
        num_batches: usize,
        num_subjects: usize,
        num_rooms: usize,
        num_faculty: usize,
        days: usize,
        periods_per_day: usize,
    ) -> Self {
        Self {
            num_batches,
            num_subjects,
            num_rooms,
            num_faculty,
            days,
            periods_per_day,
        }
    }

    pub fn total_periods(&self) -> usize {
        self.days * self.periods_per_day
    }

    /// Pack a 0-based day and a 1-based period into a flat slot index.
    pub fn slot(&self, day: usize, period: usize) -> usize {
        day * self.periods_per_day + (period - 1)
    }

    /// Inverse of [`Self::slot`]: returns `(day, period)` with `period` 1-based.
    pub fn unslot(&self, p: usize) -> (usize, usize) {
        (p / self.periods_per_day, p % self.periods_per_day + 1)
    }

    /// Total decision-variable count for the dense 5-D `X[b,s,p,r,f]` table.
    pub fn variable_count(&self) -> usize {
        self.num_batches
            * self.num_subjects
            * self.total_periods()
            * self.num_rooms
            * self.num_faculty
    }

    /// Row-major flat index into the dense variable table.
    pub fn var_index(&self, b: usize, s: usize, p: usize, r: usize, f: usize) -> usize {
        (((b * self.num_subjects + s) * self.total_periods() + p) * self.num_rooms + r)
            * self.num_faculty
            + f
    }
}
