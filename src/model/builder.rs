//! Decision variables and hard constraints.
//!
//! Grounded on `examples/bc-ross-ross/src/model/model_geneds.rs`'s style of building
//! `LinearExpr` sums by repeated `+`, and on the original Python scheduler's
//! `_add_constraints` family (`InputSnapshot`/`IndexSpace` replace the raw
//! nested-loop indexing there with one row-major lookup).

use anyhow::Context;
use cp_sat::builder::{BoolVar, CpModelBuilder, LinearExpr};
use log::debug;

use crate::config::SchedulerConfig;
use crate::error::SchedulerError;
use crate::index::IndexSpace;
use crate::snapshot::InputSnapshot;

/// Owns the CP-SAT model and the dense `X[b,s,p,r,f]` variable table for the
/// duration of one `generate_variants` call.
pub struct ModelBuilder {
    pub model: CpModelBuilder,
    pub vars: Vec<BoolVar>,
    pub index: IndexSpace,
}

impl ModelBuilder {
    pub fn var(&self, b: usize, s: usize, p: usize, r: usize, f: usize) -> &BoolVar {
        &self.vars[self.index.var_index(b, s, p, r, f)]
    }

    fn sum<I: IntoIterator<Item = BoolVar>>(terms: I) -> LinearExpr {
        let mut expr = LinearExpr::from(0);
        for v in terms {
            expr = expr + LinearExpr::from(v);
        }
        expr
    }

    /// One variable per `(b,s,p,r,f)` tuple, no more, no less — a mismatch here
    /// means the allocation loop and `IndexSpace::variable_count` disagree.
    fn verify_allocation(vars: &[BoolVar], expected: usize) -> anyhow::Result<()> {
        anyhow::ensure!(
            vars.len() == expected,
            "allocated {} boolean variables, expected {}",
            vars.len(),
            expected
        );
        Ok(())
    }

    /// Build the model: allocate `X[b,s,p,r,f]` and emit every hard constraint
    /// (no-overlap, capacity, weekly hours, faculty load, fixed slots, and the
    /// two config-gated admissibility filters).
    pub fn build(
        snapshot: &InputSnapshot,
        config: &SchedulerConfig,
    ) -> Result<Self, SchedulerError> {
        let index = snapshot.index;
        let mut model = CpModelBuilder::new();

        let n = index.variable_count();
        debug!("allocating {} decision variables", n);
        let mut vars = Vec::with_capacity(n);
        for _ in 0..n {
            vars.push(model.new_bool_var());
        }
        Self::verify_allocation(&vars, n)
            .context("decision variable allocation invariant failed")
            .map_err(|e| SchedulerError::Internal(e.to_string()))?;

        let mut builder = ModelBuilder { model, vars, index };
        builder.add_no_overlap_constraints();
        builder.add_capacity_constraints(snapshot);
        builder.add_weekly_hours_constraints(snapshot);
        builder.add_faculty_load_constraints(snapshot);
        builder.add_fixed_slot_constraints(snapshot);
        if config.enforce_qualifications {
            builder.add_qualification_constraints(snapshot);
        }
        if config.enforce_semester_match {
            builder.add_semester_match_constraints(snapshot);
        }
        Ok(builder)
    }

    fn add_no_overlap_constraints(&mut self) {
        let idx = self.index;

        for f in 0..idx.num_faculty {
            for p in 0..idx.total_periods() {
                let terms = (0..idx.num_batches).flat_map(|b| {
                    (0..idx.num_subjects).flat_map(move |s| {
                        (0..idx.num_rooms).map(move |r| (b, s, r))
                    })
                });
                let sum = Self::sum(terms.map(|(b, s, r)| self.var(b, s, p, r, f).clone()));
                self.model.add_le(sum, LinearExpr::from(1));
            }
        }

        for r in 0..idx.num_rooms {
            for p in 0..idx.total_periods() {
                let terms = (0..idx.num_batches).flat_map(|b| {
                    (0..idx.num_subjects).flat_map(move |s| {
                        (0..idx.num_faculty).map(move |f| (b, s, f))
                    })
                });
                let sum = Self::sum(terms.map(|(b, s, f)| self.var(b, s, p, r, f).clone()));
                self.model.add_le(sum, LinearExpr::from(1));
            }
        }

        for b in 0..idx.num_batches {
            for p in 0..idx.total_periods() {
                let terms = (0..idx.num_subjects).flat_map(|s| {
                    (0..idx.num_rooms).flat_map(move |r| {
                        (0..idx.num_faculty).map(move |f| (s, r, f))
                    })
                });
                let sum = Self::sum(terms.map(|(s, r, f)| self.var(b, s, p, r, f).clone()));
                self.model.add_le(sum, LinearExpr::from(1));
            }
        }
    }

    fn add_capacity_constraints(&mut self, snapshot: &InputSnapshot) {
        let idx = self.index;
        for b in 0..idx.num_batches {
            let batch_size = snapshot.batches[b].size;
            for r in 0..idx.num_rooms {
                if batch_size > snapshot.rooms[r].capacity {
                    for s in 0..idx.num_subjects {
                        for p in 0..idx.total_periods() {
                            for f in 0..idx.num_faculty {
                                let var = self.var(b, s, p, r, f).clone();
                                self.model.add_eq(LinearExpr::from(var), LinearExpr::from(0));
                            }
                        }
                    }
                }
            }
        }
    }

    fn add_weekly_hours_constraints(&mut self, snapshot: &InputSnapshot) {
        let idx = self.index;
        for b in 0..idx.num_batches {
            for s in 0..idx.num_subjects {
                let hours = snapshot.subjects[s].hours_week as i64;
                let terms = (0..idx.total_periods()).flat_map(|p| {
                    (0..idx.num_rooms).flat_map(move |r| {
                        (0..idx.num_faculty).map(move |f| (p, r, f))
                    })
                });
                let sum = Self::sum(terms.map(|(p, r, f)| self.var(b, s, p, r, f).clone()));
                self.model.add_eq(sum, LinearExpr::from(hours));
            }
        }
    }

    fn add_faculty_load_constraints(&mut self, snapshot: &InputSnapshot) {
        let idx = self.index;
        for f in 0..idx.num_faculty {
            let max_week = snapshot.faculty[f].max_week as i64;
            let max_day = snapshot.faculty[f].max_day as i64;

            let weekly_terms = (0..idx.total_periods()).flat_map(|p| {
                (0..idx.num_batches).flat_map(move |b| {
                    (0..idx.num_subjects).flat_map(move |s| {
                        (0..idx.num_rooms).map(move |r| (p, b, s, r))
                    })
                })
            });
            let weekly_sum =
                Self::sum(weekly_terms.map(|(p, b, s, r)| self.var(b, s, p, r, f).clone()));
            self.model.add_le(weekly_sum, LinearExpr::from(max_week));

            for d in 0..idx.days {
                let day_terms = (0..idx.periods_per_day).flat_map(move |k| {
                    let p = idx.slot(d, k + 1);
                    (0..idx.num_batches).flat_map(move |b| {
                        (0..idx.num_subjects).flat_map(move |s| {
                            (0..idx.num_rooms).map(move |r| (p, b, s, r))
                        })
                    })
                });
                let day_sum =
                    Self::sum(day_terms.map(|(p, b, s, r)| self.var(b, s, p, r, f).clone()));
                self.model.add_le(day_sum, LinearExpr::from(max_day));
            }
        }
    }

    /// Force each fixed slot's batch to actually have a class at that slot, and
    /// pin the room if one was specified. A pairwise "at most one of these rooms"
    /// restriction alone is a no-op here — nothing stops the solver from leaving
    /// the slot empty — so this emits an explicit `== 1` demand constraint instead.
    fn add_fixed_slot_constraints(&mut self, snapshot: &InputSnapshot) {
        let idx = self.index;
        for fs in &snapshot.fixed_slots {
            let b = fs.batch;
            let p = fs.slot;

            let demand_terms = (0..idx.num_subjects).flat_map(|s| {
                (0..idx.num_rooms).flat_map(move |r| (0..idx.num_faculty).map(move |f| (s, r, f)))
            });
            let demand_sum =
                Self::sum(demand_terms.map(|(s, r, f)| self.var(b, s, p, r, f).clone()));
            self.model.add_eq(demand_sum, LinearExpr::from(1));

            if let Some(room) = fs.room {
                for r in 0..idx.num_rooms {
                    if r == room {
                        continue;
                    }
                    for s in 0..idx.num_subjects {
                        for f in 0..idx.num_faculty {
                            let var = self.var(b, s, p, r, f).clone();
                            self.model.add_eq(LinearExpr::from(var), LinearExpr::from(0));
                        }
                    }
                }
            }
        }
    }

    fn add_qualification_constraints(&mut self, snapshot: &InputSnapshot) {
        let idx = self.index;
        for s in 0..idx.num_subjects {
            let qualified = snapshot.qualified_faculty(s);
            for f in 0..idx.num_faculty {
                if qualified.contains(&f) {
                    continue;
                }
                for b in 0..idx.num_batches {
                    for p in 0..idx.total_periods() {
                        for r in 0..idx.num_rooms {
                            let var = self.var(b, s, p, r, f).clone();
                            self.model.add_eq(LinearExpr::from(var), LinearExpr::from(0));
                        }
                    }
                }
            }
        }
    }

    fn add_semester_match_constraints(&mut self, snapshot: &InputSnapshot) {
        let idx = self.index;
        for b in 0..idx.num_batches {
            for s in 0..idx.num_subjects {
                if snapshot.batches[b].semester == snapshot.subjects[s].semester {
                    continue;
                }
                for p in 0..idx.total_periods() {
                    for r in 0..idx.num_rooms {
                        for f in 0..idx.num_faculty {
                            let var = self.var(b, s, p, r, f).clone();
                            self.model.add_eq(LinearExpr::from(var), LinearExpr::from(0));
                        }
                    }
                }
            }
        }
    }
}
