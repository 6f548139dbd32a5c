//! Lexicographic objective: gaps dominate utilization, which dominates imbalance.
//!
//! Grounded directly on the original `_set_objectives`/`_calculate_faculty_idle_gaps`/
//! `_calculate_room_utilization`/`_calculate_load_imbalance` methods in
//! `examples/original_source/smarttimetable/backend/app/services/scheduler.py`; the
//! `OnlyEnforceIf`/`AddBoolAnd`/`AddBoolOr`/`AddAbsEquality` calls there map onto
//! `cp_sat`'s `only_enforce_if`/`add_bool_and`/`add_bool_or`/`add_abs_equality`.

use cp_sat::builder::LinearExpr;
use log::debug;

use crate::model::ModelBuilder;
use crate::snapshot::InputSnapshot;

const GAP_WEIGHT: i64 = 10_000;
const UTILIZATION_WEIGHT: i64 = 100;

pub struct ObjectiveBuilder;

impl ObjectiveBuilder {
    /// `cp_sat`'s `LinearExpr` has no scalar `Mul`; a weighted term is built by
    /// adding the same expression to itself `n` times.
    fn scaled(expr: LinearExpr, n: i64) -> LinearExpr {
        let mut acc = LinearExpr::from(0);
        for _ in 0..n {
            acc = acc + expr.clone();
        }
        acc
    }

    /// Derive the gap/utilization/imbalance auxiliary variables and register the
    /// combined weighted-sum objective on `builder.model`.
    pub fn apply(builder: &mut ModelBuilder, snapshot: &InputSnapshot) {
        debug!(
            "building lexicographic objective (gaps, utilization, imbalance) over {} faculty, {} rooms",
            builder.index.num_faculty, builder.index.num_rooms
        );
        let gaps = Self::faculty_idle_gaps(builder);
        let utilization = Self::room_utilization(builder);
        let imbalance = Self::load_imbalance(builder, snapshot);

        let objective = Self::scaled(LinearExpr::from(gaps), GAP_WEIGHT) + LinearExpr::from(imbalance)
            - Self::scaled(LinearExpr::from(utilization), UTILIZATION_WEIGHT);
        builder.model.minimize(objective);
        debug!("objective registered on model");
    }

    fn reify_sum_nonzero(builder: &mut ModelBuilder, sum: LinearExpr) -> cp_sat::builder::BoolVar {
        let flag = builder.model.new_bool_var();
        builder
            .model
            .add_ge(sum.clone(), LinearExpr::from(1))
            .only_enforce_if(flag.clone());
        builder
            .model
            .add_eq(sum, LinearExpr::from(0))
            .only_enforce_if(flag.clone().not());
        flag
    }

    fn faculty_scheduled_flags(
        builder: &mut ModelBuilder,
        f: usize,
        d: usize,
    ) -> Vec<cp_sat::builder::BoolVar> {
        let idx = builder.index;
        (0..idx.periods_per_day)
            .map(|k| {
                let p = idx.slot(d, k + 1);
                let terms = (0..idx.num_batches).flat_map(|b| {
                    (0..idx.num_subjects).flat_map(move |s| (0..idx.num_rooms).map(move |r| (b, s, r)))
                });
                let mut sum = LinearExpr::from(0);
                for (b, s, r) in terms {
                    sum = sum + LinearExpr::from(builder.var(b, s, p, r, f).clone());
                }
                Self::reify_sum_nonzero(builder, sum)
            })
            .collect()
    }

    fn faculty_idle_gaps(builder: &mut ModelBuilder) -> cp_sat::builder::IntVar {
        let idx = builder.index;
        let mut all_gaps = Vec::new();

        for f in 0..idx.num_faculty {
            for d in 0..idx.days {
                let scheduled = Self::faculty_scheduled_flags(builder, f, d);

                for i in 1..idx.periods_per_day.saturating_sub(1) {
                    let earlier: LinearExpr = scheduled[..i]
                        .iter()
                        .cloned()
                        .fold(LinearExpr::from(0), |acc, v| acc + LinearExpr::from(v));
                    let later: LinearExpr = scheduled[i + 1..]
                        .iter()
                        .cloned()
                        .fold(LinearExpr::from(0), |acc, v| acc + LinearExpr::from(v));

                    let has_earlier = Self::reify_sum_nonzero(builder, earlier);
                    let has_later = Self::reify_sum_nonzero(builder, later);

                    let gap = builder.model.new_bool_var();
                    builder
                        .model
                        .add_bool_and(&[
                            has_earlier.clone(),
                            scheduled[i].clone().not(),
                            has_later.clone(),
                        ])
                        .only_enforce_if(gap.clone());
                    builder
                        .model
                        .add_bool_or(&[
                            has_earlier.clone().not(),
                            scheduled[i].clone(),
                            has_later.clone().not(),
                        ])
                        .only_enforce_if(gap.clone().not());

                    all_gaps.push(gap);
                }
            }
        }

        let total = builder
            .model
            .new_int_var(vec![(0, all_gaps.len() as i64)]);
        let sum = all_gaps
            .into_iter()
            .fold(LinearExpr::from(0), |acc, v| acc + LinearExpr::from(v));
        builder.model.add_eq(LinearExpr::from(total.clone()), sum);
        total
    }

    fn room_utilization(builder: &mut ModelBuilder) -> cp_sat::builder::IntVar {
        let idx = builder.index;
        let mut all_used = Vec::new();

        for r in 0..idx.num_rooms {
            for p in 0..idx.total_periods() {
                let terms = (0..idx.num_batches).flat_map(|b| {
                    (0..idx.num_subjects).flat_map(move |s| (0..idx.num_faculty).map(move |f| (b, s, f)))
                });
                let mut sum = LinearExpr::from(0);
                for (b, s, f) in terms {
                    sum = sum + LinearExpr::from(builder.var(b, s, p, r, f).clone());
                }
                all_used.push(Self::reify_sum_nonzero(builder, sum));
            }
        }

        let total = builder
            .model
            .new_int_var(vec![(0, all_used.len() as i64)]);
        let sum = all_used
            .into_iter()
            .fold(LinearExpr::from(0), |acc, v| acc + LinearExpr::from(v));
        builder.model.add_eq(LinearExpr::from(total.clone()), sum);
        total
    }

    fn load_imbalance(
        builder: &mut ModelBuilder,
        snapshot: &InputSnapshot,
    ) -> cp_sat::builder::IntVar {
        let idx = builder.index;
        let total_periods = idx.total_periods() as i64;

        let mut loads = Vec::with_capacity(idx.num_faculty);
        for f in 0..idx.num_faculty {
            let terms = (0..idx.total_periods()).flat_map(|p| {
                (0..idx.num_batches).flat_map(move |b| {
                    (0..idx.num_subjects).flat_map(move |s| (0..idx.num_rooms).map(move |r| (p, b, s, r)))
                })
            });
            let mut sum = LinearExpr::from(0);
            for (p, b, s, r) in terms {
                sum = sum + LinearExpr::from(builder.var(b, s, p, r, f).clone());
            }
            let load = builder.model.new_int_var(vec![(0, total_periods)]);
            builder.model.add_eq(LinearExpr::from(load.clone()), sum);
            loads.push(load);
        }

        let num_faculty = idx.num_faculty.max(1) as i64;
        let avg = builder.model.new_int_var(vec![(0, total_periods)]);
        let load_sum = loads
            .iter()
            .cloned()
            .fold(LinearExpr::from(0), |acc, v| acc + LinearExpr::from(v));
        builder.model.add_eq(
            Self::scaled(LinearExpr::from(avg.clone()), num_faculty),
            load_sum,
        );

        let mut abs_diffs = Vec::with_capacity(loads.len());
        for load in &loads {
            let diff = builder
                .model
                .new_int_var(vec![(-total_periods, total_periods)]);
            builder.model.add_eq(
                LinearExpr::from(diff.clone()),
                LinearExpr::from(load.clone()) - LinearExpr::from(avg.clone()),
            );
            let abs_diff = builder.model.new_int_var(vec![(0, total_periods)]);
            builder
                .model
                .add_abs_equality(abs_diff.clone(), LinearExpr::from(diff));
            abs_diffs.push(abs_diff);
        }

        let imbalance = builder
            .model
            .new_int_var(vec![(0, total_periods * idx.num_faculty.max(1) as i64)]);
        let abs_sum = abs_diffs
            .into_iter()
            .fold(LinearExpr::from(0), |acc, v| acc + LinearExpr::from(v));
        builder
            .model
            .add_eq(LinearExpr::from(imbalance.clone()), abs_sum);
        imbalance
    }
}
