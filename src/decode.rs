//! Translates solver-internal indices back into domain tuples.

use cp_sat::builder::BoolVar;
use cp_sat::proto::CpSolverResponse;
use serde::{Deserialize, Serialize};

use crate::catalog::{BatchId, FacultyId, RoomId, SubjectId};
use crate::index::IndexSpace;
use crate::snapshot::InputSnapshot;

/// One scheduled class: `(day, period_no, room, batch, subject, faculty)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub day: u32,
    pub period_no: u32,
    pub room_id: RoomId,
    pub batch_id: BatchId,
    pub subject_id: SubjectId,
    pub faculty_id: FacultyId,
}

pub struct SolutionDecoder;

impl SolutionDecoder {
    /// Walk the dense variable table and emit every assignment with value 1 as a
    /// [`PeriodRecord`]. Order is the decode walk's insertion order, not canonical.
    pub fn decode(
        vars: &[BoolVar],
        idx: IndexSpace,
        snapshot: &InputSnapshot,
        response: &CpSolverResponse,
    ) -> Vec<PeriodRecord> {
        let mut periods = Vec::new();

        for b in 0..idx.num_batches {
            for s in 0..idx.num_subjects {
                for p in 0..idx.total_periods() {
                    for r in 0..idx.num_rooms {
                        for f in 0..idx.num_faculty {
                            if vars[idx.var_index(b, s, p, r, f)].solution_value(response) {
                                let (day, period_no) = idx.unslot(p);
                                periods.push(PeriodRecord {
                                    day: day as u32,
                                    period_no: period_no as u32,
                                    room_id: snapshot.rooms[r].id,
                                    batch_id: snapshot.batches[b].id,
                                    subject_id: snapshot.subjects[s].id,
                                    faculty_id: snapshot.faculty[f].id,
                                });
                            }
                        }
                    }
                }
            }
        }

        periods
    }
}
