//! Static, necessary-condition diagnostics run on UNSAT. Never re-runs the solver.

use log::warn;
use serde::{Deserialize, Serialize};

use crate::snapshot::InputSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SuggestionKind {
    RoomCapacity,
    FacultyWorkload,
    SubjectHours,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    pub kind: SuggestionKind,
    pub message: String,
    pub solution: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Diagnostic {
    pub error: String,
    pub suggestions: Vec<Suggestion>,
}

pub struct InfeasibilityExplainer;

impl InfeasibilityExplainer {
    /// Run the three necessary-condition checks and produce a diagnostic. `timed_out`
    /// distinguishes a proven-UNSAT cause from a time-cap cause in the summary message;
    /// neither case re-runs the solver.
    pub fn explain(snapshot: &InputSnapshot, timed_out: bool) -> Diagnostic {
        let mut suggestions = Vec::new();
        suggestions.extend(Self::check_room_capacity(snapshot));
        suggestions.extend(Self::check_faculty_workload(snapshot));
        suggestions.extend(Self::check_subject_hour_envelope(snapshot));

        warn!(
            "infeasible instance: {} suggestion(s) triggered (timed_out={})",
            suggestions.len(),
            timed_out
        );

        let error = if timed_out {
            "No feasible timetable was found before the time cap; the instance may still be \
             feasible but the solver did not prove it either way."
                .to_string()
        } else {
            "No feasible timetable exists for the given inputs.".to_string()
        };

        Diagnostic { error, suggestions }
    }

    fn check_room_capacity(snapshot: &InputSnapshot) -> Vec<Suggestion> {
        let max_capacity = snapshot.rooms.iter().map(|r| r.capacity).max().unwrap_or(0);
        snapshot
            .batches
            .iter()
            .filter(|b| b.size > max_capacity)
            .map(|b| Suggestion {
                kind: SuggestionKind::RoomCapacity,
                message: format!(
                    "Batch '{}' with {} students doesn't fit in any available room.",
                    b.name, b.size
                ),
                solution: format!("Add a room with capacity of at least {} students.", b.size),
            })
            .collect()
    }

    fn check_faculty_workload(snapshot: &InputSnapshot) -> Vec<Suggestion> {
        let total_hours: u32 = snapshot.subjects.iter().map(|s| s.hours_week).sum();
        let total_capacity: u32 = snapshot.faculty.iter().map(|f| f.max_week).sum();
        if total_hours > total_capacity {
            vec![Suggestion {
                kind: SuggestionKind::FacultyWorkload,
                message: format!(
                    "Total required teaching hours ({}) exceeds faculty capacity ({}).",
                    total_hours, total_capacity
                ),
                solution: "Increase faculty max weekly load or add more faculty members.".into(),
            }]
        } else {
            Vec::new()
        }
    }

    fn check_subject_hour_envelope(snapshot: &InputSnapshot) -> Vec<Suggestion> {
        let max_possible = snapshot.index.days as u32 * snapshot.index.periods_per_day as u32;
        snapshot
            .batches
            .iter()
            .filter_map(|b| {
                let total: u32 = snapshot
                    .subjects
                    .iter()
                    .filter(|s| s.semester == b.semester)
                    .map(|s| s.hours_week)
                    .sum();
                if total > max_possible {
                    Some(Suggestion {
                        kind: SuggestionKind::SubjectHours,
                        message: format!(
                            "Batch '{}' requires {} total hours, but only {} are available.",
                            b.name, total, max_possible
                        ),
                        solution: "Reduce total subject hours or increase available periods per week."
                            .into(),
                    })
                } else {
                    None
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Batch, Catalog, Faculty, FixedSlot, Room, RoomType, Subject, SubjectType};

    struct FakeCatalog {
        rooms: Vec<Room>,
        faculty: Vec<Faculty>,
        subjects: Vec<Subject>,
        batches: Vec<Batch>,
    }

    impl Catalog for FakeCatalog {
        fn rooms(&self) -> Vec<Room> {
            self.rooms.clone()
        }
        fn faculty(&self) -> Vec<Faculty> {
            self.faculty.clone()
        }
        fn subjects(&self) -> Vec<Subject> {
            self.subjects.clone()
        }
        fn batches(&self) -> Vec<Batch> {
            self.batches.clone()
        }
        fn fixed_slots(&self) -> Vec<FixedSlot> {
            Vec::new()
        }
    }

    #[test]
    fn flags_room_capacity_bottleneck() {
        let cat = FakeCatalog {
            rooms: vec![Room {
                id: 1,
                name: "R1".into(),
                room_type: RoomType::Lecture,
                capacity: 10,
                available_slots: serde_json::Value::Null,
            }],
            faculty: vec![],
            subjects: vec![Subject {
                id: 1,
                code: "S1".into(),
                name: "Subj".into(),
                hours_week: 1,
                subject_type: SubjectType::Lecture,
                semester: 1,
            }],
            batches: vec![Batch {
                id: 1,
                name: "Batch A".into(),
                size: 30,
                programme: "P".into(),
                semester: 1,
            }],
        };
        let snapshot = InputSnapshot::build(&cat, 6, 8).unwrap();
        let diag = InfeasibilityExplainer::explain(&snapshot, false);
        assert!(diag
            .suggestions
            .iter()
            .any(|s| s.kind == SuggestionKind::RoomCapacity && s.message.contains("Batch A")));
    }

    #[test]
    fn flags_aggregate_faculty_workload() {
        let cat = FakeCatalog {
            rooms: vec![Room {
                id: 1,
                name: "R1".into(),
                room_type: RoomType::Lecture,
                capacity: 100,
                available_slots: serde_json::Value::Null,
            }],
            faculty: vec![
                Faculty {
                    id: 1,
                    name: "F1".into(),
                    max_day: 8,
                    max_week: 10,
                    leave_avg: 0.0,
                    subject_ids: vec![],
                },
                Faculty {
                    id: 2,
                    name: "F2".into(),
                    max_day: 8,
                    max_week: 10,
                    leave_avg: 0.0,
                    subject_ids: vec![],
                },
            ],
            subjects: vec![Subject {
                id: 1,
                code: "S1".into(),
                name: "Subj".into(),
                hours_week: 30,
                subject_type: SubjectType::Lecture,
                semester: 1,
            }],
            batches: vec![Batch {
                id: 1,
                name: "Batch A".into(),
                size: 10,
                programme: "P".into(),
                semester: 1,
            }],
        };
        let snapshot = InputSnapshot::build(&cat, 6, 8).unwrap();
        let diag = InfeasibilityExplainer::explain(&snapshot, false);
        assert!(diag
            .suggestions
            .iter()
            .any(|s| s.kind == SuggestionKind::FacultyWorkload));
    }
}
