//! Immutable, dense-indexed view of the scheduler's inputs.

use std::collections::HashMap;

use log::debug;

use crate::catalog::{Batch, BatchId, Catalog, Faculty, FacultyId, FixedSlot, Room, RoomId, Subject, SubjectId};
use crate::error::SchedulerError;
use crate::index::IndexSpace;

/// A resolved fixed slot: domain ids have already been translated to dense
/// indices and the slot has already been packed, so `ModelBuilder` never has to
/// look anything up again.
#[derive(Debug, Clone)]
pub struct ResolvedFixedSlot {
    pub batch: usize,
    pub slot: usize,
    pub room: Option<usize>,
}

/// Built once at the start of a run from a [`Catalog`] and treated as read-only
/// for the remainder of the call. Shared by reference between `ModelBuilder`,
/// `ObjectiveBuilder` and `SolutionDecoder`.
pub struct InputSnapshot {
    pub rooms: Vec<Room>,
    pub faculty: Vec<Faculty>,
    pub subjects: Vec<Subject>,
    pub batches: Vec<Batch>,
    pub fixed_slots: Vec<ResolvedFixedSlot>,
    pub index: IndexSpace,

    room_id_to_idx: HashMap<RoomId, usize>,
    faculty_id_to_idx: HashMap<FacultyId, usize>,
    subject_id_to_idx: HashMap<SubjectId, usize>,
    batch_id_to_idx: HashMap<BatchId, usize>,
}

impl InputSnapshot {
    pub fn build(
        catalog: &dyn Catalog,
        days: usize,
        periods_per_day: usize,
    ) -> Result<Self, SchedulerError> {
        let rooms = catalog.rooms();
        let faculty = catalog.faculty();
        let subjects = catalog.subjects();
        let batches = catalog.batches();
        let raw_fixed_slots = catalog.fixed_slots();

        debug!(
            "snapshot: {} rooms, {} faculty, {} subjects, {} batches, {} fixed slots",
            rooms.len(),
            faculty.len(),
            subjects.len(),
            batches.len(),
            raw_fixed_slots.len()
        );

        let room_id_to_idx: HashMap<RoomId, usize> =
            rooms.iter().enumerate().map(|(i, r)| (r.id, i)).collect();
        let faculty_id_to_idx: HashMap<FacultyId, usize> =
            faculty.iter().enumerate().map(|(i, f)| (f.id, i)).collect();
        let subject_id_to_idx: HashMap<SubjectId, usize> =
            subjects.iter().enumerate().map(|(i, s)| (s.id, i)).collect();
        let batch_id_to_idx: HashMap<BatchId, usize> =
            batches.iter().enumerate().map(|(i, b)| (b.id, i)).collect();

        let index = IndexSpace::new(
            batches.len(),
            subjects.len(),
            rooms.len(),
            faculty.len(),
            days,
            periods_per_day,
        );

        let mut fixed_slots = Vec::with_capacity(raw_fixed_slots.len());
        for fs in &raw_fixed_slots {
            let batch = *batch_id_to_idx.get(&fs.batch_id).ok_or_else(|| {
                SchedulerError::InvalidInput(format!(
                    "fixed slot {} references unknown batch {}",
                    fs.id, fs.batch_id
                ))
            })?;
            if (fs.day as usize) >= days {
                return Err(SchedulerError::InvalidInput(format!(
                    "fixed slot {} has day {} outside [0, {})",
                    fs.id, fs.day, days
                )));
            }
            if fs.period < 1 || (fs.period as usize) > periods_per_day {
                return Err(SchedulerError::InvalidInput(format!(
                    "fixed slot {} has period {} outside [1, {}]",
                    fs.id, fs.period, periods_per_day
                )));
            }
            let room = match fs.room_id {
                Some(room_id) => Some(*room_id_to_idx.get(&room_id).ok_or_else(|| {
                    SchedulerError::InvalidInput(format!(
                        "fixed slot {} references unknown room {}",
                        fs.id, room_id
                    ))
                })?),
                None => None,
            };
            fixed_slots.push(ResolvedFixedSlot {
                batch,
                slot: index.slot(fs.day as usize, fs.period as usize),
                room,
            });
        }

        Ok(Self {
            rooms,
            faculty,
            subjects,
            batches,
            fixed_slots,
            index,
            room_id_to_idx,
            faculty_id_to_idx,
            subject_id_to_idx,
            batch_id_to_idx,
        })
    }

    pub fn room_idx(&self, id: RoomId) -> Option<usize> {
        self.room_id_to_idx.get(&id).copied()
    }

    pub fn faculty_idx(&self, id: FacultyId) -> Option<usize> {
        self.faculty_id_to_idx.get(&id).copied()
    }

    pub fn subject_idx(&self, id: SubjectId) -> Option<usize> {
        self.subject_id_to_idx.get(&id).copied()
    }

    pub fn batch_idx(&self, id: BatchId) -> Option<usize> {
        self.batch_id_to_idx.get(&id).copied()
    }

    /// Faculty indices qualified to teach subject `s`, derived from
    /// `Faculty::subject_ids`. Used only when
    /// [`crate::config::SchedulerConfig::enforce_qualifications`] is set.
    pub fn qualified_faculty(&self, s: usize) -> Vec<usize> {
        let subject_id = self.subjects[s].id;
        self.faculty
            .iter()
            .enumerate()
            .filter(|(_, f)| f.subject_ids.contains(&subject_id))
            .map(|(i, _)| i)
            .collect()
    }
}
