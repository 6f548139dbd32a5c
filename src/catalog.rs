//! Domain entities and the read-only data-access interface the scheduler consumes.
//!
//! Everything in this module is a plain, serializable value type. Persistence, HTTP
//! transport, auth and rendering are external collaborators; they are represented
//! here only as the shape of data flowing in (`Catalog`) and the shape flowing out
//! (`crate::decode::PeriodRecord`).

use serde::{Deserialize, Serialize};

pub type RoomId = i64;
pub type FacultyId = i64;
pub type BatchId = i64;
pub type SubjectId = i64;
pub type FixedSlotId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoomType {
    Lecture,
    Lab,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    pub room_type: RoomType,
    pub capacity: u32,
    /// Opaque to the core; carried through untouched for the persistence layer.
    pub available_slots: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Faculty {
    pub id: FacultyId,
    pub name: String,
    /// Max periods this faculty may teach in a single day.
    pub max_day: u32,
    /// Max periods this faculty may teach in a single week.
    pub max_week: u32,
    /// Average leave probability. Not consumed by the core; carried through for
    /// downstream reporting only.
    pub leave_avg: f64,
    /// Subjects this faculty is qualified to teach. Loaded but, by default, not
    /// enforced (see [`crate::config::SchedulerConfig::enforce_qualifications`]).
    pub subject_ids: Vec<SubjectId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Batch {
    pub id: BatchId,
    pub name: String,
    pub size: u32,
    pub programme: String,
    pub semester: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubjectType {
    Lecture,
    Lab,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: SubjectId,
    pub code: String,
    pub name: String,
    pub hours_week: u32,
    pub subject_type: SubjectType,
    pub semester: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedSlot {
    pub id: FixedSlotId,
    pub batch_id: BatchId,
    /// 0-based, `[0, days)`.
    pub day: u32,
    /// 1-based, `[1, periods_per_day]`.
    pub period: u32,
    pub room_id: Option<RoomId>,
}

/// Read-only bulk accessor over the scheduler's inputs. No filtering, no
/// pagination, no transactions — the scheduler always reads everything up front
/// and treats it as immutable for the remainder of the run.
pub trait Catalog {
    fn rooms(&self) -> Vec<Room>;
    fn faculty(&self) -> Vec<Faculty>;
    fn subjects(&self) -> Vec<Subject>;
    fn batches(&self) -> Vec<Batch>;
    fn fixed_slots(&self) -> Vec<FixedSlot>;
}
