//! End-to-end scenarios S1-S6, driven against an in-memory `Catalog`.

use std::collections::HashMap;

use timetable_scheduler_core::catalog::{
    Batch, Catalog, Faculty, FixedSlot, Room, RoomType, Subject, SubjectType,
};
use timetable_scheduler_core::{GenerationOutcome, Scheduler, SchedulerConfig, SuggestionKind};

#[derive(Default)]
struct MemoryCatalog {
    rooms: Vec<Room>,
    faculty: Vec<Faculty>,
    subjects: Vec<Subject>,
    batches: Vec<Batch>,
    fixed_slots: Vec<FixedSlot>,
}

impl Catalog for MemoryCatalog {
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
        self.fixed_slots.clone()
    }
}

fn room(id: i64, capacity: u32) -> Room {
    Room {
        id,
        name: format!("Room {id}"),
        room_type: RoomType::Lecture,
        capacity,
        available_slots: serde_json::Value::Null,
    }
}

fn faculty(id: i64, max_day: u32, max_week: u32) -> Faculty {
    Faculty {
        id,
        name: format!("Faculty {id}"),
        max_day,
        max_week,
        leave_avg: 0.0,
        subject_ids: vec![],
    }
}

fn batch(id: i64, size: u32, semester: u32) -> Batch {
    Batch {
        id,
        name: format!("Batch {id}"),
        size,
        programme: "CS".into(),
        semester,
    }
}

fn subject(id: i64, hours_week: u32, semester: u32) -> Subject {
    Subject {
        id,
        code: format!("SUB{id}"),
        name: format!("Subject {id}"),
        hours_week,
        subject_type: SubjectType::Lecture,
        semester,
    }
}

/// S1. Trivial single-class: exactly one period, position unconstrained.
#[test]
fn s1_trivial_single_class() {
    let catalog = MemoryCatalog {
        rooms: vec![room(1, 30)],
        faculty: vec![faculty(1, 8, 48)],
        batches: vec![batch(1, 30, 1)],
        subjects: vec![subject(1, 1, 1)],
        fixed_slots: vec![],
    };
    let scheduler = Scheduler::new(&catalog, SchedulerConfig::default());
    let outcome = scheduler.generate_variants(1).unwrap();

    let solutions = match outcome {
        GenerationOutcome::Solutions(s) => s,
        GenerationOutcome::Infeasible(d) => panic!("expected feasible, got {:?}", d.error),
    };
    assert_eq!(solutions.len(), 1);
    let periods = &solutions[0];
    assert_eq!(periods.len(), 1);
    let p = &periods[0];
    assert!(p.day < 6);
    assert!(p.period_no >= 1 && p.period_no <= 8);
    assert_eq!(p.room_id, 1);
    assert_eq!(p.batch_id, 1);
    assert_eq!(p.subject_id, 1);
    assert_eq!(p.faculty_id, 1);
}

/// S2. A fixed slot is honored exactly.
#[test]
fn s2_fixed_slot_honored() {
    let catalog = MemoryCatalog {
        rooms: vec![room(1, 30)],
        faculty: vec![faculty(1, 8, 48)],
        batches: vec![batch(1, 30, 1)],
        subjects: vec![subject(1, 1, 1)],
        fixed_slots: vec![FixedSlot {
            id: 1,
            batch_id: 1,
            day: 2,
            period: 3,
            room_id: Some(1),
        }],
    };
    let scheduler = Scheduler::new(&catalog, SchedulerConfig::default());
    let outcome = scheduler.generate_variants(1).unwrap();

    let solutions = match outcome {
        GenerationOutcome::Solutions(s) => s,
        GenerationOutcome::Infeasible(d) => panic!("expected feasible, got {:?}", d.error),
    };
    assert_eq!(solutions.len(), 1);
    assert_eq!(solutions[0].len(), 1);
    let p = &solutions[0][0];
    assert_eq!(p.day, 2);
    assert_eq!(p.period_no, 3);
    assert_eq!(p.room_id, 1);
}

/// S3. Capacity exclusion: the larger batch must use the larger room.
#[test]
fn s3_capacity_exclusion() {
    let catalog = MemoryCatalog {
        rooms: vec![room(1, 10), room(2, 40)],
        faculty: vec![faculty(1, 8, 48)],
        batches: vec![batch(1, 35, 1)],
        subjects: vec![subject(1, 1, 1)],
        fixed_slots: vec![],
    };
    let scheduler = Scheduler::new(&catalog, SchedulerConfig::default());
    let outcome = scheduler.generate_variants(3).unwrap();

    let solutions = match outcome {
        GenerationOutcome::Solutions(s) => s,
        GenerationOutcome::Infeasible(d) => panic!("expected feasible, got {:?}", d.error),
    };
    assert!(!solutions.is_empty());
    for sol in &solutions {
        for p in sol {
            assert_eq!(p.room_id, 2);
        }
    }
}

/// S4. Infeasible: batch too large for every room.
#[test]
fn s4_infeasible_room_too_small() {
    let catalog = MemoryCatalog {
        rooms: vec![room(1, 10)],
        faculty: vec![faculty(1, 8, 48)],
        batches: vec![batch(1, 30, 1)],
        subjects: vec![subject(1, 1, 1)],
        fixed_slots: vec![],
    };
    let scheduler = Scheduler::new(&catalog, SchedulerConfig::default());
    let outcome = scheduler.generate_variants(1).unwrap();

    let diagnostic = match outcome {
        GenerationOutcome::Infeasible(d) => d,
        GenerationOutcome::Solutions(_) => panic!("expected infeasible"),
    };
    assert!(diagnostic
        .suggestions
        .iter()
        .any(|s| s.kind == SuggestionKind::RoomCapacity && s.message.contains("Batch 1")));
}

/// S5. Infeasible: aggregate faculty workload too small for demand.
#[test]
fn s5_infeasible_faculty_workload() {
    let catalog = MemoryCatalog {
        rooms: vec![room(1, 100)],
        faculty: vec![faculty(1, 8, 10), faculty(2, 8, 10)],
        batches: vec![batch(1, 10, 1)],
        subjects: vec![subject(1, 30, 1)],
        fixed_slots: vec![],
    };
    let scheduler = Scheduler::new(&catalog, SchedulerConfig::default());
    let outcome = scheduler.generate_variants(1).unwrap();

    let diagnostic = match outcome {
        GenerationOutcome::Infeasible(d) => d,
        GenerationOutcome::Solutions(_) => panic!("expected infeasible"),
    };
    assert!(diagnostic
        .suggestions
        .iter()
        .any(|s| s.kind == SuggestionKind::FacultyWorkload));
}

/// S6. Load balancing between two equally available faculty.
#[test]
fn s6_load_balancing() {
    let catalog = MemoryCatalog {
        rooms: vec![room(1, 100)],
        faculty: vec![faculty(1, 8, 10), faculty(2, 8, 10)],
        batches: vec![batch(1, 10, 1)],
        subjects: vec![subject(1, 5, 1), subject(2, 5, 1)],
        fixed_slots: vec![],
    };
    let scheduler = Scheduler::new(&catalog, SchedulerConfig::default());
    let outcome = scheduler.generate_variants(1).unwrap();

    let solutions = match outcome {
        GenerationOutcome::Solutions(s) => s,
        GenerationOutcome::Infeasible(d) => panic!("expected feasible, got {:?}", d.error),
    };
    let mut load: HashMap<i64, usize> = HashMap::new();
    for p in &solutions[0] {
        *load.entry(p.faculty_id).or_insert(0) += 1;
    }
    let l1 = *load.get(&1).unwrap_or(&0) as i64;
    let l2 = *load.get(&2).unwrap_or(&0) as i64;
    assert!((l1 - l2).abs() <= 1);
}
