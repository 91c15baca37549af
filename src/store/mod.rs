//! Record accessors for the Report Engine.
//!
//! The engine never owns school records. It reads them through five accessor
//! traits, one per entity kind, each returning independent snapshots. Any
//! backing store can be plugged in by implementing the traits;
//! [`InMemoryStore`] is the implementation shipped with the crate.

mod memory;

use async_trait::async_trait;

use crate::error::EngineResult;
use crate::models::{Assignment, AttendanceRecord, Class, EntityId, Grade, Student};

pub use memory::InMemoryStore;

/// Read access to students.
#[async_trait]
pub trait StudentAccessor: Send + Sync {
    /// Returns every student, in store order.
    async fn all_students(&self) -> EngineResult<Vec<Student>>;

    /// Returns one student; fails with `StudentNotFound` if absent.
    async fn student_by_id(&self, id: EntityId) -> EngineResult<Student>;
}

/// Read access to grades.
#[async_trait]
pub trait GradeAccessor: Send + Sync {
    /// Returns every grade, in store order.
    async fn all_grades(&self) -> EngineResult<Vec<Grade>>;

    /// Returns one grade; fails with `GradeNotFound` if absent.
    async fn grade_by_id(&self, id: EntityId) -> EngineResult<Grade>;

    /// Returns the grades earned by a student.
    async fn grades_by_student_id(&self, student_id: EntityId) -> EngineResult<Vec<Grade>>;

    /// Returns the grades awarded for an assignment.
    async fn grades_by_assignment_id(&self, assignment_id: EntityId) -> EngineResult<Vec<Grade>>;
}

/// Read access to assignments.
#[async_trait]
pub trait AssignmentAccessor: Send + Sync {
    /// Returns every assignment, in store order.
    async fn all_assignments(&self) -> EngineResult<Vec<Assignment>>;

    /// Returns one assignment; fails with `AssignmentNotFound` if absent.
    async fn assignment_by_id(&self, id: EntityId) -> EngineResult<Assignment>;

    /// Returns the assignments set for a class.
    async fn assignments_by_class_id(&self, class_id: EntityId) -> EngineResult<Vec<Assignment>>;
}

/// Read access to attendance records.
#[async_trait]
pub trait AttendanceAccessor: Send + Sync {
    /// Returns every attendance record, in store order.
    async fn all_attendance(&self) -> EngineResult<Vec<AttendanceRecord>>;

    /// Returns one record; fails with `AttendanceNotFound` if absent.
    async fn attendance_by_id(&self, id: EntityId) -> EngineResult<AttendanceRecord>;

    /// Returns a student's attendance records, in store order.
    async fn attendance_by_student_id(
        &self,
        student_id: EntityId,
    ) -> EngineResult<Vec<AttendanceRecord>>;
}

/// Read access to classes.
#[async_trait]
pub trait ClassAccessor: Send + Sync {
    /// Returns every class, in store order.
    async fn all_classes(&self) -> EngineResult<Vec<Class>>;

    /// Returns one class; fails with `ClassNotFound` if absent.
    async fn class_by_id(&self, id: EntityId) -> EngineResult<Class>;
}

/// Everything the report composer reads from.
///
/// Implemented automatically for any type providing all five accessors.
pub trait SchoolRecords:
    StudentAccessor + GradeAccessor + AssignmentAccessor + AttendanceAccessor + ClassAccessor + 'static
{
}

impl<T> SchoolRecords for T where
    T: StudentAccessor
        + GradeAccessor
        + AssignmentAccessor
        + AttendanceAccessor
        + ClassAccessor
        + 'static
{
}
