//! In-memory record store.
//!
//! Holds every table behind a single `RwLock`. Reads hand out cloned
//! snapshots, so callers never observe later writes through a value they
//! already hold.

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;
use tracing::debug;

use crate::config::SeedData;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Assignment, AttendanceRecord, AttendanceStatus, Class, EntityId, Grade, Student,
};

use super::{AssignmentAccessor, AttendanceAccessor, ClassAccessor, GradeAccessor, StudentAccessor};

/// A stored entity with an identifier.
trait Record: Clone {
    fn id(&self) -> EntityId;
    fn set_id(&mut self, id: EntityId);
    fn not_found(id: EntityId) -> EngineError;
    const KIND: &'static str;
}

impl Record for Student {
    const KIND: &'static str = "student";

    fn id(&self) -> EntityId {
        self.id
    }
    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
    fn not_found(id: EntityId) -> EngineError {
        EngineError::StudentNotFound { id }
    }
}

impl Record for Grade {
    const KIND: &'static str = "grade";

    fn id(&self) -> EntityId {
        self.id
    }
    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
    fn not_found(id: EntityId) -> EngineError {
        EngineError::GradeNotFound { id }
    }
}

impl Record for Assignment {
    const KIND: &'static str = "assignment";

    fn id(&self) -> EntityId {
        self.id
    }
    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
    fn not_found(id: EntityId) -> EngineError {
        EngineError::AssignmentNotFound { id }
    }
}

impl Record for AttendanceRecord {
    const KIND: &'static str = "attendance record";

    fn id(&self) -> EntityId {
        self.id
    }
    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
    fn not_found(id: EntityId) -> EngineError {
        EngineError::AttendanceNotFound { id }
    }
}

impl Record for Class {
    const KIND: &'static str = "class";

    fn id(&self) -> EntityId {
        self.id
    }
    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
    fn not_found(id: EntityId) -> EngineError {
        EngineError::ClassNotFound { id }
    }
}

fn find<T: Record>(table: &[T], id: EntityId) -> EngineResult<T> {
    table
        .iter()
        .find(|r| r.id() == id)
        .cloned()
        .ok_or_else(|| T::not_found(id))
}

/// Appends a record under the next free identifier (max + 1, or 1 when empty).
fn insert<T: Record>(table: &mut Vec<T>, mut record: T) -> EngineResult<T> {
    let next_id = table
        .iter()
        .map(Record::id)
        .max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or(EngineError::IdentifiersExhausted { kind: T::KIND })?;
    record.set_id(next_id);
    table.push(record.clone());
    Ok(record)
}

fn replace<T: Record>(table: &mut [T], id: EntityId, mut record: T) -> EngineResult<T> {
    let slot = table
        .iter_mut()
        .find(|r| r.id() == id)
        .ok_or_else(|| T::not_found(id))?;
    record.set_id(id);
    *slot = record.clone();
    Ok(record)
}

fn remove<T: Record>(table: &mut Vec<T>, id: EntityId) -> EngineResult<T> {
    let index = table
        .iter()
        .position(|r| r.id() == id)
        .ok_or_else(|| T::not_found(id))?;
    Ok(table.remove(index))
}

#[derive(Debug, Default)]
struct Tables {
    students: Vec<Student>,
    grades: Vec<Grade>,
    assignments: Vec<Assignment>,
    attendance: Vec<AttendanceRecord>,
    classes: Vec<Class>,
}

/// A record store held entirely in memory.
///
/// Seeded once from [`SeedData`] and then mutated in place through the
/// create/update/delete methods. Share it between tasks with an `Arc`.
///
/// # Example
///
/// ```
/// use report_engine::config::SeedData;
/// use report_engine::store::{InMemoryStore, StudentAccessor};
///
/// # #[tokio::main]
/// # async fn main() {
/// let store = InMemoryStore::new(SeedData::default());
/// assert!(store.all_students().await.unwrap().is_empty());
/// assert!(store.student_by_id(1).await.is_err());
/// # }
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    /// Creates a store seeded with the given records.
    pub fn new(seed: SeedData) -> Self {
        Self {
            tables: RwLock::new(Tables {
                students: seed.students,
                grades: seed.grades,
                assignments: seed.assignments,
                attendance: seed.attendance,
                classes: seed.classes,
            }),
        }
    }

    // Students

    /// Adds a student. The identifier is assigned by the store and the class
    /// list starts empty.
    pub async fn create_student(&self, mut student: Student) -> EngineResult<Student> {
        student.class_ids.clear();
        let created = insert(&mut self.tables.write().await.students, student)?;
        debug!(student_id = created.id, "Created student");
        Ok(created)
    }

    /// Replaces a student's record, keeping its identifier.
    pub async fn update_student(&self, id: EntityId, student: Student) -> EngineResult<Student> {
        replace(&mut self.tables.write().await.students, id, student)
    }

    /// Removes a student, returning the removed record.
    pub async fn delete_student(&self, id: EntityId) -> EngineResult<Student> {
        remove(&mut self.tables.write().await.students, id)
    }

    /// Finds students whose first name, last name or email contains `query`,
    /// ignoring case.
    pub async fn search_students(&self, query: &str) -> Vec<Student> {
        self.tables
            .read()
            .await
            .students
            .iter()
            .filter(|s| s.matches_query(query))
            .cloned()
            .collect()
    }

    /// Returns the students in a grade level.
    pub async fn students_by_grade_level(&self, grade_level: u8) -> Vec<Student> {
        self.tables
            .read()
            .await
            .students
            .iter()
            .filter(|s| s.grade_level == grade_level)
            .cloned()
            .collect()
    }

    // Grades

    /// Adds a grade under a store-assigned identifier.
    pub async fn create_grade(&self, grade: Grade) -> EngineResult<Grade> {
        insert(&mut self.tables.write().await.grades, grade)
    }

    /// Replaces a grade, keeping its identifier.
    pub async fn update_grade(&self, id: EntityId, grade: Grade) -> EngineResult<Grade> {
        replace(&mut self.tables.write().await.grades, id, grade)
    }

    /// Removes a grade, returning the removed record.
    pub async fn delete_grade(&self, id: EntityId) -> EngineResult<Grade> {
        remove(&mut self.tables.write().await.grades, id)
    }

    // Assignments

    /// Adds an assignment under a store-assigned identifier.
    pub async fn create_assignment(&self, assignment: Assignment) -> EngineResult<Assignment> {
        insert(&mut self.tables.write().await.assignments, assignment)
    }

    /// Replaces an assignment, keeping its identifier.
    pub async fn update_assignment(
        &self,
        id: EntityId,
        assignment: Assignment,
    ) -> EngineResult<Assignment> {
        replace(&mut self.tables.write().await.assignments, id, assignment)
    }

    /// Removes an assignment, returning the removed record.
    pub async fn delete_assignment(&self, id: EntityId) -> EngineResult<Assignment> {
        remove(&mut self.tables.write().await.assignments, id)
    }

    // Attendance

    /// Adds an attendance record under a store-assigned identifier.
    pub async fn create_attendance(
        &self,
        record: AttendanceRecord,
    ) -> EngineResult<AttendanceRecord> {
        insert(&mut self.tables.write().await.attendance, record)
    }

    /// Replaces an attendance record, keeping its identifier.
    pub async fn update_attendance(
        &self,
        id: EntityId,
        record: AttendanceRecord,
    ) -> EngineResult<AttendanceRecord> {
        replace(&mut self.tables.write().await.attendance, id, record)
    }

    /// Removes an attendance record, returning the removed record.
    pub async fn delete_attendance(&self, id: EntityId) -> EngineResult<AttendanceRecord> {
        remove(&mut self.tables.write().await.attendance, id)
    }

    /// Returns every attendance record for a given day.
    pub async fn attendance_by_date(&self, date: NaiveDate) -> Vec<AttendanceRecord> {
        self.tables
            .read()
            .await
            .attendance
            .iter()
            .filter(|r| r.date == date)
            .cloned()
            .collect()
    }

    /// Records a student's attendance for a day.
    ///
    /// Updates the status and notes of the existing record for that student
    /// and date, or creates a new record when there is none.
    pub async fn mark_attendance(
        &self,
        student_id: EntityId,
        date: NaiveDate,
        status: AttendanceStatus,
        notes: Option<String>,
    ) -> EngineResult<AttendanceRecord> {
        let mut tables = self.tables.write().await;

        if let Some(existing) = tables
            .attendance
            .iter_mut()
            .find(|r| r.student_id == student_id && r.date == date)
        {
            existing.status = status;
            existing.notes = notes;
            debug!(record_id = existing.id, student_id, %date, "Updated attendance");
            return Ok(existing.clone());
        }

        let created = insert(
            &mut tables.attendance,
            AttendanceRecord {
                id: 0,
                student_id,
                date,
                status,
                notes,
            },
        )?;
        debug!(record_id = created.id, student_id, %date, "Created attendance");
        Ok(created)
    }

    // Classes

    /// Adds a class. The identifier is assigned by the store and the roster
    /// starts empty.
    pub async fn create_class(&self, mut class: Class) -> EngineResult<Class> {
        class.student_ids.clear();
        insert(&mut self.tables.write().await.classes, class)
    }

    /// Replaces a class, keeping its identifier.
    pub async fn update_class(&self, id: EntityId, class: Class) -> EngineResult<Class> {
        replace(&mut self.tables.write().await.classes, id, class)
    }

    /// Removes a class, returning the removed record.
    pub async fn delete_class(&self, id: EntityId) -> EngineResult<Class> {
        remove(&mut self.tables.write().await.classes, id)
    }

    /// Returns the classes teaching a subject, ignoring case.
    pub async fn classes_by_subject(&self, subject: &str) -> Vec<Class> {
        let subject = subject.to_lowercase();
        self.tables
            .read()
            .await
            .classes
            .iter()
            .filter(|c| c.subject.to_lowercase() == subject)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StudentAccessor for InMemoryStore {
    async fn all_students(&self) -> EngineResult<Vec<Student>> {
        Ok(self.tables.read().await.students.clone())
    }

    async fn student_by_id(&self, id: EntityId) -> EngineResult<Student> {
        find(&self.tables.read().await.students, id)
    }
}

#[async_trait]
impl GradeAccessor for InMemoryStore {
    async fn all_grades(&self) -> EngineResult<Vec<Grade>> {
        Ok(self.tables.read().await.grades.clone())
    }

    async fn grade_by_id(&self, id: EntityId) -> EngineResult<Grade> {
        find(&self.tables.read().await.grades, id)
    }

    async fn grades_by_student_id(&self, student_id: EntityId) -> EngineResult<Vec<Grade>> {
        Ok(self
            .tables
            .read()
            .await
            .grades
            .iter()
            .filter(|g| g.student_id == student_id)
            .cloned()
            .collect())
    }

    async fn grades_by_assignment_id(&self, assignment_id: EntityId) -> EngineResult<Vec<Grade>> {
        Ok(self
            .tables
            .read()
            .await
            .grades
            .iter()
            .filter(|g| g.assignment_id == assignment_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AssignmentAccessor for InMemoryStore {
    async fn all_assignments(&self) -> EngineResult<Vec<Assignment>> {
        Ok(self.tables.read().await.assignments.clone())
    }

    async fn assignment_by_id(&self, id: EntityId) -> EngineResult<Assignment> {
        find(&self.tables.read().await.assignments, id)
    }

    async fn assignments_by_class_id(&self, class_id: EntityId) -> EngineResult<Vec<Assignment>> {
        Ok(self
            .tables
            .read()
            .await
            .assignments
            .iter()
            .filter(|a| a.class_id == class_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl AttendanceAccessor for InMemoryStore {
    async fn all_attendance(&self) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self.tables.read().await.attendance.clone())
    }

    async fn attendance_by_id(&self, id: EntityId) -> EngineResult<AttendanceRecord> {
        find(&self.tables.read().await.attendance, id)
    }

    async fn attendance_by_student_id(
        &self,
        student_id: EntityId,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        Ok(self
            .tables
            .read()
            .await
            .attendance
            .iter()
            .filter(|r| r.student_id == student_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ClassAccessor for InMemoryStore {
    async fn all_classes(&self) -> EngineResult<Vec<Class>> {
        Ok(self.tables.read().await.classes.clone())
    }

    async fn class_by_id(&self, id: EntityId) -> EngineResult<Class> {
        find(&self.tables.read().await.classes, id)
    }
}
