//! Data file types for the school dataset.
//!
//! This module contains the strongly-typed structures that are deserialized
//! from the YAML files of a dataset directory.

use serde::{Deserialize, Serialize};

use crate::models::{Assignment, AttendanceRecord, Class, EntityId, Grade, Student};

/// Metadata about the school the dataset belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchoolMetadata {
    /// The school's name.
    pub name: String,
    /// The academic year (e.g., "2023-2024").
    pub academic_year: String,
    /// The current term (e.g., "Spring").
    pub term: String,
}

/// students.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct StudentsFile {
    /// The student roster.
    pub students: Vec<Student>,
}

/// classes.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct ClassesFile {
    /// All classes.
    pub classes: Vec<Class>,
}

/// assignments.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignmentsFile {
    /// All assignments.
    pub assignments: Vec<Assignment>,
}

/// grades.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct GradesFile {
    /// All grades.
    pub grades: Vec<Grade>,
}

/// attendance.yaml file structure.
#[derive(Debug, Clone, Deserialize)]
pub struct AttendanceFile {
    /// All attendance records.
    pub attendance: Vec<AttendanceRecord>,
}

/// The complete dataset loaded from a data directory.
///
/// Used to seed an [`InMemoryStore`](crate::store::InMemoryStore).
#[derive(Debug, Clone, Default)]
pub struct SeedData {
    /// The student roster.
    pub students: Vec<Student>,
    /// All classes.
    pub classes: Vec<Class>,
    /// All assignments.
    pub assignments: Vec<Assignment>,
    /// All grades.
    pub grades: Vec<Grade>,
    /// All attendance records.
    pub attendance: Vec<AttendanceRecord>,
}

impl SeedData {
    /// Returns the grades whose assignment is not in the dataset.
    pub fn orphaned_grades(&self) -> Vec<&Grade> {
        self.grades
            .iter()
            .filter(|g| !self.assignments.iter().any(|a| a.id == g.assignment_id))
            .collect()
    }

    /// Returns (student id, class id) pairs where a student lists a class
    /// that is not in the dataset.
    pub fn dangling_enrollments(&self) -> Vec<(EntityId, EntityId)> {
        self.students
            .iter()
            .flat_map(|s| s.class_ids.iter().map(move |c| (s.id, *c)))
            .filter(|(_, class_id)| !self.classes.iter().any(|c| c.id == *class_id))
            .collect()
    }
}
