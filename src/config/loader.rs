//! Dataset loading functionality.
//!
//! This module provides the [`DataLoader`] type for loading a school dataset
//! from YAML files.

use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};

use super::types::{
    AssignmentsFile, AttendanceFile, ClassesFile, GradesFile, SchoolMetadata, SeedData,
    StudentsFile,
};

/// Loads a school dataset from a directory of YAML files.
///
/// # Directory Structure
///
/// ```text
/// data/sample/
/// ├── school.yaml       # School metadata
/// ├── students.yaml     # Student roster
/// ├── classes.yaml      # Classes
/// ├── assignments.yaml  # Assignments
/// ├── grades.yaml       # Grades
/// └── attendance.yaml   # Attendance records
/// ```
///
/// Identifier fields may be written as numbers or numeric strings.
///
/// # Example
///
/// ```no_run
/// use report_engine::config::DataLoader;
///
/// let loader = DataLoader::load("./data/sample").unwrap();
/// println!("Loaded {} students for {}", loader.data().students.len(), loader.school().name);
/// ```
#[derive(Debug, Clone)]
pub struct DataLoader {
    school: SchoolMetadata,
    data: SeedData,
}

impl DataLoader {
    /// Loads the dataset from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `DataLoader` on success, or an error if:
    /// - Any required file is missing (`DataNotFound`)
    /// - Any file contains invalid YAML or invalid records (`DataParseError`)
    ///
    /// Grades pointing at unknown assignments and students listing unknown
    /// classes are logged as warnings, not rejected.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let school = Self::load_yaml::<SchoolMetadata>(&path.join("school.yaml"))?;
        let students = Self::load_yaml::<StudentsFile>(&path.join("students.yaml"))?.students;
        let classes = Self::load_yaml::<ClassesFile>(&path.join("classes.yaml"))?.classes;
        let assignments =
            Self::load_yaml::<AssignmentsFile>(&path.join("assignments.yaml"))?.assignments;
        let grades = Self::load_yaml::<GradesFile>(&path.join("grades.yaml"))?.grades;
        let attendance =
            Self::load_yaml::<AttendanceFile>(&path.join("attendance.yaml"))?.attendance;

        let data = SeedData {
            students,
            classes,
            assignments,
            grades,
            attendance,
        };

        for grade in data.orphaned_grades() {
            warn!(
                grade_id = grade.id,
                assignment_id = grade.assignment_id,
                "Grade references unknown assignment"
            );
        }
        for (student_id, class_id) in data.dangling_enrollments() {
            warn!(student_id, class_id, "Student lists unknown class");
        }

        info!(
            school = %school.name,
            students = data.students.len(),
            classes = data.classes.len(),
            assignments = data.assignments.len(),
            grades = data.grades.len(),
            attendance = data.attendance.len(),
            "Loaded school dataset"
        );

        Ok(Self { school, data })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::DataNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::DataParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the school metadata.
    pub fn school(&self) -> &SchoolMetadata {
        &self.school
    }

    /// Returns the loaded records.
    pub fn data(&self) -> &SeedData {
        &self.data
    }

    /// Consumes the loader, returning the loaded records.
    pub fn into_data(self) -> SeedData {
        self.data
    }
}
