//! Dataset loading for the Report Engine.
//!
//! This module loads a school dataset (students, classes, assignments,
//! grades and attendance) from YAML files, to seed the in-memory record store.
//!
//! # Example
//!
//! ```no_run
//! use report_engine::config::DataLoader;
//!
//! let loader = DataLoader::load("./data/sample").unwrap();
//! println!("Loaded school: {}", loader.school().name);
//! ```

mod loader;
mod types;

pub use loader::DataLoader;
pub use types::{
    AssignmentsFile, AttendanceFile, ClassesFile, GradesFile, SchoolMetadata, SeedData,
    StudentsFile,
};
