//! Report Engine for school records
//!
//! This crate aggregates student, grade, assignment, attendance and class
//! records into printable report documents: report cards, attendance sheets,
//! class-level batches of both, and a school-wide overview.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod service;
pub mod statistics;
pub mod store;
