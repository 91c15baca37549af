//! The Report Service façade.
//!
//! [`ReportService`] is the entry point used by presentation layers. It
//! delegates to the [`ReportComposer`] and wraps any failure with the name of
//! the operation that failed, so that callers always see a single descriptive
//! message such as `Failed to generate report card: Student not found: 9999`.
//!
//! Nothing here caches or mutates records: every call re-reads through the
//! accessors.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use crate::error::{EngineResult, ReportOperation};
use crate::models::{
    AttendanceSheet, ClassAttendanceSheets, ClassReportCards, DateRange, EntityId, ReportCard,
    SchoolOverview,
};
use crate::report::ReportComposer;
use crate::store::SchoolRecords;

/// Generates report documents for the presentation layer.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use report_engine::config::DataLoader;
/// use report_engine::service::ReportService;
/// use report_engine::store::InMemoryStore;
///
/// # #[tokio::main]
/// # async fn main() {
/// let data = DataLoader::load("./data/sample").unwrap().into_data();
/// let service = ReportService::new(Arc::new(InMemoryStore::new(data)));
///
/// match service.generate_report_card(9999).await {
///     Ok(card) => println!("{}", card.student.full_name()),
///     Err(err) => eprintln!("{}", err),
/// }
/// # }
/// ```
pub struct ReportService<R> {
    composer: ReportComposer<R>,
}

impl<R> Clone for ReportService<R> {
    fn clone(&self) -> Self {
        Self {
            composer: self.composer.clone(),
        }
    }
}

impl<R: SchoolRecords> ReportService<R> {
    /// Creates a service reading from the given records.
    pub fn new(records: Arc<R>) -> Self {
        Self {
            composer: ReportComposer::new(records),
        }
    }

    /// Returns the records this service reads from.
    pub fn records(&self) -> &Arc<R> {
        self.composer.records()
    }

    /// Generates a student's report card.
    pub async fn generate_report_card(&self, student_id: EntityId) -> EngineResult<ReportCard> {
        run(
            ReportOperation::ReportCard,
            self.composer.compose_report_card(student_id),
        )
        .await
    }

    /// Generates a student's attendance sheet, optionally bounded by `range`.
    pub async fn generate_attendance_sheet(
        &self,
        student_id: EntityId,
        range: DateRange,
    ) -> EngineResult<AttendanceSheet> {
        run(
            ReportOperation::AttendanceSheet,
            self.composer.compose_attendance_sheet(student_id, range),
        )
        .await
    }

    /// Generates report cards for every student enrolled in a class.
    pub async fn generate_class_report_cards(
        &self,
        class_id: EntityId,
    ) -> EngineResult<ClassReportCards> {
        run(
            ReportOperation::ClassReportCards,
            self.composer.compose_class_report_cards(class_id),
        )
        .await
    }

    /// Generates attendance sheets for every student enrolled in a class.
    pub async fn generate_class_attendance_sheets(
        &self,
        class_id: EntityId,
        range: DateRange,
    ) -> EngineResult<ClassAttendanceSheets> {
        run(
            ReportOperation::ClassAttendanceSheets,
            self.composer.compose_class_attendance_sheets(class_id, range),
        )
        .await
    }

    /// Generates the school-wide overview.
    pub async fn generate_school_overview(&self) -> EngineResult<SchoolOverview> {
        run(
            ReportOperation::SchoolOverview,
            self.composer.compose_school_overview(),
        )
        .await
    }
}

/// Awaits one report operation, logging its outcome and prefixing failures
/// with the operation name.
async fn run<T>(
    operation: ReportOperation,
    report: impl Future<Output = EngineResult<T>>,
) -> EngineResult<T> {
    let start_time = Instant::now();
    let result = report.await;
    let duration_us = start_time.elapsed().as_micros() as u64;

    match result {
        Ok(document) => {
            info!(%operation, duration_us, "Report generated");
            Ok(document)
        }
        Err(err) => {
            let err = err.in_operation(operation);
            warn!(%operation, error = %err, duration_us, "Report generation failed");
            Err(err)
        }
    }
}
