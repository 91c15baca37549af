//! Report composition.
//!
//! This module joins students with their grades, attendance and assignment
//! metadata to produce report documents. Everything here is read-only: records
//! are fetched fresh through the accessors on every call and never mutated.

use std::sync::Arc;

use tracing::debug;

use crate::error::EngineResult;
use crate::models::{
    AttendanceSheet, Class, ClassAttendanceSheets, ClassReportCards, DateRange, EntityId,
    ReportCard, ReportCardStatistics, SchoolOverview, Student,
};
use crate::statistics::{
    attendance_rate, attendance_statistics, average_grade, grade_statistics, grade_with_context,
};
use crate::store::SchoolRecords;

use super::fan_out::ordered_fan_out;

/// Composes report documents from the records exposed by `R`.
///
/// Cloning a composer is cheap; clones share the same accessors.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use report_engine::config::DataLoader;
/// use report_engine::report::ReportComposer;
/// use report_engine::store::InMemoryStore;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), report_engine::error::EngineError> {
/// let data = DataLoader::load("./data/sample")?.into_data();
/// let composer = ReportComposer::new(Arc::new(InMemoryStore::new(data)));
///
/// let card = composer.compose_report_card(1).await?;
/// println!("{}: {}", card.student.full_name(), card.statistics.average_grade);
/// # Ok(())
/// # }
/// ```
pub struct ReportComposer<R> {
    records: Arc<R>,
}

impl<R> Clone for ReportComposer<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R: SchoolRecords> ReportComposer<R> {
    /// Creates a composer reading from the given records.
    pub fn new(records: Arc<R>) -> Self {
        Self { records }
    }

    /// Returns the records this composer reads from.
    pub fn records(&self) -> &Arc<R> {
        &self.records
    }

    /// Composes a student's report card.
    ///
    /// Fails with `StudentNotFound` if the student does not exist. Grades
    /// whose assignment is missing are given placeholder assignment details.
    pub async fn compose_report_card(&self, student_id: EntityId) -> EngineResult<ReportCard> {
        let student = self.records.student_by_id(student_id).await?;

        let (grades, attendance, assignments) = tokio::try_join!(
            self.records.grades_by_student_id(student_id),
            self.records.attendance_by_student_id(student_id),
            self.records.all_assignments(),
        )?;

        let statistics = ReportCardStatistics::combine(
            grade_statistics(&grades),
            attendance_statistics(&attendance),
        );
        let grades: Vec<_> = grades
            .into_iter()
            .map(|grade| grade_with_context(grade, &assignments))
            .collect();

        debug!(
            student_id,
            grades = grades.len(),
            attendance = attendance.len(),
            average_grade = statistics.average_grade,
            attendance_rate = statistics.attendance_rate,
            "Composed report card"
        );

        Ok(ReportCard {
            student,
            grades,
            attendance,
            statistics,
        })
    }

    /// Composes a student's attendance sheet.
    ///
    /// When `range` has both bounds only records inside it (inclusive) are
    /// kept. Records are ordered most recent first; records on the same day
    /// keep their store order. Statistics cover exactly the records returned.
    pub async fn compose_attendance_sheet(
        &self,
        student_id: EntityId,
        range: DateRange,
    ) -> EngineResult<AttendanceSheet> {
        let student = self.records.student_by_id(student_id).await?;
        let mut attendance = self.records.attendance_by_student_id(student_id).await?;

        attendance.retain(|record| range.contains(record.date));
        attendance.sort_by(|a, b| b.date.cmp(&a.date));

        let statistics = attendance_statistics(&attendance);

        debug!(
            student_id,
            records = attendance.len(),
            filtered = range.bounds().is_some(),
            attendance_rate = statistics.attendance_rate,
            "Composed attendance sheet"
        );

        Ok(AttendanceSheet {
            student,
            attendance,
            statistics,
            date_range: range,
        })
    }

    /// Composes report cards for every student enrolled in a class.
    ///
    /// Students are composed concurrently; the batch keeps the order in which
    /// the student accessor returned them. Any per-student failure fails the
    /// whole batch.
    pub async fn compose_class_report_cards(
        &self,
        class_id: EntityId,
    ) -> EngineResult<ClassReportCards> {
        let (class, members) = self.class_members(class_id).await?;

        let composer = self.clone();
        let report_cards = ordered_fan_out(student_ids(&members), move |student_id| {
            let composer = composer.clone();
            async move { composer.compose_report_card(student_id).await }
        })
        .await?;

        debug!(class_id, report_cards = report_cards.len(), "Composed class report cards");

        Ok(ClassReportCards {
            class,
            report_cards,
        })
    }

    /// Composes attendance sheets for every student enrolled in a class,
    /// all bounded by the same date range.
    pub async fn compose_class_attendance_sheets(
        &self,
        class_id: EntityId,
        range: DateRange,
    ) -> EngineResult<ClassAttendanceSheets> {
        let (class, members) = self.class_members(class_id).await?;

        let composer = self.clone();
        let attendance_sheets = ordered_fan_out(student_ids(&members), move |student_id| {
            let composer = composer.clone();
            async move { composer.compose_attendance_sheet(student_id, range).await }
        })
        .await?;

        debug!(
            class_id,
            attendance_sheets = attendance_sheets.len(),
            "Composed class attendance sheets"
        );

        Ok(ClassAttendanceSheets {
            class,
            attendance_sheets,
        })
    }

    /// Computes school-wide headline figures over every record.
    pub async fn compose_school_overview(&self) -> EngineResult<SchoolOverview> {
        let (students, classes, grades, attendance) = tokio::try_join!(
            self.records.all_students(),
            self.records.all_classes(),
            self.records.all_grades(),
            self.records.all_attendance(),
        )?;

        Ok(SchoolOverview {
            total_students: students.len(),
            active_classes: classes.len(),
            average_grade: average_grade(&grades),
            attendance_rate: attendance_rate(&attendance),
        })
    }

    /// Fetches a class and the students whose class list contains it.
    async fn class_members(&self, class_id: EntityId) -> EngineResult<(Class, Vec<Student>)> {
        let class = self.records.class_by_id(class_id).await?;
        let members = self
            .records
            .all_students()
            .await?
            .into_iter()
            .filter(|student| student.is_enrolled_in(class_id))
            .collect();
        Ok((class, members))
    }
}

fn student_ids(students: &[Student]) -> Vec<EntityId> {
    students.iter().map(|s| s.id).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use crate::config::{DataLoader, SeedData};
    use crate::error::EngineError;
    use crate::models::{
        Assignment, AttendanceRecord, AttendanceStatus, Grade, LetterGrade, StudentStatus,
    };
    use crate::store::{
        AssignmentAccessor, AttendanceAccessor, ClassAccessor, GradeAccessor, InMemoryStore,
        StudentAccessor,
    };

    fn sample_data() -> SeedData {
        DataLoader::load("./data/sample")
            .expect("Failed to load data")
            .into_data()
    }

    fn sample_composer() -> ReportComposer<InMemoryStore> {
        ReportComposer::new(Arc::new(InMemoryStore::new(sample_data())))
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn march_4_to_6() -> DateRange {
        DateRange::new(Some(date(2024, 3, 4)), Some(date(2024, 3, 6)))
    }

    /// Wraps the in-memory store, delaying per-student lookups so that
    /// students with lower ids finish last, and optionally failing one
    /// student's attendance lookup.
    struct ScriptedStore {
        inner: InMemoryStore,
        fail_attendance_for: Option<EntityId>,
    }

    impl ScriptedStore {
        fn new(fail_attendance_for: Option<EntityId>) -> Self {
            Self {
                inner: InMemoryStore::new(sample_data()),
                fail_attendance_for,
            }
        }

        async fn delay(student_id: EntityId) {
            let millis = 60u64.saturating_sub(student_id as u64 * 10);
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }
    }

    #[async_trait]
    impl StudentAccessor for ScriptedStore {
        async fn all_students(&self) -> EngineResult<Vec<Student>> {
            self.inner.all_students().await
        }
        async fn student_by_id(&self, id: EntityId) -> EngineResult<Student> {
            self.inner.student_by_id(id).await
        }
    }

    #[async_trait]
    impl GradeAccessor for ScriptedStore {
        async fn all_grades(&self) -> EngineResult<Vec<Grade>> {
            self.inner.all_grades().await
        }
        async fn grade_by_id(&self, id: EntityId) -> EngineResult<Grade> {
            self.inner.grade_by_id(id).await
        }
        async fn grades_by_student_id(&self, student_id: EntityId) -> EngineResult<Vec<Grade>> {
            Self::delay(student_id).await;
            self.inner.grades_by_student_id(student_id).await
        }
        async fn grades_by_assignment_id(
            &self,
            assignment_id: EntityId,
        ) -> EngineResult<Vec<Grade>> {
            self.inner.grades_by_assignment_id(assignment_id).await
        }
    }

    #[async_trait]
    impl AssignmentAccessor for ScriptedStore {
        async fn all_assignments(&self) -> EngineResult<Vec<Assignment>> {
            self.inner.all_assignments().await
        }
        async fn assignment_by_id(&self, id: EntityId) -> EngineResult<Assignment> {
            self.inner.assignment_by_id(id).await
        }
        async fn assignments_by_class_id(
            &self,
            class_id: EntityId,
        ) -> EngineResult<Vec<Assignment>> {
            self.inner.assignments_by_class_id(class_id).await
        }
    }

    #[async_trait]
    impl AttendanceAccessor for ScriptedStore {
        async fn all_attendance(&self) -> EngineResult<Vec<AttendanceRecord>> {
            self.inner.all_attendance().await
        }
        async fn attendance_by_id(&self, id: EntityId) -> EngineResult<AttendanceRecord> {
            self.inner.attendance_by_id(id).await
        }
        async fn attendance_by_student_id(
            &self,
            student_id: EntityId,
        ) -> EngineResult<Vec<AttendanceRecord>> {
            Self::delay(student_id).await;
            if self.fail_attendance_for == Some(student_id) {
                return Err(EngineError::StoreUnavailable {
                    message: "attendance service timed out".to_string(),
                });
            }
            self.inner.attendance_by_student_id(student_id).await
        }
    }

    #[async_trait]
    impl ClassAccessor for ScriptedStore {
        async fn all_classes(&self) -> EngineResult<Vec<Class>> {
            self.inner.all_classes().await
        }
        async fn class_by_id(&self, id: EntityId) -> EngineResult<Class> {
            self.inner.class_by_id(id).await
        }
    }

    #[tokio::test]
    async fn test_report_card_for_emma() {
        let composer = sample_composer();
        let card = composer.compose_report_card(1).await.unwrap();

        assert_eq!(card.student.first_name, "Emma");
        assert_eq!(card.grades.len(), 1);
        assert_eq!(card.grades[0].assignment_title, "Lab Report");
        assert_eq!(card.grades[0].letter_grade, LetterGrade::AMinus);
        assert_eq!(card.attendance.len(), 3);
        assert_eq!(card.statistics.average_grade, 90);
        assert_eq!(card.statistics.attendance_rate, 100);
        assert_eq!(card.statistics.total_grades, 1);
        assert_eq!(card.statistics.present_count, 3);
        assert_eq!(card.statistics.total_attendance, 3);
    }

    #[tokio::test]
    async fn test_report_card_uses_placeholder_for_missing_assignment() {
        let composer = sample_composer();
        let card = composer.compose_report_card(2).await.unwrap();

        let orphan = card
            .grades
            .iter()
            .find(|g| g.grade.assignment_id == 99)
            .expect("grade for assignment 99");
        assert_eq!(orphan.assignment_title, "Unknown Assignment");
        assert_eq!(orphan.category, "Assignment");
        assert_eq!(orphan.total_points, Decimal::from(100));
        assert_eq!(orphan.percentage, 88);

        // Raw score mean: (17 + 41 + 88) / 3 = 48.67
        assert_eq!(card.statistics.average_grade, 49);
        // 2 present of 5 records
        assert_eq!(card.statistics.attendance_rate, 40);
    }

    #[tokio::test]
    async fn test_report_card_percentages_use_assignment_points() {
        let composer = sample_composer();
        let card = composer.compose_report_card(2).await.unwrap();

        let quiz = &card.grades[0];
        assert_eq!(quiz.assignment_title, "Quadratics Quiz");
        assert_eq!(quiz.total_points, Decimal::from(20));
        assert_eq!(quiz.percentage, 85);
        assert_eq!(quiz.letter_grade, LetterGrade::B);
    }

    #[tokio::test]
    async fn test_report_card_with_no_records() {
        let composer = sample_composer();
        let card = composer.compose_report_card(5).await.unwrap();

        assert_eq!(card.student.status, StudentStatus::Graduated);
        assert!(card.grades.is_empty());
        assert!(card.attendance.is_empty());
        assert_eq!(card.statistics, ReportCardStatistics::default());
    }

    #[tokio::test]
    async fn test_report_card_missing_student_is_not_found() {
        let composer = sample_composer();
        let result = composer.compose_report_card(9999).await;

        match result {
            Err(EngineError::StudentNotFound { id }) => assert_eq!(id, 9999),
            other => panic!("Expected StudentNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_report_card_is_idempotent() {
        let composer = sample_composer();
        let first = composer.compose_report_card(3).await.unwrap();
        let second = composer.compose_report_card(3).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_report_card_reflects_store_changes() {
        let store = Arc::new(InMemoryStore::new(sample_data()));
        let composer = ReportComposer::new(store.clone());

        store
            .mark_attendance(1, date(2024, 3, 7), AttendanceStatus::Absent, None)
            .await
            .unwrap();

        let card = composer.compose_report_card(1).await.unwrap();
        assert_eq!(card.statistics.total_attendance, 4);
        assert_eq!(card.statistics.attendance_rate, 75);
    }

    #[tokio::test]
    async fn test_attendance_sheet_without_range_sorts_descending() {
        let composer = sample_composer();
        let sheet = composer
            .compose_attendance_sheet(2, DateRange::unbounded())
            .await
            .unwrap();

        let ids: Vec<_> = sheet.attendance.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 6, 5, 4, 8]);
        assert_eq!(sheet.statistics.total_days, 5);
        assert_eq!(sheet.date_range, DateRange::unbounded());
    }

    #[tokio::test]
    async fn test_attendance_sheet_range_is_inclusive() {
        let composer = sample_composer();
        let sheet = composer
            .compose_attendance_sheet(2, march_4_to_6())
            .await
            .unwrap();

        let ids: Vec<_> = sheet.attendance.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![6, 5, 4]);
    }

    #[tokio::test]
    async fn test_attendance_sheet_statistics_match_filtered_records() {
        let composer = sample_composer();
        let sheet = composer
            .compose_attendance_sheet(2, march_4_to_6())
            .await
            .unwrap();

        assert_eq!(sheet.statistics.total_days, 3);
        assert_eq!(sheet.statistics.present_count, 1);
        assert_eq!(sheet.statistics.absent_count, 1);
        assert_eq!(sheet.statistics.late_count, 1);
        assert_eq!(sheet.statistics.excused_count, 0);
        assert_eq!(sheet.statistics.attendance_rate, 33);
        assert_eq!(sheet.date_range, march_4_to_6());
    }

    #[tokio::test]
    async fn test_attendance_sheet_half_open_range_does_not_filter() {
        let composer = sample_composer();
        let range = DateRange::new(Some(date(2024, 3, 6)), None);
        let sheet = composer.compose_attendance_sheet(2, range).await.unwrap();

        assert_eq!(sheet.attendance.len(), 5);
        assert_eq!(sheet.date_range, range);
    }

    #[tokio::test]
    async fn test_attendance_sheet_same_day_keeps_store_order() {
        let store = Arc::new(InMemoryStore::new(sample_data()));
        store
            .create_attendance(AttendanceRecord {
                id: 0,
                student_id: 1,
                date: date(2024, 3, 5),
                status: AttendanceStatus::Late,
                notes: Some("Afternoon session".to_string()),
            })
            .await
            .unwrap();
        let composer = ReportComposer::new(store);

        let sheet = composer
            .compose_attendance_sheet(1, DateRange::unbounded())
            .await
            .unwrap();
        let ids: Vec<_> = sheet.attendance.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 15, 1]);
    }

    #[tokio::test]
    async fn test_attendance_sheet_missing_student_is_not_found() {
        let composer = sample_composer();
        let result = composer
            .compose_attendance_sheet(9999, DateRange::unbounded())
            .await;
        assert!(matches!(result, Err(EngineError::StudentNotFound { id: 9999 })));
    }

    #[tokio::test]
    async fn test_class_report_cards_follow_roster_order() {
        let composer = sample_composer();
        let batch = composer.compose_class_report_cards(1).await.unwrap();

        assert_eq!(batch.class.name, "Algebra II");
        let ids: Vec<_> = batch.report_cards.iter().map(|c| c.student.id).collect();
        assert_eq!(ids, vec![1, 2, 4]);
    }

    #[tokio::test]
    async fn test_class_batch_order_independent_of_completion_order() {
        let composer = ReportComposer::new(Arc::new(ScriptedStore::new(None)));
        let batch = composer.compose_class_report_cards(3).await.unwrap();

        let ids: Vec<_> = batch.report_cards.iter().map(|c| c.student.id).collect();
        assert_eq!(ids, vec![2, 3, 6]);
    }

    #[tokio::test]
    async fn test_class_batch_entries_match_single_reports() {
        let composer = sample_composer();
        let batch = composer.compose_class_report_cards(2).await.unwrap();

        for card in &batch.report_cards {
            let single = composer.compose_report_card(card.student.id).await.unwrap();
            assert_eq!(card, &single);
        }
    }

    #[tokio::test]
    async fn test_empty_class_gives_empty_batch() {
        let composer = sample_composer();
        let batch = composer.compose_class_report_cards(4).await.unwrap();

        assert_eq!(batch.class.name, "Studio Art");
        assert!(batch.report_cards.is_empty());

        let sheets = composer
            .compose_class_attendance_sheets(4, DateRange::unbounded())
            .await
            .unwrap();
        assert!(sheets.attendance_sheets.is_empty());
    }

    #[tokio::test]
    async fn test_missing_class_is_not_found() {
        let composer = sample_composer();
        assert!(matches!(
            composer.compose_class_report_cards(77).await,
            Err(EngineError::ClassNotFound { id: 77 })
        ));
        assert!(matches!(
            composer
                .compose_class_attendance_sheets(77, DateRange::unbounded())
                .await,
            Err(EngineError::ClassNotFound { id: 77 })
        ));
    }

    #[tokio::test]
    async fn test_class_attendance_sheets_apply_range_to_every_student() {
        let composer = sample_composer();
        let batch = composer
            .compose_class_attendance_sheets(3, march_4_to_6())
            .await
            .unwrap();

        let ids: Vec<_> = batch
            .attendance_sheets
            .iter()
            .map(|s| s.student.id)
            .collect();
        assert_eq!(ids, vec![2, 3, 6]);

        for sheet in &batch.attendance_sheets {
            assert_eq!(sheet.date_range, march_4_to_6());
            assert!(sheet.attendance.iter().all(|r| march_4_to_6().contains(r.date)));
            assert_eq!(sheet.statistics.total_days, sheet.attendance.len());
        }
        // Ethan's only record is outside the range.
        assert!(batch.attendance_sheets[2].attendance.is_empty());
        assert_eq!(batch.attendance_sheets[2].statistics.attendance_rate, 0);
    }

    #[tokio::test]
    async fn test_batch_fails_when_one_student_fails() {
        let composer = ReportComposer::new(Arc::new(ScriptedStore::new(Some(3))));
        let result = composer.compose_class_report_cards(3).await;

        match result {
            Err(EngineError::StoreUnavailable { message }) => {
                assert!(message.contains("timed out"));
            }
            other => panic!("Expected StoreUnavailable, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_batch_unaffected_by_failure_outside_class() {
        let composer = ReportComposer::new(Arc::new(ScriptedStore::new(Some(6))));
        let batch = composer.compose_class_report_cards(1).await.unwrap();
        assert_eq!(batch.report_cards.len(), 3);
    }

    #[tokio::test]
    async fn test_school_overview() {
        let composer = sample_composer();
        let overview = composer.compose_school_overview().await.unwrap();

        assert_eq!(overview.total_students, 6);
        assert_eq!(overview.active_classes, 4);
        // 499.5 / 8 = 62.44
        assert_eq!(overview.average_grade, 62);
        // 8 present of 14 records
        assert_eq!(overview.attendance_rate, 57);
    }

    #[tokio::test]
    async fn test_school_overview_of_empty_store() {
        let composer = ReportComposer::new(Arc::new(InMemoryStore::default()));
        let overview = composer.compose_school_overview().await.unwrap();
        assert_eq!(overview, SchoolOverview::default());
    }
}
