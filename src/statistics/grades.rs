//! Grade statistics.
//!
//! This module provides the average-grade calculation and the helpers used to
//! attach assignment context to individual grades.

use rust_decimal::Decimal;

use crate::models::{Assignment, Grade, GradeStatistics, GradeWithContext, LetterGrade};

use super::rounding::{percentage, round_whole, saturated};

/// Title used when a grade references an assignment that does not exist.
pub const UNKNOWN_ASSIGNMENT_TITLE: &str = "Unknown Assignment";

/// Category used when a grade references an assignment that does not exist.
pub const UNKNOWN_ASSIGNMENT_CATEGORY: &str = "Assignment";

/// Total points assumed when a grade references an assignment that does not exist.
pub const UNKNOWN_ASSIGNMENT_TOTAL_POINTS: i64 = 100;

/// Calculates the mean score of a set of grades, rounded to a whole number.
///
/// Returns 0 for an empty slice. The mean is of raw scores, not of
/// percentages. When the scores sum past the `Decimal` range the mean is
/// taken over pre-divided scores instead, saturating if that also overflows.
///
/// # Examples
///
/// ```
/// use report_engine::statistics::average_grade;
/// use report_engine::models::Grade;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let grade = |score: i64| Grade {
///     id: 1,
///     student_id: 1,
///     assignment_id: 1,
///     score: Decimal::from(score),
///     submitted_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
/// };
///
/// assert_eq!(average_grade(&[]), 0);
/// assert_eq!(average_grade(&[grade(90)]), 90);
/// assert_eq!(average_grade(&[grade(88), grade(89)]), 89);
/// ```
pub fn average_grade(grades: &[Grade]) -> i64 {
    if grades.is_empty() {
        return 0;
    }
    let count = Decimal::from(grades.len());

    if let Some(total) = checked_total(grades.iter().map(|g| g.score)) {
        return round_whole(total / count);
    }
    match checked_total(grades.iter().map(|g| g.score / count)) {
        Some(mean) => round_whole(mean),
        None => saturated(grades[0].score.is_sign_negative()),
    }
}

fn checked_total(mut values: impl Iterator<Item = Decimal>) -> Option<Decimal> {
    values.try_fold(Decimal::ZERO, |acc, v| acc.checked_add(v))
}

/// Builds the grade statistics block for a set of grades.
pub fn grade_statistics(grades: &[Grade]) -> GradeStatistics {
    GradeStatistics {
        total_grades: grades.len(),
        average_grade: average_grade(grades),
    }
}

/// Attaches assignment metadata to a grade.
///
/// The assignment is found by a linear scan of `assignments`; when none
/// matches, placeholder values are used instead of failing.
pub fn grade_with_context(grade: Grade, assignments: &[Assignment]) -> GradeWithContext {
    let (assignment_title, category, total_points) =
        match assignments.iter().find(|a| a.id == grade.assignment_id) {
            Some(assignment) => (
                assignment.title.clone(),
                assignment.category.clone(),
                assignment.total_points,
            ),
            None => (
                UNKNOWN_ASSIGNMENT_TITLE.to_string(),
                UNKNOWN_ASSIGNMENT_CATEGORY.to_string(),
                Decimal::from(UNKNOWN_ASSIGNMENT_TOTAL_POINTS),
            ),
        };

    let grade_percentage = percentage(grade.score, total_points);

    GradeWithContext {
        grade,
        assignment_title,
        category,
        total_points,
        percentage: grade_percentage,
        letter_grade: LetterGrade::from_percentage(grade_percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn grade(id: u32, assignment_id: u32, score: &str) -> Grade {
        Grade {
            id,
            student_id: 1,
            assignment_id,
            score: dec(score),
            submitted_date: NaiveDate::from_ymd_opt(2024, 2, 9).unwrap(),
        }
    }

    fn assignment(id: u32, title: &str, total_points: &str) -> Assignment {
        Assignment {
            id,
            title: title.to_string(),
            category: "Lab".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(),
            total_points: dec(total_points),
            class_id: 1,
        }
    }

    #[test]
    fn test_average_of_empty_is_zero() {
        assert_eq!(average_grade(&[]), 0);
    }

    #[test]
    fn test_average_of_single_grade() {
        assert_eq!(average_grade(&[grade(1, 1, "90")]), 90);
    }

    #[test]
    fn test_average_rounds_half_up() {
        // (88 + 89) / 2 = 88.5
        assert_eq!(average_grade(&[grade(1, 1, "88"), grade(2, 1, "89")]), 89);
    }

    #[test]
    fn test_average_rounds_down_below_half() {
        // (90 + 90 + 91) / 3 = 90.33
        assert_eq!(
            average_grade(&[grade(1, 1, "90"), grade(2, 1, "90"), grade(3, 1, "91")]),
            90
        );
    }

    #[test]
    fn test_average_with_fractional_scores() {
        assert_eq!(average_grade(&[grade(1, 1, "89.5")]), 90);
        assert_eq!(average_grade(&[grade(1, 1, "89.4")]), 89);
    }

    #[test]
    fn test_average_of_scores_beyond_decimal_sum_saturates() {
        let huge = Decimal::MAX.to_string();
        assert_eq!(
            average_grade(&[grade(1, 1, &huge), grade(2, 1, &huge)]),
            i64::MAX
        );
    }

    #[test]
    fn test_average_survives_overflowing_partial_sum() {
        // MAX + MAX overflows, but the mean of the three scores does not.
        let huge = Decimal::MAX.to_string();
        let negative = Decimal::MIN.to_string();
        let mean = average_grade(&[
            grade(1, 1, &huge),
            grade(2, 1, &huge),
            grade(3, 1, &negative),
        ]);
        assert_eq!(mean, i64::MAX);

        let mean = average_grade(&[grade(1, 1, &negative), grade(2, 1, &negative)]);
        assert_eq!(mean, i64::MIN);
    }

    #[test]
    fn test_grade_statistics_counts_grades() {
        let stats = grade_statistics(&[grade(1, 1, "80"), grade(2, 1, "100")]);
        assert_eq!(stats.total_grades, 2);
        assert_eq!(stats.average_grade, 90);
    }

    #[test]
    fn test_grade_statistics_empty() {
        assert_eq!(grade_statistics(&[]), GradeStatistics::default());
    }

    #[test]
    fn test_context_from_matching_assignment() {
        let assignments = vec![assignment(1, "Lab Report", "100"), assignment(2, "Quiz", "20")];
        let enriched = grade_with_context(grade(1, 2, "18"), &assignments);

        assert_eq!(enriched.assignment_title, "Quiz");
        assert_eq!(enriched.category, "Lab");
        assert_eq!(enriched.total_points, dec("20"));
        assert_eq!(enriched.percentage, 90);
        assert_eq!(enriched.letter_grade, LetterGrade::AMinus);
        assert_eq!(enriched.grade.score, dec("18"));
    }

    #[test]
    fn test_missing_assignment_uses_placeholder() {
        let assignments = vec![assignment(1, "Lab Report", "100")];
        let enriched = grade_with_context(grade(1, 42, "75"), &assignments);

        assert_eq!(enriched.assignment_title, "Unknown Assignment");
        assert_eq!(enriched.category, "Assignment");
        assert_eq!(enriched.total_points, dec("100"));
        assert_eq!(enriched.percentage, 75);
        assert_eq!(enriched.letter_grade, LetterGrade::C);
    }

    #[test]
    fn test_huge_score_does_not_overflow_percentage() {
        let score = (Decimal::MAX / dec("10")).to_string();
        let enriched = grade_with_context(grade(1, 42, &score), &[]);

        assert_eq!(enriched.percentage, i64::MAX);
        assert_eq!(enriched.letter_grade, LetterGrade::APlus);
    }

    #[test]
    fn test_zero_point_assignment_has_zero_percentage() {
        let assignments = vec![assignment(1, "Participation", "0")];
        let enriched = grade_with_context(grade(1, 1, "5"), &assignments);
        assert_eq!(enriched.percentage, 0);
        assert_eq!(enriched.letter_grade, LetterGrade::F);
    }
}
