use crate::models::{Course, Student, Tutor};
use crate::core::distance::student_tutor_distance;
use std::collections::BTreeSet;

/// Scores strictly below this mark a course as weak
pub const WEAK_SCORE_THRESHOLD: u8 = 60;

/// Courses the student scored below the weak threshold in
pub fn weak_courses(student: &Student) -> BTreeSet<Course> {
    student
        .course_scores
        .iter()
        .filter(|(_, score)| **score < WEAK_SCORE_THRESHOLD)
        .map(|(course, _)| *course)
        .collect()
}

/// Size of the overlap between a student's weak courses and a tutor's expertise
#[inline]
pub fn course_match_count(weak: &BTreeSet<Course>, tutor: &Tutor) -> usize {
    weak.intersection(&tutor.expertise_courses).count()
}

fn join_courses<'a>(courses: impl IntoIterator<Item = &'a Course>) -> String {
    courses
        .into_iter()
        .map(Course::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the compatibility prompt sent to the oracle
///
/// Lists the student's weak courses ("no courses" when there are none), the
/// tutor's expertise and the distance between them rounded to two decimals.
pub fn compatibility_prompt(student: &Student, tutor: &Tutor) -> String {
    let weak = weak_courses(student);
    let weak_text = if weak.is_empty() {
        "no courses".to_string()
    } else {
        join_courses(&weak)
    };
    // Rounded to two places, then printed in shortest form ("5.0", "12.35")
    let distance_km = (student_tutor_distance(student, tutor) * 100.0).round() / 100.0;

    format!(
        "Student is weak in {}. Tutor's expertise: {}. Distance is {:?} km. Rate their match compatibility.",
        weak_text,
        join_courses(&tutor.expertise_courses),
        distance_km
    )
}
