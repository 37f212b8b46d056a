use crate::models::{Student, Tutor};

/// Apply a match decision to both records
///
/// Points the student at the tutor (replacing any previous tutor), appends the
/// student to the tutor's history and bumps the tutor's hours. Not idempotent:
/// committing the same pair twice records two matches. The previous tutor, if
/// any, keeps its history entry.
pub fn commit_match(student: &mut Student, tutor: &mut Tutor) {
    student.matched_tutor = Some(tutor.id);
    tutor.matched_students.push(student.id);
    tutor.tutor_hours += 1;
}
