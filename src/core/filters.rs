use crate::models::Tutor;

/// Whether a tutor may win a match
///
/// Only certified tutors are eligible. Certification is decided once at
/// registration and never recomputed here.
#[inline]
pub fn is_eligible(tutor: &Tutor) -> bool {
    tutor.is_certified
}

/// Stage 1 of a matching pass: keep eligible tutors, preserving pool order
pub fn eligible_tutors(pool: &[Tutor]) -> Vec<&Tutor> {
    pool.iter().filter(|tutor| is_eligible(tutor)).collect()
}
