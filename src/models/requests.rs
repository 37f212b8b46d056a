use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use validator::{Validate, ValidationError};

use crate::models::domain::Course;

/// Request to register a student
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterStudentRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(range(max = 100))]
    #[serde(alias = "overall_score", rename = "overallScore", default)]
    pub overall_score: u8,
    #[serde(alias = "career_interests", rename = "careerInterests", default)]
    pub career_interests: String,
    #[validate(custom(function = "validate_course_scores"))]
    #[serde(alias = "course_scores", rename = "courseScores", default)]
    pub course_scores: BTreeMap<Course, u8>,
    #[serde(default)]
    pub address: String,
}

/// Request to register a tutor
///
/// `resume_text` is the already-extracted text of the tutor's resume.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterTutorRequest {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    pub experience: String,
    #[validate(length(min = 1))]
    pub credentials: String,
    #[serde(alias = "expertise_courses", rename = "expertiseCourses", default)]
    pub expertise_courses: BTreeSet<Course>,
    #[serde(default)]
    pub address: String,
    #[serde(alias = "contact_info", rename = "contactInfo", default)]
    pub contact_info: String,
    #[serde(alias = "resume_text", rename = "resumeText", default)]
    pub resume_text: String,
}

/// Request to match a student with a tutor
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MatchRequest {
    #[validate(range(min = 1))]
    #[serde(alias = "student_id", rename = "studentId")]
    pub student_id: u64,
    /// Restricts the candidate pool; every registered tutor when absent
    #[serde(alias = "candidate_tutor_ids", rename = "candidateTutorIds", default)]
    pub candidate_tutor_ids: Option<Vec<u64>>,
}

fn validate_course_scores(scores: &BTreeMap<Course, u8>) -> Result<(), ValidationError> {
    if scores.values().any(|score| *score > 100) {
        let mut err = ValidationError::new("course_score_range");
        err.message = Some("course scores must be between 0 and 100".into());
        return Err(err);
    }
    Ok(())
}
