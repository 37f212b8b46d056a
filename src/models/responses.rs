use serde::{Deserialize, Serialize};
use crate::models::domain::{Student, StudentRef, Tutor, TutorAssignment};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Student dashboard: the profile plus its current tutor assignment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudentDashboard {
    pub student: Student,
    pub assignment: TutorAssignment,
}

/// Tutor dashboard: the profile plus the students it has been matched with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorDashboard {
    pub tutor: Tutor,
    pub status: String,
    #[serde(rename = "matchedStudents")]
    pub matched_students: Vec<StudentRef>,
}

/// Returned when a match request finds no certified tutor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnmatchedResponse {
    pub status: String,
    #[serde(rename = "studentId")]
    pub student_id: u64,
    pub message: String,
}

/// One line of the current-matches listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSummary {
    #[serde(rename = "studentId")]
    pub student_id: u64,
    #[serde(rename = "studentName")]
    pub student_name: String,
    pub assignment: TutorAssignment,
}

/// Current matches response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentMatchesResponse {
    pub matches: Vec<MatchSummary>,
    pub total: usize,
}
