// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Course, Student, Tutor, CompatibilityTier, CompatibilityScore, RankedTutor, TutorContact, TutorAssignment, MatchOutcome, StudentRef};
pub use requests::{RegisterStudentRequest, RegisterTutorRequest, MatchRequest};
pub use responses::{HealthResponse, ErrorResponse, StudentDashboard, TutorDashboard, UnmatchedResponse, MatchSummary, CurrentMatchesResponse};
