//! Tutor Match - student-to-tutor matching and ranking service
//!
//! This library provides the ranking engine that pairs a student with the best
//! certified tutor in a pool. Candidates are ordered by an oracle-rated
//! compatibility score, then by overlap between the student's weak courses
//! and the tutor's expertise, then by great-circle distance.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{Matcher, MatchError, OracleAdapter, OracleError, TextClassifier, LabelScore, commit_match, haversine_distance};
pub use models::{Course, Student, Tutor, RankedTutor, MatchOutcome, TutorAssignment, RegisterStudentRequest, RegisterTutorRequest, MatchRequest};
pub use services::{MatchService, Registry, ServiceError};
