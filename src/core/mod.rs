// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod oracle;
pub mod scoring;
pub mod state;

pub use distance::{haversine_distance, student_tutor_distance};
pub use filters::{is_eligible, eligible_tutors};
pub use matcher::{Matcher, MatchError, compare_rankings};
pub use oracle::{OracleAdapter, OracleError, TextClassifier, LabelScore};
pub use scoring::{weak_courses, course_match_count, compatibility_prompt, WEAK_SCORE_THRESHOLD};
pub use state::commit_match;
