use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Courses a student can be scored in and a tutor can teach.
///
/// Declaration order is the canonical order used whenever course lists are
/// rendered (prompts, dashboards).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Course {
    Mathematics,
    Science,
    History,
    English,
    Programming,
    Art,
    Music,
}

impl Course {
    pub const ALL: [Course; 7] = [
        Course::Mathematics,
        Course::Science,
        Course::History,
        Course::English,
        Course::Programming,
        Course::Art,
        Course::Music,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Course::Mathematics => "Mathematics",
            Course::Science => "Science",
            Course::History => "History",
            Course::English => "English",
            Course::Programming => "Programming",
            Course::Art => "Art",
            Course::Music => "Music",
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Registered student
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: u64,
    pub name: String,
    #[serde(rename = "overallScore")]
    pub overall_score: u8,
    #[serde(rename = "careerInterests")]
    pub career_interests: String,
    #[serde(rename = "courseScores", default)]
    pub course_scores: BTreeMap<Course, u8>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "matchedTutor", default)]
    pub matched_tutor: Option<u64>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Registered tutor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tutor {
    pub id: u64,
    pub name: String,
    pub experience: String,
    pub credentials: String,
    #[serde(rename = "isCertified")]
    pub is_certified: bool,
    #[serde(rename = "expertiseCourses", default)]
    pub expertise_courses: BTreeSet<Course>,
    pub address: String,
    #[serde(rename = "contactInfo")]
    pub contact_info: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "tutorHours")]
    pub tutor_hours: u32,
    #[serde(rename = "matchedStudents", default)]
    pub matched_students: Vec<u64>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl Tutor {
    /// Human-readable certification status shown on dashboards
    pub fn status_label(&self) -> &'static str {
        if self.is_certified {
            "CERTIFIED"
        } else {
            "NOT CERTIFIED"
        }
    }
}

/// Oracle compatibility tier and its ranking weight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompatibilityTier {
    Excellent,
    Good,
    Poor,
}

impl CompatibilityTier {
    pub fn weight(&self) -> f64 {
        match self {
            CompatibilityTier::Excellent => 3.0,
            CompatibilityTier::Good => 2.0,
            CompatibilityTier::Poor => 1.0,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompatibilityTier::Excellent => "excellent",
            CompatibilityTier::Good => "good",
            CompatibilityTier::Poor => "poor",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "excellent" => Some(CompatibilityTier::Excellent),
            "good" => Some(CompatibilityTier::Good),
            "poor" => Some(CompatibilityTier::Poor),
            _ => None,
        }
    }
}

/// Compatibility verdict produced by the oracle for one student/tutor pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompatibilityScore {
    /// Tier weight multiplied by the top label's confidence, in (0, 3]
    pub score: f64,
    pub tier: CompatibilityTier,
    pub confidence: f64,
    pub prompt: String,
}

/// One ranked candidate from a matching pass
#[derive(Debug, Clone)]
pub struct RankedTutor<'a> {
    pub tutor: &'a Tutor,
    pub ai_score: f64,
    pub course_match_count: usize,
    pub distance_km: f64,
    pub prompt: String,
}

/// Contact details of a matched tutor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TutorContact {
    #[serde(rename = "tutorId")]
    pub tutor_id: u64,
    pub name: String,
    #[serde(rename = "contactInfo")]
    pub contact_info: String,
}

/// Where a student stands with respect to tutoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TutorAssignment {
    Unmatched,
    Matched {
        tutor: TutorContact,
    },
    /// The student points at a tutor id the registry no longer resolves
    TutorNotFound {
        #[serde(rename = "tutorId")]
        tutor_id: u64,
    },
}

/// Result of a committed match
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchOutcome {
    #[serde(rename = "matchId")]
    pub match_id: uuid::Uuid,
    #[serde(rename = "studentId")]
    pub student_id: u64,
    pub tutor: TutorContact,
    #[serde(rename = "aiScore")]
    pub ai_score: f64,
    #[serde(rename = "courseMatchCount")]
    pub course_match_count: usize,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
    pub prompt: String,
    #[serde(rename = "candidatesRanked")]
    pub candidates_ranked: usize,
    #[serde(rename = "tutorHours")]
    pub tutor_hours: u32,
    #[serde(rename = "matchedAt")]
    pub matched_at: chrono::DateTime<chrono::Utc>,
}

/// Student reference listed on a tutor dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentRef {
    pub id: u64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_course_names_deserialize() {
        for course in Course::ALL {
            let json = format!("\"{}\"", course.as_str());
            assert_eq!(serde_json::from_str::<Course>(&json).unwrap(), course);
        }
        assert!(serde_json::from_str::<Course>("\"Chemistry\"").is_err());
    }

    #[test]
    fn test_course_serializes_by_name() {
        let json = serde_json::to_string(&Course::Programming).unwrap();
        assert_eq!(json, "\"Programming\"");
    }

    #[test]
    fn test_tier_weights() {
        assert_eq!(CompatibilityTier::Excellent.weight(), 3.0);
        assert_eq!(CompatibilityTier::Good.weight(), 2.0);
        assert_eq!(CompatibilityTier::Poor.weight(), 1.0);
        assert_eq!(CompatibilityTier::from_label("good"), Some(CompatibilityTier::Good));
        assert_eq!(CompatibilityTier::from_label("great"), None);
        for tier in [CompatibilityTier::Excellent, CompatibilityTier::Good, CompatibilityTier::Poor] {
            assert_eq!(CompatibilityTier::from_label(tier.label()), Some(tier));
        }
    }

    #[test]
    fn test_assignment_serialization() {
        let json = serde_json::to_value(TutorAssignment::TutorNotFound { tutor_id: 7 }).unwrap();
        assert_eq!(json["status"], "tutor_not_found");
        assert_eq!(json["tutorId"], 7);

        let json = serde_json::to_value(TutorAssignment::Unmatched).unwrap();
        assert_eq!(json["status"], "unmatched");
    }
}
