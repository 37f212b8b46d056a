// Shared fixtures for the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tutor_match::core::{LabelScore, OracleError, TextClassifier};
use tutor_match::models::{Course, Student, Tutor};

/// Kilometers per degree of latitude on a 6371 km sphere
pub const KM_PER_DEGREE: f64 = 6371.0 * std::f64::consts::PI / 180.0;

/// Deterministic classifier driven by prompt substrings
///
/// The first rule whose needle occurs in the prompt decides the answer;
/// otherwise the first candidate label wins with the default confidence.
pub struct ScriptedClassifier {
    rules: Vec<(String, String, f64)>,
    default_confidence: f64,
    calls: AtomicUsize,
}

impl ScriptedClassifier {
    pub fn new() -> Self {
        Self {
            rules: Vec::new(),
            default_confidence: 1.0,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn rule(mut self, needle: &str, label: &str, confidence: f64) -> Self {
        self.rules.push((needle.to_string(), label.to_string(), confidence));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextClassifier for ScriptedClassifier {
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<LabelScore>, OracleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let (top, confidence) = self
            .rules
            .iter()
            .find(|(needle, label, _)| text.contains(needle.as_str()) && labels.contains(&label.as_str()))
            .map(|(_, label, confidence)| (label.clone(), *confidence))
            .unwrap_or_else(|| (labels[0].to_string(), self.default_confidence));

        let rest = labels.iter().filter(|l| **l != top).count().max(1) as f64;
        let mut ranked = vec![LabelScore::new(top.clone(), confidence)];
        ranked.extend(
            labels
                .iter()
                .filter(|l| **l != top)
                .map(|l| LabelScore::new(*l, (1.0 - confidence) / rest)),
        );
        Ok(ranked)
    }
}

/// Fails every call after the first `succeed_for` calls
pub struct FailingClassifier {
    succeed_for: usize,
    calls: AtomicUsize,
}

impl FailingClassifier {
    pub fn after(succeed_for: usize) -> Self {
        Self {
            succeed_for,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextClassifier for FailingClassifier {
    async fn classify(&self, _text: &str, labels: &[&str]) -> Result<Vec<LabelScore>, OracleError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.succeed_for {
            Ok(vec![LabelScore::new(labels[0], 0.9)])
        } else {
            Err(OracleError::Unavailable("connection refused".to_string()))
        }
    }
}

pub fn scripted(classifier: ScriptedClassifier) -> Arc<ScriptedClassifier> {
    Arc::new(classifier)
}

pub fn create_student(id: u64, scores: &[(Course, u8)], lat: f64, lon: f64) -> Student {
    Student {
        id,
        name: format!("Student {}", id),
        overall_score: 70,
        career_interests: "engineering".to_string(),
        course_scores: scores.iter().copied().collect::<BTreeMap<_, _>>(),
        address: String::new(),
        latitude: lat,
        longitude: lon,
        matched_tutor: None,
        created_at: Utc::now(),
    }
}

pub fn create_tutor(id: u64, certified: bool, expertise: &[Course], lat: f64, lon: f64) -> Tutor {
    Tutor {
        id,
        name: format!("Tutor {}", id),
        experience: "5 years".to_string(),
        credentials: "Certified Professional Tutor".to_string(),
        is_certified: certified,
        expertise_courses: expertise.iter().copied().collect::<BTreeSet<_>>(),
        address: String::new(),
        contact_info: format!("tutor{}@example.com", id),
        latitude: lat,
        longitude: lon,
        tutor_hours: 0,
        matched_students: vec![],
        created_at: Utc::now(),
    }
}
