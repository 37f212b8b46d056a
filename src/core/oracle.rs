//! Compatibility oracle adapter.
//!
//! Wraps an external zero-shot text classifier behind [`TextClassifier`] and
//! translates domain questions (is this tutor certified, does the resume back
//! the credentials, how compatible is this pair) into classification requests.
//!
//! Oracle failures are never turned into verdicts: a failed certification
//! check is an error, not "non-certified".

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::timeout;

use crate::core::scoring::compatibility_prompt;
use crate::models::{CompatibilityScore, CompatibilityTier, Student, Tutor};

pub const CERTIFICATION_LABELS: [&str; 2] = ["certified", "non-certified"];
pub const RESUME_MATCH_LABELS: [&str; 2] = ["match", "no match"];
pub const COMPATIBILITY_LABELS: [&str; 3] = ["excellent", "good", "poor"];

/// Default upper bound on a single classification call
pub const DEFAULT_ORACLE_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors surfaced when the oracle cannot produce a verdict
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    #[error("Oracle timed out after {0:?}")]
    Timeout(Duration),

    #[error("Malformed oracle response: {0}")]
    MalformedResponse(String),
}

/// One (label, confidence) pair returned by the classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub confidence: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }
}

/// External zero-shot text classifier
///
/// Implementations return one entry per candidate label, sorted by descending
/// confidence, and fail with [`OracleError`] on transport or model errors.
#[async_trait]
pub trait TextClassifier: Send + Sync {
    async fn classify(&self, text: &str, labels: &[&str]) -> Result<Vec<LabelScore>, OracleError>;
}

/// Domain-level wrapper around a [`TextClassifier`]
#[derive(Clone)]
pub struct OracleAdapter {
    classifier: Arc<dyn TextClassifier>,
    timeout: Duration,
}

impl OracleAdapter {
    pub fn new(classifier: Arc<dyn TextClassifier>, timeout: Duration) -> Self {
        Self { classifier, timeout }
    }

    pub fn with_default_timeout(classifier: Arc<dyn TextClassifier>) -> Self {
        Self::new(classifier, DEFAULT_ORACLE_TIMEOUT)
    }

    /// Classify `text` and return the top-ranked label
    async fn top_label(&self, text: &str, labels: &[&str]) -> Result<LabelScore, OracleError> {
        let ranked = match timeout(self.timeout, self.classifier.classify(text, labels)).await {
            Ok(result) => result?,
            Err(_) => {
                tracing::warn!("Oracle call exceeded {:?}", self.timeout);
                return Err(OracleError::Timeout(self.timeout));
            }
        };

        let top = ranked
            .into_iter()
            .next()
            .ok_or_else(|| OracleError::MalformedResponse("empty classification".into()))?;

        if !labels.contains(&top.label.as_str()) {
            return Err(OracleError::MalformedResponse(format!(
                "label '{}' is not one of {:?}",
                top.label, labels
            )));
        }

        tracing::debug!("Oracle verdict: {} ({:.3})", top.label, top.confidence);
        Ok(top)
    }

    /// True iff the credentials classify as "certified"
    pub async fn check_certification(&self, credentials: &str) -> Result<bool, OracleError> {
        let top = self.top_label(credentials, &CERTIFICATION_LABELS).await?;
        Ok(top.label == CERTIFICATION_LABELS[0])
    }

    /// True iff the resume classifies as evidence for the stated certification
    pub async fn verify_resume_match(
        &self,
        certification: &str,
        resume: &str,
    ) -> Result<bool, OracleError> {
        let prompt = resume_prompt(certification, resume);
        let top = self.top_label(&prompt, &RESUME_MATCH_LABELS).await?;
        Ok(top.label == RESUME_MATCH_LABELS[0])
    }

    /// Rate a student/tutor pair: tier weight times the top confidence
    pub async fn score_compatibility(
        &self,
        student: &Student,
        tutor: &Tutor,
    ) -> Result<CompatibilityScore, OracleError> {
        let prompt = compatibility_prompt(student, tutor);
        let top = self.top_label(&prompt, &COMPATIBILITY_LABELS).await?;
        let tier = CompatibilityTier::from_label(&top.label).ok_or_else(|| {
            OracleError::MalformedResponse(format!("unknown compatibility tier '{}'", top.label))
        })?;

        Ok(CompatibilityScore {
            score: tier.weight() * top.confidence,
            tier,
            confidence: top.confidence,
            prompt,
        })
    }
}

impl std::fmt::Debug for OracleAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleAdapter")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn resume_prompt(certification: &str, resume: &str) -> String {
    format!(
        "Certification details: {}. Resume details: {}. \
         Does the resume provide evidence that the tutor holds the stated certification?",
        certification, resume
    )
}
