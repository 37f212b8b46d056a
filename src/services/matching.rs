use crate::core::{MatchError, Matcher, OracleError};
use crate::models::{
    CurrentMatchesResponse, MatchOutcome, MatchRequest, MatchSummary, RegisterStudentRequest,
    RegisterTutorRequest, Student, StudentDashboard, Tutor, TutorContact, TutorDashboard,
};
use crate::services::geocoder::{locate, Geocoder};
use crate::services::registry::{Registry, RegistryError};
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced by the match service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Match(#[from] MatchError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("Resume verification failed: the resume does not match the stated certification details")]
    ResumeMismatch,

    #[error("Could not extract text from the submitted resume")]
    EmptyResume,
}

/// Registration, matching and dashboard operations over a shared registry
pub struct MatchService {
    registry: Arc<Registry>,
    matcher: Matcher,
    geocoder: Arc<dyn Geocoder>,
}

impl MatchService {
    pub fn new(registry: Arc<Registry>, matcher: Matcher, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            registry,
            matcher,
            geocoder,
        }
    }

    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Geocode the address and store the student
    pub async fn register_student(&self, req: RegisterStudentRequest) -> Student {
        let (latitude, longitude) = locate(self.geocoder.as_ref(), &req.address);
        let student = self.registry.add_student(req, latitude, longitude).await;

        tracing::info!("Registered student {} ({})", student.id, student.name);
        student
    }

    /// Verify the resume, geocode, check certification and store the tutor
    ///
    /// A resume that does not back the credentials rejects the registration.
    /// Non-certified tutors are still registered but can never win a match.
    pub async fn register_tutor(&self, req: RegisterTutorRequest) -> Result<Tutor, ServiceError> {
        if req.resume_text.trim().is_empty() {
            return Err(ServiceError::EmptyResume);
        }

        let oracle = self.matcher.oracle();
        if !oracle.verify_resume_match(&req.credentials, &req.resume_text).await? {
            tracing::info!("Resume verification failed for tutor applicant {}", req.name);
            return Err(ServiceError::ResumeMismatch);
        }

        let (latitude, longitude) = locate(self.geocoder.as_ref(), &req.address);
        let is_certified = oracle.check_certification(&req.credentials).await?;
        let tutor = self.registry.add_tutor(req, latitude, longitude, is_certified).await;

        tracing::info!(
            "Registered tutor {} ({}) with status: {}",
            tutor.id,
            tutor.name,
            tutor.status_label()
        );
        Ok(tutor)
    }

    /// Rank the candidate pool for a student and commit the winner
    ///
    /// Ranking runs on a snapshot without holding the registry lock; the
    /// commit re-checks the winner under the write lock. Nothing is written
    /// when ranking fails.
    pub async fn match_student(&self, req: &MatchRequest) -> Result<MatchOutcome, ServiceError> {
        let student = self
            .registry
            .student(req.student_id)
            .await
            .ok_or(RegistryError::StudentNotFound(req.student_id))?;

        let pool = match &req.candidate_tutor_ids {
            Some(ids) => self.registry.tutors_by_id(ids).await?,
            None => self.registry.tutors().await,
        };

        tracing::info!(
            "Matching student {} against {} candidate tutors",
            student.id,
            pool.len()
        );

        let ranked = match self.matcher.rank_tutors(&student, &pool).await {
            Ok(ranked) => ranked,
            Err(e) => {
                tracing::warn!("Student {} left unmatched: {}", student.id, e);
                return Err(e.into());
            }
        };
        let candidates_ranked = ranked.len();
        let best = ranked.into_iter().next().ok_or(MatchError::NoEligibleTutor)?;

        let (student, tutor) = self.registry.commit_match(student.id, best.tutor.id).await?;

        tracing::info!(
            "Matched student {} with tutor {} (ai={:.3}, courses={}, distance={:.2}km)",
            student.id,
            tutor.id,
            best.ai_score,
            best.course_match_count,
            best.distance_km
        );

        Ok(MatchOutcome {
            match_id: uuid::Uuid::new_v4(),
            student_id: student.id,
            tutor: TutorContact {
                tutor_id: tutor.id,
                name: tutor.name.clone(),
                contact_info: tutor.contact_info.clone(),
            },
            ai_score: best.ai_score,
            course_match_count: best.course_match_count,
            distance_km: best.distance_km,
            prompt: best.prompt,
            candidates_ranked,
            tutor_hours: tutor.tutor_hours,
            matched_at: chrono::Utc::now(),
        })
    }

    pub async fn student_dashboard(&self, student_id: u64) -> Result<StudentDashboard, ServiceError> {
        let student = self
            .registry
            .student(student_id)
            .await
            .ok_or(RegistryError::StudentNotFound(student_id))?;
        let assignment = self.registry.assignment(&student).await;

        Ok(StudentDashboard { student, assignment })
    }

    pub async fn tutor_dashboard(&self, tutor_id: u64) -> Result<TutorDashboard, ServiceError> {
        let tutor = self
            .registry
            .tutor(tutor_id)
            .await
            .ok_or(RegistryError::TutorNotFound(tutor_id))?;
        let matched_students = self.registry.matched_students(&tutor).await;

        Ok(TutorDashboard {
            status: tutor.status_label().to_string(),
            tutor,
            matched_students,
        })
    }

    /// Current assignment of every registered student
    pub async fn current_matches(&self) -> CurrentMatchesResponse {
        let matches: Vec<MatchSummary> = self
            .registry
            .assignments()
            .await
            .into_iter()
            .map(|(student, assignment)| MatchSummary {
                student_id: student.id,
                student_name: student.name,
                assignment,
            })
            .collect();

        CurrentMatchesResponse {
            total: matches.len(),
            matches,
        }
    }
}
