use futures::{stream, StreamExt, TryStreamExt};
use std::cmp::Ordering;
use thiserror::Error;

use crate::models::{RankedTutor, Student, Tutor};
use crate::core::{
    distance::student_tutor_distance,
    filters::eligible_tutors,
    oracle::{OracleAdapter, OracleError},
    scoring::{course_match_count, weak_courses},
};

/// Default number of oracle calls in flight during one ranking pass
pub const DEFAULT_MAX_CONCURRENT_CALLS: usize = 4;

/// Errors produced by a matching pass
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("No certified tutors available")]
    NoEligibleTutor,

    #[error(transparent)]
    OracleUnavailable(#[from] OracleError),
}

/// Ranking engine
///
/// # Pipeline Stages
/// 1. Eligibility filter (certified tutors only)
/// 2. Weak course extraction for the student
/// 3. Key computation per tutor: oracle compatibility, course overlap, distance
/// 4. Stable sort and winner selection
///
/// Every eligible tutor costs one oracle call per pass; there is no early
/// termination, so call volume grows linearly with the certified pool.
#[derive(Debug, Clone)]
pub struct Matcher {
    oracle: OracleAdapter,
    max_concurrent_calls: usize,
}

impl Matcher {
    pub fn new(oracle: OracleAdapter, max_concurrent_calls: usize) -> Self {
        Self {
            oracle,
            max_concurrent_calls: max_concurrent_calls.max(1),
        }
    }

    pub fn with_default_concurrency(oracle: OracleAdapter) -> Self {
        Self::new(oracle, DEFAULT_MAX_CONCURRENT_CALLS)
    }

    pub fn oracle(&self) -> &OracleAdapter {
        &self.oracle
    }

    /// Rank every eligible tutor in `pool` for `student`, best first
    ///
    /// Oracle calls run concurrently but results are collected in pool order,
    /// so ties beyond all three keys keep their pool order. Any oracle failure
    /// aborts the pass.
    pub async fn rank_tutors<'a>(
        &self,
        student: &Student,
        pool: &'a [Tutor],
    ) -> Result<Vec<RankedTutor<'a>>, MatchError> {
        // Stage 1: eligibility
        let eligible = eligible_tutors(pool);
        if eligible.is_empty() {
            return Err(MatchError::NoEligibleTutor);
        }

        // Stage 2: weak courses
        let weak = weak_courses(student);

        // Stage 3: ranking keys
        let mut ranked: Vec<RankedTutor<'a>> = stream::iter(eligible)
            .map(|tutor| {
                let weak = &weak;
                async move {
                    let compatibility = self.oracle.score_compatibility(student, tutor).await?;
                    let ranked = RankedTutor {
                        tutor,
                        ai_score: compatibility.score,
                        course_match_count: course_match_count(weak, tutor),
                        distance_km: student_tutor_distance(student, tutor),
                        prompt: compatibility.prompt,
                    };
                    tracing::debug!(
                        "Scored tutor {} for student {}: {} ai={:.3} courses={} distance={:.2}km",
                        tutor.id,
                        student.id,
                        compatibility.tier.label(),
                        ranked.ai_score,
                        ranked.course_match_count,
                        ranked.distance_km
                    );
                    Ok::<_, OracleError>(ranked)
                }
            })
            .buffered(self.max_concurrent_calls)
            .try_collect()
            .await?;

        // Stage 4: stable sort
        ranked.sort_by(compare_rankings);

        Ok(ranked)
    }

    /// Select the best tutor in `pool` for `student`
    pub async fn select_best_tutor<'a>(
        &self,
        student: &Student,
        pool: &'a [Tutor],
    ) -> Result<RankedTutor<'a>, MatchError> {
        self.rank_tutors(student, pool)
            .await?
            .into_iter()
            .next()
            .ok_or(MatchError::NoEligibleTutor)
    }
}

/// Order two candidates: higher compatibility first, then more course
/// overlap, then shorter distance
pub fn compare_rankings(a: &RankedTutor<'_>, b: &RankedTutor<'_>) -> Ordering {
    b.ai_score
        .total_cmp(&a.ai_score)
        .then_with(|| b.course_match_count.cmp(&a.course_match_count))
        .then_with(|| a.distance_km.total_cmp(&b.distance_km))
}
