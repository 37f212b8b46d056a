use crate::core::{filters::is_eligible, state::commit_match};
use crate::models::{RegisterStudentRequest, RegisterTutorRequest, Student, StudentRef, Tutor, TutorAssignment, TutorContact};
use thiserror::Error;
use tokio::sync::RwLock;

/// Errors raised by registry lookups and commits
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Student not found: {0}")]
    StudentNotFound(u64),

    #[error("Tutor not found: {0}")]
    TutorNotFound(u64),

    #[error("Tutor {0} is not certified")]
    IneligibleTutor(u64),
}

#[derive(Debug, Default)]
struct RegistryInner {
    students: Vec<Student>,
    tutors: Vec<Tutor>,
}

/// Ids are 1-based positions in registration order; records are never removed
fn slot(id: u64) -> Option<usize> {
    usize::try_from(id.checked_sub(1)?).ok()
}

impl RegistryInner {
    fn student(&self, id: u64) -> Option<&Student> {
        slot(id).and_then(|i| self.students.get(i)).filter(|s| s.id == id)
    }

    fn tutor(&self, id: u64) -> Option<&Tutor> {
        slot(id).and_then(|i| self.tutors.get(i)).filter(|t| t.id == id)
    }

    fn assignment(&self, student: &Student) -> TutorAssignment {
        match student.matched_tutor {
            None => TutorAssignment::Unmatched,
            Some(tutor_id) => match self.tutor(tutor_id) {
                Some(tutor) => TutorAssignment::Matched {
                    tutor: TutorContact {
                        tutor_id: tutor.id,
                        name: tutor.name.clone(),
                        contact_info: tutor.contact_info.clone(),
                    },
                },
                None => TutorAssignment::TutorNotFound { tutor_id },
            },
        }
    }
}

/// In-memory store of students and tutors
///
/// Owned by the hosting application and shared by reference. Reads return
/// snapshots; every mutation after registration goes through
/// [`Registry::commit_match`].
#[derive(Debug, Default)]
pub struct Registry {
    inner: RwLock<RegistryInner>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new student at the given coordinates and return the record
    pub async fn add_student(&self, req: RegisterStudentRequest, latitude: f64, longitude: f64) -> Student {
        let mut inner = self.inner.write().await;
        let student = Student {
            id: inner.students.len() as u64 + 1,
            name: req.name,
            overall_score: req.overall_score,
            career_interests: req.career_interests,
            course_scores: req.course_scores,
            address: req.address,
            latitude,
            longitude,
            matched_tutor: None,
            created_at: chrono::Utc::now(),
        };
        inner.students.push(student.clone());
        student
    }

    /// Store a new tutor with its certification verdict and return the record
    pub async fn add_tutor(
        &self,
        req: RegisterTutorRequest,
        latitude: f64,
        longitude: f64,
        is_certified: bool,
    ) -> Tutor {
        let mut inner = self.inner.write().await;
        let tutor = Tutor {
            id: inner.tutors.len() as u64 + 1,
            name: req.name,
            experience: req.experience,
            credentials: req.credentials,
            is_certified,
            expertise_courses: req.expertise_courses,
            address: req.address,
            contact_info: req.contact_info,
            latitude,
            longitude,
            tutor_hours: 0,
            matched_students: Vec::new(),
            created_at: chrono::Utc::now(),
        };
        inner.tutors.push(tutor.clone());
        tutor
    }

    pub async fn student(&self, id: u64) -> Option<Student> {
        self.inner.read().await.student(id).cloned()
    }

    pub async fn tutor(&self, id: u64) -> Option<Tutor> {
        self.inner.read().await.tutor(id).cloned()
    }

    /// Snapshot of every tutor in registration order
    pub async fn tutors(&self) -> Vec<Tutor> {
        self.inner.read().await.tutors.clone()
    }

    /// Snapshot of the named tutors, in the order given
    pub async fn tutors_by_id(&self, ids: &[u64]) -> Result<Vec<Tutor>, RegistryError> {
        let inner = self.inner.read().await;
        ids.iter()
            .map(|id| inner.tutor(*id).cloned().ok_or(RegistryError::TutorNotFound(*id)))
            .collect()
    }

    /// Resolve a student's tutor reference without failing on dangling ids
    pub async fn assignment(&self, student: &Student) -> TutorAssignment {
        self.inner.read().await.assignment(student)
    }

    /// Every student with its current assignment, in registration order
    pub async fn assignments(&self) -> Vec<(Student, TutorAssignment)> {
        let inner = self.inner.read().await;
        inner
            .students
            .iter()
            .map(|s| (s.clone(), inner.assignment(s)))
            .collect()
    }

    /// Students a tutor has been matched with; unknown ids are skipped
    pub async fn matched_students(&self, tutor: &Tutor) -> Vec<StudentRef> {
        let inner = self.inner.read().await;
        tutor
            .matched_students
            .iter()
            .filter_map(|id| inner.student(*id))
            .map(|s| StudentRef {
                id: s.id,
                name: s.name.clone(),
            })
            .collect()
    }

    /// Record a match between a student and a tutor
    ///
    /// The tutor's presence and certification are re-read under the write lock,
    /// so the eligibility check and the three field updates form one critical
    /// section. Returns the updated records.
    pub async fn commit_match(&self, student_id: u64, tutor_id: u64) -> Result<(Student, Tutor), RegistryError> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;

        let tutor_slot = slot(tutor_id)
            .filter(|i| inner.tutors.get(*i).is_some_and(|t| t.id == tutor_id))
            .ok_or(RegistryError::TutorNotFound(tutor_id))?;
        if !is_eligible(&inner.tutors[tutor_slot]) {
            return Err(RegistryError::IneligibleTutor(tutor_id));
        }

        let student = slot(student_id)
            .and_then(|i| inner.students.get_mut(i))
            .filter(|s| s.id == student_id)
            .ok_or(RegistryError::StudentNotFound(student_id))?;
        let tutor = &mut inner.tutors[tutor_slot];

        commit_match(student, tutor);

        tracing::debug!(
            "Committed match: student {} -> tutor {} (hours: {})",
            student.id,
            tutor.id,
            tutor.tutor_hours
        );

        Ok((student.clone(), tutor.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Course;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Arc;

    fn student_request(name: &str) -> RegisterStudentRequest {
        RegisterStudentRequest {
            name: name.to_string(),
            overall_score: 75,
            career_interests: "medicine".to_string(),
            course_scores: BTreeMap::from([(Course::Science, 45)]),
            address: "1 Main St".to_string(),
        }
    }

    fn tutor_request(name: &str) -> RegisterTutorRequest {
        RegisterTutorRequest {
            name: name.to_string(),
            experience: "10 years".to_string(),
            credentials: "Certified Professional Tutor".to_string(),
            expertise_courses: BTreeSet::from([Course::Science]),
            address: "2 Main St".to_string(),
            contact_info: format!("{}@example.com", name.to_lowercase()),
            resume_text: "resume".to_string(),
        }
    }

    #[tokio::test]
    async fn test_sequential_ids() {
        let registry = Registry::new();
        let a = registry.add_student(student_request("A"), 0.0, 0.0).await;
        let b = registry.add_student(student_request("B"), 0.0, 0.0).await;
        let t = registry.add_tutor(tutor_request("T"), 0.0, 0.0, true).await;

        assert_eq!((a.id, b.id, t.id), (1, 2, 1));
        assert_eq!(registry.student(2).await.unwrap().name, "B");
        assert!(registry.student(0).await.is_none());
        assert!(registry.student(3).await.is_none());
    }

    #[tokio::test]
    async fn test_commit_match_updates_store() {
        let registry = Registry::new();
        let student = registry.add_student(student_request("A"), 0.0, 0.0).await;
        let tutor = registry.add_tutor(tutor_request("T"), 0.0, 0.0, true).await;

        let (student, tutor) = registry.commit_match(student.id, tutor.id).await.unwrap();
        assert_eq!(student.matched_tutor, Some(tutor.id));

        let stored = registry.tutor(tutor.id).await.unwrap();
        assert_eq!(stored.matched_students, vec![student.id]);
        assert_eq!(stored.tutor_hours, 1);

        match registry.assignment(&student).await {
            TutorAssignment::Matched { tutor: contact } => assert_eq!(contact.contact_info, "t@example.com"),
            other => panic!("unexpected assignment: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_commit_rejects_uncertified_and_unknown() {
        let registry = Registry::new();
        let student = registry.add_student(student_request("A"), 0.0, 0.0).await;
        let tutor = registry.add_tutor(tutor_request("T"), 0.0, 0.0, false).await;

        assert!(matches!(
            registry.commit_match(student.id, tutor.id).await,
            Err(RegistryError::IneligibleTutor(1))
        ));
        assert!(matches!(
            registry.commit_match(student.id, 42).await,
            Err(RegistryError::TutorNotFound(42))
        ));
        let certified = registry.add_tutor(tutor_request("C"), 0.0, 0.0, true).await;
        assert!(matches!(
            registry.commit_match(42, certified.id).await,
            Err(RegistryError::StudentNotFound(42))
        ));
        assert_eq!(registry.tutor(certified.id).await.unwrap().tutor_hours, 0);
        assert_eq!(registry.student(student.id).await.unwrap().matched_tutor, None);
    }

    #[tokio::test]
    async fn test_dangling_reference_is_informational() {
        let registry = Registry::new();
        let mut student = registry.add_student(student_request("A"), 0.0, 0.0).await;
        student.matched_tutor = Some(99);

        assert_eq!(
            registry.assignment(&student).await,
            TutorAssignment::TutorNotFound { tutor_id: 99 }
        );
    }

    #[tokio::test]
    async fn test_concurrent_commits_keep_hours_consistent() {
        let registry = Arc::new(Registry::new());
        for i in 0..20 {
            registry.add_student(student_request(&format!("S{}", i)), 0.0, 0.0).await;
        }
        let tutor = registry.add_tutor(tutor_request("T"), 0.0, 0.0, true).await;

        let handles: Vec<_> = (1..=20)
            .map(|student_id| {
                let registry = registry.clone();
                tokio::spawn(async move { registry.commit_match(student_id, tutor.id).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let stored = registry.tutor(tutor.id).await.unwrap();
        assert_eq!(stored.tutor_hours, 20);
        assert_eq!(stored.matched_students.len(), 20);
    }

    #[tokio::test]
    async fn test_tutors_by_id_reports_unknown() {
        let registry = Registry::new();
        registry.add_tutor(tutor_request("T1"), 0.0, 0.0, true).await;
        registry.add_tutor(tutor_request("T2"), 0.0, 0.0, true).await;

        let pool = registry.tutors_by_id(&[2, 1]).await.unwrap();
        assert_eq!(pool.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2, 1]);
        assert!(matches!(
            registry.tutors_by_id(&[1, 5]).await,
            Err(RegistryError::TutorNotFound(5))
        ));
    }
}
