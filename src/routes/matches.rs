use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::MatchError;
use crate::models::{Course, HealthResponse, MatchRequest, UnmatchedResponse};
use crate::routes::{service_error_response, validation_error_response, AppState};
use crate::services::ServiceError;

/// Configure match and service-level routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/courses", web::get().to(list_courses))
        .route("/matches", web::post().to(match_student))
        .route("/matches", web::get().to(current_matches));
}

/// Health check endpoint
async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Course catalogue used by registration forms
async fn list_courses() -> impl Responder {
    HttpResponse::Ok().json(Course::ALL)
}

/// Match student endpoint
///
/// POST /api/v1/matches
///
/// Request body:
/// ```json
/// {
///   "studentId": 1,
///   "candidateTutorIds": [1, 2, 3]
/// }
/// ```
///
/// `candidateTutorIds` is optional; every registered tutor is a candidate
/// when it is omitted. A pool without certified tutors is not an error: the
/// student stays unmatched and may retry later.
async fn match_student(
    state: web::Data<AppState>,
    req: web::Json<MatchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for match request: {:?}", errors);
        return validation_error_response(errors);
    }

    match state.service.match_student(&req).await {
        Ok(outcome) => HttpResponse::Ok().json(outcome),
        Err(ServiceError::Match(MatchError::NoEligibleTutor)) => {
            HttpResponse::Ok().json(UnmatchedResponse {
                status: "unmatched".to_string(),
                student_id: req.student_id,
                message: MatchError::NoEligibleTutor.to_string(),
            })
        }
        Err(e) => service_error_response(e),
    }
}

/// Current matches endpoint
///
/// GET /api/v1/matches
async fn current_matches(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.service.current_matches().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::oracle::{LabelScore, OracleAdapter, OracleError, TextClassifier};
    use crate::core::Matcher;
    use crate::services::{MatchService, Registry, Sha256Geocoder};
    use actix_web::{test, App};
    use async_trait::async_trait;
    use std::sync::Arc;

    /// Approves every resume and certifies every tutor; rates every pair "good"
    struct ApprovingClassifier;

    #[async_trait]
    impl TextClassifier for ApprovingClassifier {
        async fn classify(&self, _text: &str, labels: &[&str]) -> Result<Vec<LabelScore>, OracleError> {
            let top = if labels.contains(&"good") { "good" } else { labels[0] };
            Ok(vec![LabelScore::new(top, 0.9)])
        }
    }

    fn app_state() -> AppState {
        let oracle = OracleAdapter::with_default_timeout(Arc::new(ApprovingClassifier));
        let service = MatchService::new(
            Arc::new(Registry::new()),
            Matcher::with_default_concurrency(oracle),
            Arc::new(Sha256Geocoder),
        );
        AppState {
            service: Arc::new(service),
        }
    }

    #[actix_web::test]
    async fn test_health_check_response() {
        let app = test::init_service(
            App::new().configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: HealthResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body.status, "healthy");
    }

    #[actix_web::test]
    async fn test_unmatched_when_no_tutors() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/students")
            .set_json(serde_json::json!({"name": "Ada", "courseScores": {"Mathematics": 40}}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 201);

        let req = test::TestRequest::post()
            .uri("/api/v1/matches")
            .set_json(serde_json::json!({"studentId": 1}))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "unmatched");
        assert_eq!(body["studentId"], 1);
    }

    #[actix_web::test]
    async fn test_register_and_match_flow() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/v1/tutors")
            .set_json(serde_json::json!({
                "name": "Grace",
                "credentials": "Certified Professional Tutor",
                "expertiseCourses": ["Mathematics"],
                "contactInfo": "grace@example.com",
                "resumeText": "Certified Professional Tutor since 2015"
            }))
            .to_request();
        let tutor: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(tutor["isCertified"], true);
        assert_eq!(tutor["tutorHours"], 0);

        let req = test::TestRequest::post()
            .uri("/api/v1/students")
            .set_json(serde_json::json!({"name": "Ada", "courseScores": {"Mathematics": 40}}))
            .to_request();
        test::call_service(&app, req).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/matches")
            .set_json(serde_json::json!({"studentId": 1}))
            .to_request();
        let outcome: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(outcome["tutor"]["tutorId"], 1);
        assert_eq!(outcome["courseMatchCount"], 1);
        assert_eq!(outcome["tutorHours"], 1);

        let req = test::TestRequest::get().uri("/api/v1/students/1").to_request();
        let dashboard: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(dashboard["assignment"]["status"], "matched");
        assert_eq!(dashboard["assignment"]["tutor"]["contactInfo"], "grace@example.com");

        let req = test::TestRequest::get().uri("/api/v1/tutors/1").to_request();
        let dashboard: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(dashboard["status"], "CERTIFIED");
        assert_eq!(dashboard["matchedStudents"][0]["name"], "Ada");
    }

    #[actix_web::test]
    async fn test_unknown_student_is_not_found() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(app_state()))
                .configure(crate::routes::configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/v1/students/9").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 404);
    }
}
