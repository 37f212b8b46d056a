// Route exports
pub mod matches;
pub mod students;
pub mod tutors;

use actix_web::{web, HttpResponse};
use crate::core::MatchError;
use crate::models::ErrorResponse;
use crate::services::{MatchService, RegistryError, ServiceError};
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<MatchService>,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(matches::configure)
            .configure(students::configure)
            .configure(tutors::configure),
    );
}

fn error_body(error: &str, message: String, status_code: u16) -> ErrorResponse {
    ErrorResponse {
        error: error.to_string(),
        message,
        status_code,
    }
}

/// Map a service error onto an HTTP response
pub(crate) fn service_error_response(err: ServiceError) -> HttpResponse {
    let message = err.to_string();
    match err {
        ServiceError::Registry(RegistryError::StudentNotFound(_))
        | ServiceError::Registry(RegistryError::TutorNotFound(_)) => {
            HttpResponse::NotFound().json(error_body("Not found", message, 404))
        }
        ServiceError::Registry(RegistryError::IneligibleTutor(_)) => {
            HttpResponse::Conflict().json(error_body("Ineligible tutor", message, 409))
        }
        ServiceError::Match(MatchError::NoEligibleTutor) => {
            HttpResponse::Conflict().json(error_body("No eligible tutor", message, 409))
        }
        ServiceError::Match(MatchError::OracleUnavailable(_)) | ServiceError::Oracle(_) => {
            tracing::error!("Oracle unavailable: {}", message);
            HttpResponse::ServiceUnavailable().json(error_body("Oracle unavailable", message, 503))
        }
        ServiceError::ResumeMismatch | ServiceError::EmptyResume => {
            HttpResponse::UnprocessableEntity().json(error_body("Resume verification failed", message, 422))
        }
    }
}

pub(crate) fn validation_error_response(errors: validator::ValidationErrors) -> HttpResponse {
    HttpResponse::BadRequest().json(error_body("Validation failed", errors.to_string(), 400))
}
