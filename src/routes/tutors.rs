use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::RegisterTutorRequest;
use crate::routes::{service_error_response, validation_error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/tutors", web::post().to(register_tutor))
        .route("/tutors/{id}", web::get().to(tutor_dashboard));
}

/// Register tutor endpoint
///
/// POST /api/v1/tutors
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "experience": "10 years in the industry",
///   "credentials": "Certified Professional Tutor",
///   "expertiseCourses": ["Mathematics", "Science"],
///   "address": "string",
///   "contactInfo": "string",
///   "resumeText": "string"
/// }
/// ```
async fn register_tutor(
    state: web::Data<AppState>,
    req: web::Json<RegisterTutorRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for tutor registration: {:?}", errors);
        return validation_error_response(errors);
    }

    match state.service.register_tutor(req.into_inner()).await {
        Ok(tutor) => HttpResponse::Created().json(tutor),
        Err(e) => service_error_response(e),
    }
}

/// Tutor dashboard endpoint
///
/// GET /api/v1/tutors/{id}
async fn tutor_dashboard(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> impl Responder {
    match state.service.tutor_dashboard(path.into_inner()).await {
        Ok(dashboard) => HttpResponse::Ok().json(dashboard),
        Err(e) => service_error_response(e),
    }
}
