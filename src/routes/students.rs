use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::models::RegisterStudentRequest;
use crate::routes::{service_error_response, validation_error_response, AppState};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/students", web::post().to(register_student))
        .route("/students/{id}", web::get().to(student_dashboard));
}

/// Register student endpoint
///
/// POST /api/v1/students
///
/// Request body:
/// ```json
/// {
///   "name": "string",
///   "overallScore": 82,
///   "careerInterests": "string",
///   "courseScores": { "Mathematics": 45, "Art": 90 },
///   "address": "string"
/// }
/// ```
async fn register_student(
    state: web::Data<AppState>,
    req: web::Json<RegisterStudentRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for student registration: {:?}", errors);
        return validation_error_response(errors);
    }

    let student = state.service.register_student(req.into_inner()).await;
    HttpResponse::Created().json(student)
}

/// Student dashboard endpoint
///
/// GET /api/v1/students/{id}
async fn student_dashboard(
    state: web::Data<AppState>,
    path: web::Path<u64>,
) -> impl Responder {
    match state.service.student_dashboard(path.into_inner()).await {
        Ok(dashboard) => HttpResponse::Ok().json(dashboard),
        Err(e) => service_error_response(e),
    }
}
