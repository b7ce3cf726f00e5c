pub mod assignments;
pub mod auth;
pub mod dashboard;
pub mod evaluations;
pub mod profiles;
pub mod submissions;
pub mod system;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use dashboard::DashboardService;
pub use evaluations::EvaluationService;
pub use profiles::ProfileService;
pub use submissions::SubmissionService;
pub use system::SystemService;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use std::sync::Arc;

use crate::errors::AaieError;
use crate::evaluator::Evaluator;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub(crate) fn storage_from_app_data(request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not found in app data"))
}

pub(crate) fn evaluator_from_app_data(request: &HttpRequest) -> ActixResult<Arc<dyn Evaluator>> {
    request
        .app_data::<web::Data<Arc<dyn Evaluator>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| {
            actix_web::error::ErrorInternalServerError("Evaluator not found in app data")
        })
}

// 存储层错误只写日志，响应里只给出操作名称
pub(crate) fn internal_error(context: &str, err: AaieError) -> HttpResponse {
    tracing::error!("{}: {}", context, err);
    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
        ErrorCode::InternalServerError,
        context,
    ))
}

pub(crate) fn bad_request(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::BadRequest().json(ApiResponse::error_empty(code, message))
}

pub(crate) fn not_found(code: ErrorCode, message: impl Into<String>) -> HttpResponse {
    HttpResponse::NotFound().json(ApiResponse::error_empty(code, message))
}
