use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, validate_assignment_fields};
use crate::models::{ApiResponse, ErrorCode, assignments::requests::CreateAssignmentRequest};
use crate::services::{bad_request, internal_error};

pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    owner_id: i64,
    req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_assignment_fields(
        Some(&req.title),
        Some(&req.unit_code),
        req.due_at,
        req.rubric.as_ref(),
        chrono::Utc::now(),
    ) {
        return Ok(bad_request(ErrorCode::AssignmentInvalid, msg));
    }

    match storage.create_assignment(owner_id, req).await {
        Ok(assignment) => {
            tracing::info!("Assignment {} created by user {}", assignment.id, owner_id);
            Ok(HttpResponse::Created().json(ApiResponse::success(assignment, "作业创建成功")))
        }
        Err(e) => Ok(internal_error("创建作业失败", e)),
    }
}
