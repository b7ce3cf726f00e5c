use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{AssignmentService, validate_assignment_fields};
use crate::models::{ApiResponse, ErrorCode, assignments::requests::UpdateAssignmentRequest};
use crate::services::{bad_request, internal_error, not_found};

pub async fn update_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    owner_id: i64,
    assignment_id: i64,
    req: UpdateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    if let Err(msg) = validate_assignment_fields(
        req.title.as_deref(),
        req.unit_code.as_deref(),
        req.due_at,
        req.rubric.as_ref(),
        chrono::Utc::now(),
    ) {
        return Ok(bad_request(ErrorCode::AssignmentInvalid, msg));
    }

    match storage
        .update_assignment(owner_id, assignment_id, req)
        .await
    {
        Ok(Some(assignment)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "作业更新成功")))
        }
        Ok(None) => Ok(not_found(ErrorCode::AssignmentNotFound, "作业不存在")),
        Err(e) => Ok(internal_error("更新作业失败", e)),
    }
}
