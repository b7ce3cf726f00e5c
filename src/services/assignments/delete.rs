use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    owner_id: i64,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_assignment(owner_id, assignment_id).await {
        Ok(true) => {
            tracing::info!("Assignment {} deleted by user {}", assignment_id, owner_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("作业删除成功")))
        }
        Ok(false) => Ok(not_found(ErrorCode::AssignmentNotFound, "作业不存在")),
        Err(e) => Ok(internal_error("删除作业失败", e)),
    }
}
