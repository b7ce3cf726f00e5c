use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    owner_id: i64,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_assignment(owner_id, assignment_id).await {
        Ok(Some(assignment)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "查询成功")))
        }
        Ok(None) => Ok(not_found(ErrorCode::AssignmentNotFound, "作业不存在")),
        Err(e) => Ok(internal_error("查询作业失败", e)),
    }
}
