use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn delete_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    owner_id: i64,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.delete_submission(owner_id, submission_id).await {
        Ok(true) => Ok(HttpResponse::Ok().json(ApiResponse::success_empty("提交删除成功"))),
        Ok(false) => Ok(not_found(ErrorCode::SubmissionNotFound, "提交不存在")),
        Err(e) => Ok(internal_error("删除提交失败", e)),
    }
}
