use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    owner_id: i64,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_submission(owner_id, submission_id).await {
        Ok(Some(detail)) => Ok(HttpResponse::Ok().json(ApiResponse::success(detail, "查询成功"))),
        Ok(None) => Ok(not_found(ErrorCode::SubmissionNotFound, "提交不存在")),
        Err(e) => Ok(internal_error("查询提交失败", e)),
    }
}
