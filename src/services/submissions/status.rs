use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{
    ApiResponse, ErrorCode, submissions::requests::UpdateSubmissionStatusRequest,
};
use crate::services::{internal_error, not_found};

pub async fn update_submission_status(
    service: &SubmissionService,
    request: &HttpRequest,
    owner_id: i64,
    submission_id: i64,
    req: UpdateSubmissionStatusRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .update_submission_status(owner_id, submission_id, req.status)
        .await
    {
        Ok(Some(submission)) => {
            tracing::info!(
                "Submission {} marked as {}",
                submission.id,
                submission.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "提交状态已更新")))
        }
        Ok(None) => Ok(not_found(ErrorCode::SubmissionNotFound, "提交不存在")),
        Err(e) => Ok(internal_error("更新提交状态失败", e)),
    }
}
