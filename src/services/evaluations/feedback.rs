use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationService, load_source};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn regenerate_feedback(
    service: &EvaluationService,
    request: &HttpRequest,
    owner_id: i64,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let evaluator = service.get_evaluator(request)?;

    let source = match load_source(&storage, owner_id, submission_id).await {
        Ok(source) => source,
        Err(response) => return Ok(response),
    };

    let feedback = match evaluator.regenerate_feedback(&source.input()).await {
        Ok(feedback) => feedback,
        Err(e) => {
            tracing::error!("Evaluator {} failed: {}", evaluator.name(), e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EvaluationFailed,
                    "生成反馈失败",
                )),
            );
        }
    };

    match storage
        .update_ai_feedback(owner_id, submission_id, feedback)
        .await
    {
        Ok(Some(evaluation)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation, "反馈已重新生成")))
        }
        Ok(None) => Ok(not_found(ErrorCode::EvaluationNotFound, "评估不存在")),
        Err(e) => Ok(internal_error("更新反馈失败", e)),
    }
}
