use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::{EvaluationService, load_source};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

/// 重新生成整份评估，教师批注保留
pub async fn reevaluate(
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

    let draft = match evaluator.evaluate(&source.input()).await {
        Ok(draft) => draft,
        Err(e) => {
            tracing::error!("Evaluator {} failed: {}", evaluator.name(), e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EvaluationFailed,
                    "重新评估失败",
                )),
            );
        }
    };

    match storage
        .replace_evaluation(owner_id, submission_id, draft)
        .await
    {
        Ok(Some(evaluation)) => {
            tracing::info!("Submission {} re-evaluated", submission_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation, "重新评估成功")))
        }
        Ok(None) => Ok(not_found(ErrorCode::SubmissionNotFound, "提交不存在")),
        Err(e) => Ok(internal_error("保存评估失败", e)),
    }
}
