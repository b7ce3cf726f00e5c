use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn get_evaluation(
    service: &EvaluationService,
    request: &HttpRequest,
    owner_id: i64,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_evaluation(owner_id, submission_id).await {
        Ok(Some(evaluation)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation, "查询成功")))
        }
        Ok(None) => Ok(not_found(ErrorCode::EvaluationNotFound, "评估不存在")),
        Err(e) => Ok(internal_error("查询评估失败", e)),
    }
}
