use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::EvaluationService;
use crate::models::{ApiResponse, ErrorCode, evaluations::requests::UpdateTeacherNotesRequest};
use crate::services::{internal_error, not_found};

pub async fn update_teacher_notes(
    service: &EvaluationService,
    request: &HttpRequest,
    owner_id: i64,
    submission_id: i64,
    req: UpdateTeacherNotesRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .update_teacher_notes(owner_id, submission_id, req.teacher_notes)
        .await
    {
        Ok(Some(evaluation)) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(evaluation, "批注已保存")))
        }
        Ok(None) => Ok(not_found(ErrorCode::EvaluationNotFound, "评估不存在")),
        Err(e) => Ok(internal_error("保存批注失败", e)),
    }
}
