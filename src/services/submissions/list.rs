use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::{ApiResponse, submissions::requests::SubmissionListParams};
use crate::services::internal_error;

pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    owner_id: i64,
    query: SubmissionListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_submissions_with_pagination(owner_id, query.into())
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取提交列表成功"))),
        Err(e) => Ok(internal_error("获取提交列表失败", e)),
    }
}
