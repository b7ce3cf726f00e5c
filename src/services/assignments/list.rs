use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, assignments::requests::AssignmentListParams};
use crate::services::internal_error;

pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    owner_id: i64,
    query: AssignmentListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage
        .list_assignments_with_pagination(owner_id, query.into())
        .await
    {
        Ok(resp) => Ok(HttpResponse::Ok().json(ApiResponse::success(resp, "获取作业列表成功"))),
        Err(e) => Ok(internal_error("获取作业列表失败", e)),
    }
}
