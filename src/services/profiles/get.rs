use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfileService;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{internal_error, not_found};

pub async fn get_profile(
    service: &ProfileService,
    request: &HttpRequest,
    user_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_profile(user_id).await {
        Ok(Some(profile)) => Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "查询成功"))),
        Ok(None) => Ok(not_found(ErrorCode::ProfileNotFound, "资料不存在")),
        Err(e) => Ok(internal_error("查询资料失败", e)),
    }
}
