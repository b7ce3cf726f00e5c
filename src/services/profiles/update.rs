use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ProfileService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode, profiles::requests::UpdateProfileRequest};
use crate::services::{bad_request, not_found};
use crate::utils::validate::validate_name;

pub async fn update_profile(
    service: &ProfileService,
    request: &HttpRequest,
    user_id: i64,
    mut update: UpdateProfileRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    // 姓名不能清空，提供时需满足长度要求
    if let Some(name) = update.name.as_mut() {
        *name = name.trim().to_string();
        if let Err(msg) = validate_name(name) {
            return Ok(bad_request(ErrorCode::UserNameInvalid, msg));
        }
    }

    match storage.update_profile(user_id, update).await {
        Ok(Some(profile)) => {
            // 缓存中的用户信息带有资料，需要失效
            RequireJWT::evict_cached_user(request).await;
            Ok(HttpResponse::Ok().json(ApiResponse::success(profile, "资料更新成功")))
        }
        Ok(None) => Ok(not_found(ErrorCode::ProfileNotFound, "资料不存在")),
        Err(e) => {
            tracing::error!("Failed to update profile for user {}: {}", user_id, e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ProfileUpdateFailed,
                    "资料更新失败",
                )),
            )
        }
    }
}
