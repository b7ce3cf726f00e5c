use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::middlewares::RequireJWT;
use crate::models::ApiResponse;
use crate::utils::jwt;

use super::AuthService;

pub async fn handle_logout(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 清除该 access token 对应的用户缓存
    RequireJWT::evict_cached_user(request).await;

    if let Some(user_id) = RequireJWT::extract_user_id(request) {
        tracing::info!("User {} logged out", user_id);
    }

    Ok(HttpResponse::Ok()
        .cookie(jwt::JwtUtils::create_empty_refresh_token_cookie())
        .json(ApiResponse::success_empty("Logout successful")))
}
