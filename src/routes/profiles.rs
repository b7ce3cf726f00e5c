use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::current_user_id;
use crate::middlewares::{self, RateLimit};
use crate::models::profiles::requests::UpdateProfileRequest;
use crate::services::ProfileService;

// 懒加载的全局 ProfileService 实例
static PROFILE_SERVICE: Lazy<ProfileService> = Lazy::new(ProfileService::new_lazy);

pub async fn get_profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    PROFILE_SERVICE.get_profile(&req, user_id).await
}

pub async fn update_profile(
    req: HttpRequest,
    body: web::Json<UpdateProfileRequest>,
) -> ActixResult<HttpResponse> {
    let user_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    PROFILE_SERVICE
        .update_profile(&req, user_id, body.into_inner())
        .await
}

// 配置路由
pub fn configure_profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/profile")
            .wrap(RateLimit::api())
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(get_profile))
                    .route(web::put().to(update_profile)),
            ),
    );
}
