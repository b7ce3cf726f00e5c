use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::current_user_id;
use crate::middlewares::{self, RateLimit};
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 列出作业
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    ASSIGNMENT_SERVICE
        .list_assignments(&req, owner_id, query.into_inner())
        .await
}

// 创建作业
pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    ASSIGNMENT_SERVICE
        .create_assignment(&req, owner_id, body.into_inner())
        .await
}

// 获取作业详情
pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    ASSIGNMENT_SERVICE
        .get_assignment(&req, owner_id, path.0)
        .await
}

// 更新作业
pub async fn update_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    ASSIGNMENT_SERVICE
        .update_assignment(&req, owner_id, path.0, body.into_inner())
        .await
}

// 删除作业
pub async fn delete_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    ASSIGNMENT_SERVICE
        .delete_assignment(&req, owner_id, path.0)
        .await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(RateLimit::api())
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_assignments))
                    .route(web::post().to(create_assignment)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_assignment))
                    .route(web::put().to(update_assignment))
                    .route(web::delete().to(delete_assignment)),
            ),
    );
}
