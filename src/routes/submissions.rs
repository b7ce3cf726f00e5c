use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use super::current_user_id;
use crate::middlewares::{self, RateLimit};
use crate::models::evaluations::requests::UpdateTeacherNotesRequest;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, SubmissionListParams, UpdateSubmissionStatusRequest,
};
use crate::services::{EvaluationService, SubmissionService};
use crate::utils::SafeIDI64;

// 懒加载的全局服务实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);
static EVALUATION_SERVICE: Lazy<EvaluationService> = Lazy::new(EvaluationService::new_lazy);

// 列出提交
pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<SubmissionListParams>,
) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    SUBMISSION_SERVICE
        .list_submissions(&req, owner_id, query.into_inner())
        .await
}

// 创建提交并生成评估
pub async fn create_submission(
    req: HttpRequest,
    body: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    SUBMISSION_SERVICE
        .create_submission(&req, owner_id, body.into_inner())
        .await
}

// 获取提交详情
pub async fn get_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    SUBMISSION_SERVICE
        .get_submission(&req, owner_id, path.0)
        .await
}

// 更新提交状态
pub async fn update_submission_status(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateSubmissionStatusRequest>,
) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    SUBMISSION_SERVICE
        .update_submission_status(&req, owner_id, path.0, body.into_inner())
        .await
}

// 删除提交
pub async fn delete_submission(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    SUBMISSION_SERVICE
        .delete_submission(&req, owner_id, path.0)
        .await
}

// 获取评估
pub async fn get_evaluation(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    EVALUATION_SERVICE
        .get_evaluation(&req, owner_id, path.0)
        .await
}

// 重新评估
pub async fn reevaluate(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    EVALUATION_SERVICE.reevaluate(&req, owner_id, path.0).await
}

// 重新生成反馈
pub async fn regenerate_feedback(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    EVALUATION_SERVICE
        .regenerate_feedback(&req, owner_id, path.0)
        .await
}

// 更新教师批注
pub async fn update_teacher_notes(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateTeacherNotesRequest>,
) -> ActixResult<HttpResponse> {
    let owner_id = match current_user_id(&req) {
        Ok(id) => id,
        Err(resp) => return Ok(resp),
    };
    EVALUATION_SERVICE
        .update_teacher_notes(&req, owner_id, path.0, body.into_inner())
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(RateLimit::api())
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(web::get().to(list_submissions))
                    .route(web::post().to(create_submission)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::get().to(get_submission))
                    .route(web::delete().to(delete_submission)),
            )
            .service(web::resource("/{id}/status").route(web::put().to(update_submission_status)))
            .service(
                web::resource("/{id}/evaluation")
                    .route(web::get().to(get_evaluation))
                    .route(web::post().to(reevaluate)),
            )
            .service(
                web::resource("/{id}/evaluation/feedback")
                    .route(web::post().to(regenerate_feedback)),
            )
            .service(
                web::resource("/{id}/evaluation/notes").route(web::put().to(update_teacher_notes)),
            ),
    );
}
