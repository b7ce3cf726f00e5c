pub mod assignments;

pub mod auth;

pub mod dashboard;

pub mod profiles;

pub mod submissions;

pub mod system;

pub use assignments::configure_assignments_routes;
pub use auth::configure_auth_routes;
pub use dashboard::configure_dashboard_routes;
pub use profiles::configure_profile_routes;
pub use submissions::configure_submissions_routes;
pub use system::configure_system_routes;

use actix_web::{HttpRequest, HttpResponse};

use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};

// 受保护路由中取当前用户 ID，作为 owner 过滤条件
pub(crate) fn current_user_id(req: &HttpRequest) -> Result<i64, HttpResponse> {
    RequireJWT::extract_user_id(req).ok_or_else(|| {
        HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "无法获取用户信息",
        ))
    })
}

/// 注册全部 API 路由
pub fn configure_api_routes(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.configure(configure_auth_routes)
        .configure(configure_profile_routes)
        .configure(configure_assignments_routes)
        .configure(configure_submissions_routes)
        .configure(configure_dashboard_routes)
        .configure(configure_system_routes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::ObjectCache;
    use crate::cache::object_cache::moka::MokaCacheWrapper;
    use crate::evaluator::{Evaluator, MockEvaluator};
    use crate::storage::Storage;
    use crate::models::users::entities::UserStatus;
    use crate::storage::sea_orm_storage::test_support::{memory_storage, set_user_status};
    use crate::utils::jwt::REFRESH_TOKEN_COOKIE;
    use crate::utils::json_error_handler;
    use actix_web::{App, http::StatusCode, test as actix_test, web};
    use serde_json::{Value, json};
    use std::sync::Arc;

    // 注册并登录，返回 access token
    macro_rules! register_and_login {
        ($app:expr, $email:expr, $ip:expr) => {{
            let req = actix_test::TestRequest::post()
                .uri("/api/v1/auth/register")
                .insert_header(("X-Forwarded-For", $ip))
                .set_json(json!({
                    "email": $email,
                    "password": "Marking-Season-42",
                    "confirm_password": "Marking-Season-42",
                    "name": "Dr Example"
                }))
                .to_request();
            let resp = actix_test::call_service($app, req).await;
            assert_eq!(resp.status(), StatusCode::CREATED);

            let req = actix_test::TestRequest::post()
                .uri("/api/v1/auth/login")
                .insert_header(("X-Forwarded-For", $ip))
                .set_json(json!({"email": $email, "password": "Marking-Season-42"}))
                .to_request();
            let resp = actix_test::call_service($app, req).await;
            assert_eq!(resp.status(), StatusCode::OK);
            assert!(resp.headers().contains_key("set-cookie"));
            let body: Value = actix_test::read_body_json(resp).await;
            body["data"]["access_token"]
                .as_str()
                .map(str::to_string)
                .unwrap_or_default()
        }};
    }

    #[actix_web::test]
    async fn test_assignment_submission_flow() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
        let evaluator: Arc<dyn Evaluator> = Arc::new(MockEvaluator::new());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache))
                .app_data(web::Data::new(evaluator))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .configure(configure_api_routes),
        )
        .await;

        let token = register_and_login!(&app, "lecturer@uni.edu.au", "198.51.100.10");
        let bearer = ("Authorization", format!("Bearer {token}"));

        // 未携带令牌
        let req = actix_test::TestRequest::get()
            .uri("/api/v1/assignments")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // 创建作业
        let due_at = (chrono::Utc::now() + chrono::Duration::days(7)).to_rfc3339();
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/assignments")
            .insert_header(bearer.clone())
            .set_json(json!({
                "title": "Reflective Essay",
                "unit_code": "ITEC3001",
                "due_at": due_at,
                "rubric": {"criteria": ["argument", "evidence"]}
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "active");
        let assignment_id = body["data"]["id"].as_i64().unwrap();

        // 截止时间已过的作业被拒绝
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/assignments")
            .insert_header(bearer.clone())
            .set_json(json!({
                "title": "Late",
                "unit_code": "ITEC3001",
                "due_at": "2001-01-01T00:00:00Z"
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        // 创建提交，同时生成评估
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/submissions")
            .insert_header(bearer.clone())
            .set_json(json!({
                "assignment_id": assignment_id,
                "student_id": "s123456789",
                "content": "An essay about the ethics of automated marking."
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"]["status"], "draft");
        assert_eq!(body["data"]["assignment"]["unit_code"], "ITEC3001");
        assert!(body["data"]["evaluation"].is_object());
        let submission_id = body["data"]["id"].as_i64().unwrap();

        // 写入批注后重新评估，批注保留
        let req = actix_test::TestRequest::put()
            .uri(&format!("/api/v1/submissions/{submission_id}/evaluation/notes"))
            .insert_header(bearer.clone())
            .set_json(json!({"teacher_notes": "Discuss in tutorial"}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = actix_test::TestRequest::post()
            .uri(&format!("/api/v1/submissions/{submission_id}/evaluation"))
            .insert_header(bearer.clone())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"]["teacher_notes"], "Discuss in tutorial");
        let confidence = body["data"]["confidence"].as_f64().unwrap();
        assert!((0.7..1.0).contains(&confidence));

        // 仪表盘统计
        let req = actix_test::TestRequest::get()
            .uri("/api/v1/dashboard")
            .insert_header(bearer.clone())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"]["total_assignments"], 1);
        assert_eq!(body["data"]["total_submissions"], 1);
        assert_eq!(body["data"]["pending_reviews"], 1);

        // 其他教师看不到该作业
        let other = register_and_login!(&app, "other@uni.edu.au", "198.51.100.11");
        let req = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/assignments/{assignment_id}"))
            .insert_header(("Authorization", format!("Bearer {other}")))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        // 删除作业后提交一并删除
        let req = actix_test::TestRequest::delete()
            .uri(&format!("/api/v1/assignments/{assignment_id}"))
            .insert_header(bearer.clone())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let req = actix_test::TestRequest::get()
            .uri(&format!("/api/v1/submissions/{submission_id}"))
            .insert_header(bearer)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_duplicate_email_and_bad_login() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_api_routes),
        )
        .await;

        register_and_login!(&app, "dup@uni.edu.au", "198.51.100.20");

        let req = actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .insert_header(("X-Forwarded-For", "198.51.100.20"))
            .set_json(json!({
                "email": "DUP@uni.edu.au",
                "password": "Marking-Season-42",
                "confirm_password": "Marking-Season-42",
                "name": "Dr Example"
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let req = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("X-Forwarded-For", "198.51.100.20"))
            .set_json(json!({"email": "dup@uni.edu.au", "password": "wrong-password"}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::AuthFailed as i32);
    }

    #[actix_web::test]
    async fn test_session_and_profile_lifecycle() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let cache: Arc<dyn ObjectCache> = Arc::new(MokaCacheWrapper::with_settings(100, 60));
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(cache.clone()))
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .configure(configure_api_routes),
        )
        .await;
        let ip = ("X-Forwarded-For", "198.51.100.30");

        // 两次密码不一致
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .insert_header(ip)
            .set_json(json!({
                "email": "session@uni.edu.au",
                "password": "Marking-Season-42",
                "confirm_password": "Marking-Season-43",
                "name": "Dr Example"
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::UserPasswordInvalid as i32);

        let req = actix_test::TestRequest::post()
            .uri("/api/v1/auth/register")
            .insert_header(ip)
            .set_json(json!({
                "email": "session@uni.edu.au",
                "password": "Marking-Season-42",
                "confirm_password": "Marking-Season-42",
                "name": "Dr Example"
            }))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(ip)
            .set_json(json!({"email": "session@uni.edu.au", "password": "Marking-Season-42"}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let refresh_cookie = resp
            .response()
            .cookies()
            .find(|c| c.name() == REFRESH_TOKEN_COOKIE)
            .map(|c| c.into_owned())
            .expect("refresh cookie set on login");
        assert!(!refresh_cookie.value().is_empty());

        // 没有 cookie 时无法刷新
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .insert_header(ip)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // 用 cookie 换取新的 access token
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/auth/refresh")
            .insert_header(ip)
            .cookie(refresh_cookie)
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        let token = body["data"]["access_token"].as_str().unwrap().to_string();
        assert!(body["data"]["expires_in"].as_i64().unwrap() > 0);
        let bearer = ("Authorization", format!("Bearer {token}"));

        // 第一次访问 /me 会把用户写入缓存
        let req = actix_test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer.clone())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"]["user"]["email"], "session@uni.edu.au");
        assert_eq!(body["data"]["user"]["profile"]["name"], "Dr Example");
        assert!(body["data"]["user"].get("password_hash").is_none());
        let cache_key = crate::middlewares::RequireJWT::user_cache_key(&token);
        assert!(matches!(
            cache.get_raw(&cache_key).await,
            crate::cache::CacheResult::Found(_)
        ));

        // 空白姓名被拒绝
        let req = actix_test::TestRequest::put()
            .uri("/api/v1/profile")
            .insert_header(bearer.clone())
            .set_json(json!({"name": "   "}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = actix_test::TestRequest::put()
            .uri("/api/v1/profile")
            .insert_header(bearer.clone())
            .set_json(json!({"name": "  Prof Example ", "institution": "Uni of Somewhere"}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"]["name"], "Prof Example");

        // 资料更新后缓存失效，/me 返回新姓名
        let req = actix_test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(bearer.clone())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"]["user"]["profile"]["name"], "Prof Example");
        assert_eq!(
            body["data"]["user"]["profile"]["institution"],
            "Uni of Somewhere"
        );

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/profile")
            .insert_header(bearer.clone())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["data"]["name"], "Prof Example");

        // 登出清除 cookie 与用户缓存
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/auth/logout")
            .insert_header(bearer.clone())
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let cleared = resp
            .response()
            .cookies()
            .find(|c| c.name() == REFRESH_TOKEN_COOKIE)
            .map(|c| c.into_owned())
            .expect("refresh cookie cleared on logout");
        assert!(cleared.value().is_empty());
        assert_eq!(cache.get_raw(&cache_key).await, crate::cache::CacheResult::NotFound);
    }

    #[actix_web::test]
    async fn test_suspended_user_rejected() {
        let sea = memory_storage().await;
        let storage: Arc<dyn Storage> = Arc::new(sea.clone());
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .configure(configure_api_routes),
        )
        .await;

        let token = register_and_login!(&app, "suspended@uni.edu.au", "198.51.100.40");
        let user = sea
            .get_user_by_email("suspended@uni.edu.au")
            .await
            .unwrap()
            .unwrap();
        set_user_status(&sea, user.id, UserStatus::Suspended).await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/auth/me")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["code"], ErrorCode::Unauthorized as i32);

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/assignments")
            .insert_header(("Authorization", format!("Bearer {token}")))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        // 停用账号也无法再登录
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .insert_header(("X-Forwarded-For", "198.51.100.40"))
            .set_json(json!({"email": "suspended@uni.edu.au", "password": "Marking-Season-42"}))
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
