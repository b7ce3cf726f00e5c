use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::SystemService;

// 懒加载的全局 SystemService 实例
static SYSTEM_SERVICE: Lazy<SystemService> = Lazy::new(SystemService::new_lazy);

pub async fn health_check(request: HttpRequest) -> ActixResult<HttpResponse> {
    SYSTEM_SERVICE.health_check(&request).await
}

// 配置路由，健康检查无需认证
pub fn configure_system_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/v1/health").route("", web::get().to(health_check)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AppStartTime;
    use crate::storage::Storage;
    use crate::storage::sea_orm_storage::test_support::memory_storage;
    use actix_web::{App, http::StatusCode, test as actix_test};
    use std::sync::Arc;

    #[actix_web::test]
    async fn test_health_reports_connected_database() {
        let storage: Arc<dyn Storage> = Arc::new(memory_storage().await);
        let app = actix_test::init_service(
            App::new()
                .app_data(web::Data::new(storage))
                .app_data(web::Data::new(AppStartTime {
                    start_datetime: chrono::Utc::now() - chrono::Duration::seconds(30),
                }))
                .configure(configure_system_routes),
        )
        .await;

        let req = actix_test::TestRequest::get()
            .uri("/api/v1/health")
            .to_request();
        let resp = actix_test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: serde_json::Value = actix_test::read_body_json(resp).await;
        assert_eq!(body["code"], 0);
        assert_eq!(body["data"]["status"], "healthy");
        assert_eq!(body["data"]["database"], "connected");
        assert!(body["data"]["uptime_seconds"].as_i64().unwrap() >= 30);
    }
}
