use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use super::SystemService;
use crate::models::system::responses::{DatabaseStatus, HealthResponse, HealthStatus};
use crate::models::{ApiResponse, AppStartTime, ErrorCode};

/// 探测数据库连接；数据库不可用时返回 503
pub async fn health_check(
    service: &SystemService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let now = chrono::Utc::now();

    let database = match storage.ping().await {
        Ok(()) => DatabaseStatus::Connected,
        Err(e) => {
            tracing::warn!("Database health check failed: {}", e);
            DatabaseStatus::Disconnected
        }
    };

    let status = match database {
        DatabaseStatus::Connected => HealthStatus::Healthy,
        DatabaseStatus::Disconnected => HealthStatus::Unhealthy,
    };

    let uptime_seconds = request
        .app_data::<web::Data<AppStartTime>>()
        .map(|start| (now - start.start_datetime).num_seconds().max(0))
        .unwrap_or(0);

    let response = HealthResponse {
        status,
        database,
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime_seconds,
    };

    match status {
        HealthStatus::Healthy => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Service is healthy")))
        }
        HealthStatus::Unhealthy => Ok(HttpResponse::ServiceUnavailable().json(
            ApiResponse::error(ErrorCode::InternalServerError, response, "Service is unhealthy"),
        )),
    }
}
