use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::DashboardService;
use crate::models::ApiResponse;
use crate::services::internal_error;

pub async fn get_overview(
    service: &DashboardService,
    request: &HttpRequest,
    owner_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    match storage.get_dashboard_overview(owner_id).await {
        Ok(overview) => Ok(HttpResponse::Ok().json(ApiResponse::success(overview, "查询成功"))),
        Err(e) => Ok(internal_error("获取仪表盘数据失败", e)),
    }
}
