use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../dashboard/src/types/generated/system.ts")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../dashboard/src/types/generated/system.ts")]
pub enum DatabaseStatus {
    Connected,
    Disconnected,
}

/// 健康检查响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/system.ts")]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub database: DatabaseStatus,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub uptime_seconds: i64,
}
