use crate::models::assignments::entities::AssignmentStatus;
use crate::models::common::pagination::PaginationQuery;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use ts_rs::TS;

/// 创建作业请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub title: String,
    pub unit_code: String,
    pub description: Option<String>,
    pub due_at: Option<DateTime<Utc>>, // ISO 8601，缺省为创建时刻
    #[ts(type = "Record<string, unknown> | null")]
    pub rubric: Option<serde_json::Value>,
}

/// 更新作业请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/assignment.ts")]
pub struct UpdateAssignmentRequest {
    pub title: Option<String>,
    pub unit_code: Option<String>,
    pub description: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    #[ts(type = "Record<string, unknown> | null")]
    pub rubric: Option<serde_json::Value>,
}

/// 作业列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
    pub status: Option<AssignmentStatus>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub search: Option<String>,
    pub status: Option<AssignmentStatus>,
}

impl From<AssignmentListParams> for AssignmentListQuery {
    fn from(params: AssignmentListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            search: params.search,
            status: params.status,
        }
    }
}
