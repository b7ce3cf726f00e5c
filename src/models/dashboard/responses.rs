use crate::models::assignments::entities::AssignmentStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;
use ts_rs::TS;

/// 仪表盘概览
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/dashboard.ts")]
pub struct DashboardOverview {
    pub total_assignments: i64,
    pub total_submissions: i64,
    // 状态为 draft 的提交数
    pub pending_reviews: i64,
    // 状态为 published 的提交数
    pub published_feedback: i64,
    pub recent_assignments: Vec<RecentAssignment>,
    pub recent_activity: Vec<ActivityItem>,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/dashboard.ts")]
pub struct RecentAssignment {
    pub id: i64,
    pub title: String,
    pub unit_code: String,
    pub due_at: DateTime<Utc>,
    pub status: AssignmentStatus,
    pub submission_count: i64,
    pub pending_count: i64,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../dashboard/src/types/generated/dashboard.ts")]
pub enum ActivityKind {
    Submission,
    Assignment,
}

#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/dashboard.ts")]
pub struct ActivityItem {
    // 提交或作业的 ID，取决于 kind
    pub id: i64,
    pub kind: ActivityKind,
    pub title: String,
    pub unit_code: String,
    pub at: DateTime<Utc>,
}
