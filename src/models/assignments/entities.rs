use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 作业状态，读取时由截止时间推导，不入库
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../dashboard/src/types/generated/assignment.ts")]
pub enum AssignmentStatus {
    Active,
    Closed,
}

impl AssignmentStatus {
    /// 截止时间早于 now 时为 closed；恰好等于 now 仍为 active
    pub fn at(due_at: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if due_at < now {
            AssignmentStatus::Closed
        } else {
            AssignmentStatus::Active
        }
    }

    /// 按秒存储的截止时间与 now 比较时的分界：`due_at < cutoff` 即 closed
    ///
    /// 与 [`AssignmentStatus::at`] 等价，now 带小数秒时向上取整。
    pub fn closed_cutoff(now: DateTime<Utc>) -> i64 {
        if now.timestamp_subsec_nanos() > 0 {
            now.timestamp() + 1
        } else {
            now.timestamp()
        }
    }
}

impl std::fmt::Display for AssignmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignmentStatus::Active => write!(f, "active"),
            AssignmentStatus::Closed => write!(f, "closed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    // 创建者（教师）ID
    pub owner_id: i64,
    pub title: String,
    // 课程代码，例如 "ITEC3001"
    pub unit_code: String,
    pub description: Option<String>,
    pub due_at: DateTime<Utc>,
    // 评分标准，自由格式的 JSON 对象
    #[ts(type = "Record<string, unknown> | null")]
    pub rubric: Option<serde_json::Value>,
    pub status: AssignmentStatus,
    pub submission_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
