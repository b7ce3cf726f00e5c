use serde::Deserialize;
use ts_rs::TS;

/// 更新教师批注；为 null 或空字符串时清除
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/evaluation.ts")]
pub struct UpdateTeacherNotesRequest {
    pub teacher_notes: Option<String>,
}
