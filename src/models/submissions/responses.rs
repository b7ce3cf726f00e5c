use crate::models::common::pagination::PaginationInfo;
use crate::models::evaluations::entities::Evaluation;
use crate::models::submissions::entities::Submission;
use serde::Serialize;
use ts_rs::TS;

/// 提交所属作业的摘要
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/submission.ts")]
pub struct AssignmentSummary {
    pub id: i64,
    pub title: String,
    pub unit_code: String,
}

/// 提交详情，附带作业摘要与评估结果
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/submission.ts")]
pub struct SubmissionDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub submission: Submission,
    pub assignment: AssignmentSummary,
    pub evaluation: Option<Evaluation>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionDetail>,
    pub pagination: PaginationInfo,
}
