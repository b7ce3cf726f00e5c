use crate::models::common::pagination::PaginationQuery;
use crate::models::submissions::entities::SubmissionStatus;
use serde::Deserialize;
use ts_rs::TS;

/// 创建提交请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub assignment_id: i64,
    pub student_id: String,
    pub content: String,
    pub file_url: Option<String>,
}

/// 更新提交状态请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/submission.ts")]
pub struct UpdateSubmissionStatusRequest {
    pub status: SubmissionStatus,
}

/// 提交列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/submission.ts")]
pub struct SubmissionListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub assignment_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
    /// 按学生标识或内容搜索
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone, Default)]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: Option<i64>,
    pub status: Option<SubmissionStatus>,
    pub search: Option<String>,
}

impl From<SubmissionListParams> for SubmissionListQuery {
    fn from(params: SubmissionListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            assignment_id: params.assignment_id,
            status: params.status,
            search: params.search,
        }
    }
}
