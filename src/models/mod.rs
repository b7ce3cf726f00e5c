//! 数据模型定义
//!
//! 按资源划分：`entities` 为业务实体，`requests` 为请求体与查询参数，
//! `responses` 为响应体。所有对外类型通过 ts-rs 导出给前端仪表盘。

pub mod assignments;
pub mod auth;
pub mod common;
pub mod dashboard;
pub mod evaluations;
pub mod profiles;
pub mod submissions;
pub mod system;
pub mod users;

pub use common::pagination::{PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

/// 应用启动时间，用于健康检查中的 uptime
#[derive(Debug, Clone, Copy)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 0 为成功；1xxx 通用错误；2xxx 认证与用户；3xxx 作业；4xxx 提交；5xxx 评估。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1003,
    NotFound = 1004,
    RateLimitExceeded = 1029,
    InternalServerError = 1500,

    AuthFailed = 2000,
    RegisterFailed = 2001,
    UserEmailInvalid = 2002,
    UserNameInvalid = 2003,
    UserPasswordInvalid = 2004,
    UserEmailAlreadyExists = 2005,
    UserNotFound = 2006,
    ProfileNotFound = 2100,
    ProfileUpdateFailed = 2101,

    AssignmentNotFound = 3000,
    AssignmentInvalid = 3001,

    SubmissionNotFound = 4000,
    SubmissionInvalid = 4001,

    EvaluationNotFound = 5000,
    EvaluationFailed = 5001,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::UserEmailAlreadyExists as i32, 2005);
        assert_eq!(ErrorCode::AssignmentNotFound as i32, 3000);
        assert_eq!(ErrorCode::EvaluationNotFound as i32, 5000);
    }
}
