use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    dashboard::responses::DashboardOverview,
    evaluations::entities::{Evaluation, EvaluationDraft},
    profiles::{entities::Profile, requests::UpdateProfileRequest},
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::{SubmissionDetail, SubmissionListResponse},
    },
    users::entities::User,
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 注册时写入的账号数据，密码已哈希
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

/// 存储层接口
///
/// 作业、提交与评估的读写都以 `owner_id` 限定范围：不属于调用者的记录
/// 与不存在的记录一样返回 `None` / `false`。
#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户
    // 在同一事务中创建账号与资料
    async fn create_user_with_profile(&self, user: NewUser) -> Result<User>;
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn update_last_login(&self, id: i64) -> Result<bool>;

    /// 资料
    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>>;
    async fn update_profile(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>>;

    /// 作业
    async fn list_assignments_with_pagination(
        &self,
        owner_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    async fn get_assignment(&self, owner_id: i64, id: i64) -> Result<Option<Assignment>>;
    async fn create_assignment(
        &self,
        owner_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    async fn update_assignment(
        &self,
        owner_id: i64,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>>;
    // 同一事务中删除作业及其提交与评估
    async fn delete_assignment(&self, owner_id: i64, id: i64) -> Result<bool>;

    /// 提交
    async fn list_submissions_with_pagination(
        &self,
        owner_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    async fn get_submission(&self, owner_id: i64, id: i64) -> Result<Option<SubmissionDetail>>;
    // 同一事务中写入提交与评估；作业不存在或不属于调用者时返回 None
    async fn create_submission_with_evaluation(
        &self,
        owner_id: i64,
        req: CreateSubmissionRequest,
        draft: EvaluationDraft,
    ) -> Result<Option<SubmissionDetail>>;
    async fn update_submission_status(
        &self,
        owner_id: i64,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>>;
    // 同一事务中先删除评估再删除提交
    async fn delete_submission(&self, owner_id: i64, id: i64) -> Result<bool>;

    /// 评估
    async fn get_evaluation(&self, owner_id: i64, submission_id: i64)
    -> Result<Option<Evaluation>>;
    // 用新草稿替换评估结果，保留教师批注；评估不存在时新建
    async fn replace_evaluation(
        &self,
        owner_id: i64,
        submission_id: i64,
        draft: EvaluationDraft,
    ) -> Result<Option<Evaluation>>;
    async fn update_ai_feedback(
        &self,
        owner_id: i64,
        submission_id: i64,
        feedback: String,
    ) -> Result<Option<Evaluation>>;
    async fn update_teacher_notes(
        &self,
        owner_id: i64,
        submission_id: i64,
        notes: Option<String>,
    ) -> Result<Option<Evaluation>>;

    /// 仪表盘
    async fn get_dashboard_overview(&self, owner_id: i64) -> Result<DashboardOverview>;

    /// 系统
    async fn ping(&self) -> Result<()>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
