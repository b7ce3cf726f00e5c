//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。
//! 多步写操作（注册、删除作业、创建/删除提交）在单个事务中完成。

mod assignments;
mod dashboard;
mod evaluations;
mod profiles;
mod submissions;
mod users;

use crate::config::{AppConfig, DatabaseConfig};
use crate::errors::{AaieError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 使用全局配置创建存储实例
    pub async fn new_async() -> Result<Self> {
        Self::connect(&AppConfig::get().database).await
    }

    /// 连接数据库并运行迁移
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let db_url = Self::build_database_url(&config.url)?;

        let db = if db_url.starts_with("sqlite:") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        Migrator::up(&db, None)
            .await
            .map_err(|e| AaieError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| AaieError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .foreign_keys(true)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory");

        // 内存库每个连接各自独立，只能使用单连接
        let max_connections = if url.contains(":memory:") {
            1
        } else {
            config.pool_size.max(1)
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(opt)
            .await
            .map_err(|e| AaieError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.pool_size)
            .min_connections(config.pool_size.min(5))
            .connect_timeout(Duration::from_secs(config.timeout))
            .acquire_timeout(Duration::from_secs(config.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false);

        Database::connect(opt)
            .await
            .map_err(|e| AaieError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite:") {
            Ok(url.to_string())
        } else if url == ":memory:" {
            Ok("sqlite::memory:".to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") {
            Ok(format!("sqlite://{url}?mode=rwc"))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(AaieError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite:, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    pub async fn ping_impl(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| AaieError::database_connection(format!("数据库不可用: {e}")))
    }
}

// Storage trait 实现
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
use crate::storage::{NewUser, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user_with_profile(&self, user: NewUser) -> Result<User> {
        self.create_user_with_profile_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    // 资料模块
    async fn get_profile(&self, user_id: i64) -> Result<Option<Profile>> {
        self.get_profile_impl(user_id).await
    }

    async fn update_profile(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>> {
        self.update_profile_impl(user_id, update).await
    }

    // 作业模块
    async fn list_assignments_with_pagination(
        &self,
        owner_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(owner_id, query)
            .await
    }

    async fn get_assignment(&self, owner_id: i64, id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_impl(owner_id, id).await
    }

    async fn create_assignment(
        &self,
        owner_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(owner_id, req).await
    }

    async fn update_assignment(
        &self,
        owner_id: i64,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        self.update_assignment_impl(owner_id, id, update).await
    }

    async fn delete_assignment(&self, owner_id: i64, id: i64) -> Result<bool> {
        self.delete_assignment_impl(owner_id, id).await
    }

    // 提交模块
    async fn list_submissions_with_pagination(
        &self,
        owner_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(owner_id, query)
            .await
    }

    async fn get_submission(&self, owner_id: i64, id: i64) -> Result<Option<SubmissionDetail>> {
        self.get_submission_impl(owner_id, id).await
    }

    async fn create_submission_with_evaluation(
        &self,
        owner_id: i64,
        req: CreateSubmissionRequest,
        draft: EvaluationDraft,
    ) -> Result<Option<SubmissionDetail>> {
        self.create_submission_with_evaluation_impl(owner_id, req, draft)
            .await
    }

    async fn update_submission_status(
        &self,
        owner_id: i64,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>> {
        self.update_submission_status_impl(owner_id, id, status)
            .await
    }

    async fn delete_submission(&self, owner_id: i64, id: i64) -> Result<bool> {
        self.delete_submission_impl(owner_id, id).await
    }

    // 评估模块
    async fn get_evaluation(
        &self,
        owner_id: i64,
        submission_id: i64,
    ) -> Result<Option<Evaluation>> {
        self.get_evaluation_impl(owner_id, submission_id).await
    }

    async fn replace_evaluation(
        &self,
        owner_id: i64,
        submission_id: i64,
        draft: EvaluationDraft,
    ) -> Result<Option<Evaluation>> {
        self.replace_evaluation_impl(owner_id, submission_id, draft)
            .await
    }

    async fn update_ai_feedback(
        &self,
        owner_id: i64,
        submission_id: i64,
        feedback: String,
    ) -> Result<Option<Evaluation>> {
        self.update_ai_feedback_impl(owner_id, submission_id, feedback)
            .await
    }

    async fn update_teacher_notes(
        &self,
        owner_id: i64,
        submission_id: i64,
        notes: Option<String>,
    ) -> Result<Option<Evaluation>> {
        self.update_teacher_notes_impl(owner_id, submission_id, notes)
            .await
    }

    // 仪表盘
    async fn get_dashboard_overview(&self, owner_id: i64) -> Result<DashboardOverview> {
        self.get_dashboard_overview_impl(owner_id).await
    }

    async fn ping(&self) -> Result<()> {
        self.ping_impl().await
    }
}

/// 测试用：内存 SQLite 存储与数据构造
#[cfg(test)]
pub(crate) mod test_support {
    use super::SeaOrmStorage;
    use crate::config::DatabaseConfig;
    use crate::models::assignments::entities::Assignment;
    use crate::models::assignments::requests::CreateAssignmentRequest;
    use crate::models::evaluations::entities::EvaluationDraft;
    use crate::models::submissions::requests::CreateSubmissionRequest;
    use crate::models::submissions::responses::SubmissionDetail;
    use crate::models::users::entities::{User, UserStatus};
    use crate::evaluator::MockEvaluator;
    use sea_orm::{ActiveModelTrait, Set};
    use crate::storage::{NewUser, Storage};

    pub async fn memory_storage() -> SeaOrmStorage {
        SeaOrmStorage::connect(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            pool_size: 1,
            timeout: 5,
        })
        .await
        .expect("in-memory storage")
    }

    /// 直接改写账号状态
    pub async fn set_user_status(storage: &SeaOrmStorage, user_id: i64, status: UserStatus) {
        crate::entity::users::ActiveModel {
            id: Set(user_id),
            status: Set(status.to_string()),
            ..Default::default()
        }
        .update(&storage.db)
        .await
        .expect("update user status");
    }

    pub async fn teacher(storage: &SeaOrmStorage, email: &str) -> User {
        storage
            .create_user_with_profile(NewUser {
                email: email.to_string(),
                password_hash: "hash".to_string(),
                name: "Dr Example".to_string(),
            })
            .await
            .expect("create user")
    }

    pub async fn assignment(storage: &SeaOrmStorage, owner_id: i64, title: &str) -> Assignment {
        storage
            .create_assignment(
                owner_id,
                CreateAssignmentRequest {
                    title: title.to_string(),
                    unit_code: "ITEC3001".to_string(),
                    description: None,
                    due_at: Some(chrono::Utc::now() + chrono::Duration::days(7)),
                    rubric: None,
                },
            )
            .await
            .expect("create assignment")
    }

    pub fn draft() -> EvaluationDraft {
        MockEvaluator::draft_from_draws([0.9, 0.0, 0.5, 0.0, 0.3, 0.6, 0.9])
    }

    pub async fn submission(
        storage: &SeaOrmStorage,
        owner_id: i64,
        assignment_id: i64,
        student_id: &str,
    ) -> SubmissionDetail {
        storage
            .create_submission_with_evaluation(
                owner_id,
                CreateSubmissionRequest {
                    assignment_id,
                    student_id: student_id.to_string(),
                    content: "A sufficiently long piece of student writing.".to_string(),
                    file_url: None,
                },
                draft(),
            )
            .await
            .expect("create submission")
            .expect("assignment owned")
    }
}
