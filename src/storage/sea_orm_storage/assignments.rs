//! 作业存储操作

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments, Model};
use crate::entity::evaluations::{Column as EvaluationColumn, Entity as Evaluations};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{AaieError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    assignments::{
        entities::{Assignment, AssignmentStatus},
        requests::{AssignmentListQuery, CreateAssignmentRequest, UpdateAssignmentRequest},
        responses::AssignmentListResponse,
    },
};
use crate::utils::contains_condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

fn rubric_to_text(rubric: Option<serde_json::Value>) -> Result<Option<String>> {
    rubric
        .map(|value| serde_json::to_string(&value))
        .transpose()
        .map_err(AaieError::from)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SeaOrmStorage {
    /// 属于 owner 的作业
    pub(crate) async fn find_owned_assignment<C: ConnectionTrait>(
        conn: &C,
        owner_id: i64,
        id: i64,
    ) -> Result<Option<Model>> {
        Assignments::find_by_id(id)
            .filter(Column::OwnerId.eq(owner_id))
            .one(conn)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询作业失败: {e}")))
    }

    /// 按作业统计提交数
    pub(crate) async fn submission_counts<C: ConnectionTrait>(
        conn: &C,
        assignment_ids: Vec<i64>,
    ) -> Result<HashMap<i64, i64>> {
        let mut counts = HashMap::new();
        if assignment_ids.is_empty() {
            return Ok(counts);
        }

        let rows: Vec<i64> = Submissions::find()
            .select_only()
            .column(SubmissionColumn::AssignmentId)
            .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids))
            .into_tuple()
            .all(conn)
            .await
            .map_err(|e| AaieError::database_operation(format!("统计提交数失败: {e}")))?;

        for assignment_id in rows {
            *counts.entry(assignment_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    async fn to_assignment(&self, model: Model) -> Result<Assignment> {
        let counts = Self::submission_counts(&self.db, vec![model.id]).await?;
        let count = counts.get(&model.id).copied().unwrap_or(0);
        Ok(model.into_assignment(count, chrono::Utc::now()))
    }

    /// 分页列出作业，状态筛选与推导使用同一个 now
    pub async fn list_assignments_with_pagination_impl(
        &self,
        owner_id: i64,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);
        let now = chrono::Utc::now();

        let mut select = Assignments::find().filter(Column::OwnerId.eq(owner_id));

        // 搜索条件（标题或课程代码）
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(contains_condition(Column::Title, search.trim()))
                    .add(contains_condition(Column::UnitCode, search.trim())),
            );
        }

        // 状态筛选：closed 即 due_at < now
        let cutoff = AssignmentStatus::closed_cutoff(now);
        match query.status {
            Some(AssignmentStatus::Closed) => {
                select = select.filter(Column::DueAt.lt(cutoff));
            }
            Some(AssignmentStatus::Active) => {
                select = select.filter(Column::DueAt.gte(cutoff));
            }
            None => {}
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AaieError::database_operation(format!("查询作业总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AaieError::database_operation(format!("查询作业页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询作业列表失败: {e}")))?;

        let counts =
            Self::submission_counts(&self.db, models.iter().map(|m| m.id).collect()).await?;

        let items = models
            .into_iter()
            .map(|m| {
                let count = counts.get(&m.id).copied().unwrap_or(0);
                m.into_assignment(count, now)
            })
            .collect();

        Ok(AssignmentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn get_assignment_impl(&self, owner_id: i64, id: i64) -> Result<Option<Assignment>> {
        match Self::find_owned_assignment(&self.db, owner_id, id).await? {
            Some(model) => Ok(Some(self.to_assignment(model).await?)),
            None => Ok(None),
        }
    }

    /// 创建作业，未给出截止时间时取创建时刻
    pub async fn create_assignment_impl(
        &self,
        owner_id: i64,
        req: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        let now = chrono::Utc::now();

        let model = ActiveModel {
            owner_id: Set(owner_id),
            title: Set(req.title.trim().to_string()),
            unit_code: Set(req.unit_code.trim().to_string()),
            description: Set(non_blank(req.description)),
            due_at: Set(req.due_at.unwrap_or(now).timestamp()),
            rubric: Set(rubric_to_text(req.rubric)?),
            created_at: Set(now.timestamp()),
            updated_at: Set(now.timestamp()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment(0, now))
    }

    pub async fn update_assignment_impl(
        &self,
        owner_id: i64,
        id: i64,
        update: UpdateAssignmentRequest,
    ) -> Result<Option<Assignment>> {
        let Some(model) = Self::find_owned_assignment(&self.db, owner_id, id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into_active_model();
        if let Some(title) = update.title {
            active.title = Set(title.trim().to_string());
        }
        if let Some(unit_code) = update.unit_code {
            active.unit_code = Set(unit_code.trim().to_string());
        }
        if update.description.is_some() {
            active.description = Set(non_blank(update.description));
        }
        if let Some(due_at) = update.due_at {
            active.due_at = Set(due_at.timestamp());
        }
        if update.rubric.is_some() {
            active.rubric = Set(rubric_to_text(update.rubric)?);
        }
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("更新作业失败: {e}")))?;

        Ok(Some(self.to_assignment(updated).await?))
    }

    /// 在同一事务中删除作业、其提交以及提交的评估
    pub async fn delete_assignment_impl(&self, owner_id: i64, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AaieError::database_operation(format!("开启事务失败: {e}")))?;

        if Self::find_owned_assignment(&txn, owner_id, id)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        let submission_ids: Vec<i64> = Submissions::find()
            .select_only()
            .column(SubmissionColumn::Id)
            .filter(SubmissionColumn::AssignmentId.eq(id))
            .into_tuple()
            .all(&txn)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询作业提交失败: {e}")))?;

        if !submission_ids.is_empty() {
            Evaluations::delete_many()
                .filter(EvaluationColumn::SubmissionId.is_in(submission_ids))
                .exec(&txn)
                .await
                .map_err(|e| AaieError::database_operation(format!("删除评估失败: {e}")))?;
        }

        Submissions::delete_many()
            .filter(SubmissionColumn::AssignmentId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AaieError::database_operation(format!("删除提交失败: {e}")))?;

        let result = Assignments::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AaieError::database_operation(format!("删除作业失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AaieError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
