//! 提交存储操作
//!
//! 提交对其所属作业的创建者可见。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{
    Column as AssignmentColumn, Entity as Assignments, Model as AssignmentModel,
};
use crate::entity::evaluations::{
    ActiveModel as EvaluationActiveModel, Column as EvaluationColumn, Entity as Evaluations,
};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions, Model};
use crate::errors::{AaieError, Result};
use crate::models::{
    PaginationInfo, PaginationQuery,
    evaluations::entities::EvaluationDraft,
    submissions::{
        entities::{Submission, SubmissionStatus},
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::{AssignmentSummary, SubmissionDetail, SubmissionListResponse},
    },
};
use crate::utils::contains_condition;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, IntoActiveModel,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// owner 创建的全部作业 ID
    async fn owned_assignment_ids<C: ConnectionTrait>(conn: &C, owner_id: i64) -> Result<Vec<i64>> {
        Assignments::find()
            .select_only()
            .column(AssignmentColumn::Id)
            .filter(AssignmentColumn::OwnerId.eq(owner_id))
            .into_tuple()
            .all(conn)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询作业失败: {e}")))
    }

    /// 对 owner 可见的提交及其作业
    pub(crate) async fn find_owned_submission<C: ConnectionTrait>(
        conn: &C,
        owner_id: i64,
        id: i64,
    ) -> Result<Option<(Model, AssignmentModel)>> {
        let Some(submission) = Submissions::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询提交失败: {e}")))?
        else {
            return Ok(None);
        };

        let assignment =
            Self::find_owned_assignment(conn, owner_id, submission.assignment_id).await?;
        Ok(assignment.map(|a| (submission, a)))
    }

    /// 为一组提交附加作业摘要与评估
    async fn build_details<C: ConnectionTrait>(
        conn: &C,
        submissions: Vec<Model>,
    ) -> Result<Vec<SubmissionDetail>> {
        if submissions.is_empty() {
            return Ok(Vec::new());
        }

        let assignment_ids: Vec<i64> = submissions.iter().map(|s| s.assignment_id).collect();
        let assignments: HashMap<i64, AssignmentSummary> = Assignments::find()
            .filter(AssignmentColumn::Id.is_in(assignment_ids))
            .all(conn)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询作业失败: {e}")))?
            .into_iter()
            .map(|a| {
                (
                    a.id,
                    AssignmentSummary {
                        id: a.id,
                        title: a.title,
                        unit_code: a.unit_code,
                    },
                )
            })
            .collect();

        let submission_ids: Vec<i64> = submissions.iter().map(|s| s.id).collect();
        let mut evaluations: HashMap<i64, _> = Evaluations::find()
            .filter(EvaluationColumn::SubmissionId.is_in(submission_ids))
            .all(conn)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询评估失败: {e}")))?
            .into_iter()
            .map(|e| (e.submission_id, e.into_evaluation()))
            .collect();

        let details = submissions
            .into_iter()
            .filter_map(|s| {
                let assignment = assignments.get(&s.assignment_id)?.clone();
                let evaluation = evaluations.remove(&s.id);
                Some(SubmissionDetail {
                    submission: s.into_submission(),
                    assignment,
                    evaluation,
                })
            })
            .collect();
        Ok(details)
    }

    pub async fn list_submissions_with_pagination_impl(
        &self,
        owner_id: i64,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let (page, size) = PaginationQuery::normalized(query.page, query.size);
        let empty = || SubmissionListResponse {
            items: Vec::new(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: 0,
                total_pages: 0,
            },
        };

        let owned_ids = Self::owned_assignment_ids(&self.db, owner_id).await?;
        let mut select = Submissions::find();

        // 作业筛选，只能筛选自己的作业
        match query.assignment_id {
            Some(assignment_id) if owned_ids.contains(&assignment_id) => {
                select = select.filter(Column::AssignmentId.eq(assignment_id));
            }
            Some(_) => return Ok(empty()),
            None if owned_ids.is_empty() => return Ok(empty()),
            None => {
                select = select.filter(Column::AssignmentId.is_in(owned_ids));
            }
        }

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        // 搜索条件（学生标识或内容）
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            select = select.filter(
                Condition::any()
                    .add(contains_condition(Column::StudentId, search.trim()))
                    .add(contains_condition(Column::Content, search.trim())),
            );
        }

        select = select
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| AaieError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| AaieError::database_operation(format!("查询提交页数失败: {e}")))?;

        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询提交列表失败: {e}")))?;

        Ok(SubmissionListResponse {
            items: Self::build_details(&self.db, models).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    pub async fn get_submission_impl(
        &self,
        owner_id: i64,
        id: i64,
    ) -> Result<Option<SubmissionDetail>> {
        let Some((submission, _)) = Self::find_owned_submission(&self.db, owner_id, id).await?
        else {
            return Ok(None);
        };

        Ok(Self::build_details(&self.db, vec![submission])
            .await?
            .into_iter()
            .next())
    }

    /// 在同一事务中写入提交与评估，提交初始状态为 draft
    pub async fn create_submission_with_evaluation_impl(
        &self,
        owner_id: i64,
        req: CreateSubmissionRequest,
        draft: EvaluationDraft,
    ) -> Result<Option<SubmissionDetail>> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AaieError::database_operation(format!("开启事务失败: {e}")))?;

        if Self::find_owned_assignment(&txn, owner_id, req.assignment_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let submission = ActiveModel {
            assignment_id: Set(req.assignment_id),
            student_id: Set(req.student_id.trim().to_string()),
            content: Set(req.content),
            file_url: Set(req
                .file_url
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty())),
            status: Set(SubmissionStatus::Draft.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AaieError::database_operation(format!("创建提交失败: {e}")))?;

        EvaluationActiveModel {
            submission_id: Set(submission.id),
            classification: Set(draft.classification.to_string()),
            confidence: Set(draft.confidence),
            conceptual: Set(draft.scores.conceptual),
            application: Set(draft.scores.application),
            evaluation: Set(draft.scores.evaluation),
            writing: Set(draft.scores.writing),
            ai_feedback: Set(draft.ai_feedback),
            teacher_notes: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AaieError::database_operation(format!("创建评估失败: {e}")))?;

        let detail = Self::build_details(&txn, vec![submission])
            .await?
            .into_iter()
            .next();

        txn.commit()
            .await
            .map_err(|e| AaieError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(detail)
    }

    pub async fn update_submission_status_impl(
        &self,
        owner_id: i64,
        id: i64,
        status: SubmissionStatus,
    ) -> Result<Option<Submission>> {
        let Some((model, _)) = Self::find_owned_submission(&self.db, owner_id, id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into_active_model();
        active.status = Set(status.to_string());
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("更新提交状态失败: {e}")))?;

        Ok(Some(updated.into_submission()))
    }

    /// 在同一事务中先删除评估再删除提交
    pub async fn delete_submission_impl(&self, owner_id: i64, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AaieError::database_operation(format!("开启事务失败: {e}")))?;

        if Self::find_owned_submission(&txn, owner_id, id)
            .await?
            .is_none()
        {
            return Ok(false);
        }

        Evaluations::delete_many()
            .filter(EvaluationColumn::SubmissionId.eq(id))
            .exec(&txn)
            .await
            .map_err(|e| AaieError::database_operation(format!("删除评估失败: {e}")))?;

        let result = Submissions::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(|e| AaieError::database_operation(format!("删除提交失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AaieError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{assignment, draft, memory_storage, submission, teacher};
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::models::submissions::requests::{CreateSubmissionRequest, SubmissionListQuery};
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_create_inserts_submission_and_evaluation() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "sub@example.edu").await;
        let a = assignment(&storage, owner.id, "Essay").await;

        let detail = submission(&storage, owner.id, a.id, " s123456789 ").await;
        assert_eq!(detail.submission.student_id, "s123456789");
        assert_eq!(detail.submission.status, SubmissionStatus::Draft);
        assert_eq!(detail.assignment.title, "Essay");
        assert_eq!(detail.assignment.unit_code, "ITEC3001");

        let evaluation = detail.evaluation.expect("evaluation created with submission");
        assert_eq!(evaluation.submission_id, detail.submission.id);
        assert_eq!(evaluation.scores, draft().scores);
        assert!(evaluation.teacher_notes.is_none());
    }

    #[tokio::test]
    async fn test_create_requires_owned_assignment() {
        let storage = memory_storage().await;
        let alice = teacher(&storage, "alice@example.edu").await;
        let bob = teacher(&storage, "bob@example.edu").await;
        let a = assignment(&storage, alice.id, "Alice only").await;

        let req = CreateSubmissionRequest {
            assignment_id: a.id,
            student_id: "s1".into(),
            content: "Long enough content for a submission".into(),
            file_url: None,
        };
        let created = storage
            .create_submission_with_evaluation(bob.id, req.clone(), draft())
            .await
            .unwrap();
        assert!(created.is_none());

        let missing = storage
            .create_submission_with_evaluation(
                alice.id,
                CreateSubmissionRequest {
                    assignment_id: a.id + 50,
                    ..req
                },
                draft(),
            )
            .await
            .unwrap();
        assert!(missing.is_none());

        let listed = storage
            .list_submissions_with_pagination(alice.id, SubmissionListQuery::default())
            .await
            .unwrap();
        assert_eq!(listed.pagination.total, 0);
    }

    #[tokio::test]
    async fn test_list_filters() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "filters@example.edu").await;
        let other = teacher(&storage, "other@example.edu").await;
        let a1 = assignment(&storage, owner.id, "First").await;
        let a2 = assignment(&storage, owner.id, "Second").await;
        let foreign = assignment(&storage, other.id, "Foreign").await;

        let s1 = submission(&storage, owner.id, a1.id, "s100").await;
        let s2 = submission(&storage, owner.id, a2.id, "s200").await;
        submission(&storage, other.id, foreign.id, "s300").await;

        storage
            .update_submission_status(owner.id, s1.submission.id, SubmissionStatus::Published)
            .await
            .unwrap()
            .unwrap();

        let all = storage
            .list_submissions_with_pagination(owner.id, SubmissionListQuery::default())
            .await
            .unwrap();
        assert_eq!(all.pagination.total, 2);
        assert_eq!(all.items[0].submission.id, s2.submission.id);
        assert!(all.items.iter().all(|d| d.evaluation.is_some()));

        let by_assignment = storage
            .list_submissions_with_pagination(
                owner.id,
                SubmissionListQuery {
                    assignment_id: Some(a1.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(by_assignment.items.len(), 1);
        assert_eq!(by_assignment.items[0].assignment.title, "First");

        let foreign_filter = storage
            .list_submissions_with_pagination(
                owner.id,
                SubmissionListQuery {
                    assignment_id: Some(foreign.id),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(foreign_filter.items.is_empty());

        let drafts = storage
            .list_submissions_with_pagination(
                owner.id,
                SubmissionListQuery {
                    status: Some(SubmissionStatus::Draft),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(drafts.items.len(), 1);
        assert_eq!(drafts.items[0].submission.student_id, "s200");

        let searched = storage
            .list_submissions_with_pagination(
                owner.id,
                SubmissionListQuery {
                    search: Some("s10".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(searched.items.len(), 1);
        assert_eq!(searched.items[0].submission.id, s1.submission.id);
    }

    #[tokio::test]
    async fn test_search_escapes_wildcards() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "wild@example.edu").await;
        let a = assignment(&storage, owner.id, "Wildcards").await;
        submission(&storage, owner.id, a.id, "abc").await;

        let result = storage
            .list_submissions_with_pagination(
                owner.id,
                SubmissionListQuery {
                    search: Some("%".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn test_delete_removes_evaluation() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "rm@example.edu").await;
        let other = teacher(&storage, "rm2@example.edu").await;
        let a = assignment(&storage, owner.id, "Essay").await;
        let s = submission(&storage, owner.id, a.id, "s1").await;

        assert!(!storage.delete_submission(other.id, s.submission.id).await.unwrap());
        assert!(storage.delete_submission(owner.id, s.submission.id).await.unwrap());
        assert!(!storage.delete_submission(owner.id, s.submission.id).await.unwrap());
        assert!(
            storage
                .get_evaluation(owner.id, s.submission.id)
                .await
                .unwrap()
                .is_none()
        );

        let fetched = storage.get_assignment(owner.id, a.id).await.unwrap().unwrap();
        assert_eq!(fetched.submission_count, 0);
    }
}
