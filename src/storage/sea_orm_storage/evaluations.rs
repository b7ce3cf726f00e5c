//! 评估存储操作
//!
//! 评估通过提交所属作业的创建者访问。

use super::SeaOrmStorage;
use crate::entity::evaluations::{ActiveModel, Column, Entity as Evaluations, Model};
use crate::errors::{AaieError, Result};
use crate::models::evaluations::entities::{Evaluation, EvaluationDraft};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};

impl SeaOrmStorage {
    /// 对 owner 可见的评估记录
    async fn find_owned_evaluation(
        &self,
        owner_id: i64,
        submission_id: i64,
    ) -> Result<Option<Model>> {
        if Self::find_owned_submission(&self.db, owner_id, submission_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        Evaluations::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询评估失败: {e}")))
    }

    pub async fn get_evaluation_impl(
        &self,
        owner_id: i64,
        submission_id: i64,
    ) -> Result<Option<Evaluation>> {
        Ok(self
            .find_owned_evaluation(owner_id, submission_id)
            .await?
            .map(|m| m.into_evaluation()))
    }

    /// 用新草稿替换分类、置信度、评分与反馈，保留教师批注
    pub async fn replace_evaluation_impl(
        &self,
        owner_id: i64,
        submission_id: i64,
        draft: EvaluationDraft,
    ) -> Result<Option<Evaluation>> {
        if Self::find_owned_submission(&self.db, owner_id, submission_id)
            .await?
            .is_none()
        {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();
        let existing = Evaluations::find()
            .filter(Column::SubmissionId.eq(submission_id))
            .one(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询评估失败: {e}")))?;

        let apply = |active: &mut ActiveModel| {
            active.classification = Set(draft.classification.to_string());
            active.confidence = Set(draft.confidence);
            active.conceptual = Set(draft.scores.conceptual);
            active.application = Set(draft.scores.application);
            active.evaluation = Set(draft.scores.evaluation);
            active.writing = Set(draft.scores.writing);
            active.ai_feedback = Set(draft.ai_feedback.clone());
            active.updated_at = Set(now);
        };

        let saved = match existing {
            Some(model) => {
                let mut active = model.into_active_model();
                apply(&mut active);
                active.update(&self.db).await
            }
            // 评估缺失时补建
            None => {
                let mut active = ActiveModel {
                    submission_id: Set(submission_id),
                    teacher_notes: Set(None),
                    created_at: Set(now),
                    ..Default::default()
                };
                apply(&mut active);
                active.insert(&self.db).await
            }
        }
        .map_err(|e| AaieError::database_operation(format!("保存评估失败: {e}")))?;

        Ok(Some(saved.into_evaluation()))
    }

    pub async fn update_ai_feedback_impl(
        &self,
        owner_id: i64,
        submission_id: i64,
        feedback: String,
    ) -> Result<Option<Evaluation>> {
        let Some(model) = self.find_owned_evaluation(owner_id, submission_id).await? else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into_active_model();
        active.ai_feedback = Set(feedback);
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("更新反馈失败: {e}")))?;

        Ok(Some(updated.into_evaluation()))
    }

    /// 更新教师批注，空白内容视为清除
    pub async fn update_teacher_notes_impl(
        &self,
        owner_id: i64,
        submission_id: i64,
        notes: Option<String>,
    ) -> Result<Option<Evaluation>> {
        let Some(model) = self.find_owned_evaluation(owner_id, submission_id).await? else {
            return Ok(None);
        };

        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        let mut active: ActiveModel = model.into_active_model();
        active.teacher_notes = Set(notes);
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("更新批注失败: {e}")))?;

        Ok(Some(updated.into_evaluation()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{assignment, memory_storage, submission, teacher};
    use crate::evaluator::MockEvaluator;
    use crate::models::evaluations::entities::Classification;
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_replace_keeps_teacher_notes() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "eval@example.edu").await;
        let a = assignment(&storage, owner.id, "Essay").await;
        let s = submission(&storage, owner.id, a.id, "s1").await;
        let id = s.submission.id;

        storage
            .update_teacher_notes(owner.id, id, Some("  Check references ".into()))
            .await
            .unwrap()
            .unwrap();

        let fresh = MockEvaluator::draft_from_draws([0.1, 0.1, 0.99, 0.99, 0.99, 0.99, 0.99]);
        let replaced = storage
            .replace_evaluation(owner.id, id, fresh)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(replaced.classification, Classification::Ai);
        assert_eq!(replaced.scores.as_array(), [4, 4, 4, 4]);
        assert_eq!(replaced.teacher_notes.as_deref(), Some("Check references"));
        assert_eq!(replaced.id, s.evaluation.unwrap().id);
    }

    #[tokio::test]
    async fn test_feedback_and_notes() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "notes@example.edu").await;
        let a = assignment(&storage, owner.id, "Essay").await;
        let id = submission(&storage, owner.id, a.id, "s1").await.submission.id;

        let updated = storage
            .update_ai_feedback(owner.id, id, "New feedback".into())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.ai_feedback, "New feedback");

        let cleared = storage
            .update_teacher_notes(owner.id, id, Some("   ".into()))
            .await
            .unwrap()
            .unwrap();
        assert!(cleared.teacher_notes.is_none());
    }

    #[tokio::test]
    async fn test_evaluation_hidden_from_other_owner() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "mine@example.edu").await;
        let other = teacher(&storage, "theirs@example.edu").await;
        let a = assignment(&storage, owner.id, "Essay").await;
        let id = submission(&storage, owner.id, a.id, "s1").await.submission.id;

        assert!(storage.get_evaluation(owner.id, id).await.unwrap().is_some());
        assert!(storage.get_evaluation(other.id, id).await.unwrap().is_none());
        assert!(
            storage
                .update_teacher_notes(other.id, id, Some("x".into()))
                .await
                .unwrap()
                .is_none()
        );
        assert!(
            storage
                .replace_evaluation(other.id, id, super::super::test_support::draft())
                .await
                .unwrap()
                .is_none()
        );
    }
}
