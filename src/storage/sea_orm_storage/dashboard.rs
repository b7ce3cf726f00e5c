//! 仪表盘统计

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::submissions::{Column as SubmissionColumn, Entity as Submissions};
use crate::errors::{AaieError, Result};
use crate::models::assignments::entities::AssignmentStatus;
use crate::models::dashboard::responses::{
    ActivityItem, ActivityKind, DashboardOverview, RecentAssignment,
};
use crate::models::submissions::entities::SubmissionStatus;
use chrono::{DateTime, Utc};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

const RECENT_ASSIGNMENTS: usize = 3;
const RECENT_SUBMISSION_ACTIVITY: u64 = 2;
const RECENT_ACTIVITY: usize = 3;

fn ts(timestamp: i64) -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(timestamp, 0).unwrap_or_default()
}

#[derive(Default)]
struct SubmissionTally {
    total: i64,
    draft: i64,
}

impl SeaOrmStorage {
    pub async fn get_dashboard_overview_impl(&self, owner_id: i64) -> Result<DashboardOverview> {
        let now = Utc::now();

        let assignments = Assignments::find()
            .filter(AssignmentColumn::OwnerId.eq(owner_id))
            .order_by_desc(AssignmentColumn::CreatedAt)
            .order_by_desc(AssignmentColumn::Id)
            .all(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询作业失败: {e}")))?;

        let assignment_ids: Vec<i64> = assignments.iter().map(|a| a.id).collect();

        // (assignment_id, status)
        let rows: Vec<(i64, String)> = if assignment_ids.is_empty() {
            Vec::new()
        } else {
            Submissions::find()
                .select_only()
                .column(SubmissionColumn::AssignmentId)
                .column(SubmissionColumn::Status)
                .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids.clone()))
                .into_tuple()
                .all(&self.db)
                .await
                .map_err(|e| AaieError::database_operation(format!("统计提交失败: {e}")))?
        };

        let draft = SubmissionStatus::Draft.to_string();
        let published = SubmissionStatus::Published.to_string();
        let mut tallies: HashMap<i64, SubmissionTally> = HashMap::new();
        let mut pending_reviews = 0;
        let mut published_feedback = 0;
        for (assignment_id, status) in &rows {
            let tally = tallies.entry(*assignment_id).or_default();
            tally.total += 1;
            if *status == draft {
                tally.draft += 1;
                pending_reviews += 1;
            } else if *status == published {
                published_feedback += 1;
            }
        }

        let recent_assignments = assignments
            .iter()
            .take(RECENT_ASSIGNMENTS)
            .map(|a| {
                let tally = tallies.get(&a.id);
                RecentAssignment {
                    id: a.id,
                    title: a.title.clone(),
                    unit_code: a.unit_code.clone(),
                    due_at: ts(a.due_at),
                    status: AssignmentStatus::at(ts(a.due_at), now),
                    submission_count: tally.map(|t| t.total).unwrap_or(0),
                    pending_count: tally.map(|t| t.draft).unwrap_or(0),
                }
            })
            .collect();

        // 最近动态：两条最新提交 + 一条最新作业
        let mut recent_activity: Vec<ActivityItem> = Vec::new();
        if !assignment_ids.is_empty() {
            let latest = Submissions::find()
                .filter(SubmissionColumn::AssignmentId.is_in(assignment_ids))
                .order_by_desc(SubmissionColumn::CreatedAt)
                .order_by_desc(SubmissionColumn::Id)
                .limit(RECENT_SUBMISSION_ACTIVITY)
                .all(&self.db)
                .await
                .map_err(|e| AaieError::database_operation(format!("查询最近提交失败: {e}")))?;

            for submission in latest {
                let assignment = assignments.iter().find(|a| a.id == submission.assignment_id);
                recent_activity.push(ActivityItem {
                    id: submission.id,
                    kind: ActivityKind::Submission,
                    title: format!(
                        "New submission for {}",
                        assignment.map(|a| a.title.as_str()).unwrap_or("Assignment")
                    ),
                    unit_code: assignment
                        .map(|a| a.unit_code.clone())
                        .unwrap_or_else(|| "N/A".to_string()),
                    at: ts(submission.created_at),
                });
            }
        }
        if let Some(newest) = assignments.first() {
            recent_activity.push(ActivityItem {
                id: newest.id,
                kind: ActivityKind::Assignment,
                title: format!("Assignment created: {}", newest.title),
                unit_code: newest.unit_code.clone(),
                at: ts(newest.created_at),
            });
        }
        // 稳定排序，时间相同时提交在前
        recent_activity.sort_by(|a, b| b.at.cmp(&a.at));
        recent_activity.truncate(RECENT_ACTIVITY);

        Ok(DashboardOverview {
            total_assignments: assignments.len() as i64,
            total_submissions: rows.len() as i64,
            pending_reviews,
            published_feedback,
            recent_assignments,
            recent_activity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{assignment, memory_storage, submission, teacher};
    use crate::models::dashboard::responses::ActivityKind;
    use crate::models::submissions::entities::SubmissionStatus;
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_empty_dashboard() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "empty@example.edu").await;

        let overview = storage.get_dashboard_overview(owner.id).await.unwrap();
        assert_eq!(overview.total_assignments, 0);
        assert_eq!(overview.total_submissions, 0);
        assert!(overview.recent_assignments.is_empty());
        assert!(overview.recent_activity.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_counts() {
        let storage = memory_storage().await;
        let owner = teacher(&storage, "dash@example.edu").await;
        let other = teacher(&storage, "dash2@example.edu").await;

        let mut ids = Vec::new();
        for title in ["One", "Two", "Three", "Four"] {
            ids.push(assignment(&storage, owner.id, title).await.id);
        }
        let foreign = assignment(&storage, other.id, "Foreign").await;
        submission(&storage, other.id, foreign.id, "x1").await;

        let s1 = submission(&storage, owner.id, ids[3], "s1").await;
        submission(&storage, owner.id, ids[3], "s2").await;
        submission(&storage, owner.id, ids[0], "s3").await;
        storage
            .update_submission_status(owner.id, s1.submission.id, SubmissionStatus::Published)
            .await
            .unwrap();

        let overview = storage.get_dashboard_overview(owner.id).await.unwrap();
        assert_eq!(overview.total_assignments, 4);
        assert_eq!(overview.total_submissions, 3);
        assert_eq!(overview.pending_reviews, 2);
        assert_eq!(overview.published_feedback, 1);

        assert_eq!(overview.recent_assignments.len(), 3);
        let newest = &overview.recent_assignments[0];
        assert_eq!(newest.title, "Four");
        assert_eq!(newest.submission_count, 2);
        assert_eq!(newest.pending_count, 1);

        assert_eq!(overview.recent_activity.len(), 3);
        let kinds: Vec<ActivityKind> = overview.recent_activity.iter().map(|a| a.kind).collect();
        assert_eq!(
            kinds.iter().filter(|k| **k == ActivityKind::Submission).count(),
            2
        );
        assert!(kinds.contains(&ActivityKind::Assignment));
        assert!(
            overview
                .recent_activity
                .windows(2)
                .all(|w| w[0].at >= w[1].at)
        );
    }
}
