//! 评估实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "evaluations")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub submission_id: i64,
    pub classification: String,
    pub confidence: f64,
    pub conceptual: i32,
    pub application: i32,
    pub evaluation: i32,
    pub writing: i32,
    #[sea_orm(column_type = "Text")]
    pub ai_feedback: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub teacher_notes: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::submissions::Entity",
        from = "Column::SubmissionId",
        to = "super::submissions::Column::Id"
    )]
    Submission,
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submission.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_evaluation(self) -> crate::models::evaluations::entities::Evaluation {
        use crate::models::evaluations::entities::{Classification, Evaluation, RubricScores};
        use chrono::{DateTime, Utc};

        let scores = RubricScores {
            conceptual: self.conceptual,
            application: self.application,
            evaluation: self.evaluation,
            writing: self.writing,
        };
        Evaluation {
            id: self.id,
            submission_id: self.submission_id,
            classification: self
                .classification
                .parse::<Classification>()
                .unwrap_or(Classification::Hybrid),
            confidence: self.confidence,
            levels: scores.levels(),
            scores,
            ai_feedback: self.ai_feedback,
            teacher_notes: self.teacher_notes,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
