//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub unit_code: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub due_at: i64,
    // JSON 文本
    #[sea_orm(column_type = "Text", nullable)]
    pub rubric: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::OwnerId",
        to = "super::users::Column::Id"
    )]
    Owner,
    #[sea_orm(has_many = "super::submissions::Entity")]
    Submissions,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Owner.def()
    }
}

impl Related<super::submissions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Submissions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型，状态按 now 推导
impl Model {
    pub fn into_assignment(
        self,
        submission_count: i64,
        now: chrono::DateTime<chrono::Utc>,
    ) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::{Assignment, AssignmentStatus};
        use chrono::{DateTime, Utc};

        let due_at = DateTime::<Utc>::from_timestamp(self.due_at, 0).unwrap_or_default();
        Assignment {
            id: self.id,
            owner_id: self.owner_id,
            title: self.title,
            unit_code: self.unit_code,
            description: self.description,
            status: AssignmentStatus::at(due_at, now),
            due_at,
            rubric: self
                .rubric
                .and_then(|raw| serde_json::from_str(&raw).ok()),
            submission_count,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
