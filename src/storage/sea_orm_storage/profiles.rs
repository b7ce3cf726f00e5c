//! 教师资料存储操作

use super::SeaOrmStorage;
use crate::entity::profiles::{ActiveModel, Column, Entity as Profiles};
use crate::errors::{AaieError, Result};
use crate::models::profiles::{entities::Profile, requests::UpdateProfileRequest};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, IntoActiveModel, QueryFilter, Set};

// 空白字符串视为清空
fn normalize(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

impl SeaOrmStorage {
    pub async fn get_profile_impl(&self, user_id: i64) -> Result<Option<Profile>> {
        let result = Profiles::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询资料失败: {e}")))?;

        Ok(result.map(|m| m.into_profile()))
    }

    /// 更新资料，只修改请求中提供的字段
    pub async fn update_profile_impl(
        &self,
        user_id: i64,
        update: UpdateProfileRequest,
    ) -> Result<Option<Profile>> {
        let existing = Profiles::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询资料失败: {e}")))?;

        let Some(model) = existing else {
            return Ok(None);
        };

        let mut active: ActiveModel = model.into_active_model();
        if let Some(name) = update.name {
            active.name = Set(name.trim().to_string());
        }
        if let Some(institution) = update.institution {
            active.institution = Set(normalize(institution));
        }
        if let Some(department) = update.department {
            active.department = Set(normalize(department));
        }
        if let Some(role) = update.role {
            active.role = Set(normalize(role));
        }
        if let Some(bio) = update.bio {
            active.bio = Set(normalize(bio));
        }
        active.updated_at = Set(chrono::Utc::now().timestamp());

        let updated = active
            .update(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("更新资料失败: {e}")))?;

        Ok(Some(updated.into_profile()))
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, teacher};
    use crate::models::profiles::requests::UpdateProfileRequest;
    use crate::storage::Storage;

    #[tokio::test]
    async fn test_partial_profile_update() {
        let storage = memory_storage().await;
        let user = teacher(&storage, "profile@example.edu").await;

        let updated = storage
            .update_profile(
                user.id,
                UpdateProfileRequest {
                    institution: Some("Example University".into()),
                    role: Some("Senior Lecturer".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "Dr Example");
        assert_eq!(updated.institution.as_deref(), Some("Example University"));
        assert_eq!(updated.role.as_deref(), Some("Senior Lecturer"));
        assert!(updated.bio.is_none());

        let cleared = storage
            .update_profile(
                user.id,
                UpdateProfileRequest {
                    institution: Some("  ".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(cleared.institution.is_none());
        assert_eq!(cleared.role.as_deref(), Some("Senior Lecturer"));
    }

    #[tokio::test]
    async fn test_missing_profile() {
        let storage = memory_storage().await;
        assert!(storage.get_profile(999).await.unwrap().is_none());
        assert!(
            storage
                .update_profile(999, UpdateProfileRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }
}
