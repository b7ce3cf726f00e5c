//! 用户存储操作

use super::SeaOrmStorage;
use crate::entity::profiles::{
    ActiveModel as ProfileActiveModel, Column as ProfileColumn, Entity as Profiles,
};
use crate::entity::users::{ActiveModel, Column, Entity as Users, Model as UserModel};
use crate::errors::{AaieError, Result};
use crate::models::users::entities::{User, UserStatus};
use crate::storage::NewUser;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, Set, SqlErr,
    TransactionTrait,
};

// 唯一索引冲突说明邮箱已被占用
fn insert_user_error(e: DbErr) -> AaieError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AaieError::email_conflict(format!("邮箱已存在: {e}"))
        }
        _ => AaieError::database_operation(format!("创建用户失败: {e}")),
    }
}

impl SeaOrmStorage {
    /// 在同一事务中创建账号与资料
    pub async fn create_user_with_profile_impl(&self, new_user: NewUser) -> Result<User> {
        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| AaieError::database_operation(format!("开启事务失败: {e}")))?;

        let user = ActiveModel {
            email: Set(new_user.email.trim().to_lowercase()),
            password_hash: Set(new_user.password_hash),
            status: Set(UserStatus::Active.to_string()),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(insert_user_error)?;

        let profile = ProfileActiveModel {
            user_id: Set(user.id),
            name: Set(new_user.name.trim().to_string()),
            institution: Set(None),
            department: Set(None),
            role: Set(None),
            bio: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| AaieError::database_operation(format!("创建用户资料失败: {e}")))?;

        txn.commit()
            .await
            .map_err(|e| AaieError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(user.into_user(Some(profile.into_profile())))
    }

    /// 附带资料的用户
    async fn with_profile<C: ConnectionTrait>(conn: &C, model: UserModel) -> Result<User> {
        let profile = Profiles::find()
            .filter(ProfileColumn::UserId.eq(model.id))
            .one(conn)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询用户资料失败: {e}")))?;

        Ok(model.into_user(profile.map(|p| p.into_profile())))
    }

    /// 通过 ID 获取用户
    pub async fn get_user_by_id_impl(&self, id: i64) -> Result<Option<User>> {
        let result = Users::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询用户失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(Self::with_profile(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 通过邮箱获取用户（不区分大小写）
    pub async fn get_user_by_email_impl(&self, email: &str) -> Result<Option<User>> {
        let result = Users::find()
            .filter(Column::Email.eq(email.trim().to_lowercase()))
            .one(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("查询用户失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(Self::with_profile(&self.db, model).await?)),
            None => Ok(None),
        }
    }

    /// 更新最后登录时间
    pub async fn update_last_login_impl(&self, id: i64) -> Result<bool> {
        let now = chrono::Utc::now().timestamp();
        let result = Users::update_many()
            .col_expr(Column::LastLogin, sea_orm::sea_query::Expr::value(now))
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(id))
            .exec(&self.db)
            .await
            .map_err(|e| AaieError::database_operation(format!("更新登录时间失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, teacher};
    use crate::errors::AaieError;
    use crate::storage::{NewUser, Storage};

    #[tokio::test]
    async fn test_create_user_with_profile() {
        let storage = memory_storage().await;
        let user = teacher(&storage, "Lecturer@Example.edu").await;

        assert_eq!(user.email, "lecturer@example.edu");
        assert!(user.is_active());
        let profile = user.profile.expect("profile created with user");
        assert_eq!(profile.user_id, user.id);
        assert_eq!(profile.name, "Dr Example");

        let found = storage
            .get_user_by_email("LECTURER@example.edu")
            .await
            .unwrap()
            .expect("lookup is case-insensitive");
        assert_eq!(found.id, user.id);
        assert!(found.profile.is_some());
    }

    #[tokio::test]
    async fn test_duplicate_email_rolls_back() {
        let storage = memory_storage().await;
        teacher(&storage, "dup@example.edu").await;

        let result = storage
            .create_user_with_profile(NewUser {
                email: "dup@example.edu".into(),
                password_hash: "hash".into(),
                name: "Second".into(),
            })
            .await;
        assert!(matches!(result, Err(AaieError::EmailConflict(_))));
        assert_eq!(
            storage
                .get_user_by_email("dup@example.edu")
                .await
                .unwrap()
                .unwrap()
                .profile
                .unwrap()
                .name,
            "Dr Example"
        );
    }

    #[tokio::test]
    async fn test_update_last_login() {
        let storage = memory_storage().await;
        let user = teacher(&storage, "login@example.edu").await;
        assert!(user.last_login.is_none());

        assert!(storage.update_last_login(user.id).await.unwrap());
        assert!(!storage.update_last_login(user.id + 100).await.unwrap());

        let reloaded = storage.get_user_by_id(user.id).await.unwrap().unwrap();
        assert!(reloaded.last_login.is_some());
    }
}
