pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, UpdateAssignmentRequest,
};
use crate::storage::Storage;
use crate::utils::validate::{validate_due_at, validate_rubric, validate_title, validate_unit_code};

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_app_data(request),
        }
    }

    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        query: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, owner_id, query).await
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, owner_id, req).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, owner_id, assignment_id).await
    }

    pub async fn update_assignment(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        assignment_id: i64,
        req: UpdateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_assignment(self, request, owner_id, assignment_id, req).await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, owner_id, assignment_id).await
    }
}

/// 创建与更新共用的字段校验，`None` 表示未提供
pub(crate) fn validate_assignment_fields(
    title: Option<&str>,
    unit_code: Option<&str>,
    due_at: Option<DateTime<Utc>>,
    rubric: Option<&serde_json::Value>,
    now: DateTime<Utc>,
) -> Result<(), &'static str> {
    if let Some(title) = title {
        validate_title(title)?;
    }
    if let Some(unit_code) = unit_code {
        validate_unit_code(unit_code)?;
    }
    if let Some(due_at) = due_at {
        validate_due_at(due_at, now)?;
    }
    if let Some(rubric) = rubric {
        validate_rubric(rubric)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_validate_assignment_fields() {
        let now = Utc::now();
        assert!(validate_assignment_fields(None, None, None, None, now).is_ok());
        assert!(
            validate_assignment_fields(
                Some("Essay"),
                Some("ITEC3001"),
                Some(now + Duration::days(1)),
                Some(&serde_json::json!({"criteria": []})),
                now,
            )
            .is_ok()
        );
        assert!(validate_assignment_fields(Some("  "), None, None, None, now).is_err());
        assert!(
            validate_assignment_fields(None, Some("ITEC3001-TOO-LONG-CODE"), None, None, now)
                .is_err()
        );
        assert!(
            validate_assignment_fields(None, None, Some(now - Duration::hours(1)), None, now)
                .is_err()
        );
        assert!(
            validate_assignment_fields(None, None, None, Some(&serde_json::json!([1, 2])), now)
                .is_err()
        );
    }
}
