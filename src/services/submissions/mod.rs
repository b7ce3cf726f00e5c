pub mod create;
pub mod delete;
pub mod detail;
pub mod list;
pub mod status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::evaluator::Evaluator;
use crate::models::submissions::requests::{
    CreateSubmissionRequest, SubmissionListParams, UpdateSubmissionStatusRequest,
};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
    evaluator: Option<Arc<dyn Evaluator>>,
}

impl SubmissionService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            evaluator: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_app_data(request),
        }
    }

    pub(crate) fn get_evaluator(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Evaluator>> {
        match &self.evaluator {
            Some(evaluator) => Ok(evaluator.clone()),
            None => super::evaluator_from_app_data(request),
        }
    }

    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        query: SubmissionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, owner_id, query).await
    }

    pub async fn create_submission(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        req: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_submission(self, request, owner_id, req).await
    }

    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, owner_id, submission_id).await
    }

    pub async fn update_submission_status(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        submission_id: i64,
        req: UpdateSubmissionStatusRequest,
    ) -> ActixResult<HttpResponse> {
        status::update_submission_status(self, request, owner_id, submission_id, req).await
    }

    pub async fn delete_submission(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_submission(self, request, owner_id, submission_id).await
    }
}
