pub mod feedback;
pub mod get;
pub mod notes;
pub mod reevaluate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::evaluator::{EvaluationInput, Evaluator};
use crate::models::ErrorCode;
use crate::models::evaluations::requests::UpdateTeacherNotesRequest;
use crate::services::{internal_error, not_found};
use crate::storage::Storage;

pub struct EvaluationService {
    storage: Option<Arc<dyn Storage>>,
    evaluator: Option<Arc<dyn Evaluator>>,
}

impl EvaluationService {
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

    pub async fn get_evaluation(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        get::get_evaluation(self, request, owner_id, submission_id).await
    }

    pub async fn reevaluate(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        reevaluate::reevaluate(self, request, owner_id, submission_id).await
    }

    pub async fn regenerate_feedback(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        feedback::regenerate_feedback(self, request, owner_id, submission_id).await
    }

    pub async fn update_teacher_notes(
        &self,
        request: &HttpRequest,
        owner_id: i64,
        submission_id: i64,
        req: UpdateTeacherNotesRequest,
    ) -> ActixResult<HttpResponse> {
        notes::update_teacher_notes(self, request, owner_id, submission_id, req).await
    }
}

/// 评估器需要的提交内容与作业信息
pub(crate) struct EvaluationSource {
    content: String,
    assignment_title: String,
    rubric: Option<serde_json::Value>,
}

impl EvaluationSource {
    pub(crate) fn input(&self) -> EvaluationInput<'_> {
        EvaluationInput {
            content: &self.content,
            assignment_title: &self.assignment_title,
            rubric: self.rubric.as_ref(),
        }
    }
}

// 读取提交及其作业；不存在或不属于调用者时直接给出错误响应
pub(crate) async fn load_source(
    storage: &Arc<dyn Storage>,
    owner_id: i64,
    submission_id: i64,
) -> Result<EvaluationSource, HttpResponse> {
    let detail = match storage.get_submission(owner_id, submission_id).await {
        Ok(Some(detail)) => detail,
        Ok(None) => return Err(not_found(ErrorCode::SubmissionNotFound, "提交不存在")),
        Err(e) => return Err(internal_error("查询提交失败", e)),
    };

    let rubric = match storage
        .get_assignment(owner_id, detail.submission.assignment_id)
        .await
    {
        Ok(assignment) => assignment.and_then(|a| a.rubric),
        Err(e) => return Err(internal_error("查询作业失败", e)),
    };

    Ok(EvaluationSource {
        content: detail.submission.content,
        assignment_title: detail.assignment.title,
        rubric,
    })
}
