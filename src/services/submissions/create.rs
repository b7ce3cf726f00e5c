use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::evaluator::EvaluationInput;
use crate::models::{ApiResponse, ErrorCode, submissions::requests::CreateSubmissionRequest};
use crate::services::{bad_request, internal_error, not_found};
use crate::utils::validate::{validate_content, validate_file_url, validate_student_id};

fn validate_request(req: &CreateSubmissionRequest) -> Result<(), &'static str> {
    validate_student_id(&req.student_id)?;
    validate_content(&req.content)?;
    if let Some(url) = req.file_url.as_deref().filter(|u| !u.trim().is_empty()) {
        validate_file_url(url)?;
    }
    Ok(())
}

pub async fn create_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    owner_id: i64,
    req: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;
    let evaluator = service.get_evaluator(request)?;

    if let Err(msg) = validate_request(&req) {
        return Ok(bad_request(ErrorCode::SubmissionInvalid, msg));
    }

    // 1. 作业必须存在且属于当前用户
    let assignment = match storage.get_assignment(owner_id, req.assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => return Ok(not_found(ErrorCode::AssignmentNotFound, "作业不存在")),
        Err(e) => return Ok(internal_error("创建提交失败", e)),
    };

    // 2. 生成评估草稿
    let input = EvaluationInput {
        content: &req.content,
        assignment_title: &assignment.title,
        rubric: assignment.rubric.as_ref(),
    };
    let draft = match evaluator.evaluate(&input).await {
        Ok(draft) => draft,
        Err(e) => {
            tracing::error!("Evaluator {} failed: {}", evaluator.name(), e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::EvaluationFailed,
                    "生成评估失败",
                )),
            );
        }
    };

    // 3. 提交与评估在同一事务中写入
    match storage
        .create_submission_with_evaluation(owner_id, req, draft)
        .await
    {
        Ok(Some(detail)) => {
            tracing::info!(
                "Submission {} created for assignment {}",
                detail.submission.id,
                assignment.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(detail, "提交创建成功")))
        }
        // 作业在校验之后被删除
        Ok(None) => Ok(not_found(ErrorCode::AssignmentNotFound, "作业不存在")),
        Err(e) => Ok(internal_error("创建提交失败", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(student_id: &str, content: &str, file_url: Option<&str>) -> CreateSubmissionRequest {
        CreateSubmissionRequest {
            assignment_id: 1,
            student_id: student_id.to_string(),
            content: content.to_string(),
            file_url: file_url.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_request() {
        assert!(validate_request(&request("s123456789", "A reflective essay.", None)).is_ok());
        assert!(validate_request(&request("s1", "A reflective essay.", Some(""))).is_ok());
        assert!(
            validate_request(&request(
                "s1",
                "A reflective essay.",
                Some("https://files.example.edu/essay.pdf")
            ))
            .is_ok()
        );
        assert!(validate_request(&request("", "A reflective essay.", None)).is_err());
        assert!(validate_request(&request("s1", "too short", None)).is_err());
        assert!(
            validate_request(&request("s1", "A reflective essay.", Some("ftp://host/x"))).is_err()
        );
    }
}
