use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::errors::AaieError;
use crate::models::{ApiResponse, ErrorCode, auth::requests::RegisterRequest};
use crate::storage::{NewUser, Storage};
use crate::utils::password::hash_password;
use crate::utils::validate::{validate_email, validate_name, validate_password_simple};

use super::AuthService;

pub async fn handle_register(
    service: &AuthService,
    register_request: RegisterRequest,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request)?;

    let email = register_request.email.trim().to_lowercase();
    let name = register_request.name.trim().to_string();

    // 1. 校验字段
    if let Err(msg) = validate_email(&email) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
    }

    if let Err(msg) = validate_name(&name) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserNameInvalid, msg)));
    }

    if let Err(msg) = validate_password_simple(&register_request.password) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
    }

    if register_request.password != register_request.confirm_password {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::UserPasswordInvalid,
            "Passwords do not match",
        )));
    }

    // 2. 检查邮箱是否已存在
    if let Err(response) = check_email_exists(&storage, &email).await {
        return Ok(response);
    }

    // 3. 哈希密码
    let password_hash = match hash_password(&register_request.password) {
        Ok(hash) => hash,
        Err(e) => {
            tracing::error!("Password hashing failed: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            );
        }
    };

    // 4. 创建账号与资料
    match storage
        .create_user_with_profile(NewUser {
            email,
            password_hash,
            name,
        })
        .await
    {
        Ok(user) => {
            tracing::info!("User {} registered", user.email);
            Ok(HttpResponse::Created().json(ApiResponse::success(user, "注册成功")))
        }
        Err(e) => Ok(create_failure_response(&e)),
    }
}

// 并发注册时唯一索引兜底，冲突同样返回 409
fn create_failure_response(e: &AaieError) -> HttpResponse {
    match e {
        AaieError::EmailConflict(_) => email_exists_response(),
        _ => {
            tracing::error!("Register failed: {}", e);
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::RegisterFailed,
                "Register failed",
            ))
        }
    }
}

fn email_exists_response() -> HttpResponse {
    HttpResponse::Conflict().json(ApiResponse::error_empty(
        ErrorCode::UserEmailAlreadyExists,
        "Email already exists",
    ))
}

async fn check_email_exists(storage: &Arc<dyn Storage>, email: &str) -> Result<(), HttpResponse> {
    match storage.get_user_by_email(email).await {
        Ok(Some(_)) => Err(email_exists_response()),
        Ok(None) => Ok(()),
        Err(e) => {
            tracing::error!("Register failed: {}", e);
            Err(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::RegisterFailed,
                    "Register failed",
                )),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;

    #[test]
    fn test_unique_conflict_maps_to_409() {
        let response = create_failure_response(&AaieError::email_conflict("users.email"));
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = create_failure_response(&AaieError::database_operation("disk full"));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
