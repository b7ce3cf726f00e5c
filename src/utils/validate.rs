use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static HTTP_URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("Invalid url regex"));

pub const NAME_MIN_LEN: usize = 2;
pub const PASSWORD_MIN_LEN: usize = 6;
pub const TITLE_MAX_LEN: usize = 200;
pub const UNIT_CODE_MAX_LEN: usize = 20;
pub const STUDENT_ID_MAX_LEN: usize = 100;
pub const CONTENT_MIN_LEN: usize = 10;

// 按字符计数，非 ASCII 标题也按可见长度校验
fn char_len(s: &str) -> usize {
    s.trim().chars().count()
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Err("Please enter a valid email address");
    }
    Ok(())
}

pub fn validate_name(name: &str) -> Result<(), &'static str> {
    if char_len(name) < NAME_MIN_LEN {
        return Err("Name must be at least 2 characters");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码：至少 6 个字符，且不在常见弱密码列表中
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    if password.chars().count() < PASSWORD_MIN_LEN {
        errors.push("Password must be at least 6 characters");
    }

    let weak_passwords = [
        "123456",
        "1234567",
        "12345678",
        "123456789",
        "password",
        "password1",
        "qwerty",
        "qwerty123",
        "abc123",
        "111111",
        "letmein",
        "welcome",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

pub fn validate_title(title: &str) -> Result<(), &'static str> {
    match char_len(title) {
        0 => Err("Title is required"),
        n if n > TITLE_MAX_LEN => Err("Title must be at most 200 characters"),
        _ => Ok(()),
    }
}

pub fn validate_unit_code(unit_code: &str) -> Result<(), &'static str> {
    match char_len(unit_code) {
        0 => Err("Unit code is required"),
        n if n > UNIT_CODE_MAX_LEN => Err("Unit code must be at most 20 characters"),
        _ => Ok(()),
    }
}

/// 截止时间必须严格晚于 now
pub fn validate_due_at(due_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<(), &'static str> {
    if due_at <= now {
        return Err("Due date must be in the future");
    }
    Ok(())
}

/// 评分标准必须是 JSON 对象
pub fn validate_rubric(rubric: &serde_json::Value) -> Result<(), &'static str> {
    if !rubric.is_object() {
        return Err("Rubric must be a JSON object");
    }
    Ok(())
}

pub fn validate_student_id(student_id: &str) -> Result<(), &'static str> {
    match char_len(student_id) {
        0 => Err("Student ID is required"),
        n if n > STUDENT_ID_MAX_LEN => Err("Student ID must be at most 100 characters"),
        _ => Ok(()),
    }
}

pub fn validate_content(content: &str) -> Result<(), &'static str> {
    if char_len(content) < CONTENT_MIN_LEN {
        return Err("Submission content must be at least 10 characters");
    }
    Ok(())
}

pub fn validate_file_url(url: &str) -> Result<(), &'static str> {
    if !HTTP_URL_RE.is_match(url.trim()) {
        return Err("File URL must be a valid http(s) URL");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_email() {
        assert!(validate_email("lecturer@uni.edu.au").is_ok());
        assert!(validate_email("  padded@example.com ").is_ok());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("a@b").is_err());
    }

    #[test]
    fn test_name() {
        assert!(validate_name("Al").is_ok());
        assert!(validate_name("A").is_err());
        assert!(validate_name("   ").is_err());
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("abc");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 6 characters")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password");
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
        assert!(validate_password_simple("123456").is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("marking-season").is_valid);
        assert!(validate_password_simple("s3cret!").is_ok());
    }

    #[test]
    fn test_title_and_unit_code_bounds() {
        assert!(validate_title("Essay 1").is_ok());
        assert!(validate_title("").is_err());
        assert!(validate_title(&"x".repeat(200)).is_ok());
        assert!(validate_title(&"x".repeat(201)).is_err());

        assert!(validate_unit_code("ITEC3001").is_ok());
        assert!(validate_unit_code(" ").is_err());
        assert!(validate_unit_code(&"U".repeat(21)).is_err());
    }

    #[test]
    fn test_due_at_must_be_future() {
        let now = Utc::now();
        assert!(validate_due_at(now + Duration::hours(1), now).is_ok());
        assert!(validate_due_at(now, now).is_err());
        assert!(validate_due_at(now - Duration::days(1), now).is_err());
    }

    #[test]
    fn test_rubric_shape() {
        assert!(validate_rubric(&serde_json::json!({"criteria": []})).is_ok());
        assert!(validate_rubric(&serde_json::json!(["a"])).is_err());
        assert!(validate_rubric(&serde_json::json!("text")).is_err());
    }

    #[test]
    fn test_submission_fields() {
        assert!(validate_student_id("s123456789").is_ok());
        assert!(validate_student_id("").is_err());
        assert!(validate_student_id(&"s".repeat(101)).is_err());

        assert!(validate_content("This is long enough").is_ok());
        assert!(validate_content("too short").is_err());

        assert!(validate_file_url("https://files.example.com/essay.pdf").is_ok());
        assert!(validate_file_url("http://localhost:9000/a.docx").is_ok());
        assert!(validate_file_url("ftp://example.com/a.pdf").is_err());
        assert!(validate_file_url("not a url").is_err());
    }
}
