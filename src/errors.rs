//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_aaie_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub enum AaieError {
            $($variant(String),)*
        }

        impl AaieError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(AaieError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(AaieError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(AaieError::$variant(msg) => msg,)*
                }
            }
        }

        paste::paste! {
            impl AaieError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        AaieError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_aaie_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    CachePluginNotFound("E002", "Cache Plugin Not Found"),
    DatabaseConfig("E003", "Database Configuration Error"),
    DatabaseConnection("E004", "Database Connection Error"),
    DatabaseOperation("E005", "Database Operation Error"),
    FileOperation("E006", "File Operation Error"),
    Validation("E007", "Validation Error"),
    NotFound("E008", "Resource Not Found"),
    Serialization("E009", "Serialization Error"),
    DateParse("E010", "Date Parse Error"),
    Authentication("E011", "Authentication Error"),
    Evaluation("E012", "Evaluation Error"),
    EmailConflict("E013", "Email Conflict"),
}

impl AaieError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for AaieError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for AaieError {}

impl From<sea_orm::DbErr> for AaieError {
    fn from(err: sea_orm::DbErr) -> Self {
        AaieError::DatabaseOperation(err.to_string())
    }
}

impl From<std::io::Error> for AaieError {
    fn from(err: std::io::Error) -> Self {
        AaieError::FileOperation(err.to_string())
    }
}

impl From<serde_json::Error> for AaieError {
    fn from(err: serde_json::Error) -> Self {
        AaieError::Serialization(err.to_string())
    }
}

impl From<chrono::ParseError> for AaieError {
    fn from(err: chrono::ParseError) -> Self {
        AaieError::DateParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AaieError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(AaieError::cache_connection("test").code(), "E001");
        assert_eq!(AaieError::database_operation("test").code(), "E005");
        assert_eq!(AaieError::validation("test").code(), "E007");
        assert_eq!(AaieError::evaluation("test").code(), "E012");
        assert_eq!(AaieError::email_conflict("test").code(), "E013");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            AaieError::not_found("assignment").error_type(),
            "Resource Not Found"
        );
        assert_eq!(AaieError::validation("test").error_type(), "Validation Error");
    }

    #[test]
    fn test_db_error_conversion() {
        let err: AaieError = sea_orm::DbErr::Custom("boom".into()).into();
        assert_eq!(err.code(), "E005");
        assert!(err.message().contains("boom"));
    }

    #[test]
    fn test_format_simple() {
        let err = AaieError::validation("Title is required");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("Title is required"));
    }
}
