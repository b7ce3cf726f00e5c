use sea_orm::sea_query::LikeExpr;
use sea_orm::{ColumnTrait, Condition};

/// 转义 LIKE 模式中的通配符
pub fn escape_like_pattern(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `column LIKE '%input%' ESCAPE '\'`
///
/// SQLite 没有默认转义字符，必须显式声明 ESCAPE。
pub fn contains_condition<C: ColumnTrait>(column: C, input: &str) -> Condition {
    let pattern = format!("%{}%", escape_like_pattern(input));
    Condition::all().add(column.like(LikeExpr::new(pattern).escape('\\')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_pattern() {
        assert_eq!(escape_like_pattern("ITEC"), "ITEC");
        assert_eq!(escape_like_pattern("100%"), "100\\%");
        assert_eq!(escape_like_pattern("s_1"), "s\\_1");
        assert_eq!(escape_like_pattern("a\\b"), "a\\\\b");
    }
}
