use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师资料，与账号一对一
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/profile.ts")]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub name: String,
    pub institution: Option<String>,
    pub department: Option<String>,
    // 职位，例如 "Senior Lecturer"
    pub role: Option<String>,
    pub bio: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
