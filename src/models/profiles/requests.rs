use serde::Deserialize;
use ts_rs::TS;

/// 更新资料请求，未提供的字段保持不变
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../dashboard/src/types/generated/profile.ts")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub institution: Option<String>,
    pub department: Option<String>,
    pub role: Option<String>,
    pub bio: Option<String>,
}
