use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教学资料
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct Material {
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    pub description: Option<String>,
    /// 附件下载 token
    pub attachment: Option<String>,
    pub published_at: chrono::DateTime<chrono::Utc>,
}
