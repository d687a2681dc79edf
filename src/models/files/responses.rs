use serde::Serialize;
use ts_rs::TS;

// 文件上传响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct FileUploadResponse {
    pub download_token: String,
    pub file_name: String,
    pub size: i64,
    pub content_type: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
