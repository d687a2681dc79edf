use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 已上传文件
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/file.ts")]
pub struct File {
    /// 下载 token，对外暴露的唯一标识
    pub download_token: String,
    pub original_name: String,
    /// 磁盘上的存储文件名
    #[serde(skip_serializing)]
    #[ts(skip)]
    pub stored_name: String,
    pub file_size: i64,
    pub file_type: String,
    pub user_id: i64,
    pub uploaded_at: chrono::DateTime<chrono::Utc>,
}
