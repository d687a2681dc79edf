use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    // 唯一 ID
    pub id: i64,
    // 所属班级 ID
    pub class_id: i64,
    // 创建者（教师）ID
    pub created_by: i64,
    // 标题
    pub title: String,
    // 描述
    pub description: Option<String>,
    // 截止时间
    pub due_date: Option<chrono::DateTime<chrono::Utc>>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
