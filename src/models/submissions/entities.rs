use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 作业提交
///
/// 每个学生对同一作业只保留一条记录，重复提交会覆盖原内容并刷新提交时间。
/// `grade` 在教师批改前为空，未批改的提交不参与平均分计算。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct Submission {
    pub id: i64,
    pub assignment_id: i64,
    pub student_id: i64,
    pub content: Option<String>,
    /// 附件下载 token（通过文件接口上传后获得）
    pub attachment: Option<String>,
    pub grade: Option<f64>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
