use serde::Deserialize;
use ts_rs::TS;

// 提交作业请求（内容与附件至少提供一个）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct CreateSubmissionRequest {
    pub content: Option<String>,
    pub attachment: Option<String>,
}

// 批改请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeSubmissionRequest {
    pub grade: f64,
}

// 提交列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub assignment_id: Option<i64>,
    pub student_id: Option<i64>,
    /// 按作业所属班级筛选（需要 join 作业表）
    pub class_id: Option<i64>,
    /// 按作业创建者筛选（教师查看自己收到的全部提交）
    pub created_by: Option<i64>,
    /// 仅列出已评分的提交
    pub graded_only: Option<bool>,
}
