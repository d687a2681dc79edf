use serde::Serialize;
use ts_rs::TS;

use crate::grading::AcademicStatus;
use crate::models::PaginationInfo;

/// 提交列表项（含学生与作业信息）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListItem {
    pub id: i64,
    pub assignment_id: i64,
    pub assignment_title: String,
    pub student_id: i64,
    pub student_name: String,
    pub content: Option<String>,
    pub attachment: Option<String>,
    pub grade: Option<f64>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

// 提交列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct SubmissionListResponse {
    pub items: Vec<SubmissionListItem>,
    pub pagination: PaginationInfo,
}

/// 批改结果：本次评分以及重算后的学生班级统计
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/submission.ts")]
pub struct GradeUpdateResponse {
    pub submission_id: i64,
    pub grade: f64,
    /// 重算后的平均成绩（已回写选课记录）
    pub average_grade: f64,
    /// 重算后的出勤率（已回写选课记录）
    pub attendance: f64,
    pub status: AcademicStatus,
}
