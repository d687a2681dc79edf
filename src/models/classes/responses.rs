use super::entities::Class;
use crate::grading::{AcademicStatus, ClassSummary};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 班级列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Class>,
}

/// 班级详情（含实时统计）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassDetailResponse {
    pub class: Class,
    pub teacher_name: String,
    pub total_students: i64,
    /// 班级内所有已评分提交的平均分
    pub grade_average: f64,
    /// 班级学生出勤率均值
    pub attendance_average: f64,
}

/// 单个学生在班级内的表现
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct StudentPerformance {
    pub student_id: i64,
    pub student_name: String,
    pub average: f64,
    pub status: AcademicStatus,
    pub attendance: f64,
    pub submitted_count: i64,
}

/// 班级成绩汇总响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct ClassSummaryResponse {
    pub class_id: i64,
    pub class_name: String,
    pub total_assignments: i64,
    pub students: Vec<StudentPerformance>,
    pub summary: ClassSummary,
}
