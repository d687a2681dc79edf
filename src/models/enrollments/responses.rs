use super::entities::Enrollment;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

/// 班级成员（选课记录 + 学生基本信息）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct ClassMember {
    #[serde(flatten)]
    #[ts(flatten)]
    pub enrollment: Enrollment,
    pub student_name: String,
    pub student_email: String,
}

// 班级成员列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct ClassMemberListResponse {
    pub items: Vec<ClassMember>,
    pub pagination: PaginationInfo,
}
