use serde::Deserialize;
use ts_rs::TS;

// 学生通过加入码加入班级
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct JoinClassRequest {
    pub join_code: String,
}

// 教师将学生加入班级
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct AddStudentRequest {
    pub student_id: i64,
}

// 班级成员列表查询参数
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct EnrollmentQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
}
