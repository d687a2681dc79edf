use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 选课记录：学生与班级的关联，携带缓存的出勤率与平均成绩
///
/// 两个缓存字段在批改提交时由成绩引擎重算并回写（见 storage 层），
/// 读取成员列表时无需再扫描提交表。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/enrollment.ts")]
pub struct Enrollment {
    pub id: i64,
    pub class_id: i64,
    pub student_id: i64,
    /// 缓存的出勤率（0.0 - 100.0）
    pub attendance: f64,
    /// 缓存的平均成绩
    pub average_grade: f64,
    pub joined_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
