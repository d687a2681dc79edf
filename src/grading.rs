//! 成绩与出勤计算引擎
//!
//! 纯函数模块：根据学生的已评分提交计算平均成绩、学业状态和出勤率，
//! 并将各学生结果汇总为班级统计。所有计算同步、无共享状态，
//! 批改、班级详情、成绩汇总与报表导出共用同一套逻辑。

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::errors::{ClassHubError, Result};

/// 及格线：平均分达到该值为通过
pub const PASS_THRESHOLD: f64 = 7.0;
/// 补考线：平均分达到该值但未及格时进入补考
pub const REMEDIATION_THRESHOLD: f64 = 5.0;

// 学业状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub enum AcademicStatus {
    Passed,      // 通过
    Remediation, // 补考
    Failed,      // 未通过
}

impl std::fmt::Display for AcademicStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AcademicStatus::Passed => write!(f, "Passed"),
            AcademicStatus::Remediation => write!(f, "Remediation"),
            AcademicStatus::Failed => write!(f, "Failed"),
        }
    }
}

/// 班级统计汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grading.ts")]
pub struct ClassSummary {
    pub average: f64,
    pub passed: i64,
    pub remediation: i64,
    pub failed: i64,
}

// 保留两位小数
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// 保留一位小数
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// 计算最终平均成绩
///
/// `grades` 为该学生在班级内所有已评分提交的分数，可以为空（平时成绩按 0.0 计）。
/// `final_exam` 为可选的期末考试成绩：存在且非负时，最终成绩为平时平均分与
/// 期末成绩的均值；为负时视为未参加期末考试。
///
/// 分数必须为有限非负数，否则返回 `InvalidInput`；空列表不是错误。
/// 结果保留两位小数。
pub fn compute_average(grades: &[f64], final_exam: Option<f64>) -> Result<f64> {
    for &grade in grades {
        if !grade.is_finite() || grade < 0.0 {
            return Err(ClassHubError::invalid_input(format!(
                "grade value out of domain: {grade}"
            )));
        }
    }
    if let Some(exam) = final_exam
        && !exam.is_finite()
    {
        return Err(ClassHubError::invalid_input(format!(
            "final exam score out of domain: {exam}"
        )));
    }

    let activity_average = if grades.is_empty() {
        0.0
    } else {
        grades.iter().sum::<f64>() / grades.len() as f64
    };

    let final_average = match final_exam {
        Some(exam) if exam >= 0.0 => (activity_average + exam) / 2.0,
        _ => activity_average,
    };

    Ok(round2(final_average))
}

/// 根据平均成绩判定学业状态
///
/// 阈值为固定设计常量，不支持按班级配置。
pub fn classify(average: f64) -> AcademicStatus {
    if average >= PASS_THRESHOLD {
        AcademicStatus::Passed
    } else if average >= REMEDIATION_THRESHOLD {
        AcademicStatus::Remediation
    } else {
        AcademicStatus::Failed
    }
}

/// 计算出勤率（提交作业数占作业总数的百分比）
///
/// 班级没有作业时出勤率为 0.0（定义行为，不是错误）。
/// 提交数超过作业总数时按总数截断，结果不会超过 100.0。保留一位小数。
pub fn compute_attendance(total_assignments: usize, submitted_count: usize) -> f64 {
    if total_assignments == 0 {
        return 0.0;
    }
    let submitted = submitted_count.min(total_assignments);
    round1(submitted as f64 / total_assignments as f64 * 100.0)
}

/// 汇总班级统计
///
/// 输入为各学生的最终平均成绩（已经过 [`compute_average`] 计算），
/// 输出班级平均分与通过/补考/未通过人数。空班级平均分为 0.0。
pub fn aggregate_class(averages: &[f64]) -> ClassSummary {
    let average = if averages.is_empty() {
        0.0
    } else {
        round2(averages.iter().sum::<f64>() / averages.len() as f64)
    };

    let mut passed = 0i64;
    let mut remediation = 0i64;
    let mut failed = 0i64;
    for &avg in averages {
        match classify(avg) {
            AcademicStatus::Passed => passed += 1,
            AcademicStatus::Remediation => remediation += 1,
            AcademicStatus::Failed => failed += 1,
        }
    }

    ClassSummary {
        average,
        passed,
        remediation,
        failed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_of_plain_grades() {
        assert_eq!(compute_average(&[6.0, 7.5, 8.0], None).unwrap(), 7.17);
        assert_eq!(compute_average(&[10.0], None).unwrap(), 10.0);
    }

    #[test]
    fn test_average_with_final_exam() {
        // 平时平均 6.0，期末 8.0 -> (6.0 + 8.0) / 2
        assert_eq!(compute_average(&[5.0, 7.0], Some(8.0)).unwrap(), 7.0);
        // 期末为 0 分也参与计算
        assert_eq!(compute_average(&[8.0], Some(0.0)).unwrap(), 4.0);
    }

    #[test]
    fn test_negative_final_exam_is_treated_as_absent() {
        assert_eq!(compute_average(&[6.0, 8.0], Some(-1.0)).unwrap(), 7.0);
    }

    #[test]
    fn test_empty_grades_degrade_to_zero() {
        assert_eq!(compute_average(&[], None).unwrap(), 0.0);
        assert_eq!(classify(0.0), AcademicStatus::Failed);
        // 没有平时成绩但有期末成绩
        assert_eq!(compute_average(&[], Some(8.0)).unwrap(), 4.0);
    }

    #[test]
    fn test_average_rejects_out_of_domain_grades() {
        assert!(compute_average(&[6.0, -1.0], None).is_err());
        assert!(compute_average(&[f64::NAN], None).is_err());
        assert!(compute_average(&[f64::INFINITY], None).is_err());
        assert!(compute_average(&[6.0], Some(f64::NAN)).is_err());
    }

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(7.0), AcademicStatus::Passed);
        assert_eq!(classify(6.999), AcademicStatus::Remediation);
        assert_eq!(classify(5.0), AcademicStatus::Remediation);
        assert_eq!(classify(4.999), AcademicStatus::Failed);
        assert_eq!(classify(10.0), AcademicStatus::Passed);
    }

    #[test]
    fn test_attendance() {
        assert_eq!(compute_attendance(0, 0), 0.0);
        assert_eq!(compute_attendance(10, 7), 70.0);
        assert_eq!(compute_attendance(4, 3), 75.0);
        assert_eq!(compute_attendance(3, 1), 33.3);
    }

    #[test]
    fn test_attendance_clamps_inconsistent_counts() {
        // 提交数大于作业总数属于数据不一致，结果不能超过 100
        assert_eq!(compute_attendance(10, 12), 100.0);
    }

    #[test]
    fn test_aggregate_class() {
        let summary = aggregate_class(&[8.0, 6.0, 3.0]);
        assert_eq!(summary.average, 5.67);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.remediation, 1);
        assert_eq!(summary.failed, 1);
    }

    #[test]
    fn test_aggregate_empty_class() {
        let summary = aggregate_class(&[]);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.passed, 0);
        assert_eq!(summary.remediation, 0);
        assert_eq!(summary.failed, 0);
    }

    #[test]
    fn test_pure_functions_are_idempotent() {
        let grades = [6.0, 7.5, 8.0];
        assert_eq!(
            compute_average(&grades, None).unwrap(),
            compute_average(&grades, None).unwrap()
        );
        assert_eq!(classify(6.5), classify(6.5));
        assert_eq!(compute_attendance(10, 7), compute_attendance(10, 7));
    }

    #[test]
    fn test_report_scenario() {
        // 班级 4 次作业；S1 提交 3 次，成绩 [6.0, 7.5, 8.0]，无期末考试
        let s1_average = compute_average(&[6.0, 7.5, 8.0], None).unwrap();
        assert_eq!(s1_average, 7.17);
        assert_eq!(classify(s1_average), AcademicStatus::Passed);
        assert_eq!(compute_attendance(4, 3), 75.0);

        // S2 平均 4.0（未通过），班级汇总
        let summary = aggregate_class(&[s1_average, 4.0]);
        assert_eq!(summary.average, 5.58);
        assert_eq!(summary.passed, 1);
        assert_eq!(summary.remediation, 0);
        assert_eq!(summary.failed, 1);
    }
}
