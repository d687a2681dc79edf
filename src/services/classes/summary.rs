//! 班级成绩汇总
//!
//! 把成绩引擎的逐学生计算结果卷成班级视图：每个学生一行
//! （平均分、学业状态、出勤率、提交数），外加全班汇总。
//! 报表导出复用这里的构建逻辑。

use std::collections::HashMap;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use super::ClassService;
use crate::access;
use crate::grading;
use crate::models::classes::entities::Class;
use crate::models::classes::responses::{ClassSummaryResponse, StudentPerformance};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub async fn class_summary(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：仅班级所有者可查看汇总
    let teacher = match access::authorize(access::resolve_identity(request), UserRole::Teacher) {
        Ok(user) => user,
        Err(denied) => return Ok(denied.into_response()),
    };

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::ClassNotFound, "班级不存在")));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询班级失败: {e}"),
                )),
            );
        }
    };

    if let Err(denied) = access::authorize_ownership(&teacher, class.teacher_id) {
        return Ok(denied.into_response());
    }

    match build_class_summary(&storage, &class).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("汇总班级成绩失败: {e}"),
            )),
        ),
    }
}

/// 构建班级汇总数据
///
/// 从完整的成员与提交集合出发逐学生计算，不依赖选课记录里的缓存值，
/// 汇总视图因此总是反映当前的评分状态。
pub(crate) async fn build_class_summary(
    storage: &Arc<dyn Storage>,
    class: &Class,
) -> crate::errors::Result<ClassSummaryResponse> {
    let members = storage.list_class_members(class.id).await?;
    let total_assignments = storage.count_class_assignments(class.id).await?;
    let submissions = storage.list_submissions_by_class(class.id).await?;

    // 按学生分组：已评分的分数集合与提交总数
    let mut grades_by_student: HashMap<i64, Vec<f64>> = HashMap::new();
    let mut submitted_by_student: HashMap<i64, i64> = HashMap::new();
    for submission in &submissions {
        *submitted_by_student.entry(submission.student_id).or_insert(0) += 1;
        if let Some(grade) = submission.grade {
            grades_by_student
                .entry(submission.student_id)
                .or_default()
                .push(grade);
        }
    }

    let mut students = Vec::with_capacity(members.len());
    let mut averages = Vec::with_capacity(members.len());

    for member in &members {
        let student_id = member.enrollment.student_id;
        let grades = grades_by_student.remove(&student_id).unwrap_or_default();
        let submitted_count = submitted_by_student.get(&student_id).copied().unwrap_or(0);

        let average = grading::compute_average(&grades, None)?;
        let status = grading::classify(average);
        let attendance =
            grading::compute_attendance(total_assignments as usize, submitted_count as usize);

        averages.push(average);
        students.push(StudentPerformance {
            student_id,
            student_name: member.student_name.clone(),
            average,
            status,
            attendance,
            submitted_count,
        });
    }

    let summary = grading::aggregate_class(&averages);

    Ok(ClassSummaryResponse {
        class_id: class.id,
        class_name: class.name.clone(),
        total_assignments,
        students,
        summary,
    })
}
