use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::access;
use crate::grading;
use crate::models::submissions::requests::GradeSubmissionRequest;
use crate::models::submissions::responses::GradeUpdateResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 批改提交
/// PUT /submissions/{id}/grade
///
/// 仅作业所属班级的所有者可批改。写入分数后，学生在该班级的平均成绩
/// 与出勤率会在同一事务内重算并回写到选课记录，响应携带重算结果。
pub async fn grade_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
    grade_data: GradeSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：仅教师可批改
    let teacher = match access::authorize(access::resolve_identity(request), UserRole::Teacher) {
        Ok(user) => user,
        Err(denied) => return Ok(denied.into_response()),
    };

    // 分数域检查：有限非负
    let grade = grade_data.grade;
    if !grade.is_finite() || grade < 0.0 {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::InvalidGrade,
            format!("Grade value out of domain: {grade}"),
        )));
    }

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get submission by id: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching submission",
                )),
            );
        }
    };

    // 所有权校验：批改人必须是作业创建者
    let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "作业不存在",
            )));
        }
        Err(e) => {
            error!("Failed to get assignment by id: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching assignment",
                )),
            );
        }
    };

    if let Err(denied) = access::authorize_ownership(&teacher, assignment.created_by) {
        return Ok(denied.into_response());
    }

    // 写入分数并重算统计（单事务）
    match storage.grade_submission(submission_id, grade).await {
        Ok(Some(stats)) => {
            info!(
                "Submission {} graded {} by teacher {}, new average {}",
                submission_id, grade, teacher.id, stats.average_grade
            );
            let response = GradeUpdateResponse {
                submission_id,
                grade,
                average_grade: stats.average_grade,
                attendance: stats.attendance,
                status: grading::classify(stats.average_grade),
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Grade recorded")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::SubmissionNotFound,
            "提交不存在",
        ))),
        Err(e) => {
            error!("Grading failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Grading failed: {e}"),
                )),
            )
        }
    }
}
