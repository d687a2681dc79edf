use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::access;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 提交详情
///
/// 提交者本人或作业所属班级的所有者可以查看。
pub async fn get_submission(
    service: &SubmissionService,
    request: &HttpRequest,
    submission_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match access::resolve_identity(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Authentication required",
            )));
        }
    };

    let submission = match storage.get_submission_by_id(submission_id).await {
        Ok(Some(submission)) => submission,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::SubmissionNotFound,
                "提交不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    };

    // 提交者本人直接放行
    if user.role == UserRole::Student && submission.student_id == user.id {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "查询成功")));
    }

    // 教师必须是作业创建者
    if user.role == UserRole::Teacher {
        let assignment = match storage.get_assignment_by_id(submission.assignment_id).await {
            Ok(Some(assignment)) => assignment,
            Ok(None) => {
                return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                    ErrorCode::AssignmentNotFound,
                    "作业不存在",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询作业失败: {e}"),
                    )),
                );
            }
        };

        if access::authorize_ownership(&user, assignment.created_by).is_ok() {
            return Ok(HttpResponse::Ok().json(ApiResponse::success(submission, "查询成功")));
        }
    }

    Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
        ErrorCode::Forbidden,
        "没有查看该提交的权限",
    )))
}
