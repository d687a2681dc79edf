use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::SubmissionService;
use crate::access;
use crate::models::submissions::requests::CreateSubmissionRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 学生提交作业
///
/// 提交者必须已加入作业所属的班级。同一作业重复提交会覆盖旧内容，
/// 不会产生新的提交记录。
pub async fn submit(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    submission_data: CreateSubmissionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：仅学生可提交
    let student = match access::authorize(access::resolve_identity(request), UserRole::Student) {
        Ok(user) => user,
        Err(denied) => return Ok(denied.into_response()),
    };

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
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

    // 提交者必须是班级成员
    match storage.get_enrollment(assignment.class_id, student.id).await {
        Ok(Some(_)) => {}
        Ok(None) => {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::NotClassMember,
                "您不属于该作业所在的班级",
            )));
        }
        Err(e) => {
            error!("Error checking enrollment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to check enrollment",
                )),
            );
        }
    }

    // 内容与附件至少提供一个
    let has_content = submission_data
        .content
        .as_ref()
        .is_some_and(|c| !c.trim().is_empty());
    if !has_content && submission_data.attachment.is_none() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::SubmissionFailed,
            "Submission must include content or an attachment",
        )));
    }

    match storage
        .upsert_submission(assignment_id, student.id, submission_data)
        .await
    {
        Ok(submission) => {
            info!(
                "Student {} submitted assignment {} (submission {})",
                student.id, assignment_id, submission.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(submission, "提交成功")))
        }
        Err(e) => {
            error!("Submission failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::SubmissionFailed,
                    format!("Submission failed: {e}"),
                )),
            )
        }
    }
}
