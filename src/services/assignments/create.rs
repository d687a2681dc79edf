use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::access;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 在班级内发布作业
pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    class_id: i64,
    assignment_data: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：仅班级所有者可发布作业
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
            error!("Failed to get class by id: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching class",
                )),
            );
        }
    };

    if let Err(denied) = access::authorize_ownership(&teacher, class.teacher_id) {
        return Ok(denied.into_response());
    }

    if assignment_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Assignment title is required",
        )));
    }

    match storage
        .create_assignment(class_id, teacher.id, assignment_data)
        .await
    {
        Ok(assignment) => {
            info!(
                "Assignment '{}' published in class {} by {}",
                assignment.title, class_id, teacher.id
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(assignment, "Assignment published")))
        }
        Err(e) => {
            error!("Assignment creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Assignment creation failed: {e}"),
                )),
            )
        }
    }
}
