use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::access;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 删除作业（仅所属班级的所有者）
pub async fn delete_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let teacher = match access::authorize(access::resolve_identity(request), UserRole::Teacher) {
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

    // 所有权跟着班级走
    let class = match storage.get_class_by_id(assignment.class_id).await {
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

    match storage.delete_assignment(assignment_id).await {
        Ok(true) => {
            info!(
                "Assignment {} deleted by teacher {}",
                assignment_id, teacher.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assignment deleted")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "作业不存在",
        ))),
        Err(e) => {
            error!("Assignment deletion failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Assignment deletion failed: {e}"),
                )),
            )
        }
    }
}
