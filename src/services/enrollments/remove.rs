use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EnrollmentService;
use crate::access;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 将学生移出班级
pub async fn remove_student(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
    student_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：仅班级所有者可移除学生
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

    match storage.remove_enrollment(class_id, student_id).await {
        Ok(true) => {
            info!(
                "Student {} removed from class {} by teacher {}",
                student_id, class_id, teacher.id
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Student removed from class")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::EnrollmentNotFound,
            "Student is not enrolled in this class",
        ))),
        Err(e) => {
            error!("Error removing student from class: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to remove student from class",
                )),
            )
        }
    }
}
