use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::EnrollmentService;
use crate::access;
use crate::models::enrollments::requests::JoinClassRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 学生通过加入码加入班级
pub async fn join_class(
    service: &EnrollmentService,
    request: &HttpRequest,
    join_data: JoinClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：仅学生可加入班级
    let student = match access::authorize(access::resolve_identity(request), UserRole::Student) {
        Ok(user) => user,
        Err(denied) => return Ok(denied.into_response()),
    };

    let join_code = join_data.join_code.trim().to_uppercase();
    if join_code.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Join code is required",
        )));
    }

    // 按加入码定位班级
    let class = match storage.get_class_by_code(&join_code).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::JoinCodeInvalid,
                "Class not found or join code is invalid",
            )));
        }
        Err(e) => {
            error!("Error getting class by join code: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ClassJoinFailed,
                    "Failed to look up class",
                )),
            );
        }
    };

    // 同一学生最多加入一次
    match storage.get_enrollment(class.id, student.id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error(
                ErrorCode::AlreadyEnrolled,
                class,
                "You have already joined this class",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Error checking enrollment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ClassJoinFailed,
                    "Failed to check enrollment",
                )),
            );
        }
    }

    match storage.enroll_student(class.id, student.id).await {
        Ok(enrollment) => {
            info!("Student {} joined class {}", student.id, class.id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(
                enrollment,
                format!("You joined class '{}'", class.name),
            )))
        }
        Err(e) => {
            error!("Error joining class: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ClassJoinFailed,
                    "Failed to join class",
                )),
            )
        }
    }
}
