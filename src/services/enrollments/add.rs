use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EnrollmentService;
use crate::access;
use crate::models::enrollments::requests::AddStudentRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 教师将学生直接加入自己的班级
pub async fn add_student(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
    add_data: AddStudentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：仅班级所有者可添加学生
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

    // 目标用户必须存在且为学生
    let student = match storage.get_user_by_id(add_data.student_id).await {
        Ok(Some(user)) if user.role == UserRole::Student => user,
        Ok(Some(_)) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Target user is not a student",
            )));
        }
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::UserNotFound, "学生不存在")));
        }
        Err(e) => {
            error!("Failed to get user by id: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Internal server error while fetching user",
                )),
            );
        }
    };

    match storage.get_enrollment(class_id, student.id).await {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::AlreadyEnrolled,
                "Student is already enrolled in this class",
            )));
        }
        Ok(None) => {}
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

    match storage.enroll_student(class_id, student.id).await {
        Ok(enrollment) => Ok(HttpResponse::Created()
            .json(ApiResponse::success(enrollment, "Student added to class"))),
        Err(e) => {
            error!("Error adding student to class: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    "Failed to add student to class",
                )),
            )
        }
    }
}
