use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::access;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 作业详情（所有者教师或该班级的学生可见）
pub async fn get_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
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

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
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

    let is_member = match user.role {
        UserRole::Teacher => assignment.created_by == user.id,
        UserRole::Student => matches!(
            storage.get_enrollment(assignment.class_id, user.id).await,
            Ok(Some(_))
        ),
    };
    if !is_member {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotClassMember,
            "您不是该班级成员",
        )));
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "查询成功")))
}
