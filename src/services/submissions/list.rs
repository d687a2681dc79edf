use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::SubmissionService;
use crate::access;
use crate::models::common::PaginationQuery;
use crate::models::submissions::requests::SubmissionListQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 列出某作业的全部提交（仅所属班级的所有者）
pub async fn list_assignment_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    assignment_id: i64,
    query: PaginationQuery,
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

    if let Err(denied) = access::authorize_ownership(&teacher, assignment.created_by) {
        return Ok(denied.into_response());
    }

    let list_query = SubmissionListQuery {
        page: Some(query.page),
        size: Some(query.size),
        assignment_id: Some(assignment_id),
        ..Default::default()
    };

    match storage.list_submissions_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交列表失败: {e}"),
            )),
        ),
    }
}

/// 列出当前用户相关的提交
///
/// 教师看到自己发布的所有作业收到的提交（按提交时间倒序），
/// 学生看到自己的全部提交。
pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    query: PaginationQuery,
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

    let mut list_query = SubmissionListQuery {
        page: Some(query.page),
        size: Some(query.size),
        ..Default::default()
    };

    match user.role {
        UserRole::Teacher => list_query.created_by = Some(user.id),
        UserRole::Student => list_query.student_id = Some(user.id),
    }

    match storage.list_submissions_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交列表失败: {e}"),
            )),
        ),
    }
}
