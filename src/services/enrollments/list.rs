use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::EnrollmentService;
use crate::access;
use crate::models::enrollments::requests::EnrollmentQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 列出班级成员（含缓存的平均成绩与出勤率）
pub async fn list_members(
    service: &EnrollmentService,
    request: &HttpRequest,
    class_id: i64,
    query: EnrollmentQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：仅班级所有者可查看成员统计
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

    match storage
        .list_class_members_with_pagination(class_id, query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询成员列表失败: {e}"),
            )),
        ),
    }
}
