use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::access;
use crate::models::classes::requests::{ClassListQuery, ClassQueryParams};
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 班级列表：教师看到自己创建的班级，学生看到自己加入的班级
pub async fn list_classes(
    service: &ClassService,
    request: &HttpRequest,
    query: ClassQueryParams,
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

    let list_query = ClassListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        teacher_id: None,
        search: query.search,
    };

    let result = match user.role {
        UserRole::Teacher => {
            let query = ClassListQuery {
                teacher_id: Some(user.id),
                ..list_query
            };
            storage.list_classes_with_pagination(query).await
        }
        UserRole::Student => {
            storage
                .list_student_classes_with_pagination(user.id, list_query)
                .await
        }
    };

    match result {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询班级列表失败: {e}"),
            )),
        ),
    }
}
