use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::access;
use crate::models::assignments::requests::{AssignmentListQuery, AssignmentQueryParams};
use crate::models::classes::requests::ClassListQuery;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 列出指定班级的作业（所有者教师或已加入的学生）
pub async fn list_class_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    class_id: i64,
    query: AssignmentQueryParams,
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

    let class = match storage.get_class_by_id(class_id).await {
        Ok(Some(class)) => class,
        Ok(None) => {
            return Ok(HttpResponse::NotFound()
                .json(ApiResponse::error_empty(ErrorCode::ClassNotFound, "班级不存在")));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询班级失败: {e}"),
                )),
            );
        }
    };

    // 所有者教师或已加入的学生可以查看
    let is_member = match user.role {
        UserRole::Teacher => class.teacher_id == user.id,
        UserRole::Student => matches!(
            storage.get_enrollment(class_id, user.id).await,
            Ok(Some(_))
        ),
    };
    if !is_member {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::NotClassMember,
            "您不是该班级成员",
        )));
    }

    let list_query = AssignmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        class_id: Some(class_id),
        search: query.search,
        ..Default::default()
    };

    match storage.list_assignments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询作业列表失败: {e}"),
            )),
        ),
    }
}

/// 列出当前用户可见的全部作业
///
/// 教师取自己发布的作业，学生取自己加入的所有班级的作业。
pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    query: AssignmentQueryParams,
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

    let mut list_query = AssignmentListQuery {
        page: Some(query.pagination.page),
        size: Some(query.pagination.size),
        search: query.search,
        ..Default::default()
    };

    match user.role {
        UserRole::Teacher => {
            list_query.created_by = Some(user.id);
        }
        UserRole::Student => {
            // 先取学生加入的班级
            let classes_query = ClassListQuery {
                page: Some(1),
                size: Some(10000),
                teacher_id: None,
                search: None,
            };
            let class_ids = match storage
                .list_student_classes_with_pagination(user.id, classes_query)
                .await
            {
                Ok(resp) => resp.items.into_iter().map(|c| c.id).collect::<Vec<_>>(),
                Err(e) => {
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            format!("查询选课记录失败: {e}"),
                        ),
                    ));
                }
            };
            list_query.class_ids = Some(class_ids);
        }
    }

    match storage.list_assignments_with_pagination(list_query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询作业列表失败: {e}"),
            )),
        ),
    }
}
