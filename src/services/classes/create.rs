use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::ClassService;
use crate::access;
use crate::models::classes::requests::CreateClassRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

pub async fn create_class(
    service: &ClassService,
    request: &HttpRequest,
    mut class_data: CreateClassRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：仅教师可创建班级
    let teacher = match access::authorize(access::resolve_identity(request), UserRole::Teacher) {
        Ok(user) => user,
        Err(denied) => return Ok(denied.into_response()),
    };

    if class_data.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Class name is required",
        )));
    }

    class_data.teacher_id = Some(teacher.id);

    // 创建班级（加入码由存储层生成）
    match storage.create_class(class_data).await {
        Ok(class) => {
            info!(
                "Class {} created successfully by {} (join code: {})",
                class.name, teacher.id, class.join_code
            );
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(class, "Class created successfully")))
        }
        Err(e) => {
            error!("Class creation failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::ClassCreationFailed,
                    format!("Class creation failed: {e}"),
                )),
            )
        }
    }
}
