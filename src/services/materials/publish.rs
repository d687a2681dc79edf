use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::MaterialService;
use crate::access;
use crate::models::materials::requests::CreateMaterialRequest;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 发布教学资料
pub async fn publish_material(
    service: &MaterialService,
    request: &HttpRequest,
    material_data: CreateMaterialRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：仅教师可发布资料
    let teacher = match access::authorize(access::resolve_identity(request), UserRole::Teacher) {
        Ok(user) => user,
        Err(denied) => return Ok(denied.into_response()),
    };

    if material_data.title.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Material title is required",
        )));
    }

    match storage.create_material(teacher.id, material_data).await {
        Ok(material) => {
            info!(
                "Material '{}' published by teacher {}",
                material.title, teacher.id
            );
            Ok(HttpResponse::Created().json(ApiResponse::success(material, "Material published")))
        }
        Err(e) => {
            error!("Material publishing failed: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Material publishing failed: {e}"),
                )),
            )
        }
    }
}
