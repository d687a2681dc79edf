use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::MaterialService;
use crate::models::materials::requests::MaterialQueryParams;
use crate::models::{ApiResponse, ErrorCode};

/// 列出教学资料（任何已认证用户可见）
pub async fn list_materials(
    service: &MaterialService,
    request: &HttpRequest,
    query: MaterialQueryParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_materials_with_pagination(query.pagination.page, query.pagination.size, query.search)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询资料列表失败: {e}"),
            )),
        ),
    }
}
