use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::materials::requests::{CreateMaterialRequest, MaterialQueryParams};
use crate::models::users::entities::UserRole;
use crate::services::MaterialService;

// 懒加载的全局 MATERIAL_SERVICE 实例
static MATERIAL_SERVICE: Lazy<MaterialService> = Lazy::new(MaterialService::new_lazy);

// HTTP处理程序
pub async fn publish_material(
    req: HttpRequest,
    material_data: web::Json<CreateMaterialRequest>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .publish_material(&req, material_data.into_inner())
        .await
}

pub async fn list_materials(
    req: HttpRequest,
    query: web::Query<MaterialQueryParams>,
) -> ActixResult<HttpResponse> {
    MATERIAL_SERVICE
        .list_materials(&req, query.into_inner())
        .await
}

// 配置路由
pub fn configure_materials_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/materials")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 任何已认证用户可浏览资料
                    .route(web::get().to(list_materials))
                    .route(
                        web::post()
                            .to(publish_material)
                            // 仅教师可发布资料
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            ),
    );
}
