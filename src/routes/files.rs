use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::services::FileService;
use crate::utils::SafeFileToken;

// 懒加载的全局 FILE_SERVICE 实例
static FILE_SERVICE: Lazy<FileService> = Lazy::new(FileService::new_lazy);

pub async fn handle_upload(req: HttpRequest, payload: Multipart) -> ActixResult<HttpResponse> {
    FILE_SERVICE.handle_upload(&req, payload).await
}

pub async fn handle_download(req: HttpRequest, token: SafeFileToken) -> ActixResult<HttpResponse> {
    FILE_SERVICE.handle_download(&req, token.0).await
}

// 配置路由
pub fn configure_file_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/files")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("/upload")
                    .route(web::post().to(handle_upload))
                    .wrap(middlewares::RateLimit::file_upload()),
            )
            .route("/download/{token}", web::get().to(handle_download)),
    );
}
