use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::classes::requests::{ClassQueryParams, CreateClassRequest, UpdateClassRequest};
use crate::models::users::entities::UserRole;
use crate::services::ClassService;
use crate::utils::{SafeClassCode, SafeClassIdI64};

// 懒加载的全局 CLASS_SERVICE 实例
static CLASS_SERVICE: Lazy<ClassService> = Lazy::new(ClassService::new_lazy);

// HTTP处理程序
pub async fn list_classes(
    req: HttpRequest,
    query: web::Query<ClassQueryParams>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.list_classes(&req, query.into_inner()).await
}

pub async fn create_class(
    req: HttpRequest,
    class_data: web::Json<CreateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .create_class(&req, class_data.into_inner())
        .await
}

pub async fn get_class_by_code(
    req: HttpRequest,
    code: SafeClassCode,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class_by_code(&req, code.0).await
}

pub async fn get_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.get_class(&req, class_id.0).await
}

pub async fn update_class(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    update_data: web::Json<UpdateClassRequest>,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE
        .update_class(&req, class_id.0, update_data.into_inner())
        .await
}

pub async fn delete_class(req: HttpRequest, class_id: SafeClassIdI64) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.delete_class(&req, class_id.0).await
}

pub async fn class_summary(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.class_summary(&req, class_id.0).await
}

pub async fn export_class_report(
    req: HttpRequest,
    class_id: SafeClassIdI64,
) -> ActixResult<HttpResponse> {
    CLASS_SERVICE.export_class_report(&req, class_id.0).await
}

// 配置路由
pub fn configure_classes_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes")
            .wrap(middlewares::RequireJWT)
            .service(
                // 教师查询自己创建的班级，学生查询自己加入的班级
                web::resource("").route(web::get().to(list_classes)).route(
                    web::post()
                        .to(create_class)
                        // 仅教师可创建班级
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/code/{code}").route(
                    web::get()
                        .to(get_class_by_code)
                        // 学生使用加入码查询班级信息，限流防止暴力枚举
                        .wrap(middlewares::RateLimit::join_code())
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            )
            .service(
                web::resource("/{class_id}")
                    // 所有者教师或已加入的学生查看班级详情
                    .route(web::get().to(get_class))
                    .route(
                        web::put()
                            .to(update_class)
                            // 仅所有者可更新，所有权在服务层校验
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    )
                    .route(
                        web::delete()
                            .to(delete_class)
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            )
            .service(
                web::resource("/{class_id}/summary").route(
                    web::get()
                        .to(class_summary)
                        // 成绩汇总仅所有者可见
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            )
            .service(
                web::resource("/{class_id}/report").route(
                    web::get()
                        .to(export_class_report)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            ),
    );
}
