use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::enrollments::requests::{AddStudentRequest, EnrollmentQuery, JoinClassRequest};
use crate::models::users::entities::UserRole;
use crate::services::EnrollmentService;
use crate::utils::{SafeClassIdI64, SafeStudentIdI64};

// 懒加载的全局 ENROLLMENT_SERVICE 实例
static ENROLLMENT_SERVICE: Lazy<EnrollmentService> = Lazy::new(EnrollmentService::new_lazy);

// HTTP处理程序
pub async fn join_class(
    req: HttpRequest,
    join_data: web::Json<JoinClassRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .join_class(&req, join_data.into_inner())
        .await
}

pub async fn add_student(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    add_data: web::Json<AddStudentRequest>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .add_student(&req, class_id.0, add_data.into_inner())
        .await
}

pub async fn remove_student(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .remove_student(&req, class_id.0, student_id.0)
        .await
}

pub async fn list_members(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    query: web::Query<EnrollmentQuery>,
) -> ActixResult<HttpResponse> {
    ENROLLMENT_SERVICE
        .list_members(&req, class_id.0, query.into_inner())
        .await
}

// 配置路由
//
// 注意：这些 scope 与 /api/v1/classes 前缀重叠，必须在班级路由之前注册。
pub fn configure_enrollments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/join")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(join_class)
                        // 学生通过加入码加入班级，限流防止暴力枚举
                        .wrap(middlewares::RateLimit::join_code())
                        .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                ),
            ),
    );

    cfg.service(
        web::scope("/api/v1/classes/{class_id}/students")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::get()
                            .to(list_members)
                            // 成员列表（含缓存统计）仅所有者可见
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    )
                    .route(
                        web::post()
                            .to(add_student)
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            )
            .service(
                web::resource("/{student_id}").route(
                    web::delete()
                        .to(remove_student)
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            ),
    );
}
