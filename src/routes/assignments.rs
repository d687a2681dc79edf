use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::assignments::requests::{AssignmentQueryParams, CreateAssignmentRequest};
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;
use crate::utils::{SafeAssignmentIdI64, SafeClassIdI64};

// 懒加载的全局 ASSIGNMENT_SERVICE 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// HTTP处理程序
pub async fn create_assignment(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    assignment_data: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, class_id.0, assignment_data.into_inner())
        .await
}

pub async fn list_class_assignments(
    req: HttpRequest,
    class_id: SafeClassIdI64,
    query: web::Query<AssignmentQueryParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_class_assignments(&req, class_id.0, query.into_inner())
        .await
}

pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentQueryParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

pub async fn get_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .get_assignment(&req, assignment_id.0)
        .await
}

pub async fn delete_assignment(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .delete_assignment(&req, assignment_id.0)
        .await
}

// 配置路由
//
// 班级内作业的 scope 与 /api/v1/classes 前缀重叠，必须在班级路由之前注册。
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/classes/{class_id}/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 班级成员查看作业列表
                    .route(web::get().to(list_class_assignments))
                    .route(
                        web::post()
                            .to(create_assignment)
                            // 仅班级所有者可发布作业
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            ),
    );

    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                // 教师取自己发布的作业，学生取自己加入的班级的作业
                web::resource("").route(web::get().to(list_assignments)),
            )
            .service(
                web::resource("/{assignment_id}")
                    .route(web::get().to(get_assignment))
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            ),
    );
}
