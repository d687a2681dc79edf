use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::common::PaginationQuery;
use crate::models::submissions::requests::{CreateSubmissionRequest, GradeSubmissionRequest};
use crate::models::users::entities::UserRole;
use crate::services::SubmissionService;
use crate::utils::{SafeAssignmentIdI64, SafeSubmissionIdI64};

// 懒加载的全局 SUBMISSION_SERVICE 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// HTTP处理程序
pub async fn submit(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    submission_data: web::Json<CreateSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .submit(&req, assignment_id.0, submission_data.into_inner())
        .await
}

pub async fn list_assignment_submissions(
    req: HttpRequest,
    assignment_id: SafeAssignmentIdI64,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_assignment_submissions(&req, assignment_id.0, query.into_inner())
        .await
}

pub async fn list_submissions(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, query.into_inner())
        .await
}

pub async fn get_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .get_submission(&req, submission_id.0)
        .await
}

pub async fn grade_submission(
    req: HttpRequest,
    submission_id: SafeSubmissionIdI64,
    grade_data: web::Json<GradeSubmissionRequest>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .grade_submission(&req, submission_id.0, grade_data.into_inner())
        .await
}

// 配置路由
//
// 作业内提交的 scope 与 /api/v1/assignments 前缀重叠，必须在作业路由之前注册。
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments/{assignment_id}/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    .route(
                        web::post()
                            .to(submit)
                            // 仅已加入班级的学生可提交，选课校验在服务层
                            .wrap(middlewares::RequireRole::new(&UserRole::Student)),
                    )
                    .route(
                        web::get()
                            .to(list_assignment_submissions)
                            // 仅作业创建者可查看全部提交
                            .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                    ),
            ),
    );

    cfg.service(
        web::scope("/api/v1/submissions")
            .wrap(middlewares::RequireJWT)
            .service(
                // 教师取自己作业收到的提交，学生取自己的提交
                web::resource("").route(web::get().to(list_submissions)),
            )
            .service(web::resource("/{submission_id}").route(web::get().to(get_submission)))
            .service(
                web::resource("/{submission_id}/grade").route(
                    web::put()
                        .to(grade_submission)
                        // 仅作业创建者可批改，所有权在服务层校验
                        .wrap(middlewares::RequireRole::new(&UserRole::Teacher)),
                ),
            ),
    );
}
