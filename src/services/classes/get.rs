use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ClassService;
use crate::access;
use crate::grading;
use crate::models::classes::responses::ClassDetailResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 班级详情（含实时统计）
///
/// 班级所有者和已加入的学生可以查看。成绩均值从当前已评分提交实时计算，
/// 出勤均值取各选课记录的缓存值。
pub async fn get_class(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
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
    if user.role == UserRole::Teacher {
        if access::authorize_ownership(&user, class.teacher_id).is_err() {
            return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::ClassPermissionDenied,
                "您不是该班级的负责教师",
            )));
        }
    } else {
        match storage.get_enrollment(class_id, user.id).await {
            Ok(Some(_)) => {}
            Ok(None) => {
                return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::NotClassMember,
                    "您不是该班级成员",
                )));
            }
            Err(e) => {
                return Ok(
                    HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                        ErrorCode::InternalServerError,
                        format!("查询选课记录失败: {e}"),
                    )),
                );
            }
        }
    }

    let teacher_name = match storage.get_user_by_id(class.teacher_id).await {
        Ok(Some(teacher)) => teacher.name,
        _ => "Unknown".to_string(),
    };

    let total_students = storage.count_class_students(class_id).await.unwrap_or(0);

    // 成绩均值：取班级内所有已评分提交
    let submissions = match storage.list_submissions_by_class(class_id).await {
        Ok(submissions) => submissions,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询班级提交失败: {e}"),
                )),
            );
        }
    };
    let grades: Vec<f64> = submissions.iter().filter_map(|s| s.grade).collect();
    let grade_average = grading::aggregate_class(&grades).average;

    // 出勤均值：取各选课记录的缓存出勤率
    let members = storage.list_class_members(class_id).await.unwrap_or_default();
    let attendance_average = if members.is_empty() {
        0.0
    } else {
        let sum: f64 = members.iter().map(|m| m.enrollment.attendance).sum();
        (sum / members.len() as f64 * 10.0).round() / 10.0
    };

    let response = ClassDetailResponse {
        class,
        teacher_name,
        total_students,
        grade_average,
        attendance_average,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}

/// 学生通过加入码查询班级信息
pub async fn get_class_by_code(
    service: &ClassService,
    request: &HttpRequest,
    code: String,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_class_by_code(&code).await {
        Ok(Some(class)) => Ok(HttpResponse::Ok().json(ApiResponse::success(class, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::JoinCodeInvalid,
            "Class not found or join code is invalid",
        ))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询班级失败: {e}"),
            )),
        ),
    }
}
