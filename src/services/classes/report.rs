//! 班级报表导出服务

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::collections::HashMap;
use tracing::error;

use super::ClassService;
use super::summary::build_class_summary;
use crate::access;
use crate::grading;
use crate::models::assignments::requests::AssignmentListQuery;
use crate::models::classes::responses::ClassSummaryResponse;
use crate::models::users::entities::UserRole;
use crate::models::{ApiResponse, ErrorCode};

/// 作业汇总数据
struct AssignmentSummary {
    title: String,
    due_date: Option<String>,
    submitted_count: i64,
    graded_count: i64,
    avg_grade: Option<f64>,
}

/// 导出班级报表（XLSX）
///
/// 内容与成绩汇总一致：班级概览、逐作业汇总、逐学生明细
/// （平均分 / 状态 / 出勤率）。
pub async fn export_class_report(
    service: &ClassService,
    request: &HttpRequest,
    class_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 权限校验：仅班级所有者可导出
    let teacher = match access::authorize(access::resolve_identity(request), UserRole::Teacher) {
        Ok(user) => user,
        Err(denied) => return Ok(denied.into_response()),
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

    if let Err(denied) = access::authorize_ownership(&teacher, class.teacher_id) {
        return Ok(denied.into_response());
    }

    // 学生明细与班级汇总
    let summary = match build_class_summary(&storage, &class).await {
        Ok(summary) => summary,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("汇总班级成绩失败: {e}"),
                )),
            );
        }
    };

    // 逐作业汇总
    let assignment_query = AssignmentListQuery {
        class_id: Some(class_id),
        page: Some(1),
        size: Some(10000),
        ..Default::default()
    };

    let assignments = match storage
        .list_assignments_with_pagination(assignment_query)
        .await
    {
        Ok(resp) => resp.items,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询作业失败: {e}"),
                )),
            );
        }
    };

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

    // assignment_id -> 已评分分数集合 / 提交数
    let mut grades_by_assignment: HashMap<i64, Vec<f64>> = HashMap::new();
    let mut submitted_by_assignment: HashMap<i64, i64> = HashMap::new();
    for submission in &submissions {
        *submitted_by_assignment
            .entry(submission.assignment_id)
            .or_insert(0) += 1;
        if let Some(grade) = submission.grade {
            grades_by_assignment
                .entry(submission.assignment_id)
                .or_default()
                .push(grade);
        }
    }

    let assignment_summaries: Vec<AssignmentSummary> = assignments
        .iter()
        .map(|assignment| {
            let grades = grades_by_assignment
                .get(&assignment.id)
                .cloned()
                .unwrap_or_default();
            let avg_grade = if grades.is_empty() {
                None
            } else {
                Some(grading::aggregate_class(&grades).average)
            };
            AssignmentSummary {
                title: assignment.title.clone(),
                due_date: assignment
                    .due_date
                    .map(|d| d.format("%Y-%m-%d").to_string()),
                submitted_count: submitted_by_assignment
                    .get(&assignment.id)
                    .copied()
                    .unwrap_or(0),
                graded_count: grades.len() as i64,
                avg_grade,
            }
        })
        .collect();

    // 生成 XLSX
    match generate_xlsx(&teacher.name, &summary, &assignment_summaries) {
        Ok(buffer) => {
            let timestamp = Utc::now().format("%Y%m%d_%H%M%S").to_string();
            let filename = format!("class_{class_id}_report_{timestamp}.xlsx");

            Ok(HttpResponse::Ok()
                .content_type("application/vnd.openxmlformats-officedocument.spreadsheetml.sheet")
                .insert_header((
                    "Content-Disposition",
                    format!("attachment; filename=\"{filename}\""),
                ))
                .body(buffer))
        }
        Err(e) => {
            error!("生成 XLSX 失败: {}", e);
            Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("生成报表失败: {e}"),
                )),
            )
        }
    }
}

/// 生成 XLSX 文件
fn generate_xlsx(
    teacher_name: &str,
    summary: &ClassSummaryResponse,
    assignment_summaries: &[AssignmentSummary],
) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();

    // 格式定义
    let header_format = Format::new().set_bold();
    let title_format = Format::new().set_bold().set_font_size(14);

    // Sheet 1: 班级概览
    let sheet1 = workbook
        .add_worksheet()
        .set_name("班级概览")
        .map_err(|e| e.to_string())?;
    write_overview_sheet(sheet1, &header_format, &title_format, teacher_name, summary)?;

    // Sheet 2: 作业汇总
    let sheet2 = workbook
        .add_worksheet()
        .set_name("作业汇总")
        .map_err(|e| e.to_string())?;
    write_assignment_summary_sheet(sheet2, &header_format, assignment_summaries)?;

    // Sheet 3: 学生明细
    let sheet3 = workbook
        .add_worksheet()
        .set_name("学生明细")
        .map_err(|e| e.to_string())?;
    write_student_details_sheet(sheet3, &header_format, summary)?;

    // 生成二进制数据
    workbook.save_to_buffer().map_err(|e| e.to_string())
}

/// 写入班级概览 Sheet
fn write_overview_sheet(
    sheet: &mut Worksheet,
    header_format: &Format,
    title_format: &Format,
    teacher_name: &str,
    summary: &ClassSummaryResponse,
) -> Result<(), String> {
    // 标题
    sheet
        .write_string_with_format(0, 0, "班级成绩报表", title_format)
        .map_err(|e| e.to_string())?;

    // 表头
    sheet
        .write_string_with_format(2, 0, "项目", header_format)
        .map_err(|e| e.to_string())?;
    sheet
        .write_string_with_format(2, 1, "数值", header_format)
        .map_err(|e| e.to_string())?;

    // 数据
    let mut row = 3u32;

    sheet.write_string(row, 0, "班级名称").ok();
    sheet.write_string(row, 1, &summary.class_name).ok();
    row += 1;

    sheet.write_string(row, 0, "负责教师").ok();
    sheet.write_string(row, 1, teacher_name).ok();
    row += 1;

    sheet.write_string(row, 0, "学生总数").ok();
    sheet
        .write_number(row, 1, summary.students.len() as f64)
        .ok();
    row += 1;

    sheet.write_string(row, 0, "作业总数").ok();
    sheet
        .write_number(row, 1, summary.total_assignments as f64)
        .ok();
    row += 1;

    sheet.write_string(row, 0, "班级平均分").ok();
    sheet.write_number(row, 1, summary.summary.average).ok();
    row += 1;

    sheet.write_string(row, 0, "通过人数").ok();
    sheet.write_number(row, 1, summary.summary.passed as f64).ok();
    row += 1;

    sheet.write_string(row, 0, "补考人数").ok();
    sheet
        .write_number(row, 1, summary.summary.remediation as f64)
        .ok();
    row += 1;

    sheet.write_string(row, 0, "未通过人数").ok();
    sheet.write_number(row, 1, summary.summary.failed as f64).ok();
    row += 1;

    sheet.write_string(row, 0, "生成时间").ok();
    sheet
        .write_string(row, 1, Utc::now().format("%Y-%m-%d %H:%M UTC").to_string())
        .ok();

    // 设置列宽
    sheet.set_column_width(0, 20).ok();
    sheet.set_column_width(1, 30).ok();

    Ok(())
}

/// 写入作业汇总 Sheet
fn write_assignment_summary_sheet(
    sheet: &mut Worksheet,
    header_format: &Format,
    assignment_summaries: &[AssignmentSummary],
) -> Result<(), String> {
    // 表头
    let headers = ["作业标题", "截止时间", "提交人数", "批改人数", "平均分"];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, header_format)
            .map_err(|e| e.to_string())?;
    }

    // 数据
    for (row, summary) in assignment_summaries.iter().enumerate() {
        let row = (row + 1) as u32;

        sheet.write_string(row, 0, &summary.title).ok();

        if let Some(ref due_date) = summary.due_date {
            sheet.write_string(row, 1, due_date).ok();
        } else {
            sheet.write_string(row, 1, "-").ok();
        }

        sheet
            .write_number(row, 2, summary.submitted_count as f64)
            .ok();
        sheet.write_number(row, 3, summary.graded_count as f64).ok();

        if let Some(avg) = summary.avg_grade {
            sheet.write_number(row, 4, avg).ok();
        } else {
            sheet.write_string(row, 4, "-").ok();
        }
    }

    // 设置列宽
    sheet.set_column_width(0, 30).ok();
    sheet.set_column_width(1, 20).ok();
    sheet.set_column_width(2, 12).ok();
    sheet.set_column_width(3, 12).ok();
    sheet.set_column_width(4, 12).ok();

    Ok(())
}

/// 写入学生明细 Sheet
fn write_student_details_sheet(
    sheet: &mut Worksheet,
    header_format: &Format,
    summary: &ClassSummaryResponse,
) -> Result<(), String> {
    // 表头：姓名 | 平均分 | 状态 | 出勤率 | 提交数
    let headers = ["姓名", "平均分", "状态", "出勤率", "提交数"];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, header_format)
            .map_err(|e| e.to_string())?;
    }

    // 数据行
    for (row, student) in summary.students.iter().enumerate() {
        let row = (row + 1) as u32;

        sheet.write_string(row, 0, &student.student_name).ok();
        sheet.write_number(row, 1, student.average).ok();
        sheet.write_string(row, 2, student.status.to_string()).ok();
        sheet
            .write_string(row, 3, format!("{}%", student.attendance))
            .ok();
        sheet
            .write_string(
                row,
                4,
                format!("{}/{}", student.submitted_count, summary.total_assignments),
            )
            .ok();
    }

    // 设置列宽
    sheet.set_column_width(0, 20).ok();
    sheet.set_column_width(1, 10).ok();
    sheet.set_column_width(2, 14).ok();
    sheet.set_column_width(3, 10).ok();
    sheet.set_column_width(4, 10).ok();

    Ok(())
}
