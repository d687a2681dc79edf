//! 提交存储操作
//!
//! 批改走 [`SeaOrmStorage::grade_submission_impl`]：写入分数、从当前完整
//! 成绩集合重算学生统计、回写选课记录缓存，三步在同一事务内完成，
//! 避免并发批改时缓存丢失更新。

use std::collections::HashMap;

use super::SeaOrmStorage;
use crate::entity::assignments::{Column as AssignmentColumn, Entity as Assignments};
use crate::entity::enrollments::{
    ActiveModel as EnrollmentActiveModel, Column as EnrollmentColumn, Entity as Enrollments,
};
use crate::entity::submissions::{ActiveModel, Column, Entity as Submissions};
use crate::entity::users::Entity as Users;
use crate::errors::{ClassHubError, Result};
use crate::grading;
use crate::models::{
    PaginationInfo,
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::{SubmissionListItem, SubmissionListResponse},
    },
};
use crate::storage::RefreshedStats;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, JoinType,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建或覆盖提交
    ///
    /// 同一学生对同一作业只保留一条记录：已有提交时覆盖内容与附件并刷新
    /// 提交时间，已有的评分保持不变。
    pub async fn upsert_submission_impl(
        &self,
        assignment_id: i64,
        student_id: i64,
        req: CreateSubmissionRequest,
    ) -> Result<Submission> {
        let now = chrono::Utc::now().timestamp();

        let existing = Submissions::find()
            .filter(
                Condition::all()
                    .add(Column::AssignmentId.eq(assignment_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交失败: {e}")))?;

        let result = match existing {
            Some(current) => {
                let model = ActiveModel {
                    id: Set(current.id),
                    content: Set(req.content),
                    attachment: Set(req.attachment),
                    submitted_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                model
                    .update(&self.db)
                    .await
                    .map_err(|e| ClassHubError::database_operation(format!("覆盖提交失败: {e}")))?
            }
            None => {
                let model = ActiveModel {
                    assignment_id: Set(assignment_id),
                    student_id: Set(student_id),
                    content: Set(req.content),
                    attachment: Set(req.attachment),
                    submitted_at: Set(now),
                    updated_at: Set(now),
                    ..Default::default()
                };
                model
                    .insert(&self.db)
                    .await
                    .map_err(|e| ClassHubError::database_operation(format!("创建提交失败: {e}")))?
            }
        };

        Ok(result.into_submission())
    }

    /// 通过 ID 获取提交
    pub async fn get_submission_by_id_impl(
        &self,
        submission_id: i64,
    ) -> Result<Option<Submission>> {
        let result = Submissions::find_by_id(submission_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交失败: {e}")))?;

        Ok(result.map(|m| m.into_submission()))
    }

    /// 分页列出提交（附带学生姓名与作业标题）
    pub async fn list_submissions_with_pagination_impl(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Submissions::find();

        if let Some(assignment_id) = query.assignment_id {
            select = select.filter(Column::AssignmentId.eq(assignment_id));
        }

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 班级/创建者筛选需要 join 作业表
        if query.class_id.is_some() || query.created_by.is_some() {
            select = select.join(
                JoinType::InnerJoin,
                crate::entity::submissions::Relation::Assignment.def(),
            );
            if let Some(class_id) = query.class_id {
                select = select.filter(AssignmentColumn::ClassId.eq(class_id));
            }
            if let Some(created_by) = query.created_by {
                select = select.filter(AssignmentColumn::CreatedBy.eq(created_by));
            }
        }

        if query.graded_only.unwrap_or(false) {
            select = select.filter(Column::Grade.is_not_null());
        }

        select = select.order_by_desc(Column::SubmittedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交页数失败: {e}")))?;

        let submissions = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交列表失败: {e}")))?;

        // 批量取学生姓名与作业标题
        let student_ids: Vec<i64> = submissions.iter().map(|s| s.student_id).collect();
        let assignment_ids: Vec<i64> = submissions.iter().map(|s| s.assignment_id).collect();

        let student_names: HashMap<i64, String> = Users::find()
            .filter(crate::entity::users::Column::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询学生信息失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.name))
            .collect();

        let assignment_titles: HashMap<i64, String> = Assignments::find()
            .filter(AssignmentColumn::Id.is_in(assignment_ids))
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询作业信息失败: {e}")))?
            .into_iter()
            .map(|a| (a.id, a.title))
            .collect();

        let items = submissions
            .into_iter()
            .map(|m| {
                let student_name = student_names
                    .get(&m.student_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string());
                let assignment_title = assignment_titles
                    .get(&m.assignment_id)
                    .cloned()
                    .unwrap_or_default();
                let submission = m.into_submission();
                SubmissionListItem {
                    id: submission.id,
                    assignment_id: submission.assignment_id,
                    assignment_title,
                    student_id: submission.student_id,
                    student_name,
                    content: submission.content,
                    attachment: submission.attachment,
                    grade: submission.grade,
                    submitted_at: submission.submitted_at,
                }
            })
            .collect();

        Ok(SubmissionListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出班级内全部提交（汇总与报表用，不分页）
    pub async fn list_submissions_by_class_impl(&self, class_id: i64) -> Result<Vec<Submission>> {
        let rows = Submissions::find()
            .join(
                JoinType::InnerJoin,
                crate::entity::submissions::Relation::Assignment.def(),
            )
            .filter(AssignmentColumn::ClassId.eq(class_id))
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级提交失败: {e}")))?;

        Ok(rows.into_iter().map(|m| m.into_submission()).collect())
    }

    /// 批改提交并回写选课记录统计
    ///
    /// 读当前成绩集合、重算、写缓存在同一事务内完成。每次批改都从完整
    /// 成绩集合重算，而不是增量修正，后写者胜出即可保证收敛。
    pub async fn grade_submission_impl(
        &self,
        submission_id: i64,
        grade: f64,
    ) -> Result<Option<RefreshedStats>> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("开启事务失败: {e}")))?;

        let result = Self::grade_submission_in_txn(&txn, submission_id, grade).await;

        match result {
            Ok(stats) => {
                txn.commit()
                    .await
                    .map_err(|e| ClassHubError::database_operation(format!("提交事务失败: {e}")))?;
                Ok(stats)
            }
            Err(e) => {
                let _ = txn.rollback().await;
                Err(e)
            }
        }
    }

    async fn grade_submission_in_txn<C: ConnectionTrait>(
        txn: &C,
        submission_id: i64,
        grade: f64,
    ) -> Result<Option<RefreshedStats>> {
        let now = chrono::Utc::now().timestamp();

        // 1. 读取提交与对应作业，定位班级与学生
        let Some(submission) = Submissions::find_by_id(submission_id)
            .one(txn)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询提交失败: {e}")))?
        else {
            return Ok(None);
        };

        let assignment = Assignments::find_by_id(submission.assignment_id)
            .one(txn)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询作业失败: {e}")))?
            .ok_or_else(|| ClassHubError::not_found("提交对应的作业不存在"))?;

        let class_id = assignment.class_id;
        let student_id = submission.student_id;

        // 2. 写入分数
        let model = ActiveModel {
            id: Set(submission_id),
            grade: Set(Some(grade)),
            updated_at: Set(now),
            ..Default::default()
        };
        model
            .update(txn)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("写入评分失败: {e}")))?;

        // 3. 取该学生在班级内的完整提交集合
        let assignment_ids: Vec<i64> = Assignments::find()
            .filter(AssignmentColumn::ClassId.eq(class_id))
            .select_only()
            .column(AssignmentColumn::Id)
            .into_tuple()
            .all(txn)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级作业失败: {e}")))?;

        let total_assignments = assignment_ids.len();

        let student_submissions = Submissions::find()
            .filter(
                Condition::all()
                    .add(Column::AssignmentId.is_in(assignment_ids))
                    .add(Column::StudentId.eq(student_id)),
            )
            .all(txn)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询学生提交失败: {e}")))?;

        let submitted_count = student_submissions.len();
        let grades: Vec<f64> = student_submissions
            .iter()
            .filter_map(|s| s.grade)
            .collect();

        // 4. 重算统计
        let average_grade = grading::compute_average(&grades, None)?;
        let attendance = grading::compute_attendance(total_assignments, submitted_count);

        // 5. 回写选课记录缓存
        let enrollment = Enrollments::find()
            .filter(
                Condition::all()
                    .add(EnrollmentColumn::ClassId.eq(class_id))
                    .add(EnrollmentColumn::StudentId.eq(student_id)),
            )
            .one(txn)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询选课记录失败: {e}")))?;

        if let Some(enrollment) = enrollment {
            let model = EnrollmentActiveModel {
                id: Set(enrollment.id),
                average_grade: Set(average_grade),
                attendance: Set(attendance),
                updated_at: Set(now),
                ..Default::default()
            };
            model
                .update(txn)
                .await
                .map_err(|e| ClassHubError::database_operation(format!("回写统计失败: {e}")))?;
        }

        Ok(Some(RefreshedStats {
            average_grade,
            attendance,
        }))
    }
}
