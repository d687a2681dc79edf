//! 选课关联存储操作

use super::SeaOrmStorage;
use crate::entity::enrollments::{ActiveModel, Column, Entity as Enrollments};
use crate::entity::users::Entity as Users;
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginationInfo,
    enrollments::{
        entities::Enrollment,
        requests::EnrollmentQuery,
        responses::{ClassMember, ClassMemberListResponse},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 学生加入班级
    ///
    /// (class_id, student_id) 上的唯一索引保证同一学生不会重复加入，
    /// 服务层在插入前先查询给出友好错误，数据库约束兜底。
    pub async fn enroll_student_impl(&self, class_id: i64, student_id: i64) -> Result<Enrollment> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            class_id: Set(class_id),
            student_id: Set(student_id),
            attendance: Set(0.0),
            average_grade: Set(0.0),
            joined_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("加入班级失败: {e}")))?;

        Ok(result.into_enrollment())
    }

    /// 获取学生在班级中的选课记录
    pub async fn get_enrollment_impl(
        &self,
        class_id: i64,
        student_id: i64,
    ) -> Result<Option<Enrollment>> {
        let result = Enrollments::find()
            .filter(
                Condition::all()
                    .add(Column::ClassId.eq(class_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询选课记录失败: {e}")))?;

        Ok(result.map(|m| m.into_enrollment()))
    }

    /// 将学生移出班级
    pub async fn remove_enrollment_impl(&self, class_id: i64, student_id: i64) -> Result<bool> {
        let result = Enrollments::delete_many()
            .filter(
                Condition::all()
                    .add(Column::ClassId.eq(class_id))
                    .add(Column::StudentId.eq(student_id)),
            )
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("移出班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 分页列出班级成员
    pub async fn list_class_members_with_pagination_impl(
        &self,
        class_id: i64,
        query: EnrollmentQuery,
    ) -> Result<ClassMemberListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let select = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_desc(Column::JoinedAt);

        let paginator = select.find_also_related(Users).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询成员总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询成员页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询成员列表失败: {e}")))?;

        Ok(ClassMemberListResponse {
            items: rows.into_iter().map(Self::into_class_member).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 列出班级全部成员（汇总与报表用，不分页）
    pub async fn list_class_members_impl(&self, class_id: i64) -> Result<Vec<ClassMember>> {
        let rows = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .order_by_asc(Column::JoinedAt)
            .find_also_related(Users)
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询成员列表失败: {e}")))?;

        Ok(rows.into_iter().map(Self::into_class_member).collect())
    }

    /// 统计班级学生数量
    pub async fn count_class_students_impl(&self, class_id: i64) -> Result<i64> {
        let count = Enrollments::find()
            .filter(Column::ClassId.eq(class_id))
            .count(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询成员数量失败: {e}")))?;

        Ok(count as i64)
    }

    fn into_class_member(
        row: (
            crate::entity::enrollments::Model,
            Option<crate::entity::users::Model>,
        ),
    ) -> ClassMember {
        let (enrollment, student) = row;
        let (student_name, student_email) = student
            .map(|u| (u.name, u.email))
            .unwrap_or_else(|| ("Unknown".to_string(), String::new()));

        ClassMember {
            enrollment: enrollment.into_enrollment(),
            student_name,
            student_email,
        }
    }
}
