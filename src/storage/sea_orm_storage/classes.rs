//! 班级存储操作

use super::SeaOrmStorage;
use crate::entity::classes::{ActiveModel, Column, Entity as Classes};
use crate::entity::enrollments::{Column as EnrollmentColumn, Entity as Enrollments};
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginationInfo,
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
};
use crate::utils::{escape_like_pattern, random_code::generate_join_code};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};

/// 加入码长度
const JOIN_CODE_LENGTH: usize = 6;
/// 加入码撞库时的最大重试次数
const JOIN_CODE_MAX_RETRIES: usize = 3;

impl SeaOrmStorage {
    /// 创建班级
    ///
    /// 加入码在这里生成，创建后不可变更。码撞上唯一约束时重新生成。
    pub async fn create_class_impl(&self, req: CreateClassRequest) -> Result<Class> {
        let now = chrono::Utc::now().timestamp();

        // teacher_id 必须由服务层确保已设置
        let teacher_id = req.teacher_id.ok_or_else(|| {
            ClassHubError::database_operation("teacher_id must be set before calling create_class")
        })?;

        let mut last_err = None;
        for _ in 0..JOIN_CODE_MAX_RETRIES {
            let join_code = generate_join_code(JOIN_CODE_LENGTH);

            let model = ActiveModel {
                teacher_id: Set(teacher_id),
                name: Set(req.name.clone()),
                description: Set(req.description.clone()),
                join_code: Set(join_code),
                created_at: Set(now),
                updated_at: Set(now),
                ..Default::default()
            };

            match model.insert(&self.db).await {
                Ok(result) => return Ok(result.into_class()),
                Err(e) => {
                    let msg = e.to_string();
                    if msg.contains("UNIQUE constraint failed") && msg.contains("join_code") {
                        last_err = Some(e);
                        continue;
                    }
                    return Err(ClassHubError::database_operation(format!(
                        "创建班级失败: {e}"
                    )));
                }
            }
        }

        Err(ClassHubError::database_operation(format!(
            "创建班级失败: 加入码生成重试耗尽: {}",
            last_err.map(|e| e.to_string()).unwrap_or_default()
        )))
    }

    /// 通过 ID 获取班级
    pub async fn get_class_by_id_impl(&self, class_id: i64) -> Result<Option<Class>> {
        let result = Classes::find_by_id(class_id)
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 通过加入码获取班级
    pub async fn get_class_by_code_impl(&self, join_code: &str) -> Result<Option<Class>> {
        let result = Classes::find()
            .filter(Column::JoinCode.eq(join_code))
            .one(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级失败: {e}")))?;

        Ok(result.map(|m| m.into_class()))
    }

    /// 分页列出班级
    pub async fn list_classes_with_pagination_impl(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Classes::find();

        // 教师筛选
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }

        // 搜索条件
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        // 排序
        select = select.order_by_desc(Column::CreatedAt);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级页数失败: {e}")))?;

        let classes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 分页列出学生加入的班级
    pub async fn list_student_classes_with_pagination_impl(
        &self,
        student_id: i64,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        // 先取学生的选课记录，再按班级 ID 过滤
        let class_ids: Vec<i64> = Enrollments::find()
            .filter(EnrollmentColumn::StudentId.eq(student_id))
            .select_only()
            .column(EnrollmentColumn::ClassId)
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询选课记录失败: {e}")))?;

        if class_ids.is_empty() {
            return Ok(ClassListResponse {
                items: vec![],
                pagination: PaginationInfo {
                    page: page as i64,
                    page_size: size as i64,
                    total: 0,
                    total_pages: 0,
                },
            });
        }

        let mut select = Classes::find().filter(Column::Id.is_in(class_ids));

        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Name.contains(&escaped));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级页数失败: {e}")))?;

        let classes = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询班级列表失败: {e}")))?;

        Ok(ClassListResponse {
            items: classes.into_iter().map(|m| m.into_class()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新班级信息
    pub async fn update_class_impl(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        // 先检查班级是否存在
        let existing = self.get_class_by_id_impl(class_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(class_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(name) = update.name {
            model.name = Set(name);
        }

        if let Some(description) = update.description {
            model.description = Set(Some(description));
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("更新班级失败: {e}")))?;

        self.get_class_by_id_impl(class_id).await
    }

    /// 删除班级
    ///
    /// 选课、作业与提交由外键级联删除。
    pub async fn delete_class_impl(&self, class_id: i64) -> Result<bool> {
        let result = Classes::delete_by_id(class_id)
            .exec(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("删除班级失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
