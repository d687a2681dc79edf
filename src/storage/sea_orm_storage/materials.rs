//! 教学资料存储操作

use super::SeaOrmStorage;
use crate::entity::materials::{ActiveModel, Column, Entity as Materials};
use crate::entity::users::Entity as Users;
use crate::errors::{ClassHubError, Result};
use crate::models::{
    PaginationInfo,
    materials::{
        entities::Material,
        requests::CreateMaterialRequest,
        responses::{MaterialListItem, MaterialListResponse},
    },
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 发布教学资料
    pub async fn create_material_impl(
        &self,
        teacher_id: i64,
        req: CreateMaterialRequest,
    ) -> Result<Material> {
        let now = chrono::Utc::now().timestamp();

        let model = ActiveModel {
            teacher_id: Set(teacher_id),
            title: Set(req.title),
            description: Set(req.description),
            attachment: Set(req.attachment),
            published_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("发布资料失败: {e}")))?;

        Ok(result.into_material())
    }

    /// 分页列出教学资料（按发布时间倒序）
    pub async fn list_materials_with_pagination_impl(
        &self,
        page: i64,
        size: i64,
        search: Option<String>,
    ) -> Result<MaterialListResponse> {
        let page = page.max(1) as u64;
        let size = size.clamp(1, 100) as u64;

        let mut select = Materials::find();

        if let Some(ref search) = search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::Title.contains(&escaped));
        }

        select = select.order_by_desc(Column::PublishedAt);

        let paginator = select.find_also_related(Users).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询资料总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询资料页数失败: {e}")))?;

        let rows = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("查询资料列表失败: {e}")))?;

        let items = rows
            .into_iter()
            .map(|(material, teacher)| MaterialListItem {
                material: material.into_material(),
                teacher_name: teacher
                    .map(|t| t.name)
                    .unwrap_or_else(|| "Unknown".to_string()),
            })
            .collect();

        Ok(MaterialListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }
}
