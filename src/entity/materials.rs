//! 教学资料实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "materials")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub teacher_id: i64,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub attachment: Option<String>,
    pub published_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TeacherId",
        to = "super::users::Column::Id"
    )]
    Teacher,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_material(self) -> crate::models::materials::entities::Material {
        use crate::models::materials::entities::Material;
        use chrono::{DateTime, Utc};

        Material {
            id: self.id,
            teacher_id: self.teacher_id,
            title: self.title,
            description: self.description,
            attachment: self.attachment,
            published_at: DateTime::<Utc>::from_timestamp(self.published_at, 0)
                .unwrap_or_default(),
        }
    }
}
