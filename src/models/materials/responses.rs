use super::entities::Material;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

/// 资料列表项（含发布者姓名）
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialListItem {
    #[serde(flatten)]
    #[ts(flatten)]
    pub material: Material,
    pub teacher_name: String,
}

// 资料列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialListResponse {
    pub items: Vec<MaterialListItem>,
    pub pagination: PaginationInfo,
}
