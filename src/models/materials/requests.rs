use crate::models::common::PaginationQuery;
use serde::Deserialize;
use ts_rs::TS;

// 发布教学资料请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct CreateMaterialRequest {
    pub title: String,
    pub description: Option<String>,
    pub attachment: Option<String>,
}

// 资料查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/material.ts")]
pub struct MaterialQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub search: Option<String>,
}
