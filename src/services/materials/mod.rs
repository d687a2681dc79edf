pub mod list;
pub mod publish;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::materials::requests::{CreateMaterialRequest, MaterialQueryParams};
use crate::storage::Storage;

pub struct MaterialService {
    storage: Option<Arc<dyn Storage>>,
}

impl MaterialService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    // 发布教学资料
    pub async fn publish_material(
        &self,
        request: &HttpRequest,
        material_data: CreateMaterialRequest,
    ) -> ActixResult<HttpResponse> {
        publish::publish_material(self, request, material_data).await
    }

    // 列出教学资料
    pub async fn list_materials(
        &self,
        request: &HttpRequest,
        query: MaterialQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_materials(self, request, query).await
    }
}
