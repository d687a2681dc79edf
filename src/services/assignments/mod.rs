pub mod create;
pub mod delete;
pub mod detail;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{AssignmentQueryParams, CreateAssignmentRequest};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
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

    // 发布作业
    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        class_id: i64,
        assignment_data: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, class_id, assignment_data).await
    }

    // 列出班级作业
    pub async fn list_class_assignments(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: AssignmentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_class_assignments(self, request, class_id, query).await
    }

    // 列出当前用户可见的全部作业
    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        query: AssignmentQueryParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, query).await
    }

    // 作业详情
    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, assignment_id).await
    }

    // 删除作业
    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }
}
