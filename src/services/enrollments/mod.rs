pub mod add;
pub mod join;
pub mod list;
pub mod remove;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::enrollments::requests::{AddStudentRequest, EnrollmentQuery, JoinClassRequest};
use crate::storage::Storage;

pub struct EnrollmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl EnrollmentService {
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

    // 学生通过加入码加入班级
    pub async fn join_class(
        &self,
        request: &HttpRequest,
        join_data: JoinClassRequest,
    ) -> ActixResult<HttpResponse> {
        join::join_class(self, request, join_data).await
    }

    // 教师将学生加入班级
    pub async fn add_student(
        &self,
        request: &HttpRequest,
        class_id: i64,
        add_data: AddStudentRequest,
    ) -> ActixResult<HttpResponse> {
        add::add_student(self, request, class_id, add_data).await
    }

    // 将学生移出班级
    pub async fn remove_student(
        &self,
        request: &HttpRequest,
        class_id: i64,
        student_id: i64,
    ) -> ActixResult<HttpResponse> {
        remove::remove_student(self, request, class_id, student_id).await
    }

    // 列出班级成员
    pub async fn list_members(
        &self,
        request: &HttpRequest,
        class_id: i64,
        query: EnrollmentQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_members(self, request, class_id, query).await
    }
}
