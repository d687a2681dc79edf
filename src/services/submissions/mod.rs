pub mod detail;
pub mod grade;
pub mod list;
pub mod submit;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::common::PaginationQuery;
use crate::models::submissions::requests::{CreateSubmissionRequest, GradeSubmissionRequest};
use crate::storage::Storage;

pub struct SubmissionService {
    storage: Option<Arc<dyn Storage>>,
}

impl SubmissionService {
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

    // 学生提交作业（重复提交覆盖）
    pub async fn submit(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        submission_data: CreateSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit(self, request, assignment_id, submission_data).await
    }

    // 列出某作业的全部提交
    pub async fn list_assignment_submissions(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_assignment_submissions(self, request, assignment_id, query).await
    }

    // 列出当前用户相关的提交
    pub async fn list_submissions(
        &self,
        request: &HttpRequest,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_submissions(self, request, query).await
    }

    // 提交详情
    pub async fn get_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_submission(self, request, submission_id).await
    }

    // 批改提交
    pub async fn grade_submission(
        &self,
        request: &HttpRequest,
        submission_id: i64,
        grade_data: GradeSubmissionRequest,
    ) -> ActixResult<HttpResponse> {
        grade::grade_submission(self, request, submission_id, grade_data).await
    }
}
