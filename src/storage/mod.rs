use std::sync::Arc;

use crate::models::{
    assignments::{
        entities::Assignment,
        requests::{AssignmentListQuery, CreateAssignmentRequest},
        responses::AssignmentListResponse,
    },
    classes::{
        entities::Class,
        requests::{ClassListQuery, CreateClassRequest, UpdateClassRequest},
        responses::ClassListResponse,
    },
    enrollments::{
        entities::Enrollment,
        requests::EnrollmentQuery,
        responses::{ClassMember, ClassMemberListResponse},
    },
    files::entities::File,
    materials::{
        entities::Material,
        requests::CreateMaterialRequest,
        responses::MaterialListResponse,
    },
    submissions::{
        entities::Submission,
        requests::{CreateSubmissionRequest, SubmissionListQuery},
        responses::SubmissionListResponse,
    },
    users::{entities::User, requests::CreateUserRequest},
};

use crate::errors::Result;

pub mod sea_orm_storage;

/// 批改后回写选课记录的统计结果
#[derive(Debug, Clone, Copy)]
pub struct RefreshedStats {
    pub average_grade: f64,
    pub attendance: f64,
}

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码必须已哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量（用于首次启动种子）
    async fn count_users(&self) -> Result<u64>;

    /// 班级管理方法
    // 创建班级（自动生成加入码）
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class>;
    // 通过ID获取班级信息
    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>>;
    // 通过加入码获取班级信息
    async fn get_class_by_code(&self, join_code: &str) -> Result<Option<Class>>;
    // 列出班级（教师筛选）
    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 列出学生加入的班级
    async fn list_student_classes_with_pagination(
        &self,
        student_id: i64,
        query: ClassListQuery,
    ) -> Result<ClassListResponse>;
    // 更新班级信息
    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>>;
    // 删除班级（级联删除选课、作业与提交）
    async fn delete_class(&self, class_id: i64) -> Result<bool>;

    /// 选课管理方法
    // 学生加入班级
    async fn enroll_student(&self, class_id: i64, student_id: i64) -> Result<Enrollment>;
    // 获取学生在班级中的选课记录
    async fn get_enrollment(&self, class_id: i64, student_id: i64) -> Result<Option<Enrollment>>;
    // 将学生移出班级
    async fn remove_enrollment(&self, class_id: i64, student_id: i64) -> Result<bool>;
    // 分页列出班级成员（含学生信息与缓存统计）
    async fn list_class_members_with_pagination(
        &self,
        class_id: i64,
        query: EnrollmentQuery,
    ) -> Result<ClassMemberListResponse>;
    // 列出班级全部成员（汇总与报表用）
    async fn list_class_members(&self, class_id: i64) -> Result<Vec<ClassMember>>;
    // 统计班级学生数量
    async fn count_class_students(&self, class_id: i64) -> Result<i64>;

    /// 作业管理方法
    // 发布作业
    async fn create_assignment(
        &self,
        class_id: i64,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 分页列出作业
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 删除作业
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;
    // 统计班级作业数量
    async fn count_class_assignments(&self, class_id: i64) -> Result<i64>;

    /// 提交管理方法
    // 创建或覆盖提交（同一学生对同一作业只保留一条记录）
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission>;
    // 通过ID获取提交
    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>>;
    // 分页列出提交（含学生与作业信息）
    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse>;
    // 列出班级内全部提交（汇总与报表用）
    async fn list_submissions_by_class(&self, class_id: i64) -> Result<Vec<Submission>>;
    // 批改提交并在同一事务内重算、回写选课记录的缓存统计
    async fn grade_submission(
        &self,
        submission_id: i64,
        grade: f64,
    ) -> Result<Option<RefreshedStats>>;

    /// 教学资料管理方法
    // 发布资料
    async fn create_material(
        &self,
        teacher_id: i64,
        material: CreateMaterialRequest,
    ) -> Result<Material>;
    // 分页列出资料
    async fn list_materials_with_pagination(
        &self,
        page: i64,
        size: i64,
        search: Option<String>,
    ) -> Result<MaterialListResponse>;

    /// 文件管理方法
    // 登记上传文件
    async fn upload_file(
        &self,
        original_name: &str,
        stored_name: &str,
        file_size: &i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File>;
    // 通过下载 token 获取文件信息
    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
