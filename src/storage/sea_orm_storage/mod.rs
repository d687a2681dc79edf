//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod classes;
mod enrollments;
mod files;
mod materials;
mod submissions;
mod users;

use crate::config::AppConfig;
use crate::errors::{ClassHubError, Result};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| ClassHubError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| ClassHubError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| ClassHubError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| ClassHubError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(ClassHubError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }
}

// Storage trait 实现
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
use crate::storage::{RefreshedStats, Storage};
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 班级模块
    async fn create_class(&self, class: CreateClassRequest) -> Result<Class> {
        self.create_class_impl(class).await
    }

    async fn get_class_by_id(&self, class_id: i64) -> Result<Option<Class>> {
        self.get_class_by_id_impl(class_id).await
    }

    async fn get_class_by_code(&self, join_code: &str) -> Result<Option<Class>> {
        self.get_class_by_code_impl(join_code).await
    }

    async fn list_classes_with_pagination(
        &self,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_classes_with_pagination_impl(query).await
    }

    async fn list_student_classes_with_pagination(
        &self,
        student_id: i64,
        query: ClassListQuery,
    ) -> Result<ClassListResponse> {
        self.list_student_classes_with_pagination_impl(student_id, query)
            .await
    }

    async fn update_class(
        &self,
        class_id: i64,
        update: UpdateClassRequest,
    ) -> Result<Option<Class>> {
        self.update_class_impl(class_id, update).await
    }

    async fn delete_class(&self, class_id: i64) -> Result<bool> {
        self.delete_class_impl(class_id).await
    }

    // 选课模块
    async fn enroll_student(&self, class_id: i64, student_id: i64) -> Result<Enrollment> {
        self.enroll_student_impl(class_id, student_id).await
    }

    async fn get_enrollment(&self, class_id: i64, student_id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_impl(class_id, student_id).await
    }

    async fn remove_enrollment(&self, class_id: i64, student_id: i64) -> Result<bool> {
        self.remove_enrollment_impl(class_id, student_id).await
    }

    async fn list_class_members_with_pagination(
        &self,
        class_id: i64,
        query: EnrollmentQuery,
    ) -> Result<ClassMemberListResponse> {
        self.list_class_members_with_pagination_impl(class_id, query)
            .await
    }

    async fn list_class_members(&self, class_id: i64) -> Result<Vec<ClassMember>> {
        self.list_class_members_impl(class_id).await
    }

    async fn count_class_students(&self, class_id: i64) -> Result<i64> {
        self.count_class_students_impl(class_id).await
    }

    // 作业模块
    async fn create_assignment(
        &self,
        class_id: i64,
        created_by: i64,
        assignment: CreateAssignmentRequest,
    ) -> Result<Assignment> {
        self.create_assignment_impl(class_id, created_by, assignment)
            .await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    async fn count_class_assignments(&self, class_id: i64) -> Result<i64> {
        self.count_class_assignments_impl(class_id).await
    }

    // 提交模块
    async fn upsert_submission(
        &self,
        assignment_id: i64,
        student_id: i64,
        submission: CreateSubmissionRequest,
    ) -> Result<Submission> {
        self.upsert_submission_impl(assignment_id, student_id, submission)
            .await
    }

    async fn get_submission_by_id(&self, submission_id: i64) -> Result<Option<Submission>> {
        self.get_submission_by_id_impl(submission_id).await
    }

    async fn list_submissions_with_pagination(
        &self,
        query: SubmissionListQuery,
    ) -> Result<SubmissionListResponse> {
        self.list_submissions_with_pagination_impl(query).await
    }

    async fn list_submissions_by_class(&self, class_id: i64) -> Result<Vec<Submission>> {
        self.list_submissions_by_class_impl(class_id).await
    }

    async fn grade_submission(
        &self,
        submission_id: i64,
        grade: f64,
    ) -> Result<Option<RefreshedStats>> {
        self.grade_submission_impl(submission_id, grade).await
    }

    // 教学资料模块
    async fn create_material(
        &self,
        teacher_id: i64,
        material: CreateMaterialRequest,
    ) -> Result<Material> {
        self.create_material_impl(teacher_id, material).await
    }

    async fn list_materials_with_pagination(
        &self,
        page: i64,
        size: i64,
        search: Option<String>,
    ) -> Result<MaterialListResponse> {
        self.list_materials_with_pagination_impl(page, size, search)
            .await
    }

    // 文件模块
    async fn upload_file(
        &self,
        original_name: &str,
        stored_name: &str,
        file_size: &i64,
        file_type: &str,
        user_id: i64,
    ) -> Result<File> {
        self.upload_file_impl(original_name, stored_name, file_size, file_type, user_id)
            .await
    }

    async fn get_file_by_token(&self, token: &str) -> Result<Option<File>> {
        self.get_file_by_token_impl(token).await
    }
}
