pub mod assignments;
pub mod auth;
pub mod classes;
pub mod common;
pub mod enrollments;
pub mod files;
pub mod materials;
pub mod submissions;
pub mod users;

pub use common::pagination::{PaginatedResponse, PaginationInfo, PaginationQuery};
pub use common::response::ApiResponse;

use serde::{Deserialize, Serialize};

/// 应用启动时间
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}

/// 业务错误码
///
/// 随 ApiResponse 返回给前端，与 HTTP 状态码配合使用。
/// 0 表示成功；40xxx/50xxx 为通用错误；41xxx 认证，42xxx 用户，
/// 43xxx 班级与选课，44xxx 作业与提交，45xxx 文件。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 40000,
    Unauthorized = 40100,
    Forbidden = 40300,
    NotFound = 40400,
    RateLimitExceeded = 42900,
    InternalServerError = 50000,

    // 认证
    AuthFailed = 41001,
    InvalidToken = 41002,
    RegisterFailed = 41003,
    RoleMismatch = 41004,

    // 用户
    UserNotFound = 42001,
    UserNameInvalid = 42002,
    UserEmailInvalid = 42003,
    UserEmailAlreadyExists = 42004,
    PasswordPolicyViolation = 42005,

    // 班级与选课
    ClassNotFound = 43001,
    ClassCreationFailed = 43002,
    JoinCodeInvalid = 43003,
    AlreadyEnrolled = 43004,
    EnrollmentNotFound = 43005,
    NotClassMember = 43006,
    ClassPermissionDenied = 43007,
    ClassJoinFailed = 43008,

    // 作业与提交
    AssignmentNotFound = 44001,
    SubmissionNotFound = 44002,
    SubmissionFailed = 44003,
    InvalidGrade = 44004,

    // 文件
    FileNotFound = 45001,
    FileUploadFailed = 45002,
    FileTypeNotAllowed = 45003,
    FileSizeExceeded = 45004,
    MultifileUploadNotAllowed = 45005,
}
