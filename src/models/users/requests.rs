use serde::Deserialize;
use ts_rs::TS;

use super::entities::UserRole;

// 创建用户请求（注册与启动期种子共用）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    /// 注册时为明文密码，进入存储层前必须替换为哈希值
    pub password: String,
    pub role: UserRole,
}
