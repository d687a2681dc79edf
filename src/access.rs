//! 身份解析与权限校验
//!
//! 所有修改持久状态或读取受限数据的处理程序，在执行前都要经过这里：
//! 先通过 [`resolve_identity`] 拿到已验证的当前用户（由 RequireJWT
//! 中间件写入请求扩展，身份来自签名令牌而非客户端自报的 ID），
//! 再用 [`authorize`] 校验角色，带所有者的资源还要经过
//! [`authorize_ownership`]。三个函数均为纯读取与比较，没有副作用，
//! 相同输入重复调用结果一致。

use actix_web::{HttpMessage, HttpRequest, HttpResponse};

use crate::models::users::entities::{User, UserRole};
use crate::models::{ApiResponse, ErrorCode};

/// 权限校验失败的原因
#[derive(Debug, Clone, PartialEq)]
pub enum AccessDenied {
    /// 无法解析出有效身份
    Unauthenticated,
    /// 身份有效但角色不符
    RoleMismatch { required: UserRole },
    /// 身份与角色正确，但不是资源所有者
    Forbidden,
}

impl AccessDenied {
    /// 转换为统一的 API 错误响应
    pub fn into_response(self) -> HttpResponse {
        match self {
            AccessDenied::Unauthenticated => HttpResponse::Unauthorized().json(
                ApiResponse::error_empty(ErrorCode::Unauthorized, "Authentication required"),
            ),
            AccessDenied::RoleMismatch { required } => {
                HttpResponse::Forbidden().json(ApiResponse::error_empty(
                    ErrorCode::RoleMismatch,
                    format!("This action is only available to role '{required}'"),
                ))
            }
            AccessDenied::Forbidden => HttpResponse::Forbidden().json(ApiResponse::error_empty(
                ErrorCode::Forbidden,
                "You are not the owner of this resource",
            )),
        }
    }
}

/// 从请求扩展中解析当前用户
///
/// RequireJWT 中间件验证令牌后会把对应的用户写入请求扩展，
/// 未经过中间件或验证失败的请求返回 `None`。
pub fn resolve_identity(request: &HttpRequest) -> Option<User> {
    request.extensions().get::<User>().cloned()
}

/// 校验身份与角色
///
/// 身份缺失返回 `Unauthenticated`，角色不符返回 `RoleMismatch`，
/// 通过时返回用户本身供后续所有权检查使用。
pub fn authorize(account: Option<User>, required_role: UserRole) -> Result<User, AccessDenied> {
    let user = account.ok_or(AccessDenied::Unauthenticated)?;
    if user.role != required_role {
        return Err(AccessDenied::RoleMismatch {
            required: required_role,
        });
    }
    Ok(user)
}

/// 校验资源所有权
///
/// 用于班级编辑/删除、作业创建与批改等只允许所有者执行的操作。
pub fn authorize_ownership(account: &User, owner_id: i64) -> Result<(), AccessDenied> {
    if account.id != owner_id {
        return Err(AccessDenied::Forbidden);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, role: UserRole) -> User {
        User {
            id,
            name: format!("user-{id}"),
            email: format!("user{id}@example.com"),
            password_hash: String::new(),
            role,
            last_login: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_authorize_without_identity() {
        assert_eq!(
            authorize(None, UserRole::Teacher).unwrap_err(),
            AccessDenied::Unauthenticated
        );
    }

    #[test]
    fn test_authorize_role_mismatch() {
        let student = user(1, UserRole::Student);
        assert_eq!(
            authorize(Some(student), UserRole::Teacher).unwrap_err(),
            AccessDenied::RoleMismatch {
                required: UserRole::Teacher
            }
        );
    }

    #[test]
    fn test_authorize_returns_account() {
        let teacher = user(7, UserRole::Teacher);
        let authorized = authorize(Some(teacher), UserRole::Teacher).unwrap();
        assert_eq!(authorized.id, 7);
    }

    #[test]
    fn test_ownership() {
        let teacher = user(7, UserRole::Teacher);
        assert_eq!(
            authorize_ownership(&teacher, 8).unwrap_err(),
            AccessDenied::Forbidden
        );
        assert!(authorize_ownership(&teacher, 7).is_ok());
    }

    #[test]
    fn test_authorize_is_idempotent() {
        let teacher = user(7, UserRole::Teacher);
        let first = authorize(Some(teacher.clone()), UserRole::Teacher).unwrap();
        let second = authorize(Some(teacher), UserRole::Teacher).unwrap();
        assert_eq!(first.id, second.id);
    }
}
