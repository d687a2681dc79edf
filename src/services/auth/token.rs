use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::access;
use crate::models::{
    ApiResponse, ErrorCode,
    auth::{RefreshTokenResponse, TokenVerificationResponse, UserInfoResponse},
};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 使用 refresh token cookie 换取新的 access token
pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let refresh_token = match JwtUtils::extract_refresh_token_from_cookie(request) {
        Some(token) if !token.is_empty() => token,
        _ => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::InvalidToken,
                "Missing refresh token",
            )));
        }
    };

    match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(access_token) => {
            let response = RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(response, "Token refreshed")))
        }
        Err(e) => {
            tracing::info!("Refresh token rejected: {}", e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::InvalidToken,
                "Invalid or expired refresh token",
            )))
        }
    }
}

/// 验证当前 access token 是否有效
///
/// 走到这里说明 RequireJWT 已经验证通过，直接返回有效即可。
pub async fn handle_verify_token(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let is_valid = access::resolve_identity(request).is_some();
    Ok(HttpResponse::Ok().json(ApiResponse::success(
        TokenVerificationResponse { is_valid },
        "Token verified",
    )))
}

/// 获取当前登录用户信息
pub async fn handle_get_user(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match access::resolve_identity(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "查询成功",
        ))),
        None => Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
            ErrorCode::Unauthorized,
            "Authentication required",
        ))),
    }
}
