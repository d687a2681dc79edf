use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 注销当前会话
///
/// 清除缓存的身份信息并让 refresh token cookie 立即过期。
/// access token 本身无法吊销，只能等它自然过期。
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    // 移除缓存中以当前 access token 为键的用户信息
    if let Some(token) = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
    {
        let cache = service.get_cache(request);
        cache.remove(&format!("user:{token}")).await;
    }

    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::success_empty("Logged out")))
}
