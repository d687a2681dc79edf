//! 路径参数安全提取器
//!
//! 在进入处理程序之前完成路径参数的解析与校验，
//! 非法参数直接返回统一格式的 400 响应。

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest, HttpResponse};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

fn bad_request(message: &str) -> actix_web::Error {
    actix_web::error::InternalError::from_response(
        message.to_string(),
        HttpResponse::BadRequest().json(ApiResponse::error_empty(ErrorCode::BadRequest, message)),
    )
    .into()
}

/// 定义一个解析正整数路径参数的提取器
macro_rules! define_safe_id_extractor {
    ($name:ident, $param:literal) => {
        #[derive(Debug, Clone, Copy)]
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|raw| raw.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err(bad_request(concat!("Missing or invalid ", $param))),
                })
            }
        }
    };
}

define_safe_id_extractor!(SafeClassIdI64, "class_id");
define_safe_id_extractor!(SafeAssignmentIdI64, "assignment_id");
define_safe_id_extractor!(SafeSubmissionIdI64, "submission_id");
define_safe_id_extractor!(SafeStudentIdI64, "student_id");

/// 班级加入码路径参数
#[derive(Debug, Clone)]
pub struct SafeClassCode(pub String);

impl FromRequest for SafeClassCode {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let code = req
            .match_info()
            .get("code")
            .map(|raw| raw.trim().to_uppercase())
            .filter(|code| {
                (4..=12).contains(&code.len())
                    && code.bytes().all(|b| b.is_ascii_alphanumeric())
            });

        ready(match code {
            Some(code) => Ok(SafeClassCode(code)),
            None => Err(bad_request("Missing or invalid class code")),
        })
    }
}

/// 文件下载 token 路径参数
#[derive(Debug, Clone)]
pub struct SafeFileToken(pub String);

impl FromRequest for SafeFileToken {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = req
            .match_info()
            .get("token")
            .map(str::to_string)
            .filter(|token| {
                !token.is_empty()
                    && token.len() <= 64
                    && token
                        .bytes()
                        .all(|b| b.is_ascii_alphanumeric() || b == b'-')
            });

        ready(match token {
            Some(token) => Ok(SafeFileToken(token)),
            None => Err(bad_request("Missing or invalid file token")),
        })
    }
}
