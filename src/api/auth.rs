use async_trait::async_trait;
use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use std::str::FromStr;
use uuid::Uuid;

use crate::domain::value_objects::{UserId, UserRole};

use super::types::ErrorResponse;

/// 認証済みユーザーIDを運ぶヘッダー
pub const USER_ID_HEADER: &str = "x-user-id";
/// 認証済みロールを運ぶヘッダー
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// 認証済みユーザー
///
/// 外部の認証ミドルウェアが検証済みの識別情報をヘッダーで注入する。
/// 本コアはヘッダーの内容をそのまま信頼する（検証はミドルウェアの責務）。
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
    pub role: UserRole,
}

/// 認証情報の抽出エラー
///
/// ヘッダーの欠落・不正はすべて401として扱う。
#[derive(Debug)]
pub struct AuthError;

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse::new("Unauthorized"));
        (StatusCode::UNAUTHORIZED, body).into_response()
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| Uuid::parse_str(v).ok())
            .map(UserId::from_uuid)
            .ok_or(AuthError)?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| UserRole::from_str(v).ok())
            .ok_or(AuthError)?;

        Ok(AuthenticatedUser { user_id, role })
    }
}
