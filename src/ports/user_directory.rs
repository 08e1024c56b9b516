use crate::domain::value_objects::{UserId, UserRole};
use async_trait::async_trait;

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 公開ユーザープロフィール
///
/// 認証情報（パスワードハッシュ等）は型レベルで除外されている。
/// オーナー向け予約一覧のユーザー結合にはこの型のみを使用する。
#[derive(Debug, Clone)]
pub struct UserProfile {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}

/// ユーザーディレクトリポート
///
/// 予約コンテキストとユーザー管理コンテキストの境界を維持する。
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// ユーザーの公開プロフィールを取得する
    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>>;
}
