use crate::domain::value_objects::{CarId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 車両ビュー
///
/// 車両管理コンテキストが所有するデータの読み取り専用ビュー。
/// is_availableはオーナーが手動で設定する掲載フラグであり、
/// 予約由来の空き状況とは独立している。
#[derive(Debug, Clone)]
pub struct CarView {
    pub car_id: CarId,
    pub owner_id: UserId,
    pub brand: String,
    pub model: String,
    pub location: String,
    pub price_per_day: f64,
    pub is_available: bool,
    pub created_at: DateTime<Utc>,
}

/// 車両カタログポート
///
/// 予約コンテキストと車両管理コンテキストの境界を維持する。
/// 予約コンテキストからは読み取り専用。
#[async_trait]
pub trait CarCatalog: Send + Sync {
    /// IDで車両を取得する
    async fn get_by_id(&self, car_id: CarId) -> Result<Option<CarView>>;

    /// 指定ロケーションの掲載中（is_available = true）の車両を検索する
    async fn find_available_at_location(&self, location: &str) -> Result<Vec<CarView>>;
}
