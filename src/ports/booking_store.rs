use crate::domain::booking::{BookingStatus, DateRange};
use crate::domain::value_objects::{BookingId, CarId, UserId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// 永続化済みの予約レコード
///
/// priceは作成時に一度だけ計算され、以降変更されない。
/// owner_idは作成時に車両のオーナーからコピーされる（クエリ最適化のための非正規化）。
#[derive(Debug, Clone)]
pub struct BookingView {
    pub booking_id: BookingId,
    pub car_id: CarId,
    pub owner_id: UserId,
    pub user_id: UserId,
    pub pickup_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub price: f64,
    pub status: BookingStatus,
    pub created_at: DateTime<Utc>,
}

/// 新規予約の挿入データ
///
/// created_atはストア側で生成される（永続化時のタイムスタンプ）。
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub booking_id: BookingId,
    pub car_id: CarId,
    pub owner_id: UserId,
    pub user_id: UserId,
    pub pickup_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
    pub price: f64,
    pub status: BookingStatus,
}

/// 予約ストアポート
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// 新規予約を挿入し、永続化されたレコードを返す
    async fn insert(&self, booking: NewBooking) -> Result<BookingView>;

    /// 指定車両・指定期間と重なる予約を検索する
    ///
    /// 両端を含む区間交差条件:
    /// existing.pickup_date <= range.return_date AND existing.return_date >= range.pickup_date
    ///
    /// ステータスでは絞り込まない。キャンセル済みの予約も期間をブロックする
    /// （既存挙動の維持。DESIGN.mdの決定事項を参照）。
    async fn find_conflicting(&self, car_id: CarId, range: &DateRange) -> Result<Vec<BookingView>>;

    /// IDで予約を取得する
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<BookingView>>;

    /// ユーザーの全予約を検索する（作成日時の降順）
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<BookingView>>;

    /// オーナーの全予約を検索する（作成日時の降順）
    ///
    /// 作成時にコピーされたowner_idフィールドで直接検索する。
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<BookingView>>;

    /// 予約のステータスを上書きする
    ///
    /// 更新された場合はtrue、対象の予約が存在しない場合はfalseを返す。
    /// 存在しないIDへの更新を成功として偽装しない。
    async fn update_status(&self, booking_id: BookingId, status: BookingStatus) -> Result<bool>;
}
