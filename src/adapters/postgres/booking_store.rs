use crate::domain::booking::{BookingStatus, DateRange};
use crate::domain::value_objects::{BookingId, CarId, UserId};
use crate::ports::booking_store::{
    BookingStore as BookingStoreTrait, BookingView, NewBooking, Result,
};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

/// PostgreSQLの行データをBookingViewに変換する
///
/// statusの文字列からの変換でエラーハンドリングを行う。
fn map_row_to_booking_view(row: &PgRow) -> Result<BookingView> {
    let status_str: &str = row.get("status");
    let status = BookingStatus::from_str(status_str).map_err(|e| {
        Box::new(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
            as Box<dyn std::error::Error + Send + Sync>
    })?;

    Ok(BookingView {
        booking_id: BookingId::from_uuid(row.get("booking_id")),
        car_id: CarId::from_uuid(row.get("car_id")),
        owner_id: UserId::from_uuid(row.get("owner_id")),
        user_id: UserId::from_uuid(row.get("user_id")),
        pickup_date: row.get("pickup_date"),
        return_date: row.get("return_date"),
        price: row.get("price"),
        status,
        created_at: row.get("created_at"),
    })
}

/// BookingStoreのPostgreSQL実装
pub struct BookingStore {
    pool: PgPool,
}

impl BookingStore {
    /// PostgreSQLコネクションプールから新しいBookingStoreを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    /// 新規予約を挿入する
    ///
    /// created_atはデータベース側（now()）で生成し、
    /// RETURNINGで永続化済みレコードを取り出す。
    async fn insert(&self, booking: NewBooking) -> Result<BookingView> {
        let row = sqlx::query(
            r#"
            INSERT INTO bookings (
                booking_id,
                car_id,
                owner_id,
                user_id,
                pickup_date,
                return_date,
                price,
                status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                booking_id,
                car_id,
                owner_id,
                user_id,
                pickup_date,
                return_date,
                price,
                status,
                created_at
            "#,
        )
        .bind(booking.booking_id.value())
        .bind(booking.car_id.value())
        .bind(booking.owner_id.value())
        .bind(booking.user_id.value())
        .bind(booking.pickup_date)
        .bind(booking.return_date)
        .bind(booking.price)
        .bind(booking.status.as_str())
        .fetch_one(&self.pool)
        .await?;

        map_row_to_booking_view(&row)
    }

    /// 指定車両・指定期間と重なる予約を検索（両端を含む区間交差）
    ///
    /// ステータスでは絞り込まない。
    async fn find_conflicting(&self, car_id: CarId, range: &DateRange) -> Result<Vec<BookingView>> {
        let rows = sqlx::query(
            r#"
            SELECT
                booking_id,
                car_id,
                owner_id,
                user_id,
                pickup_date,
                return_date,
                price,
                status,
                created_at
            FROM bookings
            WHERE car_id = $1
              AND pickup_date <= $2
              AND return_date >= $3
            "#,
        )
        .bind(car_id.value())
        .bind(range.return_date)
        .bind(range.pickup_date)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking_view).collect()
    }

    /// IDで予約を取得
    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<BookingView>> {
        let row = sqlx::query(
            r#"
            SELECT
                booking_id,
                car_id,
                owner_id,
                user_id,
                pickup_date,
                return_date,
                price,
                status,
                created_at
            FROM bookings
            WHERE booking_id = $1
            "#,
        )
        .bind(booking_id.value())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(map_row_to_booking_view).transpose()
    }

    /// ユーザーの全予約を検索（予約履歴、新しい順）
    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<BookingView>> {
        let rows = sqlx::query(
            r#"
            SELECT
                booking_id,
                car_id,
                owner_id,
                user_id,
                pickup_date,
                return_date,
                price,
                status,
                created_at
            FROM bookings
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking_view).collect()
    }

    /// オーナーの全予約を検索（新しい順）
    ///
    /// (owner_id, created_at DESC)のインデックスを使用する。
    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<BookingView>> {
        let rows = sqlx::query(
            r#"
            SELECT
                booking_id,
                car_id,
                owner_id,
                user_id,
                pickup_date,
                return_date,
                price,
                status,
                created_at
            FROM bookings
            WHERE owner_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(owner_id.value())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_booking_view).collect()
    }

    /// 予約のステータスを上書き
    ///
    /// 更新対象が存在したかをrows_affectedで報告する。
    async fn update_status(&self, booking_id: BookingId, status: BookingStatus) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE bookings
            SET status = $2
            WHERE booking_id = $1
            "#,
        )
        .bind(booking_id.value())
        .bind(status.as_str())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
