use crate::domain::value_objects::{CarId, UserId};
use crate::ports::car_catalog::{CarCatalog as CarCatalogTrait, CarView, Result};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

/// PostgreSQLの行データをCarViewに変換する
fn map_row_to_car_view(row: &PgRow) -> CarView {
    CarView {
        car_id: CarId::from_uuid(row.get("car_id")),
        owner_id: UserId::from_uuid(row.get("owner_id")),
        brand: row.get("brand"),
        model: row.get("model"),
        location: row.get("location"),
        price_per_day: row.get("price_per_day"),
        is_available: row.get("is_available"),
        created_at: row.get("created_at"),
    }
}

/// CarCatalogのPostgreSQL実装
///
/// carsテーブルは車両管理コンテキストが所有する。
/// 予約コンテキストからはSELECTのみを発行する。
pub struct CarCatalog {
    pool: PgPool,
}

impl CarCatalog {
    /// PostgreSQLコネクションプールから新しいCarCatalogを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CarCatalogTrait for CarCatalog {
    /// IDで車両を取得
    async fn get_by_id(&self, car_id: CarId) -> Result<Option<CarView>> {
        let row = sqlx::query(
            r#"
            SELECT
                car_id,
                owner_id,
                brand,
                model,
                location,
                price_per_day,
                is_available,
                created_at
            FROM cars
            WHERE car_id = $1
            "#,
        )
        .bind(car_id.value())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(map_row_to_car_view))
    }

    /// 指定ロケーションの掲載中の車両を検索
    async fn find_available_at_location(&self, location: &str) -> Result<Vec<CarView>> {
        let rows = sqlx::query(
            r#"
            SELECT
                car_id,
                owner_id,
                brand,
                model,
                location,
                price_per_day,
                is_available,
                created_at
            FROM cars
            WHERE location = $1 AND is_available = TRUE
            ORDER BY created_at DESC
            "#,
        )
        .bind(location)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(map_row_to_car_view).collect())
    }
}
