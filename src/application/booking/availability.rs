use crate::domain::booking::DateRange;
use crate::domain::value_objects::CarId;
use crate::ports::{BookingStore, CarView};
use std::sync::Arc;

use super::booking_service::ServiceDependencies;
use super::errors::{BookingApplicationError, Result};

/// 車両が指定期間に予約可能か判定する（純粋な関数）
///
/// 期間と重なる既存予約が0件の場合にtrueを返す。
/// 重なり判定は両端を含む区間交差テスト：
/// existing.pickup_date <= requested.return_date AND
/// existing.return_date >= requested.pickup_date
///
/// ステータスでは絞り込まない。キャンセル済みの予約も期間をブロックする
/// （既存挙動の維持。DESIGN.mdの決定事項を参照）。
///
/// 副作用なし。読み取り専用。
pub async fn is_available(
    booking_store: &Arc<dyn BookingStore>,
    car_id: CarId,
    range: &DateRange,
) -> Result<bool> {
    let conflicts = booking_store
        .find_conflicting(car_id, range)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    Ok(conflicts.is_empty())
}

/// 指定ロケーション・指定期間で予約可能な車両を検索する（純粋な関数）
///
/// 処理フロー：
/// 1. 掲載中（is_available = true）の車両をロケーションで検索
/// 2. 各車両について期間の空き状況を判定
/// 3. 空きのある車両のみを返す
///
/// すべての依存が引数として明示的に渡される（関数型の原則）。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `location` - 検索対象のロケーション
/// * `range` - リクエストされた貸出期間
///
/// # 戻り値
/// 期間内に予約可能な車両の一覧
pub async fn check_availability_of_cars(
    deps: &ServiceDependencies,
    location: &str,
    range: &DateRange,
) -> Result<Vec<CarView>> {
    // 1. 掲載中の車両をロケーションで検索
    let cars = deps
        .car_catalog
        .find_available_at_location(location)
        .await
        .map_err(BookingApplicationError::CarCatalogError)?;

    // 2. 各車両の期間の空き状況を判定し、空きのあるものだけを残す
    let mut available_cars = Vec::with_capacity(cars.len());
    for car in cars {
        if is_available(&deps.booking_store, car.car_id, range).await? {
            available_cars.push(car);
        }
    }

    Ok(available_cars)
}
