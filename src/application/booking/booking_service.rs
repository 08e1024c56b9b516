use crate::domain::booking::{BookingStatus, DateRange, quote_price};
use crate::domain::value_objects::{BookingId, CarId, UserId, UserRole};
use crate::ports::{BookingStore, BookingView, CarCatalog, CarView, UserDirectory, UserProfile};
use std::sync::Arc;

use super::availability::is_available;
use super::errors::{BookingApplicationError, Result};

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞い（メソッド）は持たず、純粋な関数に依存関係を渡す。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub booking_store: Arc<dyn BookingStore>,
    pub car_catalog: Arc<dyn CarCatalog>,
    pub user_directory: Arc<dyn UserDirectory>,
}

/// 参照先を結合した予約ビュー
///
/// 一覧系クエリで車両・ユーザーの情報を展開して返すための型。
/// 参照先が見つからない場合はNoneのまま返す（予約自体は返す）。
#[derive(Debug, Clone)]
pub struct BookingDetails {
    pub booking: BookingView,
    pub car: Option<CarView>,
    pub user: Option<UserProfile>,
}

/// 予約を作成する（純粋な関数）
///
/// ビジネスルール：
/// - 指定期間に重なる既存予約がないこと
/// - 車両が存在すること
/// - 料金は作成時に一度だけ計算される：
///   days = ceil((return_date - pickup_date) / 1日), price = days × price_per_day
/// - owner_idは車両のオーナーからコピーされる
///
/// すべての依存が引数として明示的に渡される（関数型の原則）。
///
/// # 一貫性保証
///
/// 空き状況の確認と予約の挿入は別々のストア呼び出しであり、原子的ではない。
/// 同一車両・重複期間への同時リクエストは両方とも確認を通過し得る
/// （check-then-act）。ストレージ層の排他制約で閉じるのが本来の対策だが、
/// 本コアのスコープ外。DESIGN.mdを参照。
///
/// # 引数
/// * `deps` - サービスの依存関係
/// * `user_id` - 予約者のユーザーID（認証ミドルウェア由来）
/// * `car_id` - 予約対象の車両ID
/// * `range` - 貸出期間（構築時に検証済み）
///
/// # 戻り値
/// 永続化された予約レコード
pub async fn create_booking(
    deps: &ServiceDependencies,
    user_id: UserId,
    car_id: CarId,
    range: DateRange,
) -> Result<BookingView> {
    // 1. 空き状況の確認
    if !is_available(&deps.booking_store, car_id, &range).await? {
        return Err(BookingApplicationError::CarNotAvailable);
    }

    // 2. 車両の取得（料金とオーナーの参照元）
    let car = deps
        .car_catalog
        .get_by_id(car_id)
        .await
        .map_err(BookingApplicationError::CarCatalogError)?
        .ok_or(BookingApplicationError::CarNotFound)?;

    // 3. 料金計算（端数日は切り上げ）
    let price = quote_price(car.price_per_day, &range);

    // 4. 永続化（owner_idは車両からコピー）
    let new_booking = crate::ports::NewBooking {
        booking_id: BookingId::new(),
        car_id,
        owner_id: car.owner_id,
        user_id,
        pickup_date: range.pickup_date,
        return_date: range.return_date,
        price,
        status: BookingStatus::Pending,
    };

    deps.booking_store
        .insert(new_booking)
        .await
        .map_err(BookingApplicationError::BookingStoreError)
}

/// ユーザーの予約一覧を取得する（純粋な関数）
///
/// 各予約に車両情報を結合し、作成日時の降順（新しい順）で返す。
/// 読み取り専用。書き込みがなければ繰り返し呼び出しても同じ結果を返す。
pub async fn get_user_bookings(
    deps: &ServiceDependencies,
    user_id: UserId,
) -> Result<Vec<BookingDetails>> {
    let bookings = deps
        .booking_store
        .find_by_user(user_id)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    let mut details = Vec::with_capacity(bookings.len());
    for booking in bookings {
        let car = deps
            .car_catalog
            .get_by_id(booking.car_id)
            .await
            .map_err(BookingApplicationError::CarCatalogError)?;

        details.push(BookingDetails {
            booking,
            car,
            user: None,
        });
    }

    Ok(details)
}

/// オーナーの予約一覧を取得する（純粋な関数）
///
/// ビジネスルール：
/// - 呼び出し元のロールがOwnerであること
///
/// 作成時にコピーされたowner_idフィールドで直接検索する。
/// 各予約に車両情報と予約者の公開プロフィール（認証情報を含まない）を結合し、
/// 作成日時の降順で返す。
pub async fn get_owner_bookings(
    deps: &ServiceDependencies,
    owner_id: UserId,
    caller_role: UserRole,
) -> Result<Vec<BookingDetails>> {
    // 1. ロール確認
    if caller_role != UserRole::Owner {
        return Err(BookingApplicationError::Unauthorized);
    }

    // 2. owner_idフィールドで予約を検索
    let bookings = deps
        .booking_store
        .find_by_owner(owner_id)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    // 3. 車両と予約者プロフィールを結合
    let mut details = Vec::with_capacity(bookings.len());
    for booking in bookings {
        let car = deps
            .car_catalog
            .get_by_id(booking.car_id)
            .await
            .map_err(BookingApplicationError::CarCatalogError)?;

        let user = deps
            .user_directory
            .get_profile(booking.user_id)
            .await
            .map_err(BookingApplicationError::UserDirectoryError)?;

        details.push(BookingDetails { booking, car, user });
    }

    Ok(details)
}

/// 予約のステータスを変更する（純粋な関数）
///
/// ビジネスルール：
/// - 予約が存在すること
/// - 呼び出し元が予約に記録されたオーナーであること
///
/// ステータスは列挙値（pending/confirmed/cancelled）としてAPI境界で
/// 検証済みの値を受け取る。
pub async fn change_booking_status(
    deps: &ServiceDependencies,
    caller_id: UserId,
    booking_id: BookingId,
    new_status: BookingStatus,
) -> Result<()> {
    // 1. 予約の取得
    let booking = deps
        .booking_store
        .get_by_id(booking_id)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?
        .ok_or(BookingApplicationError::BookingNotFound)?;

    // 2. 所有権の確認
    if booking.owner_id != caller_id {
        return Err(BookingApplicationError::Unauthorized);
    }

    // 3. ステータスの上書き
    let updated = deps
        .booking_store
        .update_status(booking_id, new_status)
        .await
        .map_err(BookingApplicationError::BookingStoreError)?;

    // ロード後に予約が消えた場合もNotFoundとして報告する
    if !updated {
        return Err(BookingApplicationError::BookingNotFound);
    }

    Ok(())
}
