mod common;

use chrono::{DateTime, Duration, Timelike, Utc};
use rusty_rental_ddd::adapters::postgres::{PostgresBookingStore, PostgresCarCatalog};
use rusty_rental_ddd::domain::booking::{BookingStatus, DateRange};
use rusty_rental_ddd::domain::value_objects::{BookingId, CarId, UserId};
use rusty_rental_ddd::ports::{BookingStore as _, CarCatalog as _, NewBooking};
use sqlx::PgPool;
use uuid::Uuid;

/// PostgreSQLのTIMESTAMPTZはマイクロ秒精度のため、
/// 比較前にchronoのナノ秒精度を切り捨てる
fn truncate_to_micros(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(dt.nanosecond() / 1_000 * 1_000).unwrap()
}

/// テスト用の挿入データを作成
fn new_booking(
    car_id: CarId,
    owner_id: UserId,
    user_id: UserId,
    range: &DateRange,
    price: f64,
) -> NewBooking {
    NewBooking {
        booking_id: BookingId::new(),
        car_id,
        owner_id,
        user_id,
        pickup_date: range.pickup_date,
        return_date: range.return_date,
        price,
        status: BookingStatus::Pending,
    }
}

/// テスト用の車両行を直接挿入する（carsテーブルは本コアからは読み取り専用）
async fn insert_car(
    pool: &PgPool,
    car_id: CarId,
    owner_id: UserId,
    location: &str,
    price_per_day: f64,
    is_available: bool,
) {
    sqlx::query(
        r#"
        INSERT INTO cars (car_id, owner_id, brand, model, location, price_per_day, is_available)
        VALUES ($1, $2, 'Toyota', 'Corolla', $3, $4, $5)
        "#,
    )
    .bind(car_id.value())
    .bind(owner_id.value())
    .bind(location)
    .bind(price_per_day)
    .bind(is_available)
    .execute(pool)
    .await
    .expect("Failed to insert test car");
}

async fn cleanup_booking(pool: &PgPool, booking_id: BookingId) {
    sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
        .bind(booking_id.value())
        .execute(pool)
        .await
        .expect("Failed to clean up booking");
}

async fn cleanup_car(pool: &PgPool, car_id: CarId) {
    sqlx::query("DELETE FROM cars WHERE car_id = $1")
        .bind(car_id.value())
        .execute(pool)
        .await
        .expect("Failed to clean up car");
}

#[tokio::test]
async fn test_insert_and_get_by_id_round_trip() {
    // Arrange
    let Some(pool) = common::create_test_pool().await else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return;
    };
    let store = PostgresBookingStore::new(pool.clone());

    let pickup = Utc::now();
    let range = DateRange::new(pickup, pickup + Duration::days(3)).unwrap();
    let booking = new_booking(CarId::new(), UserId::new(), UserId::new(), &range, 300.0);
    let booking_id = booking.booking_id;

    // Act
    let inserted = store
        .insert(booking.clone())
        .await
        .expect("Failed to insert booking");

    // Assert: created_at is generated on the database side
    assert_eq!(inserted.booking_id, booking_id);
    assert_eq!(inserted.price, 300.0);
    assert_eq!(inserted.status, BookingStatus::Pending);

    let found = store
        .get_by_id(booking_id)
        .await
        .expect("Failed to load booking")
        .expect("Booking should exist");
    assert_eq!(found.car_id, booking.car_id);
    assert_eq!(found.owner_id, booking.owner_id);
    assert_eq!(found.user_id, booking.user_id);
    assert_eq!(found.pickup_date, truncate_to_micros(range.pickup_date));
    assert_eq!(found.return_date, truncate_to_micros(range.return_date));
    assert_eq!(found.created_at, inserted.created_at);

    cleanup_booking(&pool, booking_id).await;
}

#[tokio::test]
async fn test_find_conflicting_includes_boundary_touch() {
    // Arrange
    let Some(pool) = common::create_test_pool().await else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return;
    };
    let store = PostgresBookingStore::new(pool.clone());

    let car_id = CarId::new();
    let existing_range =
        DateRange::new(common::utc(2026, 1, 1), common::utc(2026, 1, 5)).unwrap();
    let existing = store
        .insert(new_booking(
            car_id,
            UserId::new(),
            UserId::new(),
            &existing_range,
            100.0,
        ))
        .await
        .expect("Failed to insert booking");

    // Act & Assert: picking up on the existing return day counts as a conflict
    let touching = DateRange::new(common::utc(2026, 1, 5), common::utc(2026, 1, 8)).unwrap();
    let conflicts = store
        .find_conflicting(car_id, &touching)
        .await
        .expect("Failed to query conflicts");
    assert_eq!(conflicts.len(), 1);
    assert_eq!(conflicts[0].booking_id, existing.booking_id);

    // Act & Assert: starting the day after does not
    let disjoint = DateRange::new(common::utc(2026, 1, 6), common::utc(2026, 1, 8)).unwrap();
    let conflicts = store
        .find_conflicting(car_id, &disjoint)
        .await
        .expect("Failed to query conflicts");
    assert!(conflicts.is_empty());

    cleanup_booking(&pool, existing.booking_id).await;
}

#[tokio::test]
async fn test_find_by_user_and_owner_newest_first() {
    // Arrange
    let Some(pool) = common::create_test_pool().await else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return;
    };
    let store = PostgresBookingStore::new(pool.clone());

    let user_id = UserId::new();
    let owner_id = UserId::new();
    let range_a = DateRange::new(common::utc(2026, 2, 1), common::utc(2026, 2, 3)).unwrap();
    let range_b = DateRange::new(common::utc(2026, 3, 1), common::utc(2026, 3, 3)).unwrap();

    let first = store
        .insert(new_booking(CarId::new(), owner_id, user_id, &range_a, 50.0))
        .await
        .expect("Failed to insert booking");
    let second = store
        .insert(new_booking(CarId::new(), owner_id, user_id, &range_b, 60.0))
        .await
        .expect("Failed to insert booking");
    // 別のユーザー・オーナーの予約は結果に含まれない
    let unrelated = store
        .insert(new_booking(
            CarId::new(),
            UserId::new(),
            UserId::new(),
            &range_a,
            70.0,
        ))
        .await
        .expect("Failed to insert booking");

    // Act & Assert: user history returns only this user's rows, newest first
    let by_user = store
        .find_by_user(user_id)
        .await
        .expect("Failed to query user bookings");
    assert_eq!(by_user.len(), 2);
    assert!(by_user.iter().all(|b| b.user_id == user_id));
    assert!(by_user[0].created_at >= by_user[1].created_at);

    // Act & Assert: owner listing behaves the same way
    let by_owner = store
        .find_by_owner(owner_id)
        .await
        .expect("Failed to query owner bookings");
    assert_eq!(by_owner.len(), 2);
    assert!(by_owner.iter().all(|b| b.owner_id == owner_id));
    assert!(by_owner[0].created_at >= by_owner[1].created_at);

    cleanup_booking(&pool, first.booking_id).await;
    cleanup_booking(&pool, second.booking_id).await;
    cleanup_booking(&pool, unrelated.booking_id).await;
}

#[tokio::test]
async fn test_update_status_reports_whether_row_existed() {
    // Arrange
    let Some(pool) = common::create_test_pool().await else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return;
    };
    let store = PostgresBookingStore::new(pool.clone());

    let range = DateRange::new(common::utc(2026, 4, 1), common::utc(2026, 4, 3)).unwrap();
    let inserted = store
        .insert(new_booking(
            CarId::new(),
            UserId::new(),
            UserId::new(),
            &range,
            80.0,
        ))
        .await
        .expect("Failed to insert booking");

    // Act & Assert: an existing row is updated
    let updated = store
        .update_status(inserted.booking_id, BookingStatus::Confirmed)
        .await
        .expect("Failed to update status");
    assert!(updated);

    let found = store
        .get_by_id(inserted.booking_id)
        .await
        .expect("Failed to load booking")
        .expect("Booking should exist");
    assert_eq!(found.status, BookingStatus::Confirmed);

    // Act & Assert: a missing id is reported, not silently ignored
    let missing = store
        .update_status(BookingId::new(), BookingStatus::Cancelled)
        .await
        .expect("Failed to update status");
    assert!(!missing);

    cleanup_booking(&pool, inserted.booking_id).await;
}

#[tokio::test]
async fn test_get_by_id_rejects_unknown_status_value() {
    // Arrange
    let Some(pool) = common::create_test_pool().await else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return;
    };
    let store = PostgresBookingStore::new(pool.clone());

    let range = DateRange::new(common::utc(2026, 5, 1), common::utc(2026, 5, 3)).unwrap();
    let inserted = store
        .insert(new_booking(
            CarId::new(),
            UserId::new(),
            UserId::new(),
            &range,
            80.0,
        ))
        .await
        .expect("Failed to insert booking");

    // ステータス列挙の外の値を直接書き込む
    sqlx::query("UPDATE bookings SET status = 'paused' WHERE booking_id = $1")
        .bind(inserted.booking_id.value())
        .execute(&pool)
        .await
        .expect("Failed to corrupt status");

    // Act
    let result = store.get_by_id(inserted.booking_id).await;

    // Assert: the row mapper refuses to produce a view with an unknown status
    assert!(result.is_err());

    cleanup_booking(&pool, inserted.booking_id).await;
}

#[tokio::test]
async fn test_car_catalog_round_trip_and_location_filter() {
    // Arrange
    let Some(pool) = common::create_test_pool().await else {
        eprintln!("DATABASE_URL not set; skipping database test");
        return;
    };
    let catalog = PostgresCarCatalog::new(pool.clone());

    let owner_id = UserId::new();
    // 他のテスト実行と衝突しないよう、ロケーション名を一意にする
    let location = format!("Tokyo-{}", Uuid::new_v4());
    let other_location = format!("Osaka-{}", Uuid::new_v4());

    let listed = CarId::new();
    let unlisted = CarId::new();
    let elsewhere = CarId::new();
    insert_car(&pool, listed, owner_id, &location, 80.0, true).await;
    insert_car(&pool, unlisted, owner_id, &location, 90.0, false).await;
    insert_car(&pool, elsewhere, owner_id, &other_location, 70.0, true).await;

    // Act & Assert: get_by_id maps every column
    let car = catalog
        .get_by_id(listed)
        .await
        .expect("Failed to load car")
        .expect("Car should exist");
    assert_eq!(car.owner_id, owner_id);
    assert_eq!(car.brand, "Toyota");
    assert_eq!(car.model, "Corolla");
    assert_eq!(car.price_per_day, 80.0);
    assert!(car.is_available);

    // Act & Assert: the location search skips unlisted cars and other locations
    let available = catalog
        .find_available_at_location(&location)
        .await
        .expect("Failed to search cars");
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].car_id, listed);

    cleanup_car(&pool, listed).await;
    cleanup_car(&pool, unlisted).await;
    cleanup_car(&pool, elsewhere).await;
}
