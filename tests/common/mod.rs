use chrono::{DateTime, TimeZone, Utc};
use rusty_rental_ddd::adapters::mock::{BookingStore, CarCatalog, UserDirectory};
use rusty_rental_ddd::application::booking::ServiceDependencies;
use rusty_rental_ddd::domain::value_objects::{CarId, UserId, UserRole};
use rusty_rental_ddd::ports::{CarView, UserProfile};
use sqlx::PgPool;
use std::sync::Arc;

/// テスト用のデータベース接続プールを作成し、マイグレーションを適用
///
/// DATABASE_URLが未設定の場合はNoneを返す（データベースを必要とする
/// テストはスキップされる）。
pub async fn create_test_pool() -> Option<PgPool> {
    let database_url = std::env::var("DATABASE_URL").ok()?;

    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    Some(pool)
}

/// テスト用の依存関係一式
///
/// インメモリのモックアダプターでServiceDependenciesを組み立てる。
/// 各モックへのArcを保持し、テストから状態の準備・検証を行えるようにする。
pub struct TestContext {
    pub booking_store: Arc<BookingStore>,
    pub car_catalog: Arc<CarCatalog>,
    pub user_directory: Arc<UserDirectory>,
    pub deps: ServiceDependencies,
}

pub fn setup() -> TestContext {
    let booking_store = Arc::new(BookingStore::new());
    let car_catalog = Arc::new(CarCatalog::new());
    let user_directory = Arc::new(UserDirectory::new());

    let deps = ServiceDependencies {
        booking_store: booking_store.clone(),
        car_catalog: car_catalog.clone(),
        user_directory: user_directory.clone(),
    };

    TestContext {
        booking_store,
        car_catalog,
        user_directory,
        deps,
    }
}

/// UTC深夜0時のタイムスタンプを作成
pub fn utc(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
}

/// テスト用の車両を作成
pub fn car(owner_id: UserId, location: &str, price_per_day: f64) -> CarView {
    CarView {
        car_id: CarId::new(),
        owner_id,
        brand: "Toyota".to_string(),
        model: "Corolla".to_string(),
        location: location.to_string(),
        price_per_day,
        is_available: true,
        created_at: Utc::now(),
    }
}

/// テスト用のユーザープロフィールを作成
pub fn profile(user_id: UserId, role: UserRole) -> UserProfile {
    UserProfile {
        user_id,
        name: "Test User".to_string(),
        email: "test@example.com".to_string(),
        role,
    }
}
