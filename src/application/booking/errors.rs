use crate::domain::errors::DateRangeError;
use thiserror::Error;

/// 予約管理アプリケーション層のエラー
#[derive(Debug, Error)]
pub enum BookingApplicationError {
    /// 指定期間に重なる予約が既に存在する
    #[error("Car is not available")]
    CarNotAvailable,

    /// 車両が見つからない
    #[error("Car not found")]
    CarNotFound,

    /// 予約が見つからない
    #[error("Booking not found")]
    BookingNotFound,

    /// ロールまたは所有権の不一致
    #[error("Unauthorized")]
    Unauthorized,

    /// 日付範囲が不正（返却日が引き取り日より前）
    #[error("Return date must not be before pickup date")]
    InvalidDateRange,

    /// 予約ステータスが列挙値に含まれない
    #[error("Invalid booking status: {0}")]
    InvalidStatus(String),

    /// BookingStoreのエラー
    #[error("Booking store error")]
    BookingStoreError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// CarCatalogのエラー
    #[error("Car catalog error")]
    CarCatalogError(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// UserDirectoryのエラー
    #[error("User directory error")]
    UserDirectoryError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<DateRangeError> for BookingApplicationError {
    fn from(err: DateRangeError) -> Self {
        match err {
            DateRangeError::ReturnBeforePickup => BookingApplicationError::InvalidDateRange,
        }
    }
}

/// アプリケーション層の Result型
pub type Result<T> = std::result::Result<T, BookingApplicationError>;
