use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::DateRangeError;

/// 1日あたりのミリ秒数（料金計算の切り上げ単位）
pub const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// 貸出期間 - 両端を含む日付範囲
///
/// 不変条件：pickup_date <= return_date
/// コンストラクタで強制し、逆転した範囲を作成できないようにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub pickup_date: DateTime<Utc>,
    pub return_date: DateTime<Utc>,
}

impl DateRange {
    /// 日付範囲を作成する
    ///
    /// # エラー
    /// return_dateがpickup_dateより前の場合は`DateRangeError::ReturnBeforePickup`
    pub fn new(
        pickup_date: DateTime<Utc>,
        return_date: DateTime<Utc>,
    ) -> Result<Self, DateRangeError> {
        if return_date < pickup_date {
            return Err(DateRangeError::ReturnBeforePickup);
        }
        Ok(Self {
            pickup_date,
            return_date,
        })
    }

    /// 他の範囲と重なるか判定する（両端を含む区間交差テスト）
    ///
    /// overlap(A, B) ⇔ overlap(B, A) が成り立つ。
    pub fn overlaps(&self, other: &DateRange) -> bool {
        self.pickup_date <= other.return_date && self.return_date >= other.pickup_date
    }

    /// 貸出日数を計算する
    ///
    /// 1日未満の端数は1日に切り上げる。pickup == return の場合は0日。
    pub fn rental_days(&self) -> i64 {
        let ms = (self.return_date - self.pickup_date).num_milliseconds();
        // i64::div_ceil is unstable (int_roundings); this is the identical
        // ceiling division for a positive divisor.
        (ms + MS_PER_DAY - 1).div_euclid(MS_PER_DAY)
    }
}

/// 貸出料金を計算する
///
/// price = rental_days × price_per_day
pub fn quote_price(price_per_day: f64, range: &DateRange) -> f64 {
    range.rental_days() as f64 * price_per_day
}

/// 予約ステータス
///
/// 作成時はPending。以降の遷移はオーナーによるステータス変更のみ。
/// キャンセル済みの予約も空き状況の判定では衝突として扱う
/// （全ステータスが期間をブロックする。§availabilityのクエリ参照）。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    /// 承認待ち
    Pending,
    /// 確定済み
    Confirmed,
    /// キャンセル済み
    Cancelled,
}

impl BookingStatus {
    /// 文字列表現を取得する
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {}", s)),
        }
    }
}
