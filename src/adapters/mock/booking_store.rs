use crate::domain::booking::{BookingStatus, DateRange};
use crate::domain::value_objects::{BookingId, CarId, UserId};
use crate::ports::booking_store::{
    BookingStore as BookingStoreTrait, BookingView, NewBooking, Result,
};
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

/// BookingStoreのインメモリ実装
///
/// テストおよびデータベースなしでの起動確認に使用する。
/// created_atは挿入時刻で採番し、一覧系クエリは作成日時の降順を維持する。
pub struct BookingStore {
    bookings: Mutex<HashMap<BookingId, BookingView>>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self {
            bookings: Mutex::new(HashMap::new()),
        }
    }

    /// 保存されている予約の件数（テストの検証用）
    pub fn count(&self) -> usize {
        self.bookings.lock().unwrap().len()
    }
}

impl Default for BookingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookingStoreTrait for BookingStore {
    async fn insert(&self, booking: NewBooking) -> Result<BookingView> {
        let view = BookingView {
            booking_id: booking.booking_id,
            car_id: booking.car_id,
            owner_id: booking.owner_id,
            user_id: booking.user_id,
            pickup_date: booking.pickup_date,
            return_date: booking.return_date,
            price: booking.price,
            status: booking.status,
            created_at: Utc::now(),
        };

        let mut bookings = self.bookings.lock().unwrap();
        bookings.insert(view.booking_id, view.clone());
        Ok(view)
    }

    async fn find_conflicting(&self, car_id: CarId, range: &DateRange) -> Result<Vec<BookingView>> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings
            .values()
            .filter(|b| {
                b.car_id == car_id
                    && b.pickup_date <= range.return_date
                    && b.return_date >= range.pickup_date
            })
            .cloned()
            .collect())
    }

    async fn get_by_id(&self, booking_id: BookingId) -> Result<Option<BookingView>> {
        let bookings = self.bookings.lock().unwrap();
        Ok(bookings.get(&booking_id).cloned())
    }

    async fn find_by_user(&self, user_id: UserId) -> Result<Vec<BookingView>> {
        let bookings = self.bookings.lock().unwrap();
        let mut found: Vec<BookingView> = bookings
            .values()
            .filter(|b| b.user_id == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn find_by_owner(&self, owner_id: UserId) -> Result<Vec<BookingView>> {
        let bookings = self.bookings.lock().unwrap();
        let mut found: Vec<BookingView> = bookings
            .values()
            .filter(|b| b.owner_id == owner_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(found)
    }

    async fn update_status(&self, booking_id: BookingId, status: BookingStatus) -> Result<bool> {
        let mut bookings = self.bookings.lock().unwrap();
        match bookings.get_mut(&booking_id) {
            Some(booking) => {
                booking.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
