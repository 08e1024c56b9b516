use crate::domain::value_objects::CarId;
use crate::ports::car_catalog::{CarCatalog as CarCatalogTrait, CarView, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// CarCatalogのモック実装
///
/// 車両を登録することで状態を持ったテストをサポート。
pub struct CarCatalog {
    cars: Mutex<HashMap<CarId, CarView>>,
}

impl CarCatalog {
    pub fn new() -> Self {
        Self {
            cars: Mutex::new(HashMap::new()),
        }
    }

    /// テスト用に車両を登録
    pub fn add_car(&self, car: CarView) {
        self.cars.lock().unwrap().insert(car.car_id, car);
    }
}

impl Default for CarCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CarCatalogTrait for CarCatalog {
    /// 登録された車両の中からIDで取得
    async fn get_by_id(&self, car_id: CarId) -> Result<Option<CarView>> {
        Ok(self.cars.lock().unwrap().get(&car_id).cloned())
    }

    /// 登録された車両の中からロケーションと掲載フラグで検索
    async fn find_available_at_location(&self, location: &str) -> Result<Vec<CarView>> {
        Ok(self
            .cars
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.location == location && c.is_available)
            .cloned()
            .collect())
    }
}
