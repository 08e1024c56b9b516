pub mod booking_store;
pub mod car_catalog;
pub mod user_directory;

pub use booking_store::*;
pub use car_catalog::*;
pub use user_directory::*;
