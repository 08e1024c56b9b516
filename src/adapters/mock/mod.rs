pub mod booking_store;
pub mod car_catalog;
pub mod user_directory;

pub use booking_store::BookingStore;
pub use car_catalog::CarCatalog;
pub use user_directory::UserDirectory;
