pub mod booking_store;
pub mod car_catalog;

pub use booking_store::BookingStore as PostgresBookingStore;
pub use car_catalog::CarCatalog as PostgresCarCatalog;
