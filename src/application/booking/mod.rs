mod availability;
mod booking_service;
mod errors;

pub use availability::{check_availability_of_cars, is_available};
pub use booking_service::{
    BookingDetails, ServiceDependencies, change_booking_status, create_booking,
    get_owner_bookings, get_user_bookings,
};
pub use errors::{BookingApplicationError, Result};
