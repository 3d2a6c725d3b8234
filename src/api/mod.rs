// Holidaze API client modules

pub mod error;
pub mod auth;
pub mod venues;
pub mod bookings;
pub mod profiles;

pub use error::ApiError;
