// Booking API endpoints
use std::collections::BTreeSet;

use chrono::NaiveDate;
use reqwest::Method;

use crate::api::ApiError;
use crate::error::AppError;
use crate::models::{Booking, BookingRequest};
use crate::utils::availability::{validate_booking, RangeSelection};
use crate::utils::config::ApiConfig;
use crate::utils::http::{request, send_json};

pub async fn create_booking(config: &ApiConfig, token: &str, booking: &BookingRequest) -> Result<Booking, ApiError> {
    let builder = request(config, Method::POST, "/holidaze/bookings", Some(token)).json(booking);
    let created = send_json::<Booking>(builder).await?.data;

    log::info!(
        "[Booking] Booked venue {} from {} to {} for {} guests",
        booking.venue_id, booking.date_from, booking.date_to, booking.guests
    );
    Ok(created)
}

/// Bookings on one venue, used to refresh the calendar after booking
pub async fn fetch_venue_bookings(config: &ApiConfig, token: Option<&str>, venue_id: &str) -> Result<Vec<Booking>, ApiError> {
    let venue = crate::api::venues::fetch_venue(
        config,
        token,
        venue_id,
        crate::api::venues::VenueIncludes::BOOKINGS,
    )
    .await?;
    Ok(venue.bookings.unwrap_or_default())
}

/// Run the local availability and guest checks, then post the booking.
/// Nothing is sent when a local check fails.
pub async fn book_stay(
    config: &ApiConfig,
    token: &str,
    venue_id: &str,
    selection: &RangeSelection,
    guests: u32,
    max_guests: u32,
    booked: &BTreeSet<NaiveDate>,
) -> Result<Booking, AppError> {
    let window = validate_booking(selection, guests, max_guests, booked).map_err(|e| {
        log::warn!("[Booking] Rejected locally: {}", e);
        e
    })?;
    Ok(create_booking(config, token, &window.to_request(venue_id)).await?)
}
