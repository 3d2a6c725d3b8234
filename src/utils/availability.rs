use chrono::{Local, NaiveDate, NaiveTime, TimeZone, Utc};
use std::collections::BTreeSet;

use crate::models::booking::parse_api_date_in;
use crate::models::{Booking, BookingRequest};
use crate::utils::validation::ValidationErrors;

pub const RANGE_CONFLICT_MESSAGE: &str = "Your selected date range includes already booked dates";
pub const MISSING_DATES_MESSAGE: &str = "Please select check-in and check-out dates";

/// Every day covered by the bookings, check-out day included
pub fn booked_days(bookings: &[Booking]) -> BTreeSet<NaiveDate> {
    booked_days_in(bookings, &Local)
}

/// Booked days as seen from `tz`
pub fn booked_days_in<Tz: TimeZone>(bookings: &[Booking], tz: &Tz) -> BTreeSet<NaiveDate> {
    let mut days = BTreeSet::new();

    for booking in bookings {
        let from = parse_api_date_in(&booking.date_from, tz);
        let to = parse_api_date_in(&booking.date_to, tz);
        let (Some(from), Some(to)) = (from, to) else {
            log::warn!(
                "[Availability] Skipping booking {} with unreadable dates ({} - {})",
                booking.id, booking.date_from, booking.date_to
            );
            continue;
        };
        days.extend(from.iter_days().take_while(|day| *day <= to));
    }

    days
}

/// False when any day of `from..=to` is booked
pub fn is_range_available(from: NaiveDate, to: NaiveDate, booked: &BTreeSet<NaiveDate>) -> bool {
    let (start, end) = if from <= to { (from, to) } else { (to, from) };
    booked.range(start..=end).next().is_none()
}

pub fn nights(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

pub fn total_price(from: NaiveDate, to: NaiveDate, price_per_night: f64) -> f64 {
    nights(from, to).max(0) as f64 * price_per_night
}

/// Past and booked days cannot be picked in the calendar
pub fn is_selectable(day: NaiveDate, today: NaiveDate, booked: &BTreeSet<NaiveDate>) -> bool {
    day >= today && !booked.contains(&day)
}

/// Check-in/check-out picker state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RangeSelection {
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    error: Option<String>,
}

impl RangeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn range(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.from.zip(self.to)
    }

    pub fn is_complete(&self) -> bool {
        self.range().is_some()
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from <= day && day <= to,
            (Some(from), None) => from == day,
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn click(&mut self, day: NaiveDate, booked: &BTreeSet<NaiveDate>) {
        match self.from {
            Some(from) if self.to.is_none() && day > from => {
                if is_range_available(from, day, booked) {
                    self.to = Some(day);
                    self.error = None;
                } else {
                    log::debug!("[Availability] Range {} - {} overlaps a booking", from, day);
                    self.error = Some(RANGE_CONFLICT_MESSAGE.to_string());
                }
            }
            _ => {
                self.from = Some(day);
                self.to = None;
                self.error = None;
            }
        }
    }
}

/// A stay that passed every local check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BookingWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub guests: u32,
}

impl BookingWindow {
    pub fn nights(&self) -> i64 {
        nights(self.from, self.to)
    }

    pub fn to_request(&self, venue_id: &str) -> BookingRequest {
        BookingRequest {
            date_from: to_api_timestamp(self.from),
            date_to: to_api_timestamp(self.to),
            guests: self.guests,
            venue_id: venue_id.to_string(),
        }
    }
}

/// Local midnight of `day` in the API's ISO-8601 UTC format
pub fn to_api_timestamp(day: NaiveDate) -> String {
    to_api_timestamp_in(day, &Local)
}

pub fn to_api_timestamp_in<Tz: TimeZone>(day: NaiveDate, tz: &Tz) -> String {
    let midnight = day.and_time(NaiveTime::MIN);
    // no local midnight on a DST jump: fall back to UTC midnight
    let instant = tz
        .from_local_datetime(&midnight)
        .earliest()
        .map(|local| local.with_timezone(&Utc).naive_utc())
        .unwrap_or(midnight);
    instant.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Local gate in front of `POST /holidaze/bookings`
pub fn validate_booking(
    selection: &RangeSelection,
    guests: u32,
    max_guests: u32,
    booked: &BTreeSet<NaiveDate>,
) -> Result<BookingWindow, ValidationErrors> {
    let Some((from, to)) = selection.range() else {
        return Err(ValidationErrors::single("dates", MISSING_DATES_MESSAGE));
    };

    if guests < 1 || guests > max_guests {
        return Err(ValidationErrors::single(
            "guests",
            format!("Number of guests must be between 1 and {}", max_guests),
        ));
    }

    if !is_range_available(from, to, booked) {
        return Err(ValidationErrors::single("dates", RANGE_CONFLICT_MESSAGE));
    }

    Ok(BookingWindow { from, to, guests })
}
