use chrono::{DateTime, Local, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use super::{ProfileSummary, Venue};

/// A reservation as returned by the API. Dates are kept as the API sends them
/// (ISO-8601) and parsed on demand.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub date_from: String,
    pub date_to: String,
    pub guests: u32,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub venue: Option<Box<Venue>>,
    pub customer: Option<ProfileSummary>,
}

impl Booking {
    pub fn check_in(&self) -> Option<NaiveDate> {
        parse_api_date(&self.date_from)
    }

    pub fn check_out(&self) -> Option<NaiveDate> {
        parse_api_date(&self.date_to)
    }

    pub fn venue_name(&self) -> &str {
        self.venue.as_ref().map(|v| v.name.as_str()).unwrap_or("Unknown venue")
    }

    /// Still ahead or in progress on `today`; unparseable dates count as past
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.check_out().is_some_and(|out| out >= today)
    }
}

/// Parse an API timestamp down to its calendar day on this machine's clock.
/// Accepts full RFC 3339 timestamps and bare `YYYY-MM-DD` dates.
pub fn parse_api_date(raw: &str) -> Option<NaiveDate> {
    parse_api_date_in(raw, &Local)
}

/// Same as [`parse_api_date`] with an explicit zone. Bare dates are taken as-is.
pub fn parse_api_date_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(tz).date_naive());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    #[test]
    fn test_is_upcoming_includes_checkout_day() {
        let booking = Booking {
            date_from: "2025-07-10T12:00:00.000Z".into(),
            date_to: "2025-07-14T12:00:00.000Z".into(),
            ..Default::default()
        };
        let day = |d| NaiveDate::from_ymd_opt(2025, 7, d).unwrap();
        assert!(booking.is_upcoming(day(14)));
        assert!(!booking.is_upcoming(day(15)));
        assert!(!Booking::default().is_upcoming(day(1)));
    }

    #[test]
    fn test_parse_api_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 7, 14);
        assert_eq!(parse_api_date_in("2025-07-14T00:00:00.000Z", &Utc), expected);
        assert_eq!(parse_api_date("2025-07-14T12:00:00.000Z"), expected);
        assert_eq!(parse_api_date("2025-07-14"), expected);
        assert_eq!(parse_api_date("14/07/2025"), None);
    }

    #[test]
    fn test_parse_api_date_uses_reader_zone() {
        // local midnight in Oslo, as posted by a browser there
        let oslo = FixedOffset::east_opt(2 * 3600).unwrap();
        let day = |d| NaiveDate::from_ymd_opt(2025, 7, d);
        assert_eq!(parse_api_date_in("2025-07-09T22:00:00.000Z", &oslo), day(10));
        assert_eq!(parse_api_date_in("2025-07-09T22:00:00.000Z", &Utc), day(9));

        let new_york = FixedOffset::west_opt(4 * 3600).unwrap();
        assert_eq!(parse_api_date_in("2025-07-10T00:00:00.000Z", &new_york), day(9));
        assert_eq!(parse_api_date_in("2025-07-10", &new_york), day(10));
    }

    #[test]
    fn test_booking_with_nested_venue() {
        let json = r#"{
            "id": "b1",
            "dateFrom": "2025-07-14T12:00:00.000Z",
            "dateTo": "2025-07-16T12:00:00.000Z",
            "guests": 2,
            "venue": {"id": "v1", "name": "Cabin", "price": 100, "maxGuests": 2}
        }"#;
        let booking: Booking = serde_json::from_str(json).unwrap();
        assert_eq!(booking.venue_name(), "Cabin");
        assert_eq!(booking.check_out(), NaiveDate::from_ymd_opt(2025, 7, 16));
    }
}
