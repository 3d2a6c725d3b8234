use serde::{Deserialize, Serialize};
use super::{Booking, ProfileSummary};

/// Image attached to a venue or profile
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub url: String,
    #[serde(default)]
    pub alt: String,
}

impl Media {
    pub fn new(url: impl Into<String>, alt: impl Into<String>) -> Self {
        Self { url: url.into(), alt: alt.into() }
    }
}

/// Amenity flags
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueMeta {
    pub wifi: bool,
    pub parking: bool,
    pub breakfast: bool,
    pub pets: bool,
}

impl VenueMeta {
    /// Labels for the amenities that are switched on, in display order
    pub fn amenities(&self) -> Vec<&'static str> {
        [
            (self.wifi, "Wifi"),
            (self.parking, "Parking"),
            (self.breakfast, "Breakfast"),
            (self.pets, "Pets allowed"),
        ]
        .into_iter()
        .filter_map(|(on, label)| on.then_some(label))
        .collect()
    }
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    pub address: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub continent: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

impl Location {
    /// "City, Country" with whichever parts are present
    pub fn short_label(&self) -> String {
        [self.city.as_deref(), self.country.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Coordinates, ignoring the 0/0 placeholder the API stores for "unknown"
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.lat, self.lng) {
            (Some(lat), Some(lng)) if lat != 0.0 || lng != 0.0 => Some((lat, lng)),
            _ => None,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueCount {
    pub bookings: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub media: Vec<Media>,
    pub price: f64,
    pub max_guests: u32,
    pub rating: f64,
    pub created: Option<String>,
    pub updated: Option<String>,
    pub meta: VenueMeta,
    pub location: Location,
    pub owner: Option<ProfileSummary>,
    pub bookings: Option<Vec<Booking>>,
    #[serde(rename = "_count")]
    pub count: Option<VenueCount>,
}

impl Venue {
    pub fn cover_image(&self) -> Option<&Media> {
        self.media.iter().find(|m| !m.url.trim().is_empty())
    }

    pub fn description_text(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }

    pub fn bookings(&self) -> &[Booking] {
        self.bookings.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_venue_with_nulls() {
        let json = r#"{
            "id": "v1",
            "name": "Cabin",
            "description": null,
            "media": [{"url": "https://img.test/a.jpg", "alt": "front"}],
            "price": 120,
            "maxGuests": 4,
            "rating": 4.5,
            "meta": {"wifi": true, "parking": false, "breakfast": true, "pets": false},
            "location": {"address": null, "city": "Bergen", "zip": null, "country": "Norway", "continent": null, "lat": 0, "lng": 0},
            "_count": {"bookings": 3}
        }"#;

        let venue: Venue = serde_json::from_str(json).unwrap();
        assert_eq!(venue.max_guests, 4);
        assert_eq!(venue.description_text(), "");
        assert_eq!(venue.meta.amenities(), vec!["Wifi", "Breakfast"]);
        assert_eq!(venue.location.short_label(), "Bergen, Norway");
        assert_eq!(venue.location.coordinates(), None);
        assert_eq!(venue.count.map(|c| c.bookings), Some(3));
        assert!(venue.bookings().is_empty());
    }

    #[test]
    fn test_cover_image_skips_blank_urls() {
        let venue = Venue {
            media: vec![Media::new(" ", ""), Media::new("https://img.test/b.jpg", "b")],
            ..Default::default()
        };
        assert_eq!(venue.cover_image().map(|m| m.url.as_str()), Some("https://img.test/b.jpg"));
    }
}
