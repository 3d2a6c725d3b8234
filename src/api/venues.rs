// Venue API endpoints
use reqwest::Method;

use crate::api::ApiError;
use crate::models::{Paged, Venue, VenuePayload};
use crate::utils::config::ApiConfig;
use crate::utils::http::{request, send_empty, send_json};

pub const PAGE_SIZE: u32 = 12;

/// Optional relations to embed in a venue response
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct VenueIncludes {
    pub owner: bool,
    pub bookings: bool,
}

impl VenueIncludes {
    pub const NONE: Self = Self { owner: false, bookings: false };
    pub const OWNER: Self = Self { owner: true, bookings: false };
    pub const BOOKINGS: Self = Self { owner: false, bookings: true };
    pub const ALL: Self = Self { owner: true, bookings: true };

    fn query(&self) -> String {
        let mut flags = Vec::new();
        if self.owner {
            flags.push("_owner=true");
        }
        if self.bookings {
            flags.push("_bookings=true");
        }
        if flags.is_empty() {
            String::new()
        } else {
            format!("?{}", flags.join("&"))
        }
    }
}

fn page_query(page: u32) -> String {
    format!("limit={}&page={}&sort=created&sortOrder=desc", PAGE_SIZE, page.max(1))
}

/// One page of venues, newest first
pub async fn list_venues(config: &ApiConfig, page: u32) -> Result<Paged<Venue>, ApiError> {
    let path = format!("/holidaze/venues?{}", page_query(page));
    let response = send_json::<Vec<Venue>>(request(config, Method::GET, &path, None)).await?;

    log::info!("[Venues] Fetched {} venues (page {})", response.data.len(), page);
    Ok(response.into())
}

/// Search by name/description. A blank query returns the unfiltered listing.
pub async fn search_venues(config: &ApiConfig, query: &str, page: u32) -> Result<Paged<Venue>, ApiError> {
    let query = query.trim();
    if query.is_empty() {
        log::debug!("[Venues] Empty search, falling back to full listing");
        return list_venues(config, page).await;
    }

    let path = format!(
        "/holidaze/venues/search?q={}&{}",
        urlencoding::encode(query),
        page_query(page)
    );
    let response = send_json::<Vec<Venue>>(request(config, Method::GET, &path, None)).await?;

    log::info!("[Venues] Search '{}' matched {} venues", query, response.data.len());
    Ok(response.into())
}

pub async fn fetch_venue(
    config: &ApiConfig,
    token: Option<&str>,
    id: &str,
    includes: VenueIncludes,
) -> Result<Venue, ApiError> {
    let path = format!("/holidaze/venues/{}{}", urlencoding::encode(id), includes.query());
    let response = send_json::<Venue>(request(config, Method::GET, &path, token)).await?;

    log::debug!(
        "[Venues] Fetched venue {} ({} bookings embedded)",
        response.data.id,
        response.data.bookings().len()
    );
    Ok(response.data)
}

pub async fn create_venue(config: &ApiConfig, token: &str, payload: &VenuePayload) -> Result<Venue, ApiError> {
    let builder = request(config, Method::POST, "/holidaze/venues", Some(token)).json(payload);
    let venue = send_json::<Venue>(builder).await?.data;

    log::info!("[Venues] Created venue {} ({})", venue.name, venue.id);
    Ok(venue)
}

pub async fn update_venue(
    config: &ApiConfig,
    token: &str,
    id: &str,
    payload: &VenuePayload,
) -> Result<Venue, ApiError> {
    let path = format!("/holidaze/venues/{}", urlencoding::encode(id));
    let builder = request(config, Method::PUT, &path, Some(token)).json(payload);
    let venue = send_json::<Venue>(builder).await?.data;

    log::info!("[Venues] Updated venue {}", venue.id);
    Ok(venue)
}

pub async fn delete_venue(config: &ApiConfig, token: &str, id: &str) -> Result<(), ApiError> {
    let path = format!("/holidaze/venues/{}", urlencoding::encode(id));
    send_empty(request(config, Method::DELETE, &path, Some(token))).await?;

    log::info!("[Venues] Deleted venue {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_server::{envelope, error_body, FakeApi, Route, TEST_API_KEY};
    use serde_json::json;

    fn venues_json() -> serde_json::Value {
        json!([
            {"id": "v2", "name": "Newer", "price": 200, "maxGuests": 2},
            {"id": "v1", "name": "Older", "price": 100, "maxGuests": 4}
        ])
    }

    #[tokio::test]
    async fn test_empty_search_returns_unfiltered_listing() {
        let api = FakeApi::start(vec![Route::get("/holidaze/venues", 200, envelope(venues_json()))]);

        let page = search_venues(&api.config(), "   ", 1).await.unwrap();
        assert_eq!(page.items.len(), 2);

        let requests = api.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.starts_with("/holidaze/venues?limit=12&page=1"));
        assert!(!requests[0].url.contains("search"));
        assert_eq!(requests[0].api_key.as_deref(), Some(TEST_API_KEY));
    }

    #[tokio::test]
    async fn test_search_encodes_query() {
        let api = FakeApi::start(vec![Route::get(
            "/holidaze/venues/search",
            200,
            envelope(json!([{"id": "v9", "name": "Sea view"}])),
        )]);

        let page = search_venues(&api.config(), "sea view", 2).await.unwrap();
        assert_eq!(page.items[0].id, "v9");
        assert!(api.requests()[0].url.starts_with("/holidaze/venues/search?q=sea%20view&limit=12&page=2"));
    }

    #[tokio::test]
    async fn test_fetch_venue_with_includes_and_token() {
        let api = FakeApi::start(vec![Route::get(
            "/holidaze/venues/v1?_owner=true&_bookings=true",
            200,
            envelope(json!({
                "id": "v1", "name": "Cabin",
                "owner": {"name": "kari", "email": "kari@stud.noroff.no"},
                "bookings": [{"id": "b1", "dateFrom": "2025-07-01T00:00:00.000Z", "dateTo": "2025-07-03T00:00:00.000Z", "guests": 2}]
            })),
        )]);

        let venue = fetch_venue(&api.config(), Some("tok"), "v1", VenueIncludes::ALL).await.unwrap();
        assert_eq!(venue.owner.as_ref().unwrap().name, "kari");
        assert_eq!(venue.bookings().len(), 1);
        assert_eq!(api.requests()[0].authorization.as_deref(), Some("Bearer tok"));
    }

    #[tokio::test]
    async fn test_missing_venue_is_not_found() {
        let api = FakeApi::start(vec![Route::get("/holidaze/venues/nope", 404, error_body("No venue with such ID"))]);

        let err = fetch_venue(&api.config(), None, "nope", VenueIncludes::NONE).await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "No venue with such ID");
    }

    #[tokio::test]
    async fn test_delete_venue_accepts_no_content() {
        let api = FakeApi::start(vec![Route::delete("/holidaze/venues/v1", 204)]);

        delete_venue(&api.config(), "tok", "v1").await.unwrap();
        assert_eq!(api.requests()[0].method, "DELETE");
    }

    #[tokio::test]
    async fn test_create_venue_sends_payload() {
        let api = FakeApi::start(vec![Route::post(
            "/holidaze/venues",
            201,
            envelope(json!({"id": "new", "name": "Loft"})),
        )]);
        let payload = VenuePayload {
            name: "Loft".into(),
            description: "Bright loft in town".into(),
            media: vec![],
            price: 500.0,
            max_guests: 2,
            rating: None,
            meta: Default::default(),
            location: Default::default(),
        };

        let venue = create_venue(&api.config(), "tok", &payload).await.unwrap();
        assert_eq!(venue.id, "new");
        let body = api.requests()[0].json();
        assert_eq!(body["maxGuests"], 2);
        assert!(body.get("rating").is_none());
    }
}
