// Profile API endpoints
use reqwest::Method;

use futures_util::future::join_all;

use crate::api::bookings::fetch_venue_bookings;
use crate::api::ApiError;
use crate::models::{Booking, Profile, ProfileMediaUpdate, Venue};
use crate::utils::config::ApiConfig;
use crate::utils::http::{request, send_json};

#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ProfileIncludes {
    pub venues: bool,
    pub bookings: bool,
}

impl ProfileIncludes {
    pub const NONE: Self = Self { venues: false, bookings: false };
    pub const VENUES: Self = Self { venues: true, bookings: false };
    pub const ALL: Self = Self { venues: true, bookings: true };

    fn query(&self) -> String {
        match (self.bookings, self.venues) {
            (true, true) => "?_bookings=true&_venues=true".into(),
            (true, false) => "?_bookings=true".into(),
            (false, true) => "?_venues=true".into(),
            (false, false) => String::new(),
        }
    }
}

fn profile_path(name: &str) -> String {
    format!("/holidaze/profiles/{}", urlencoding::encode(name))
}

pub async fn fetch_profile(
    config: &ApiConfig,
    token: &str,
    name: &str,
    includes: ProfileIncludes,
) -> Result<Profile, ApiError> {
    let path = format!("{}{}", profile_path(name), includes.query());
    let profile = send_json::<Profile>(request(config, Method::GET, &path, Some(token))).await?.data;

    log::info!(
        "[Profile] Fetched {} (manager: {}, venues: {}, bookings: {})",
        profile.name,
        profile.venue_manager,
        profile.venues.as_ref().map_or(0, Vec::len),
        profile.bookings.as_ref().map_or(0, Vec::len)
    );
    Ok(profile)
}

/// Venues managed by a profile, optionally with their bookings embedded
pub async fn fetch_profile_venues(
    config: &ApiConfig,
    token: &str,
    name: &str,
    with_bookings: bool,
) -> Result<Vec<Venue>, ApiError> {
    let mut path = format!("{}/venues", profile_path(name));
    if with_bookings {
        path.push_str("?_bookings=true");
    }
    let venues = send_json::<Vec<Venue>>(request(config, Method::GET, &path, Some(token))).await?.data;

    log::info!("[Profile] {} manages {} venues", name, venues.len());
    Ok(venues)
}

/// Bookings made by a profile, each with its venue embedded
pub async fn fetch_profile_bookings(config: &ApiConfig, token: &str, name: &str) -> Result<Vec<Booking>, ApiError> {
    let path = format!("{}/bookings?_venue=true", profile_path(name));
    let bookings = send_json::<Vec<Booking>>(request(config, Method::GET, &path, Some(token))).await?.data;

    log::info!("[Profile] {} has {} bookings", name, bookings.len());
    Ok(bookings)
}

pub async fn update_profile_media(
    config: &ApiConfig,
    token: &str,
    name: &str,
    update: &ProfileMediaUpdate,
) -> Result<Profile, ApiError> {
    let builder = request(config, Method::PUT, &profile_path(name), Some(token)).json(update);
    let profile = send_json::<Profile>(builder).await?.data;

    log::info!("[Profile] Updated images for {}", profile.name);
    Ok(profile)
}

/// A managed venue with the bookings made on it
#[derive(Debug, Clone)]
pub struct ManagedVenue {
    pub venue: Venue,
    pub bookings: Result<Vec<Booking>, String>,
}

/// Everything the profile screen shows
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub profile: Profile,
    pub bookings: Vec<Booking>,
    pub venues: Vec<ManagedVenue>,
}

/// Profile, own bookings and, for venue managers, every managed venue with
/// its bookings. Per-venue booking lookups run concurrently and fail
/// independently.
pub async fn fetch_dashboard(config: &ApiConfig, token: &str, name: &str) -> Result<Dashboard, ApiError> {
    let profile = fetch_profile(config, token, name, ProfileIncludes::NONE).await?;
    let bookings = fetch_profile_bookings(config, token, name).await?;

    let venues = if profile.venue_manager {
        fetch_profile_venues(config, token, name, false).await?
    } else {
        Vec::new()
    };

    let venues = join_all(venues.into_iter().map(|venue| async move {
        let bookings = fetch_venue_bookings(config, Some(token), &venue.id).await.map_err(|e| {
            log::warn!("[Profile] Bookings for venue {} failed: {}", venue.id, e);
            e.to_string()
        });
        ManagedVenue { venue, bookings }
    }))
    .await;

    Ok(Dashboard { profile, bookings, venues })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Media;
    use crate::utils::test_server::{envelope, error_body, FakeApi, Route};
    use serde_json::json;

    #[tokio::test]
    async fn test_fetch_profile_with_relations() {
        let api = FakeApi::start(vec![Route::get(
            "/holidaze/profiles/kari?_bookings=true&_venues=true",
            200,
            envelope(json!({
                "name": "kari", "email": "kari@stud.noroff.no", "venueManager": true,
                "venues": [{"id": "v1", "name": "Cabin"}],
                "bookings": [],
                "_count": {"venues": 1, "bookings": 0}
            })),
        )]);

        let profile = fetch_profile(&api.config(), "tok", "kari", ProfileIncludes::ALL).await.unwrap();
        assert!(profile.venue_manager);
        assert!(profile.owns_venue("v1"));
        assert_eq!(profile.count.unwrap().venues, 1);
    }

    #[tokio::test]
    async fn test_update_profile_media_sends_only_given_images() {
        let api = FakeApi::start(vec![Route::put(
            "/holidaze/profiles/kari",
            200,
            envelope(json!({"name": "kari", "email": "kari@stud.noroff.no",
                            "avatar": {"url": "https://img.test/a.jpg", "alt": "me"}})),
        )]);
        let update = ProfileMediaUpdate {
            avatar: Some(Media::new("https://img.test/a.jpg", "me")),
            banner: None,
        };

        let profile = update_profile_media(&api.config(), "tok", "kari", &update).await.unwrap();
        assert_eq!(profile.avatar.unwrap().alt, "me");

        let body = api.requests()[0].json();
        assert_eq!(body["avatar"]["url"], "https://img.test/a.jpg");
        assert!(body.get("banner").is_none());
    }

    #[tokio::test]
    async fn test_fetch_profile_venues_with_bookings() {
        let api = FakeApi::start(vec![Route::get(
            "/holidaze/profiles/kari/venues?_bookings=true",
            200,
            envelope(json!([{"id": "v1", "name": "Cabin", "bookings": [{"id": "b1", "guests": 2}]}])),
        )]);

        let venues = fetch_profile_venues(&api.config(), "tok", "kari", true).await.unwrap();
        assert_eq!(venues[0].bookings().len(), 1);
    }

    #[tokio::test]
    async fn test_dashboard_for_manager_collects_venue_bookings() {
        let api = FakeApi::start(vec![
            Route::get(
                "/holidaze/profiles/kari",
                200,
                envelope(json!({"name": "kari", "email": "kari@stud.noroff.no", "venueManager": true})),
            ),
            Route::get(
                "/holidaze/profiles/kari/bookings?_venue=true",
                200,
                envelope(json!([{"id": "b9", "venue": {"id": "v7", "name": "Loft"}}])),
            ),
            Route::get(
                "/holidaze/profiles/kari/venues",
                200,
                envelope(json!([{"id": "v1", "name": "Cabin"}, {"id": "v2", "name": "Barn"}])),
            ),
            Route::get(
                "/holidaze/venues/v1?_bookings=true",
                200,
                envelope(json!({"id": "v1", "name": "Cabin", "bookings": [{"id": "b1"}, {"id": "b2"}]})),
            ),
            Route::get("/holidaze/venues/v2?_bookings=true", 500, error_body("Venue lookup failed")),
        ]);

        let dashboard = fetch_dashboard(&api.config(), "tok", "kari").await.unwrap();
        assert_eq!(dashboard.bookings[0].venue_name(), "Loft");
        assert_eq!(dashboard.venues.len(), 2);
        assert_eq!(dashboard.venues[0].bookings.as_ref().unwrap().len(), 2);
        assert_eq!(dashboard.venues[1].bookings.as_ref().unwrap_err(), "Venue lookup failed");
    }

    #[tokio::test]
    async fn test_dashboard_for_customer_skips_venues() {
        let api = FakeApi::start(vec![
            Route::get(
                "/holidaze/profiles/ola",
                200,
                envelope(json!({"name": "ola", "email": "ola@stud.noroff.no", "venueManager": false})),
            ),
            Route::get("/holidaze/profiles/ola/bookings?_venue=true", 200, envelope(json!([]))),
        ]);

        let dashboard = fetch_dashboard(&api.config(), "tok", "ola").await.unwrap();
        assert!(dashboard.venues.is_empty());
        assert_eq!(api.request_count(), 2);
    }
}
