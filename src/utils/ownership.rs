// Can the signed-in user edit this venue?
use crate::api::profiles::{fetch_profile, ProfileIncludes};
use crate::api::venues::{fetch_venue, VenueIncludes};
use crate::api::ApiError;
use crate::models::{CachedUser, ProfileSummary, Venue};
use crate::utils::config::ApiConfig;
use crate::utils::session_store::Session;

#[derive(Debug, Clone, PartialEq)]
pub enum OwnershipVerdict {
    Owner(Box<Venue>),
    NotAuthenticated,
    NotVenueManager,
    NotOwner,
}

impl OwnershipVerdict {
    /// Toast text for a refusal
    pub fn denial_message(&self) -> Option<&'static str> {
        match self {
            OwnershipVerdict::Owner(_) => None,
            OwnershipVerdict::NotAuthenticated => Some("You must be logged in to edit venues"),
            OwnershipVerdict::NotVenueManager => Some("Only venue managers can edit venues"),
            OwnershipVerdict::NotOwner => Some("You can only edit your own venues"),
        }
    }
}

/// Owner and user are the same account (name, or email ignoring case)
pub fn is_same_person(owner: &ProfileSummary, user: &CachedUser) -> bool {
    (!owner.name.is_empty() && owner.name == user.name)
        || (!owner.email.is_empty() && owner.email.eq_ignore_ascii_case(&user.email))
}

/// Up to three sequential lookups, since the API has no "can edit" flag:
/// the venue itself, the user's managed venues, then the venue's owner.
pub async fn verify_ownership(
    config: &ApiConfig,
    session: Option<&Session>,
    venue_id: &str,
) -> Result<OwnershipVerdict, ApiError> {
    let Some(session) = session else {
        return Ok(OwnershipVerdict::NotAuthenticated);
    };
    if !session.user.venue_manager {
        log::info!("[Ownership] {} is not a venue manager", session.user.name);
        return Ok(OwnershipVerdict::NotVenueManager);
    }
    let token = session.token.as_str();
    let user = &session.user;

    let venue = fetch_venue(config, Some(token), venue_id, VenueIncludes::NONE).await?;

    match fetch_profile(config, token, &user.name, ProfileIncludes::VENUES).await {
        Ok(profile) if profile.owns_venue(venue_id) => {
            log::info!("[Ownership] {} owns {} (profile venues)", user.name, venue_id);
            return Ok(OwnershipVerdict::Owner(Box::new(venue)));
        }
        Ok(_) => log::debug!("[Ownership] {} not among {}'s venues, probing owner", venue_id, user.name),
        Err(e) if e.is_unauthorized() => return Err(e),
        Err(e) => log::warn!("[Ownership] Profile venues lookup failed, probing owner: {}", e),
    }

    let probe = fetch_venue(config, Some(token), venue_id, VenueIncludes::OWNER).await?;
    let owned = probe.owner.as_ref().is_some_and(|owner| is_same_person(owner, user));

    if owned {
        log::info!("[Ownership] {} owns {} (owner probe)", user.name, venue_id);
        Ok(OwnershipVerdict::Owner(Box::new(venue)))
    } else {
        log::info!("[Ownership] {} does not own {}", user.name, venue_id);
        Ok(OwnershipVerdict::NotOwner)
    }
}

/// Fresh copy of the signed-in user for the create-venue gate. The profile
/// decides the venue manager flag; if it cannot be read the cached user stands,
/// except on 401.
pub async fn confirm_venue_manager(config: &ApiConfig, session: &Session) -> Result<CachedUser, ApiError> {
    match fetch_profile(config, &session.token, &session.user.name, ProfileIncludes::NONE).await {
        Ok(profile) => {
            if profile.venue_manager != session.user.venue_manager {
                log::info!(
                    "[Ownership] Venue manager flag for {} changed to {}",
                    profile.name,
                    profile.venue_manager
                );
            }
            Ok(CachedUser::from(&profile))
        }
        Err(e) if e.is_unauthorized() => Err(e),
        Err(e) => {
            log::warn!("[Ownership] Profile check failed, using cached flag: {}", e);
            Ok(session.user.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_server::{envelope, error_body, FakeApi, Route};
    use serde_json::json;

    #[tokio::test]
    async fn test_confirm_venue_manager_uses_profile_flag() {
        let api = FakeApi::start(vec![Route::get(
            "/holidaze/profiles/kari",
            200,
            envelope(json!({"name": "kari", "email": "kari@stud.noroff.no", "venueManager": true})),
        )]);
        let user = confirm_venue_manager(&api.config(), &session(false)).await.unwrap();
        assert!(user.venue_manager);
    }

    #[tokio::test]
    async fn test_confirm_venue_manager_falls_back_to_cache() {
        let api = FakeApi::start(vec![Route::get("/holidaze/profiles/kari", 500, error_body("boom"))]);
        let user = confirm_venue_manager(&api.config(), &session(true)).await.unwrap();
        assert!(user.venue_manager);

        let api = FakeApi::start(vec![Route::get("/holidaze/profiles/kari", 401, error_body("Invalid token"))]);
        let err = confirm_venue_manager(&api.config(), &session(true)).await.unwrap_err();
        assert!(err.is_unauthorized());
    }

    fn session(manager: bool) -> Session {
        Session::new(
            "tok",
            CachedUser {
                name: "kari".into(),
                email: "Kari@stud.noroff.no".into(),
                venue_manager: manager,
                ..Default::default()
            },
        )
    }

    fn venue_route() -> Route {
        Route::get("/holidaze/venues/v1", 200, envelope(json!({"id": "v1", "name": "Cabin"})))
    }

    fn profile_route(venue_ids: &[&str]) -> Route {
        let venues: Vec<_> = venue_ids.iter().map(|id| json!({"id": id, "name": "x"})).collect();
        Route::get(
            "/holidaze/profiles/kari?_venues=true",
            200,
            envelope(json!({"name": "kari", "email": "kari@stud.noroff.no", "venueManager": true, "venues": venues})),
        )
    }

    fn owner_route(name: &str, email: &str) -> Route {
        Route::get(
            "/holidaze/venues/v1?_owner=true",
            200,
            envelope(json!({"id": "v1", "name": "Cabin", "owner": {"name": name, "email": email}})),
        )
    }

    #[tokio::test]
    async fn test_no_session_makes_no_requests() {
        let api = FakeApi::start(vec![venue_route()]);
        let verdict = verify_ownership(&api.config(), None, "v1").await.unwrap();
        assert_eq!(verdict, OwnershipVerdict::NotAuthenticated);
        assert_eq!(verdict.denial_message(), Some("You must be logged in to edit venues"));
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_customer_is_not_venue_manager() {
        let api = FakeApi::start(vec![venue_route()]);
        let verdict = verify_ownership(&api.config(), Some(&session(false)), "v1").await.unwrap();
        assert_eq!(verdict, OwnershipVerdict::NotVenueManager);
        assert_eq!(api.request_count(), 0);
    }

    #[tokio::test]
    async fn test_owner_found_in_profile_venues() {
        // owner probe route present but must not be needed
        let api = FakeApi::start(vec![owner_route("someone", "x@y.no"), venue_route(), profile_route(&["v0", "v1"])]);
        let verdict = verify_ownership(&api.config(), Some(&session(true)), "v1").await.unwrap();

        assert!(matches!(verdict, OwnershipVerdict::Owner(_)));
        assert_eq!(api.request_count(), 2);
    }

    #[tokio::test]
    async fn test_owner_confirmed_by_probe() {
        let api = FakeApi::start(vec![
            owner_route("kari_old_name", "kari@stud.noroff.no"),
            venue_route(),
            profile_route(&[]),
        ]);
        let verdict = verify_ownership(&api.config(), Some(&session(true)), "v1").await.unwrap();

        assert!(matches!(verdict, OwnershipVerdict::Owner(_)));
        let urls: Vec<_> = api.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec!["/holidaze/venues/v1", "/holidaze/profiles/kari?_venues=true", "/holidaze/venues/v1?_owner=true"]
        );
    }

    #[tokio::test]
    async fn test_someone_elses_venue() {
        let api = FakeApi::start(vec![owner_route("ola", "ola@stud.noroff.no"), venue_route(), profile_route(&["v2"])]);
        let verdict = verify_ownership(&api.config(), Some(&session(true)), "v1").await.unwrap();

        assert_eq!(verdict, OwnershipVerdict::NotOwner);
        assert_eq!(verdict.denial_message(), Some("You can only edit your own venues"));
        assert_eq!(api.request_count(), 3);
    }

    #[tokio::test]
    async fn test_missing_venue_is_an_error() {
        let api = FakeApi::start(vec![Route::get("/holidaze/venues/v1", 404, error_body("No venue with such ID"))]);
        let err = verify_ownership(&api.config(), Some(&session(true)), "v1").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(api.request_count(), 1);
    }
}
