// Authentication endpoints
use reqwest::Method;

use crate::api::profiles::{fetch_profile, ProfileIncludes};
use crate::api::ApiError;
use crate::models::{AuthUser, CachedUser, LoginRequest, Profile, RegisterRequest};
use crate::utils::config::ApiConfig;
use crate::utils::http::{request, send_json};
use crate::utils::session_store::Session;

pub async fn login(config: &ApiConfig, credentials: &LoginRequest) -> Result<AuthUser, ApiError> {
    let builder = request(config, Method::POST, "/auth/login", None).json(credentials);
    let user = send_json::<AuthUser>(builder).await?.data;

    log::info!("[Auth] Logged in as {}", user.name);
    Ok(user)
}

pub async fn register(config: &ApiConfig, account: &RegisterRequest) -> Result<Profile, ApiError> {
    let builder = request(config, Method::POST, "/auth/register", None).json(account);
    let profile = send_json::<Profile>(builder).await?.data;

    log::info!("[Auth] Registered {} (venue manager: {})", profile.name, profile.venue_manager);
    Ok(profile)
}

/// Log in and build the session to store. The login payload does not always
/// carry `venueManager`, so the profile is read once for the real flag.
pub async fn sign_in(config: &ApiConfig, credentials: &LoginRequest) -> Result<Session, ApiError> {
    let user = login(config, credentials).await?;
    let mut cached = CachedUser::from(&user);

    match fetch_profile(config, &user.access_token, &user.name, ProfileIncludes::NONE).await {
        Ok(profile) => cached = CachedUser::from(&profile),
        Err(e) => log::warn!("[Auth] Profile lookup after login failed, keeping login data: {}", e),
    }

    Ok(Session::new(user.access_token, cached))
}
