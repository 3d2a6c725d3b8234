use serde::{Deserialize, Serialize};
use super::{Booking, Media, Venue};

/// Compact profile embedded in other resources (venue owner, booking customer)
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileSummary {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar: Option<Media>,
    pub banner: Option<Media>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileCount {
    pub venues: u32,
    pub bookings: u32,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub bio: Option<String>,
    pub avatar: Option<Media>,
    pub banner: Option<Media>,
    pub venue_manager: bool,
    pub venues: Option<Vec<Venue>>,
    pub bookings: Option<Vec<Booking>>,
    #[serde(rename = "_count")]
    pub count: Option<ProfileCount>,
}

impl Profile {
    pub fn owns_venue(&self, venue_id: &str) -> bool {
        self.venues
            .as_ref()
            .is_some_and(|venues| venues.iter().any(|v| v.id == venue_id))
    }
}

/// `data` of a successful login
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub avatar: Option<Media>,
    #[serde(default)]
    pub banner: Option<Media>,
    pub access_token: String,
    #[serde(default)]
    pub venue_manager: Option<bool>,
}

/// The part of the signed-in user kept in the session cache
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedUser {
    pub name: String,
    pub email: String,
    pub avatar: Option<Media>,
    pub banner: Option<Media>,
    pub venue_manager: bool,
}

impl From<&AuthUser> for CachedUser {
    fn from(user: &AuthUser) -> Self {
        Self {
            name: user.name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
            banner: user.banner.clone(),
            venue_manager: user.venue_manager.unwrap_or(false),
        }
    }
}

impl From<&Profile> for CachedUser {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            email: profile.email.clone(),
            avatar: profile.avatar.clone(),
            banner: profile.banner.clone(),
            venue_manager: profile.venue_manager,
        }
    }
}
