// Client-side form checks run before any request is sent
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use crate::models::{
    LoginRequest, Location, Media, ProfileMediaUpdate, RegisterRequest, Venue, VenueMeta, VenuePayload,
};

const UNSPLASH_HOST: &str = "images.unsplash.com";
const UNSPLASH_PARAMS: &str = "crop=entropy&fit=crop&h=900&q=80&w=1600";
const ALT_MAX: usize = 120;
const BIO_MAX: usize = 160;
const PASSWORD_MIN: usize = 8;
const DESCRIPTION_MIN: usize = 10;
pub const MEDIA_SLOTS: usize = 3;

static USERNAME_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("valid regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"));
static STUD_EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"@stud\.noroff\.no$").expect("valid regex"));
static PHOTO_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9_-]+$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Every failed rule of one form submission
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError { field, message: message.into() });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First message for a field, for inline display under the input
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn finish<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.first() {
            Some(first) => write!(f, "{}", first.message),
            None => write!(f, "Invalid input"),
        }
    }
}

impl std::error::Error for ValidationErrors {}

pub fn is_valid_url(raw: &str) -> bool {
    reqwest::Url::parse(raw.trim())
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false)
}

pub fn is_valid_email(raw: &str) -> bool {
    EMAIL_RE.is_match(raw.trim())
}

/// Normalise image input toward the Unsplash form the API accepts:
/// bare photo ids become full URLs and bare Unsplash URLs gain sizing params.
pub fn format_unsplash_url(raw: &str) -> String {
    let url = raw.trim();
    if url.is_empty() {
        return String::new();
    }
    if url.contains(UNSPLASH_HOST) && url.contains("crop=entropy") {
        return url.to_string();
    }
    if url.contains(UNSPLASH_HOST) && !url.contains('?') {
        return format!("{}?{}", url, UNSPLASH_PARAMS);
    }
    if PHOTO_ID_RE.is_match(url) && url.len() > 10 {
        return format!("https://{}/photo-{}?{}", UNSPLASH_HOST, url, UNSPLASH_PARAMS);
    }
    url.to_string()
}

fn check_optional_url(errors: &mut ValidationErrors, field: &'static str, url: &str) {
    if !url.trim().is_empty() && !is_valid_url(url) {
        errors.push(field, "Must be a valid URL");
    }
}

fn check_alt(errors: &mut ValidationErrors, field: &'static str, alt: &str) {
    if alt.trim().chars().count() > ALT_MAX {
        errors.push(field, "Alt text must be less than 120 characters");
    }
}

fn optional_media(url: &str, alt: &str, default_alt: impl FnOnce() -> String) -> Option<Media> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    let alt = alt.trim();
    let alt = if alt.is_empty() { default_alt() } else { alt.to_string() };
    Some(Media::new(url, alt))
}

// ====================================
// LOGIN
// ====================================

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

pub fn validate_login(form: &LoginForm) -> Result<LoginRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let email = form.email.trim();

    if email.is_empty() {
        errors.push("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.push("email", "Invalid email address");
    }
    if form.password.is_empty() {
        errors.push("password", "Password is required");
    }

    errors.finish(LoginRequest {
        email: email.to_string(),
        password: form.password.clone(),
    })
}

// ====================================
// REGISTER
// ====================================

#[derive(Debug, Clone, Default)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub bio: String,
    pub avatar_url: String,
    pub avatar_alt: String,
    pub banner_url: String,
    pub banner_alt: String,
    pub venue_manager: bool,
}

pub fn validate_register(form: &RegisterForm) -> Result<RegisterRequest, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let name = form.name.trim();
    let email = form.email.trim();

    if name.is_empty() {
        errors.push("name", "Username is required");
    } else if !USERNAME_RE.is_match(name) {
        errors.push("name", "Username can only contain letters, numbers, and underscores");
    }

    if email.is_empty() {
        errors.push("email", "Email is required");
    } else if !is_valid_email(email) {
        errors.push("email", "Invalid email address");
    } else if !STUD_EMAIL_RE.is_match(email) {
        errors.push("email", "Must be a valid stud.noroff.no email address");
    }

    if form.password.chars().count() < PASSWORD_MIN {
        errors.push("password", "Password must be at least 8 characters");
    }
    if form.bio.trim().chars().count() > BIO_MAX {
        errors.push("bio", "Bio must be less than 160 characters");
    }

    check_optional_url(&mut errors, "avatar_url", &form.avatar_url);
    check_alt(&mut errors, "avatar_alt", &form.avatar_alt);
    check_optional_url(&mut errors, "banner_url", &form.banner_url);
    check_alt(&mut errors, "banner_alt", &form.banner_alt);

    let bio = form.bio.trim();
    errors.finish(RegisterRequest {
        name: name.to_string(),
        email: email.to_string(),
        password: form.password.clone(),
        bio: (!bio.is_empty()).then(|| bio.to_string()),
        avatar: optional_media(&form.avatar_url, &form.avatar_alt, String::new),
        banner: optional_media(&form.banner_url, &form.banner_alt, String::new),
        venue_manager: form.venue_manager,
    })
}

// ====================================
// VENUE CREATE / EDIT
// ====================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaSlot {
    pub url: String,
    pub alt: String,
}

/// Raw text inputs of the venue form
#[derive(Debug, Clone, PartialEq)]
pub struct VenueForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub max_guests: String,
    pub rating: String,
    pub media: [MediaSlot; MEDIA_SLOTS],
    pub meta: VenueMeta,
    pub address: String,
    pub city: String,
    pub zip: String,
    pub country: String,
    pub continent: String,
    pub lat: String,
    pub lng: String,
}

impl Default for VenueForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price: "100".into(),
            max_guests: "1".into(),
            rating: "0".into(),
            media: Default::default(),
            meta: VenueMeta::default(),
            address: String::new(),
            city: String::new(),
            zip: String::new(),
            country: String::new(),
            continent: String::new(),
            lat: "0".into(),
            lng: "0".into(),
        }
    }
}

impl VenueForm {
    /// Prefill from an existing venue for edit mode
    pub fn from_venue(venue: &Venue) -> Self {
        let mut media: [MediaSlot; MEDIA_SLOTS] = Default::default();
        for (slot, m) in media.iter_mut().zip(venue.media.iter()) {
            slot.url = m.url.clone();
            slot.alt = m.alt.clone();
        }
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        Self {
            name: venue.name.clone(),
            description: venue.description_text().to_string(),
            price: venue.price.to_string(),
            max_guests: venue.max_guests.to_string(),
            rating: venue.rating.to_string(),
            media,
            meta: venue.meta,
            address: text(&venue.location.address),
            city: text(&venue.location.city),
            zip: text(&venue.location.zip),
            country: text(&venue.location.country),
            continent: text(&venue.location.continent),
            lat: venue.location.lat.unwrap_or(0.0).to_string(),
            lng: venue.location.lng.unwrap_or(0.0).to_string(),
        }
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(0.0);
    }
    raw.parse::<f64>().ok().filter(|n| n.is_finite())
}

pub fn validate_venue(form: &VenueForm) -> Result<VenuePayload, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    let name = form.name.trim();

    if name.is_empty() {
        errors.push("name", "Name is required");
    }
    if form.description.trim().chars().count() < DESCRIPTION_MIN {
        errors.push("description", "Description must be at least 10 characters");
    }

    let price = parse_number(&form.price).unwrap_or(f64::NAN);
    if price.is_nan() || price < 1.0 {
        errors.push("price", "Price must be at least 1");
    }

    let max_guests = form.max_guests.trim().parse::<u32>().unwrap_or(0);
    if max_guests < 1 {
        errors.push("max_guests", "Maximum guests must be at least 1");
    }

    let rating = if form.rating.trim().is_empty() {
        None
    } else {
        match parse_number(&form.rating) {
            Some(r) if (0.0..=5.0).contains(&r) => Some(r),
            _ => {
                errors.push("rating", "Rating must be between 0 and 5");
                None
            }
        }
    };

    let mut media = Vec::new();
    for (i, slot) in form.media.iter().enumerate() {
        let (url_field, alt_field) = match i {
            0 => ("media_url_1", "media_alt_1"),
            1 => ("media_url_2", "media_alt_2"),
            _ => ("media_url_3", "media_alt_3"),
        };
        let url = format_unsplash_url(&slot.url);
        check_optional_url(&mut errors, url_field, &url);
        check_alt(&mut errors, alt_field, &slot.alt);
        if let Some(m) = optional_media(&url, &slot.alt, || name.to_string()) {
            media.push(m);
        }
    }

    let lat = parse_number(&form.lat);
    if lat.is_none() {
        errors.push("lat", "Latitude must be a number");
    }
    let lng = parse_number(&form.lng);
    if lng.is_none() {
        errors.push("lng", "Longitude must be a number");
    }

    let text = |v: &str| Some(v.trim().to_string());
    errors.finish(VenuePayload {
        name: name.to_string(),
        description: form.description.trim().to_string(),
        media,
        price,
        max_guests,
        rating,
        meta: form.meta,
        location: Location {
            address: text(&form.address),
            city: text(&form.city),
            zip: text(&form.zip),
            country: text(&form.country),
            continent: text(&form.continent),
            lat: Some(lat.unwrap_or(0.0)),
            lng: Some(lng.unwrap_or(0.0)),
        },
    })
}

// ====================================
// PROFILE IMAGES
// ====================================

#[derive(Debug, Clone, Default)]
pub struct ProfileImagesForm {
    pub avatar_url: String,
    pub avatar_alt: String,
    pub banner_url: String,
    pub banner_alt: String,
}

impl ProfileImagesForm {
    pub fn from_media(avatar: Option<&Media>, banner: Option<&Media>) -> Self {
        Self {
            avatar_url: avatar.map(|m| m.url.clone()).unwrap_or_default(),
            avatar_alt: avatar.map(|m| m.alt.clone()).unwrap_or_default(),
            banner_url: banner.map(|m| m.url.clone()).unwrap_or_default(),
            banner_alt: banner.map(|m| m.alt.clone()).unwrap_or_default(),
        }
    }
}

pub fn validate_profile_images(form: &ProfileImagesForm, user_name: &str) -> Result<ProfileMediaUpdate, ValidationErrors> {
    let mut errors = ValidationErrors::new();
    check_optional_url(&mut errors, "avatar_url", &form.avatar_url);
    check_alt(&mut errors, "avatar_alt", &form.avatar_alt);
    check_optional_url(&mut errors, "banner_url", &form.banner_url);
    check_alt(&mut errors, "banner_alt", &form.banner_alt);

    let update = ProfileMediaUpdate {
        avatar: optional_media(&form.avatar_url, &form.avatar_alt, || format!("{}'s avatar", user_name)),
        banner: optional_media(&form.banner_url, &form.banner_alt, || format!("{}'s banner", user_name)),
    };
    if update.is_empty() {
        errors.push("avatar_url", "Please provide at least one image URL");
    }

    errors.finish(update)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterForm {
        RegisterForm {
            name: "kari_nordmann".into(),
            email: "kari@stud.noroff.no".into(),
            password: "hunter22".into(),
            ..Default::default()
        }
    }

    fn valid_venue() -> VenueForm {
        VenueForm {
            name: "Fjord Cabin".into(),
            description: "Quiet cabin by the fjord".into(),
            price: "950".into(),
            max_guests: "4".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let errors = validate_login(&LoginForm::default()).unwrap_err();
        assert_eq!(errors.for_field("email"), Some("Email is required"));
        assert_eq!(errors.for_field("password"), Some("Password is required"));

        let ok = validate_login(&LoginForm { email: " a@b.no ".into(), password: "x".into() }).unwrap();
        assert_eq!(ok.email, "a@b.no");
    }

    #[test]
    fn test_register_accepts_valid_form() {
        let request = validate_register(&valid_register()).unwrap();
        assert_eq!(request.name, "kari_nordmann");
        assert!(request.bio.is_none());
        assert!(request.avatar.is_none());
    }

    #[test]
    fn test_register_rules() {
        let form = RegisterForm {
            name: "kari nordmann".into(),
            email: "kari@gmail.com".into(),
            password: "short".into(),
            bio: "x".repeat(161),
            avatar_url: "not a url".into(),
            banner_alt: "y".repeat(121),
            ..Default::default()
        };
        let errors = validate_register(&form).unwrap_err();
        assert_eq!(errors.for_field("name"), Some("Username can only contain letters, numbers, and underscores"));
        assert_eq!(errors.for_field("email"), Some("Must be a valid stud.noroff.no email address"));
        assert_eq!(errors.for_field("password"), Some("Password must be at least 8 characters"));
        assert_eq!(errors.for_field("bio"), Some("Bio must be less than 160 characters"));
        assert_eq!(errors.for_field("avatar_url"), Some("Must be a valid URL"));
        assert_eq!(errors.for_field("banner_alt"), Some("Alt text must be less than 120 characters"));
    }

    #[test]
    fn test_venue_minimums() {
        let form = VenueForm {
            name: "  ".into(),
            description: "too short".into(),
            price: "0".into(),
            max_guests: "0".into(),
            rating: "6".into(),
            ..Default::default()
        };
        let errors = validate_venue(&form).unwrap_err();
        assert_eq!(errors.for_field("name"), Some("Name is required"));
        assert_eq!(errors.for_field("description"), Some("Description must be at least 10 characters"));
        assert_eq!(errors.for_field("price"), Some("Price must be at least 1"));
        assert_eq!(errors.for_field("max_guests"), Some("Maximum guests must be at least 1"));
        assert_eq!(errors.for_field("rating"), Some("Rating must be between 0 and 5"));
    }

    #[test]
    fn test_venue_media_defaults_alt_to_name_and_skips_empty_slots() {
        let mut form = valid_venue();
        form.media[1] = MediaSlot { url: "https://images.unsplash.com/photo-123".into(), alt: String::new() };

        let payload = validate_venue(&form).unwrap();
        assert_eq!(payload.media.len(), 1);
        assert_eq!(payload.media[0].alt, "Fjord Cabin");
        assert_eq!(payload.media[0].url, format!("https://images.unsplash.com/photo-123?{}", UNSPLASH_PARAMS));
        assert_eq!(payload.location.lat, Some(0.0));
    }

    #[test]
    fn test_venue_rejects_non_numeric_coordinates() {
        let mut form = valid_venue();
        form.lat = "north".into();
        let errors = validate_venue(&form).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.for_field("lat"), Some("Latitude must be a number"));
    }

    #[test]
    fn test_venue_form_round_trips_existing_venue() {
        let payload = validate_venue(&valid_venue()).unwrap();
        let venue = Venue {
            name: payload.name.clone(),
            description: Some(payload.description.clone()),
            price: payload.price,
            max_guests: payload.max_guests,
            ..Default::default()
        };
        let form = VenueForm::from_venue(&venue);
        assert_eq!(form.price, "950");
        assert_eq!(form.max_guests, "4");
        assert!(validate_venue(&form).is_ok());
    }

    #[test]
    fn test_format_unsplash_url() {
        assert_eq!(format_unsplash_url(""), "");
        assert_eq!(
            format_unsplash_url("1629140727571-9b5c6f6267b4"),
            format!("https://images.unsplash.com/photo-1629140727571-9b5c6f6267b4?{}", UNSPLASH_PARAMS)
        );
        let full = format!("https://images.unsplash.com/photo-1?{}", UNSPLASH_PARAMS);
        assert_eq!(format_unsplash_url(&full), full);
        assert_eq!(format_unsplash_url("https://example.com/a.jpg"), "https://example.com/a.jpg");
        assert_eq!(format_unsplash_url("short"), "short");
    }

    #[test]
    fn test_profile_images_need_one_url() {
        let errors = validate_profile_images(&ProfileImagesForm::default(), "kari").unwrap_err();
        assert_eq!(errors.to_string(), "Please provide at least one image URL");

        let form = ProfileImagesForm { banner_url: "https://img.test/b.jpg".into(), ..Default::default() };
        let update = validate_profile_images(&form, "kari").unwrap();
        assert!(update.avatar.is_none());
        assert_eq!(update.banner.unwrap().alt, "kari's banner");
    }
}
