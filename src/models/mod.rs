// Data models for Holidaze API entities

pub mod venue;
pub mod booking;
pub mod profile;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use venue::{Location, Media, Venue, VenueMeta};
pub use booking::Booking;
pub use profile::{AuthUser, CachedUser, Profile, ProfileSummary};
pub use requests::{BookingRequest, LoginRequest, ProfileMediaUpdate, RegisterRequest, VenuePayload};
pub use responses::{ApiResponse, ErrorBody, PageMeta, Paged};
