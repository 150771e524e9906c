//! Wire types for the venue booking API.
//!
//! All payloads cross the boundary as JSON with camelCase keys, wrapped in a
//! `{ data, meta }` envelope. Date fields are ISO-8601 date-times; overlap
//! math downstream consumes them at calendar-day granularity via the
//! `*_day()` helpers.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// An image with alt text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Media {
    /// Image URL.
    pub url: String,

    /// Alt text.
    #[serde(default)]
    pub alt: String,
}

/// Venue amenity flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueAmenities {
    /// Wi-Fi available.
    #[serde(default)]
    pub wifi: bool,

    /// Parking available.
    #[serde(default)]
    pub parking: bool,

    /// Breakfast included.
    #[serde(default)]
    pub breakfast: bool,

    /// Pets allowed.
    #[serde(default)]
    pub pets: bool,
}

/// Venue location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VenueLocation {
    /// Street address.
    #[serde(default)]
    pub address: String,

    /// City.
    #[serde(default)]
    pub city: String,

    /// Postal code.
    #[serde(default)]
    pub zip: String,

    /// Country.
    #[serde(default)]
    pub country: String,

    /// Continent.
    #[serde(default)]
    pub continent: String,

    /// Latitude.
    #[serde(default)]
    pub lat: f64,

    /// Longitude.
    #[serde(default)]
    pub lng: f64,
}

/// A booking embedded on a venue when `_bookings=true` is requested.
///
/// This list is the sole input to the availability check; only the date
/// window matters here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRef {
    /// Booking identifier.
    pub id: String,

    /// Check-in date-time (inclusive).
    pub date_from: DateTime<Utc>,

    /// Check-out date-time (inclusive).
    pub date_to: DateTime<Utc>,
}

impl BookingRef {
    /// Check-in date at calendar-day granularity.
    #[must_use]
    pub fn date_from_day(&self) -> NaiveDate {
        self.date_from.date_naive()
    }

    /// Check-out date at calendar-day granularity.
    #[must_use]
    pub fn date_to_day(&self) -> NaiveDate {
        self.date_to.date_naive()
    }
}

/// A bookable property listing.
///
/// Owned by the external API; the client holds an immutable, read-only
/// snapshot per view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    /// Venue identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Free-text description.
    #[serde(default)]
    pub description: String,

    /// Ordered media gallery.
    #[serde(default)]
    pub media: Vec<Media>,

    /// Nightly price (non-negative).
    pub price: f64,

    /// Maximum guest count (positive).
    pub max_guests: u32,

    /// Rating, 0-5 in half-star increments.
    #[serde(default)]
    pub rating: f64,

    /// Creation timestamp.
    pub created: DateTime<Utc>,

    /// Last update timestamp.
    pub updated: DateTime<Utc>,

    /// Amenity flags.
    #[serde(default)]
    pub meta: VenueAmenities,

    /// Location.
    #[serde(default)]
    pub location: VenueLocation,

    /// Embedded bookings; present only when requested with `_bookings=true`.
    #[serde(default)]
    pub bookings: Vec<BookingRef>,
}

/// A confirmed reservation, as returned by `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Booking identifier.
    pub id: String,

    /// Check-in date-time (inclusive).
    pub date_from: DateTime<Utc>,

    /// Check-out date-time (inclusive).
    pub date_to: DateTime<Utc>,

    /// Guest count.
    pub guests: u32,

    /// Creation timestamp.
    pub created: DateTime<Utc>,

    /// Last update timestamp.
    pub updated: DateTime<Utc>,

    /// The booked venue, when embedded.
    #[serde(default)]
    pub venue: Option<Venue>,
}

/// Request body for `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    /// Check-in date-time (ISO-8601).
    pub date_from: DateTime<Utc>,

    /// Check-out date-time (ISO-8601).
    pub date_to: DateTime<Utc>,

    /// Guest count.
    pub guests: u32,

    /// Venue to book.
    pub venue_id: String,
}

/// A booking as listed under `GET /profiles/{name}/bookings`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBooking {
    /// Booking identifier.
    pub id: String,

    /// Check-in date-time (inclusive).
    pub date_from: DateTime<Utc>,

    /// Check-out date-time (inclusive).
    pub date_to: DateTime<Utc>,

    /// Guest count.
    pub guests: u32,

    /// Creation timestamp.
    pub created: DateTime<Utc>,

    /// Last update timestamp.
    pub updated: DateTime<Utc>,

    /// The booked venue, when embedded with `_venue=true`.
    #[serde(default)]
    pub venue: Option<Venue>,
}

/// Pagination metadata on list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// Whether this is the first page.
    #[serde(default)]
    pub is_first_page: bool,

    /// Whether this is the last page.
    #[serde(default)]
    pub is_last_page: bool,

    /// Current page number (1-based).
    #[serde(default)]
    pub current_page: u32,

    /// Previous page number, if any.
    #[serde(default)]
    pub previous_page: Option<u32>,

    /// Next page number, if any.
    #[serde(default)]
    pub next_page: Option<u32>,

    /// Total page count.
    #[serde(default)]
    pub page_count: u32,

    /// Total item count.
    #[serde(default)]
    pub total_count: u32,
}

/// A page of items with its pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    /// Items on this page.
    pub data: Vec<T>,

    /// Pagination metadata.
    #[serde(default)]
    pub meta: PageMeta,
}

/// Profile plus bearer credential, as returned by the login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialedProfile {
    /// Profile name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Avatar image.
    #[serde(default)]
    pub avatar: Option<Media>,

    /// Banner image.
    #[serde(default)]
    pub banner: Option<Media>,

    /// Bearer token for authenticated requests.
    pub access_token: String,

    /// Whether this profile can manage venues.
    #[serde(default)]
    pub venue_manager: bool,
}

/// Single-item response envelope.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Envelope<T> {
    pub data: T,
}
