//! # Venue Booking API Client
//!
//! Rust client library for the external venue booking REST API: paginated
//! venue listings, single-venue detail with embedded bookings, free-text /
//! date-range search, booking creation and cancellation, and the login
//! endpoint that issues the bearer credential.
//!
//! The API owns all persistence and business logic; this crate owns nothing
//! but the wire types, the endpoints, and the error mapping.
//!
//! ## Example
//!
//! ```no_run
//! use venuebook_client::{ApiConfig, VenueApiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create client from VENUEBOOK_API_BASE_URL / VENUEBOOK_API_KEY
//!     let client = VenueApiClient::from_env()?;
//!
//!     let page = client.list_venues(1, 20).await?;
//!     println!("{} venues on page 1", page.data.len());
//!
//!     let venue = client.get_venue(&page.data[0].id, true).await?;
//!     println!("{} has {} bookings", venue.name, venue.bookings.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod types;

// Re-export main types for convenience
pub use client::VenueApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use types::{
    Booking, BookingRef, BookingRequest, CredentialedProfile, Media, PageMeta, Paged,
    ProfileBooking, Venue, VenueAmenities, VenueLocation,
};
