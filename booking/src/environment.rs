//! Booking environment.
//!
//! All external dependencies used by the booking reducers sit behind
//! traits and are injected via the environment: the venue directory (the
//! external REST API), the session context, and the clock. Reducers depend
//! on the traits; the runtime provides [`venuebook_client::VenueApiClient`]
//! in production and in-memory mocks in tests.

use std::future::Future;
use std::sync::Arc;

use chrono::NaiveDate;
use venuebook_client::{
    ApiError, Booking, BookingRequest, CredentialedProfile, Paged, ProfileBooking, VenueApiClient,
    Venue,
};
use venuebook_core::environment::Clock;

use crate::session::{CredentialStore, SessionContext};

/// The venue directory - the external API that owns all persistence.
///
/// Mirrors the endpoints of the REST API one-to-one. Authenticated
/// operations take the bearer token explicitly; the session context decides
/// whether one exists.
pub trait VenueDirectory: Send + Sync {
    /// Fetch a page of venues.
    fn list_venues(
        &self,
        page: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Paged<Venue>, ApiError>> + Send;

    /// Fetch a single venue, optionally with its embedded booking list.
    fn get_venue(
        &self,
        id: &str,
        include_bookings: bool,
    ) -> impl Future<Output = Result<Venue, ApiError>> + Send;

    /// Search venues by free text and optional date window.
    fn search_venues(
        &self,
        query: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> impl Future<Output = Result<Vec<Venue>, ApiError>> + Send;

    /// Create a booking.
    fn create_booking(
        &self,
        access_token: &str,
        booking: &BookingRequest,
    ) -> impl Future<Output = Result<Booking, ApiError>> + Send;

    /// Fetch the bookings made by a profile.
    fn bookings_by_profile(
        &self,
        access_token: &str,
        profile_name: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> impl Future<Output = Result<Paged<ProfileBooking>, ApiError>> + Send;

    /// Cancel a booking.
    fn delete_booking(
        &self,
        access_token: &str,
        id: &str,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Log in and obtain a bearer credential.
    fn login(
        &self,
        email: &str,
        password: &str,
    ) -> impl Future<Output = Result<CredentialedProfile, ApiError>> + Send;
}

impl VenueDirectory for VenueApiClient {
    async fn list_venues(&self, page: u32, limit: u32) -> Result<Paged<Venue>, ApiError> {
        Self::list_venues(self, page, limit).await
    }

    async fn get_venue(&self, id: &str, include_bookings: bool) -> Result<Venue, ApiError> {
        Self::get_venue(self, id, include_bookings).await
    }

    async fn search_venues(
        &self,
        query: &str,
        date_from: Option<NaiveDate>,
        date_to: Option<NaiveDate>,
    ) -> Result<Vec<Venue>, ApiError> {
        Self::search_venues(self, query, date_from, date_to).await
    }

    async fn create_booking(
        &self,
        access_token: &str,
        booking: &BookingRequest,
    ) -> Result<Booking, ApiError> {
        Self::create_booking(self, access_token, booking).await
    }

    async fn bookings_by_profile(
        &self,
        access_token: &str,
        profile_name: &str,
        page: Option<u32>,
        limit: Option<u32>,
    ) -> Result<Paged<ProfileBooking>, ApiError> {
        Self::bookings_by_profile(self, access_token, profile_name, page, limit).await
    }

    async fn delete_booking(&self, access_token: &str, id: &str) -> Result<(), ApiError> {
        Self::delete_booking(self, access_token, id).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<CredentialedProfile, ApiError> {
        Self::login(self, email, password).await
    }
}

/// Booking environment.
///
/// Contains all external dependencies needed by the booking reducers.
///
/// # Type Parameters
///
/// - `D`: Venue directory (the external API)
/// - `S`: Credential store backing the session context
/// - `C`: Clock
pub struct BookingEnvironment<D, S, C>
where
    D: VenueDirectory + Clone,
    S: CredentialStore,
    C: Clock + Clone,
{
    /// The external venue API.
    pub directory: D,

    /// Process-wide session context (single-writer, many-reader).
    pub session: Arc<SessionContext<S>>,

    /// Clock for "no past check-ins" gating.
    pub clock: C,
}

// Manual Clone: the session context is shared by Arc, so the credential
// store type itself does not need to be Clone.
impl<D, S, C> Clone for BookingEnvironment<D, S, C>
where
    D: VenueDirectory + Clone,
    S: CredentialStore,
    C: Clock + Clone,
{
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            session: Arc::clone(&self.session),
            clock: self.clock.clone(),
        }
    }
}

impl<D, S, C> BookingEnvironment<D, S, C>
where
    D: VenueDirectory + Clone,
    S: CredentialStore,
    C: Clock + Clone,
{
    /// Create a new booking environment.
    #[must_use]
    pub const fn new(directory: D, session: Arc<SessionContext<S>>, clock: C) -> Self {
        Self {
            directory,
            session,
            clock,
        }
    }
}
