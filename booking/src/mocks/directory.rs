//! Scripted in-memory venue directory.
//!
//! Behaves like a tiny copy of the real API: created bookings land on the
//! venue's embedded booking list, so a refetch after submission observes
//! them the way it would observe concurrent bookings in production.
//! Failures and latency are injectable per operation for exercising error
//! paths, double-submit dedupe, and late-response cancellation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use venuebook_client::{
    ApiError, Booking, BookingRef, BookingRequest, CredentialedProfile, PageMeta, Paged,
    ProfileBooking, Venue, VenueAmenities, VenueLocation,
};

use crate::environment::VenueDirectory;

#[derive(Debug, Default)]
struct MockDirectoryState {
    venues: HashMap<String, Venue>,
    profile_bookings: Vec<ProfileBooking>,
    accounts: HashMap<String, (String, CredentialedProfile)>,
    next_booking_seq: u32,
    fail_next_create: Option<ApiError>,
    fail_next_get_venue: Option<ApiError>,
    latency: Duration,
    get_venue_calls: u32,
    create_booking_calls: u32,
    delete_booking_calls: u32,
}

/// Scripted in-memory venue directory.
///
/// Clones share the same underlying state.
#[derive(Debug, Clone, Default)]
pub struct MockDirectory {
    inner: Arc<Mutex<MockDirectoryState>>,
}

impl MockDirectory {
    /// Create an empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockDirectoryState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert a venue.
    pub fn insert_venue(&self, venue: Venue) {
        self.state().venues.insert(venue.id.clone(), venue);
    }

    /// Seed the bookings returned for any profile.
    pub fn seed_profile_bookings(&self, bookings: Vec<ProfileBooking>) {
        self.state().profile_bookings = bookings;
    }

    /// Register an account accepted by the login endpoint.
    pub fn register_account(&self, email: &str, password: &str, profile: CredentialedProfile) {
        self.state()
            .accounts
            .insert(email.to_string(), (password.to_string(), profile));
    }

    /// Fail the next `create_booking` call with the given error.
    pub fn fail_next_create(&self, error: ApiError) {
        self.state().fail_next_create = Some(error);
    }

    /// Fail the next `get_venue` call with the given error.
    pub fn fail_next_get_venue(&self, error: ApiError) {
        self.state().fail_next_get_venue = Some(error);
    }

    /// Delay every operation by `latency`, for in-flight interleaving tests.
    pub fn set_latency(&self, latency: Duration) {
        self.state().latency = latency;
    }

    /// Number of `get_venue` calls so far.
    #[must_use]
    pub fn get_venue_calls(&self) -> u32 {
        self.state().get_venue_calls
    }

    /// Number of `create_booking` calls so far.
    #[must_use]
    pub fn create_booking_calls(&self) -> u32 {
        self.state().create_booking_calls
    }

    /// Number of `delete_booking` calls so far.
    #[must_use]
    pub fn delete_booking_calls(&self) -> u32 {
        self.state().delete_booking_calls
    }

    fn latency(&self) -> Duration {
        self.state().latency
    }

    async fn simulate_latency(&self) {
        let latency = self.latency();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn fixture_timestamp() -> DateTime<Utc> {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
            .unwrap_or_default()
    }

    fn wire_datetime(day: NaiveDate) -> DateTime<Utc> {
        day.and_time(NaiveTime::MIN).and_utc()
    }

    /// A venue fixture with the given booked windows (`from`/`to` ISO days).
    ///
    /// # Panics
    ///
    /// Panics on malformed fixture dates.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn venue_fixture(id: &str, booked: &[(&str, &str)]) -> Venue {
        let bookings = booked
            .iter()
            .enumerate()
            .map(|(index, (from, to))| BookingRef {
                id: format!("{id}-booking-{index}"),
                date_from: Self::wire_datetime(
                    from.parse().expect("fixture date should be valid"),
                ),
                date_to: Self::wire_datetime(to.parse().expect("fixture date should be valid")),
            })
            .collect();

        Venue {
            id: id.to_string(),
            name: "Harbor Loft".to_string(),
            description: "A loft by the harbor".to_string(),
            media: vec![],
            price: 120.0,
            max_guests: 4,
            rating: 4.5,
            created: Self::fixture_timestamp(),
            updated: Self::fixture_timestamp(),
            meta: VenueAmenities {
                wifi: true,
                ..VenueAmenities::default()
            },
            location: VenueLocation::default(),
            bookings,
        }
    }

    /// A profile booking fixture.
    #[must_use]
    pub fn profile_booking_fixture(id: &str) -> ProfileBooking {
        ProfileBooking {
            id: id.to_string(),
            date_from: Self::fixture_timestamp(),
            date_to: Self::fixture_timestamp(),
            guests: 2,
            created: Self::fixture_timestamp(),
            updated: Self::fixture_timestamp(),
            venue: None,
        }
    }
}

impl VenueDirectory for MockDirectory {
    async fn list_venues(&self, page: u32, limit: u32) -> Result<Paged<Venue>, ApiError> {
        self.simulate_latency().await;

        let page = page.max(1);
        let limit = limit.max(1);
        let state = self.state();
        let mut venues: Vec<_> = state.venues.values().cloned().collect();
        venues.sort_by(|a, b| a.id.cmp(&b.id));

        let total = u32::try_from(venues.len()).unwrap_or(u32::MAX);
        let page_count = total.div_ceil(limit).max(1);
        let start = ((page - 1) * limit) as usize;
        let data: Vec<_> = venues.into_iter().skip(start).take(limit as usize).collect();

        Ok(Paged {
            data,
            meta: PageMeta {
                is_first_page: page == 1,
                is_last_page: page >= page_count,
                current_page: page,
                previous_page: (page > 1).then(|| page - 1),
                next_page: (page < page_count).then(|| page + 1),
                page_count,
                total_count: total,
            },
        })
    }

    async fn get_venue(&self, id: &str, include_bookings: bool) -> Result<Venue, ApiError> {
        self.simulate_latency().await;

        let mut state = self.state();
        state.get_venue_calls += 1;

        if let Some(error) = state.fail_next_get_venue.take() {
            return Err(error);
        }

        let mut venue = state
            .venues
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::Api {
                status: 404,
                message: "Venue not found".to_string(),
            })?;

        if !include_bookings {
            venue.bookings.clear();
        }
        Ok(venue)
    }

    async fn search_venues(
        &self,
        query: &str,
        _date_from: Option<NaiveDate>,
        _date_to: Option<NaiveDate>,
    ) -> Result<Vec<Venue>, ApiError> {
        self.simulate_latency().await;

        let needle = query.to_lowercase();
        let state = self.state();
        let mut matches: Vec<_> = state
            .venues
            .values()
            .filter(|venue| {
                venue.name.to_lowercase().contains(&needle)
                    || venue.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        matches.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(matches)
    }

    async fn create_booking(
        &self,
        access_token: &str,
        booking: &BookingRequest,
    ) -> Result<Booking, ApiError> {
        self.simulate_latency().await;

        let mut state = self.state();
        state.create_booking_calls += 1;

        if access_token.is_empty() {
            return Err(ApiError::Unauthorized);
        }
        if let Some(error) = state.fail_next_create.take() {
            return Err(error);
        }

        state.next_booking_seq += 1;
        let id = format!("b-{}", state.next_booking_seq);

        // Land the booking on the venue, like the real API would
        if let Some(venue) = state.venues.get_mut(&booking.venue_id) {
            venue.bookings.push(BookingRef {
                id: id.clone(),
                date_from: booking.date_from,
                date_to: booking.date_to,
            });
        }

        Ok(Booking {
            id,
            date_from: booking.date_from,
            date_to: booking.date_to,
            guests: booking.guests,
            created: Self::fixture_timestamp(),
            updated: Self::fixture_timestamp(),
            venue: None,
        })
    }

    async fn bookings_by_profile(
        &self,
        access_token: &str,
        _profile_name: &str,
        _page: Option<u32>,
        _limit: Option<u32>,
    ) -> Result<Paged<ProfileBooking>, ApiError> {
        self.simulate_latency().await;

        if access_token.is_empty() {
            return Err(ApiError::Unauthorized);
        }

        let state = self.state();
        let data = state.profile_bookings.clone();
        let total = u32::try_from(data.len()).unwrap_or(u32::MAX);
        Ok(Paged {
            data,
            meta: PageMeta {
                is_first_page: true,
                is_last_page: true,
                current_page: 1,
                previous_page: None,
                next_page: None,
                page_count: 1,
                total_count: total,
            },
        })
    }

    async fn delete_booking(&self, access_token: &str, id: &str) -> Result<(), ApiError> {
        self.simulate_latency().await;

        let mut state = self.state();
        state.delete_booking_calls += 1;

        if access_token.is_empty() {
            return Err(ApiError::Unauthorized);
        }

        let before = state.profile_bookings.len();
        state.profile_bookings.retain(|booking| booking.id != id);
        if state.profile_bookings.len() == before {
            return Err(ApiError::Api {
                status: 404,
                message: "Booking not found".to_string(),
            });
        }
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<CredentialedProfile, ApiError> {
        self.simulate_latency().await;

        let state = self.state();
        match state.accounts.get(email) {
            Some((expected, profile)) if expected == password => Ok(profile.clone()),
            _ => Err(ApiError::Unauthorized),
        }
    }
}
