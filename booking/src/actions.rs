//! Actions for the booking reducers.
//!
//! Actions unify user intent (date picks, submit requests) and effect
//! results (loaded data, API failures). Effect results carry the view
//! generation they were spawned under; reducers drop completions whose
//! generation no longer matches, so late responses cannot mutate a
//! discarded view.

use chrono::NaiveDate;
use venuebook_client::{Paged, ProfileBooking, Venue};

use crate::error::BookingError;
use crate::state::PickerKind;

/// Actions for the single-venue view.
#[derive(Debug, Clone)]
pub enum VenueViewAction {
    // ═══════════════════════════════════════════════════════════════
    // View lifecycle
    // ═══════════════════════════════════════════════════════════════
    /// The view mounted for a venue.
    ViewOpened {
        /// Venue to show.
        venue_id: String,
    },

    /// The venue snapshot (with embedded bookings) arrived.
    VenueLoaded {
        /// Generation the load was spawned under.
        generation: u64,
        /// The authoritative snapshot.
        venue: Box<Venue>,
    },

    /// The venue snapshot could not be fetched.
    VenueLoadFailed {
        /// Generation the load was spawned under.
        generation: u64,
        /// What went wrong.
        error: BookingError,
    },

    /// The user navigated away; the view state is discarded.
    ViewClosed,

    // ═══════════════════════════════════════════════════════════════
    // Calendar selection
    // ═══════════════════════════════════════════════════════════════
    /// A calendar popover was toggled open or closed.
    PickerToggled {
        /// Which popover.
        picker: PickerKind,
    },

    /// The user picked a check-in date.
    CheckInPicked {
        /// Picked date.
        date: NaiveDate,
    },

    /// The user picked a check-out date.
    CheckOutPicked {
        /// Picked date.
        date: NaiveDate,
    },

    /// The user changed the guest count.
    GuestsChanged {
        /// New guest count.
        guests: u32,
    },

    /// The user asked whether the selected range is available.
    CheckAvailability,

    // ═══════════════════════════════════════════════════════════════
    // Submission flow
    // ═══════════════════════════════════════════════════════════════
    /// The user confirmed the booking.
    SubmitBooking,

    /// The API accepted the booking.
    BookingAccepted {
        /// Generation the submission was spawned under.
        generation: u64,
        /// Identifier of the created booking.
        booking_id: String,
    },

    /// The booking was rejected (validation, conflict, auth, or API).
    BookingRejected {
        /// Generation the submission was spawned under.
        generation: u64,
        /// What went wrong.
        error: BookingError,
    },

    /// The post-submission refetch of the booking set arrived.
    BookingsRefreshed {
        /// Generation the refetch was spawned under.
        generation: u64,
        /// The refreshed snapshot.
        venue: Box<Venue>,
    },

    /// The post-submission refetch failed (the booking itself succeeded).
    RefreshFailed {
        /// Generation the refetch was spawned under.
        generation: u64,
        /// What went wrong.
        error: BookingError,
    },
}

/// Actions for the venue directory (listing and search).
#[derive(Debug, Clone)]
pub enum DirectoryAction {
    /// A page of the venue list was requested.
    PageRequested {
        /// 1-based page number.
        page: u32,
    },

    /// The requested page arrived.
    PageLoaded {
        /// Generation the load was spawned under.
        generation: u64,
        /// The page of venues with pagination metadata.
        page: Box<Paged<Venue>>,
    },

    /// The page could not be fetched.
    PageLoadFailed {
        /// Generation the load was spawned under.
        generation: u64,
        /// What went wrong.
        error: BookingError,
    },

    /// A free-text search (with optional date window) was submitted.
    SearchSubmitted {
        /// Free-text query.
        query: String,
        /// Earliest acceptable check-in.
        date_from: Option<NaiveDate>,
        /// Latest acceptable check-out.
        date_to: Option<NaiveDate>,
    },

    /// Search results arrived.
    SearchLoaded {
        /// Generation the search was spawned under.
        generation: u64,
        /// Matching venues.
        venues: Vec<Venue>,
    },

    /// The search failed.
    SearchFailed {
        /// Generation the search was spawned under.
        generation: u64,
        /// What went wrong.
        error: BookingError,
    },

    /// The search was cleared, returning to the paginated listing.
    SearchCleared,
}

/// Actions for the signed-in user's trips view.
#[derive(Debug, Clone)]
pub enum TripsAction {
    /// The trips view mounted.
    Opened,

    /// The user's bookings arrived.
    Loaded {
        /// Generation the load was spawned under.
        generation: u64,
        /// The user's bookings.
        bookings: Vec<ProfileBooking>,
    },

    /// The bookings could not be fetched.
    LoadFailed {
        /// Generation the load was spawned under.
        generation: u64,
        /// What went wrong.
        error: BookingError,
    },

    /// The user asked to cancel a booking.
    CancelRequested {
        /// Booking to cancel.
        booking_id: String,
    },

    /// The API confirmed the cancellation; a refetch follows.
    Cancelled {
        /// Generation the cancellation was spawned under.
        generation: u64,
        /// The cancelled booking.
        booking_id: String,
    },

    /// The cancellation failed; the list is retained.
    CancelFailed {
        /// Generation the cancellation was spawned under.
        generation: u64,
        /// What went wrong.
        error: BookingError,
    },
}

/// Actions for the login/logout flow.
#[derive(Debug, Clone)]
pub enum SessionAction {
    /// The user submitted the login form.
    LoginSubmitted {
        /// Email address.
        email: String,
        /// Password.
        password: String,
    },

    /// Login succeeded; the session context now holds the credential.
    LoginSucceeded {
        /// Name of the signed-in profile.
        profile_name: String,
    },

    /// Login failed.
    LoginFailed {
        /// What went wrong.
        error: BookingError,
    },

    /// The user signed out.
    LogoutRequested,
}
