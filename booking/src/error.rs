//! Error types for booking operations.

use thiserror::Error;
use venuebook_client::ApiError;

/// Client-side input rejections.
///
/// These are caught before any network call and surfaced inline; they never
/// reach the API.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Check-out precedes check-in.
    #[error("Check-out date cannot be before check-in date")]
    OutOfOrderRange,

    /// Check-out picked with no check-in.
    #[error("Select a check-in date first")]
    MissingCheckIn,

    /// A check-in date in the past.
    #[error("Check-in date cannot be in the past")]
    CheckInInPast,

    /// An operation needing a full range ran without one.
    #[error("Select both check-in and check-out dates")]
    IncompleteSelection,

    /// Submission attempted without a completed availability check.
    #[error("Check availability before booking")]
    NotChecked,

    /// Guest count outside `1..=max_guests`.
    #[error("Guest count must be between 1 and {max}")]
    GuestsOutOfBounds {
        /// The venue's maximum guest count.
        max: u32,
    },

    /// The venue snapshot has not loaded yet.
    #[error("Venue details have not loaded yet")]
    VenueNotLoaded,
}

/// Comprehensive error taxonomy for the booking flow.
///
/// Every failure is converted to a discriminated result at the boundary of
/// the submission flow; nothing propagates as a panic into the shell.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum BookingError {
    /// Invalid input, rejected locally.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No valid session credential at submission time.
    #[error("You must be signed in to book")]
    Unauthenticated,

    /// The requested stay overlaps an existing booking.
    #[error("The selected dates overlap an existing booking")]
    Conflict,

    /// The API rejected the request or the transport failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl BookingError {
    /// Returns `true` if this error is due to user input and can be fixed by
    /// picking different values.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Conflict)
    }

    /// Returns `true` if the shell should route the user to the login entry
    /// point.
    #[must_use]
    pub const fn needs_login(&self) -> bool {
        matches!(self, Self::Unauthenticated | Self::Api(ApiError::Unauthorized))
    }
}
