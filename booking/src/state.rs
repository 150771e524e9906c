//! Booking domain state types.
//!
//! All types are `Clone` to support the functional architecture pattern.
//! The venue view owns one [`VenueViewState`] for its lifetime; nothing here
//! is shared across views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use venuebook_client::Venue;

use crate::error::ValidationError;

// ═══════════════════════════════════════════════════════════════════════
// Date ranges
// ═══════════════════════════════════════════════════════════════════════

/// An inclusive calendar-day range with `from ≤ to`.
///
/// Both endpoints are stay days: a booking from the 10th to the 15th
/// occupies the 10th and the 15th. The constructor enforces ordering, so a
/// value of this type is always well-formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    from: NaiveDate,
    to: NaiveDate,
}

impl DateRange {
    /// Create a range, rejecting out-of-order endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::OutOfOrderRange`] if `to < from`.
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, ValidationError> {
        if to < from {
            return Err(ValidationError::OutOfOrderRange);
        }
        Ok(Self { from, to })
    }

    /// A range covering exactly one day.
    #[must_use]
    pub const fn single_day(day: NaiveDate) -> Self {
        Self { from: day, to: day }
    }

    /// First day of the range (inclusive).
    #[must_use]
    pub const fn from(&self) -> NaiveDate {
        self.from
    }

    /// Last day of the range (inclusive).
    #[must_use]
    pub const fn to(&self) -> NaiveDate {
        self.to
    }

    /// Whether `day` falls within the range, boundaries included.
    #[must_use]
    pub fn contains_day(&self, day: NaiveDate) -> bool {
        self.from <= day && day <= self.to
    }

    /// Every calendar day in the range, in order, boundaries included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + use<> {
        let to = self.to;
        self.from.iter_days().take_while(move |day| *day <= to)
    }

    /// Number of nights between check-in and check-out.
    ///
    /// A single-day range is zero nights.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.to - self.from).num_days()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Calendar selection
// ═══════════════════════════════════════════════════════════════════════

/// The calendar selection state machine.
///
/// `Empty → FromSelected → RangeSelected`, with rejected transitions
/// leaving the current state untouched. The orthogonal availability flag
/// lives in [`VenueViewState::verdict`] and resets on any transition that
/// changes a date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// No dates picked.
    #[default]
    Empty,

    /// Check-in picked, check-out pending.
    FromSelected {
        /// Check-in date.
        from: NaiveDate,
    },

    /// Both dates picked; `from ≤ to` holds by construction.
    RangeSelected {
        /// Check-in date.
        from: NaiveDate,
        /// Check-out date.
        to: NaiveDate,
    },
}

impl Selection {
    /// The picked check-in date, if any.
    #[must_use]
    pub const fn from_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Empty => None,
            Self::FromSelected { from } | Self::RangeSelected { from, .. } => Some(*from),
        }
    }

    /// The picked check-out date, if any.
    #[must_use]
    pub const fn to_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Empty | Self::FromSelected { .. } => None,
            Self::RangeSelected { to, .. } => Some(*to),
        }
    }

    /// The full range, once both dates are picked.
    #[must_use]
    pub fn range(&self) -> Option<DateRange> {
        match self {
            Self::RangeSelected { from, to } => DateRange::new(*from, *to).ok(),
            _ => None,
        }
    }
}

/// Which calendar popover is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickerKind {
    /// The check-in calendar.
    CheckIn,
    /// The check-out calendar.
    CheckOut,
}

// ═══════════════════════════════════════════════════════════════════════
// Availability
// ═══════════════════════════════════════════════════════════════════════

/// The outcome of an availability check.
///
/// Derived, never stored beyond the view: any selection change invalidates
/// it, and submission re-validates instead of trusting it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityVerdict {
    /// The range that was checked.
    pub range: DateRange,

    /// Whether the range was free of conflicts at check time.
    pub available: bool,
}

// ═══════════════════════════════════════════════════════════════════════
// Submission flow
// ═══════════════════════════════════════════════════════════════════════

/// Where the submission flow currently is.
///
/// Anything other than `Idle` means a network step is outstanding and the
/// submit action must be rejected - this is what makes duplicate bookings
/// from rapid double-clicks impossible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlowStatus {
    /// No submission in flight.
    #[default]
    Idle,

    /// The create-booking request is outstanding.
    Submitting,

    /// The booking was accepted; the authoritative booking set is being
    /// refetched.
    Refreshing,
}

/// A booking intent preserved across a forced login redirect.
///
/// When submission fails with no session, the intent is parked here so the
/// shell can send the user to the login entry point and resume afterwards
/// without the user re-entering dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingBooking {
    /// Token identifying this pending intent.
    pub id: uuid::Uuid,

    /// The venue the intent targets.
    pub venue_id: String,

    /// The selected stay.
    pub range: DateRange,

    /// The selected guest count.
    pub guests: u32,
}

// ═══════════════════════════════════════════════════════════════════════
// User-facing notices
// ═══════════════════════════════════════════════════════════════════════

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    /// Confirmation of a completed operation.
    Success,
    /// A rejected input or failed operation.
    Error,
}

/// A message surfaced to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// Severity.
    pub kind: NoticeKind,

    /// Human-readable message.
    pub message: String,
}

impl Notice {
    /// A success notice.
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    /// An error notice.
    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Venue view state
// ═══════════════════════════════════════════════════════════════════════

/// Root state for the single-venue view.
///
/// Owns the venue snapshot, the calendar selection, the availability
/// verdict, and the submission flow status. Discarded wholesale when the
/// user navigates away.
#[derive(Debug, Clone, Default)]
pub struct VenueViewState {
    /// The venue this view shows.
    pub venue_id: String,

    /// Immutable snapshot of the venue, once loaded.
    pub venue: Option<Venue>,

    /// The venue's existing bookings at calendar-day granularity.
    ///
    /// Derived from the snapshot's embedded booking list; the sole input to
    /// availability checks. Replaced wholesale on every refetch, never
    /// mutated locally.
    pub booked: Vec<DateRange>,

    /// Whether the initial venue load is outstanding.
    pub loading: bool,

    /// Calendar selection.
    pub selection: Selection,

    /// Which calendar popover is open, if any.
    pub open_picker: Option<PickerKind>,

    /// Availability verdict for the current selection, if checked.
    pub verdict: Option<AvailabilityVerdict>,

    /// Guest count entered by the user.
    pub guests: u32,

    /// Submission flow status.
    pub status: FlowStatus,

    /// Booking intent parked across a login redirect.
    pub pending: Option<PendingBooking>,

    /// Current user-facing notice.
    pub notice: Option<Notice>,

    /// View instance generation.
    ///
    /// Bumped on every open/close; effect completions carry the generation
    /// they were spawned under and are dropped when it no longer matches,
    /// so a late response can never mutate a discarded view.
    pub generation: u64,
}

impl VenueViewState {
    /// Fresh state for a venue view about to open.
    #[must_use]
    pub fn new(venue_id: impl Into<String>) -> Self {
        Self {
            venue_id: venue_id.into(),
            guests: 1,
            ..Self::default()
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// Directory browsing state
// ═══════════════════════════════════════════════════════════════════════

/// An active free-text search with its optional date window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Free-text query.
    pub query: String,

    /// Earliest acceptable check-in.
    pub date_from: Option<NaiveDate>,

    /// Latest acceptable check-out.
    pub date_to: Option<NaiveDate>,
}

/// State for the venue directory: the paginated listing and search results.
#[derive(Debug, Clone, Default)]
pub struct DirectoryState {
    /// Venues currently shown (a listing page, or search results).
    pub venues: Vec<venuebook_client::Venue>,

    /// Current page of the listing (1-based).
    pub page: u32,

    /// Total page count reported by the API.
    pub page_count: u32,

    /// The active search, if the view shows search results.
    pub search: Option<SearchQuery>,

    /// Whether a fetch is outstanding.
    pub loading: bool,

    /// Current user-facing notice.
    pub notice: Option<Notice>,

    /// View instance generation (same discipline as the venue view).
    pub generation: u64,
}

/// Items shown per listing page, matching the original directory view.
pub const DIRECTORY_PAGE_SIZE: u32 = 20;

// ═══════════════════════════════════════════════════════════════════════
// Trips state
// ═══════════════════════════════════════════════════════════════════════

/// State for the signed-in user's trips view.
#[derive(Debug, Clone, Default)]
pub struct TripsState {
    /// The user's bookings, newest first as returned by the API.
    pub bookings: Vec<venuebook_client::ProfileBooking>,

    /// Whether a fetch is outstanding.
    pub loading: bool,

    /// Booking currently being cancelled, if any.
    pub cancelling: Option<String>,

    /// Current user-facing notice.
    pub notice: Option<Notice>,

    /// View instance generation.
    pub generation: u64,
}

// ═══════════════════════════════════════════════════════════════════════
// Session flow state
// ═══════════════════════════════════════════════════════════════════════

/// State for the login form.
#[derive(Debug, Clone, Default)]
pub struct SessionFlowState {
    /// Whether a login request is outstanding.
    pub logging_in: bool,

    /// Name of the signed-in profile, mirrored from the session context.
    pub profile_name: Option<String>,

    /// Current user-facing notice.
    pub notice: Option<Notice>,
}
