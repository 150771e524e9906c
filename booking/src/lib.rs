//! # Venuebook Booking
//!
//! The booking domain of the venuebook client: availability resolution,
//! calendar selection, and the submission flow, built as explicit state
//! machines over the venue booking API.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────┐
//! │ Venue Directory    │  venuebook-client (REST) / MockDirectory (tests)
//! └─────────┬──────────┘
//!           │ venue + embedded bookings
//!           ▼
//! ┌────────────────────┐     ┌────────────────────┐
//! │ Calendar Selection │────►│ Conflict Resolver  │
//! │ (CalendarReducer)  │     │ (availability)     │
//! └─────────┬──────────┘     └─────────┬──────────┘
//!           │ RangeSelected            │ verdict
//!           ▼                          ▼
//! ┌─────────────────────────────────────────────┐
//! │ Booking Submission Flow (BookingFlowReducer)│
//! │ check → confirm → submit → resync           │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! Data flows one direction: the directory supplies venue and booking
//! data, the calendar captures user intent, the resolver validates intent
//! against existing bookings, and the flow commits the validated intent
//! via the API and re-synchronizes from the authoritative source.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use venuebook_booking::prelude::*;
//! use venuebook_runtime::Store;
//!
//! let env = BookingEnvironment::new(
//!     VenueApiClient::from_env()?,
//!     Arc::new(SessionContext::new(store)),
//!     SystemClock,
//! );
//! let store = Store::new(VenueViewState::default(), venue_view_reducer(), env);
//!
//! store.send(VenueViewAction::ViewOpened { venue_id }).await?;
//! ```

pub mod actions;
pub mod availability;
pub mod environment;
pub mod error;
pub mod mocks;
pub mod reducers;
pub mod session;
pub mod state;

pub use actions::{DirectoryAction, SessionAction, TripsAction, VenueViewAction};
pub use availability::is_available;
pub use environment::{BookingEnvironment, VenueDirectory};
pub use error::{BookingError, ValidationError};
pub use reducers::{
    BookingFlowReducer, CalendarReducer, DirectoryReducer, SessionReducer, TripsReducer,
    venue_view_reducer,
};
pub use session::{CredentialStore, Session, SessionContext, StoredProfile};
pub use state::{
    AvailabilityVerdict, DateRange, DirectoryState, FlowStatus, Notice, NoticeKind,
    PendingBooking, PickerKind, SearchQuery, Selection, SessionFlowState, TripsState,
    VenueViewState,
};

/// Convenience re-exports for wiring a client shell.
pub mod prelude {
    pub use crate::actions::{DirectoryAction, SessionAction, TripsAction, VenueViewAction};
    pub use crate::environment::{BookingEnvironment, VenueDirectory};
    pub use crate::error::{BookingError, ValidationError};
    pub use crate::reducers::venue_view_reducer;
    pub use crate::session::{CredentialStore, Session, SessionContext};
    pub use crate::state::{DateRange, Selection, VenueViewState};
    pub use venuebook_client::VenueApiClient;
    pub use venuebook_core::environment::SystemClock;
}
