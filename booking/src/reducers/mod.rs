//! Booking reducers.
//!
//! Each reducer owns one concern; the venue view combines the calendar
//! reducer and the submission-flow reducer over a single state and action
//! type.

pub mod calendar;
pub mod directory;
pub mod flow;
pub mod login;
pub mod trips;

pub use calendar::CalendarReducer;
pub use directory::DirectoryReducer;
pub use flow::BookingFlowReducer;
pub use login::SessionReducer;
pub use trips::TripsReducer;

use venuebook_core::Clock;
use venuebook_core::composition::{CombinedReducer, combine_reducers};

use crate::actions::VenueViewAction;
use crate::environment::{BookingEnvironment, VenueDirectory};
use crate::session::CredentialStore;
use crate::state::VenueViewState;

/// The full single-venue view reducer: calendar selection plus the booking
/// submission flow, run in sequence over the shared view state.
#[must_use]
pub fn venue_view_reducer<D, S, C>()
-> CombinedReducer<VenueViewState, VenueViewAction, BookingEnvironment<D, S, C>>
where
    D: VenueDirectory + Clone + 'static,
    S: CredentialStore + 'static,
    C: Clock + Clone + 'static,
{
    combine_reducers(vec![
        Box::new(CalendarReducer::new()),
        Box::new(BookingFlowReducer::new()),
    ])
}
