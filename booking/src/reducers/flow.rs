//! Booking submission flow reducer.
//!
//! Sequences the user-visible booking lifecycle for the venue view:
//! load → select → check → confirm → submit → resync.
//!
//! # Invariants
//!
//! - Preconditions (loaded venue, completed selection, positive
//!   availability check, guest bounds, live session) are verified in the
//!   reducer before any effect is emitted; validation failures never reach
//!   the network.
//! - Availability is re-validated against the current snapshot immediately
//!   before submission - a cached verdict is never trusted across date
//!   changes.
//! - While a submission is outstanding (`FlowStatus` not `Idle`) further
//!   submit actions reduce to no-ops, so rapid double-clicks cannot create
//!   duplicate bookings.
//! - On success the venue's full booking set is refetched from the API
//!   (never appended locally), then the selection resets to empty.
//! - On failure the selection is retained so the user can correct and
//!   retry; only confirmed success clears it.
//! - Effect completions carry the generation they were spawned under and
//!   are dropped when the view has since closed or reopened.

use chrono::{NaiveDate, NaiveTime};
use venuebook_core::effect::Effect;
use venuebook_core::reducer::Reducer;
use venuebook_core::{Clock, SmallVec, smallvec};
use venuebook_client::{ApiError, BookingRequest, Venue};

use crate::actions::VenueViewAction;
use crate::availability::is_available;
use crate::environment::{BookingEnvironment, VenueDirectory};
use crate::error::{BookingError, ValidationError};
use crate::session::CredentialStore;
use crate::state::{
    DateRange, FlowStatus, Notice, PendingBooking, Selection, VenueViewState,
};

/// Booking submission flow reducer.
#[derive(Debug, Clone)]
pub struct BookingFlowReducer<D, S, C> {
    _phantom: std::marker::PhantomData<(D, S, C)>,
}

impl<D, S, C> BookingFlowReducer<D, S, C> {
    /// Create a new flow reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<D, S, C> Default for BookingFlowReducer<D, S, C> {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a venue's embedded bookings to calendar-day ranges.
///
/// The API guarantees `dateFrom ≤ dateTo`; a malformed entry is logged and
/// skipped rather than poisoning the whole snapshot.
pub(crate) fn booked_ranges(venue: &Venue) -> Vec<DateRange> {
    venue
        .bookings
        .iter()
        .filter_map(|booking| {
            DateRange::new(booking.date_from_day(), booking.date_to_day())
                .inspect_err(|error| {
                    tracing::warn!(
                        booking_id = %booking.id,
                        %error,
                        "Skipping malformed booking range"
                    );
                })
                .ok()
        })
        .collect()
}

/// Midnight UTC of a calendar day, for the wire format.
fn wire_datetime(day: NaiveDate) -> chrono::DateTime<chrono::Utc> {
    day.and_time(NaiveTime::MIN).and_utc()
}

/// Map an API failure at submit time onto the booking taxonomy.
fn submit_error(error: ApiError) -> BookingError {
    match error {
        // The credential was rejected: route to login
        ApiError::Unauthorized => BookingError::Unauthenticated,
        // The server found an overlap we did not have locally
        ApiError::Api { status: 409, .. } => BookingError::Conflict,
        other => BookingError::Api(other),
    }
}

impl<D, S, C> Reducer for BookingFlowReducer<D, S, C>
where
    D: VenueDirectory + Clone + 'static,
    S: CredentialStore + 'static,
    C: Clock + Clone + 'static,
{
    type State = VenueViewState;
    type Action = VenueViewAction;
    type Environment = BookingEnvironment<D, S, C>;

    #[allow(clippy::too_many_lines)]
    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            // ═══════════════════════════════════════════════════════════
            // View lifecycle
            // ═══════════════════════════════════════════════════════════
            VenueViewAction::ViewOpened { venue_id } => {
                let generation = state.generation + 1;
                *state = VenueViewState::new(venue_id.clone());
                state.generation = generation;
                state.loading = true;

                let directory = env.directory.clone();
                smallvec![Effect::future(async move {
                    match directory.get_venue(&venue_id, true).await {
                        Ok(venue) => Some(VenueViewAction::VenueLoaded {
                            generation,
                            venue: Box::new(venue),
                        }),
                        Err(error) => Some(VenueViewAction::VenueLoadFailed {
                            generation,
                            error: error.into(),
                        }),
                    }
                })]
            },

            VenueViewAction::VenueLoaded { generation, venue } => {
                if generation != state.generation {
                    tracing::debug!("Dropping venue load for a discarded view");
                    return smallvec![Effect::None];
                }

                state.loading = false;
                state.booked = booked_ranges(&venue);
                state.venue = Some(*venue);
                smallvec![Effect::None]
            },

            VenueViewAction::VenueLoadFailed { generation, error } => {
                if generation != state.generation {
                    return smallvec![Effect::None];
                }

                state.loading = false;
                state.notice = Some(Notice::error(error.to_string()));
                smallvec![Effect::None]
            },

            VenueViewAction::ViewClosed => {
                // Bump the generation so in-flight completions are dropped,
                // then discard everything the view owned.
                let generation = state.generation + 1;
                *state = VenueViewState::default();
                state.generation = generation;
                smallvec![Effect::None]
            },

            // ═══════════════════════════════════════════════════════════
            // Submission
            // ═══════════════════════════════════════════════════════════
            VenueViewAction::SubmitBooking => self.submit(state, env),

            VenueViewAction::BookingAccepted {
                generation,
                booking_id,
            } => {
                if generation != state.generation {
                    tracing::debug!("Dropping booking acceptance for a discarded view");
                    return smallvec![Effect::None];
                }

                tracing::info!(%booking_id, venue_id = %state.venue_id, "Booking accepted");

                // Confirmed success is the one path that clears the selection
                state.status = FlowStatus::Refreshing;
                state.selection = Selection::Empty;
                state.verdict = None;
                state.open_picker = None;
                state.pending = None;
                state.notice = Some(Notice::success("Booking confirmed"));

                // Resync from the authoritative source rather than appending
                // locally, to pick up concurrent bookings by other clients.
                let directory = env.directory.clone();
                let venue_id = state.venue_id.clone();
                smallvec![Effect::future(async move {
                    match directory.get_venue(&venue_id, true).await {
                        Ok(venue) => Some(VenueViewAction::BookingsRefreshed {
                            generation,
                            venue: Box::new(venue),
                        }),
                        Err(error) => Some(VenueViewAction::RefreshFailed {
                            generation,
                            error: error.into(),
                        }),
                    }
                })]
            },

            VenueViewAction::BookingRejected { generation, error } => {
                if generation != state.generation {
                    tracing::debug!("Dropping booking rejection for a discarded view");
                    return smallvec![Effect::None];
                }

                tracing::warn!(%error, venue_id = %state.venue_id, "Booking rejected");

                // Selection retained: the user corrects and retries
                state.status = FlowStatus::Idle;
                if error.needs_login() {
                    state.pending = pending_from_state(state);
                }
                state.notice = Some(Notice::error(error.to_string()));
                smallvec![Effect::None]
            },

            VenueViewAction::BookingsRefreshed { generation, venue } => {
                if generation != state.generation {
                    return smallvec![Effect::None];
                }

                state.status = FlowStatus::Idle;
                state.booked = booked_ranges(&venue);
                state.venue = Some(*venue);
                smallvec![Effect::None]
            },

            VenueViewAction::RefreshFailed { generation, error } => {
                if generation != state.generation {
                    return smallvec![Effect::None];
                }

                // The booking itself succeeded; only the resync is stale
                state.status = FlowStatus::Idle;
                state.notice = Some(Notice::error(format!(
                    "Booking confirmed, but refreshing availability failed: {error}"
                )));
                smallvec![Effect::None]
            },

            // Everything else belongs to the calendar reducer
            _ => smallvec![Effect::None],
        }
    }
}

impl<D, S, C> BookingFlowReducer<D, S, C>
where
    D: VenueDirectory + Clone + 'static,
    S: CredentialStore + 'static,
    C: Clock + Clone + 'static,
{
    /// Gate and launch a submission.
    fn submit(
        &self,
        state: &mut VenueViewState,
        env: &BookingEnvironment<D, S, C>,
    ) -> SmallVec<[Effect<VenueViewAction>; 4]> {
        // In-flight dedupe: one submission per venue view at a time
        if state.status != FlowStatus::Idle {
            tracing::debug!("Ignoring submit while a submission is in flight");
            return smallvec![Effect::None];
        }

        if let Err(error) = self.validate(state, env) {
            if matches!(error, BookingError::Unauthenticated) {
                // Park the intent so the shell can resume after login
                state.pending = pending_from_state(state);
            }
            state.notice = Some(Notice::error(error.to_string()));
            return smallvec![Effect::None];
        }

        // Checked by validate()
        let Some(range) = state.selection.range() else {
            return smallvec![Effect::None];
        };
        let Some(session) = env.session.get() else {
            return smallvec![Effect::None];
        };

        let generation = state.generation;
        let request = BookingRequest {
            date_from: wire_datetime(range.from()),
            date_to: wire_datetime(range.to()),
            guests: state.guests,
            venue_id: state.venue_id.clone(),
        };

        state.status = FlowStatus::Submitting;
        state.notice = None;

        let directory = env.directory.clone();
        smallvec![Effect::future(async move {
            match directory
                .create_booking(&session.access_token, &request)
                .await
            {
                Ok(booking) => Some(VenueViewAction::BookingAccepted {
                    generation,
                    booking_id: booking.id,
                }),
                Err(error) => Some(VenueViewAction::BookingRejected {
                    generation,
                    error: submit_error(error),
                }),
            }
        })]
    }

    /// Check every submission precondition without mutating state.
    ///
    /// Ordering: local validation first (nothing leaves the client on bad
    /// input), then authentication, then the fresh availability re-check.
    fn validate(
        &self,
        state: &VenueViewState,
        env: &BookingEnvironment<D, S, C>,
    ) -> Result<(), BookingError> {
        let venue = state
            .venue
            .as_ref()
            .ok_or(ValidationError::VenueNotLoaded)?;

        let range = state
            .selection
            .range()
            .ok_or(ValidationError::IncompleteSelection)?;

        // The user must have run a check for this exact range
        let verdict = state.verdict.ok_or(ValidationError::NotChecked)?;
        if verdict.range != range {
            return Err(ValidationError::NotChecked.into());
        }
        if !verdict.available {
            return Err(BookingError::Conflict);
        }

        if state.guests == 0 || state.guests > venue.max_guests {
            return Err(ValidationError::GuestsOutOfBounds {
                max: venue.max_guests,
            }
            .into());
        }

        if !env.session.is_authenticated() {
            return Err(BookingError::Unauthenticated);
        }

        // Stale-verdict guard: re-validate against the current snapshot
        // instead of trusting the cached verdict.
        if !is_available(&state.booked, range) {
            return Err(BookingError::Conflict);
        }

        Ok(())
    }
}

/// Capture the current intent for post-login resumption.
fn pending_from_state(state: &VenueViewState) -> Option<PendingBooking> {
    state.selection.range().map(|range| PendingBooking {
        id: uuid::Uuid::new_v4(),
        venue_id: state.venue_id.clone(),
        range,
        guests: state.guests,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MemoryCredentialStore, MockDirectory};
    use crate::session::{Session, SessionContext, StoredProfile};
    use crate::state::AvailabilityVerdict;
    use chrono::NaiveDate;
    use std::sync::Arc;
    use venuebook_testing::{FixedClock, ReducerTest, test_clock};
    use venuebook_testing::assertions::{assert_has_future_effect, assert_no_effects};

    type TestEnv = BookingEnvironment<MockDirectory, MemoryCredentialStore, FixedClock>;

    fn signed_in_env(directory: MockDirectory) -> TestEnv {
        let session = SessionContext::new(MemoryCredentialStore::new());
        session.set(Session {
            access_token: "token-abc".to_string(),
            profile: StoredProfile {
                name: "ingrid".to_string(),
                email: "ingrid@example.com".to_string(),
                avatar: None,
                venue_manager: false,
            },
        });
        BookingEnvironment::new(directory, Arc::new(session), test_clock())
    }

    fn signed_out_env(directory: MockDirectory) -> TestEnv {
        BookingEnvironment::new(
            directory,
            Arc::new(SessionContext::new(MemoryCredentialStore::new())),
            test_clock(),
        )
    }

    fn reducer() -> BookingFlowReducer<MockDirectory, MemoryCredentialStore, FixedClock> {
        BookingFlowReducer::new()
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn range(from: &str, to: &str) -> DateRange {
        DateRange::new(day(from), day(to)).unwrap()
    }

    /// A loaded view with a checked, available selection, ready to submit.
    fn ready_state() -> VenueViewState {
        let mut state = VenueViewState::new("v-1");
        state.generation = 1;
        state.venue = Some(MockDirectory::venue_fixture("v-1", &[]));
        state.selection = Selection::RangeSelected {
            from: day("2024-06-16"),
            to: day("2024-06-20"),
        };
        state.verdict = Some(AvailabilityVerdict {
            range: range("2024-06-16", "2024-06-20"),
            available: true,
        });
        state.guests = 2;
        state
    }

    #[test]
    fn submit_with_guests_out_of_bounds_issues_no_network_call() {
        let mut state = ready_state();
        state.guests = 0;

        ReducerTest::new(reducer())
            .with_env(signed_in_env(MockDirectory::new()))
            .given_state(state)
            .when_action(VenueViewAction::SubmitBooking)
            .then_state(|state| {
                assert_eq!(state.status, FlowStatus::Idle);
                assert!(state.notice.is_some());
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn submit_without_check_is_rejected() {
        let mut state = ready_state();
        state.verdict = None;

        ReducerTest::new(reducer())
            .with_env(signed_in_env(MockDirectory::new()))
            .given_state(state)
            .when_action(VenueViewAction::SubmitBooking)
            .then_state(|state| {
                assert_eq!(state.status, FlowStatus::Idle);
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn submit_unauthenticated_parks_the_intent_and_keeps_selection() {
        ReducerTest::new(reducer())
            .with_env(signed_out_env(MockDirectory::new()))
            .given_state(ready_state())
            .when_action(VenueViewAction::SubmitBooking)
            .then_state(|state| {
                assert_eq!(state.status, FlowStatus::Idle);
                // Intent parked for post-login resume
                let pending = state.pending.as_ref().unwrap();
                assert_eq!(pending.venue_id, "v-1");
                assert_eq!(pending.guests, 2);
                // Selection untouched
                assert!(matches!(state.selection, Selection::RangeSelected { .. }));
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn stale_positive_verdict_is_re_checked_before_submission() {
        // booked ranges changed under a cached positive verdict
        let mut state = ready_state();
        state.booked = vec![range("2024-06-18", "2024-06-25")];

        ReducerTest::new(reducer())
            .with_env(signed_in_env(MockDirectory::new()))
            .given_state(state)
            .when_action(VenueViewAction::SubmitBooking)
            .then_state(|state| {
                assert_eq!(state.status, FlowStatus::Idle);
                assert!(state.notice.is_some());
                // Selection retained for the user to pick new dates
                assert!(matches!(state.selection, Selection::RangeSelected { .. }));
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn verdict_for_a_different_range_does_not_authorize_submission() {
        let mut state = ready_state();
        state.verdict = Some(AvailabilityVerdict {
            range: range("2024-07-01", "2024-07-05"),
            available: true,
        });

        ReducerTest::new(reducer())
            .with_env(signed_in_env(MockDirectory::new()))
            .given_state(state)
            .when_action(VenueViewAction::SubmitBooking)
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn valid_submission_moves_to_submitting_and_emits_the_request() {
        ReducerTest::new(reducer())
            .with_env(signed_in_env(MockDirectory::new()))
            .given_state(ready_state())
            .when_action(VenueViewAction::SubmitBooking)
            .then_state(|state| {
                assert_eq!(state.status, FlowStatus::Submitting);
            })
            .then_effects(assert_has_future_effect)
            .run();
    }

    #[test]
    fn submit_while_in_flight_is_a_no_op() {
        let mut state = ready_state();
        state.status = FlowStatus::Submitting;

        ReducerTest::new(reducer())
            .with_env(signed_in_env(MockDirectory::new()))
            .given_state(state)
            .when_action(VenueViewAction::SubmitBooking)
            .then_state(|state| {
                assert_eq!(state.status, FlowStatus::Submitting);
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn acceptance_resets_selection_and_schedules_refetch() {
        let mut state = ready_state();
        state.status = FlowStatus::Submitting;

        ReducerTest::new(reducer())
            .with_env(signed_in_env(MockDirectory::new()))
            .given_state(state)
            .when_action(VenueViewAction::BookingAccepted {
                generation: 1,
                booking_id: "b-9".to_string(),
            })
            .then_state(|state| {
                assert_eq!(state.selection, Selection::Empty);
                assert!(state.verdict.is_none());
                assert_eq!(state.status, FlowStatus::Refreshing);
            })
            .then_effects(assert_has_future_effect)
            .run();
    }

    #[test]
    fn rejection_keeps_the_selection() {
        let mut state = ready_state();
        state.status = FlowStatus::Submitting;

        ReducerTest::new(reducer())
            .with_env(signed_in_env(MockDirectory::new()))
            .given_state(state)
            .when_action(VenueViewAction::BookingRejected {
                generation: 1,
                error: BookingError::Conflict,
            })
            .then_state(|state| {
                assert_eq!(state.status, FlowStatus::Idle);
                assert!(matches!(state.selection, Selection::RangeSelected { .. }));
                assert!(state.notice.is_some());
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn stale_generation_completions_are_dropped() {
        let mut state = ready_state();
        state.generation = 5;

        ReducerTest::new(reducer())
            .with_env(signed_in_env(MockDirectory::new()))
            .given_state(state)
            .when_action(VenueViewAction::BookingAccepted {
                generation: 4,
                booking_id: "b-9".to_string(),
            })
            .then_state(|state| {
                // Nothing moved: the completion belonged to a prior view
                assert!(matches!(state.selection, Selection::RangeSelected { .. }));
                assert_eq!(state.status, FlowStatus::Idle);
            })
            .then_effects(assert_no_effects)
            .run();
    }

    #[test]
    fn view_close_discards_state_and_bumps_generation() {
        let state = ready_state();

        ReducerTest::new(reducer())
            .with_env(signed_in_env(MockDirectory::new()))
            .given_state(state)
            .when_action(VenueViewAction::ViewClosed)
            .then_state(|state| {
                assert_eq!(state.selection, Selection::Empty);
                assert!(state.venue.is_none());
                assert_eq!(state.generation, 2);
            })
            .run();
    }
}
