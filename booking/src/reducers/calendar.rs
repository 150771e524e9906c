//! Calendar selection reducer.
//!
//! Implements the two-step check-in / check-out selection for the venue
//! view: `Empty → FromSelected → RangeSelected`, with an orthogonal
//! availability verdict that resets whenever either date changes.
//!
//! # Transitions
//!
//! - Picking a check-in date records `from`; a previously picked check-out
//!   survives only if it is still on or after the new check-in.
//! - Picking a check-out date is accepted only with a check-in present and
//!   the date on or after it.
//! - Any successful pick closes the open calendar popover and opens none.
//! - Rejected picks never error: the prior selection is retained and a
//!   validation notice is surfaced.
//!
//! Requesting an availability check runs the conflict resolver against the
//! venue's booked ranges and stores the verdict without touching the
//! selection.

use venuebook_core::effect::Effect;
use venuebook_core::reducer::Reducer;
use venuebook_core::{Clock, SmallVec, smallvec};

use crate::actions::VenueViewAction;
use crate::availability::is_available;
use crate::environment::{BookingEnvironment, VenueDirectory};
use crate::error::ValidationError;
use crate::session::CredentialStore;
use crate::state::{AvailabilityVerdict, Notice, Selection, VenueViewState};

/// Calendar selection reducer.
///
/// Pure: every action reduces to a state change (or a rejected no-op) and
/// no effects.
#[derive(Debug, Clone)]
pub struct CalendarReducer<D, S, C> {
    _phantom: std::marker::PhantomData<(D, S, C)>,
}

impl<D, S, C> CalendarReducer<D, S, C> {
    /// Create a new calendar reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<D, S, C> Default for CalendarReducer<D, S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, S, C> Reducer for CalendarReducer<D, S, C>
where
    D: VenueDirectory + Clone + 'static,
    S: CredentialStore + 'static,
    C: Clock + Clone + 'static,
{
    type State = VenueViewState;
    type Action = VenueViewAction;
    type Environment = BookingEnvironment<D, S, C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            VenueViewAction::PickerToggled { picker } => {
                state.open_picker = if state.open_picker == Some(picker) {
                    None
                } else {
                    Some(picker)
                };
                smallvec![Effect::None]
            },

            VenueViewAction::CheckInPicked { date } => {
                if date < env.clock.today() {
                    state.notice = Some(Notice::error(ValidationError::CheckInInPast.to_string()));
                    return smallvec![Effect::None];
                }

                // A previously picked check-out survives only if still valid
                state.selection = match state.selection.to_date() {
                    Some(to) if to >= date => Selection::RangeSelected { from: date, to },
                    _ => Selection::FromSelected { from: date },
                };
                state.verdict = None;
                state.open_picker = None;
                state.notice = None;
                smallvec![Effect::None]
            },

            VenueViewAction::CheckOutPicked { date } => {
                let Some(from) = state.selection.from_date() else {
                    state.notice = Some(Notice::error(ValidationError::MissingCheckIn.to_string()));
                    return smallvec![Effect::None];
                };

                if date < from {
                    // Rejected: prior selection retained, user signaled
                    state.notice =
                        Some(Notice::error(ValidationError::OutOfOrderRange.to_string()));
                    return smallvec![Effect::None];
                }

                state.selection = Selection::RangeSelected { from, to: date };
                state.verdict = None;
                state.open_picker = None;
                state.notice = None;
                smallvec![Effect::None]
            },

            VenueViewAction::GuestsChanged { guests } => {
                state.guests = guests;
                smallvec![Effect::None]
            },

            VenueViewAction::CheckAvailability => {
                let Some(range) = state.selection.range() else {
                    state.notice = Some(Notice::error(
                        ValidationError::IncompleteSelection.to_string(),
                    ));
                    return smallvec![Effect::None];
                };

                state.verdict = Some(AvailabilityVerdict {
                    range,
                    available: is_available(&state.booked, range),
                });
                state.notice = None;
                smallvec![Effect::None]
            },

            // Everything else belongs to the flow reducer
            _ => smallvec![Effect::None],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MemoryCredentialStore, MockDirectory};
    use crate::session::SessionContext;
    use crate::state::{DateRange, PickerKind};
    use chrono::NaiveDate;
    use std::sync::Arc;
    use venuebook_testing::{FixedClock, ReducerTest, test_clock};

    type TestEnv = BookingEnvironment<MockDirectory, MemoryCredentialStore, FixedClock>;

    fn env() -> TestEnv {
        BookingEnvironment::new(
            MockDirectory::new(),
            Arc::new(SessionContext::new(MemoryCredentialStore::new())),
            test_clock(),
        )
    }

    fn reducer() -> CalendarReducer<MockDirectory, MemoryCredentialStore, FixedClock> {
        CalendarReducer::new()
    }

    fn day(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn check_in_pick_moves_to_from_selected() {
        ReducerTest::new(reducer())
            .with_env(env())
            .given_state(VenueViewState::new("v-1"))
            .when_action(VenueViewAction::CheckInPicked {
                date: day("2024-08-01"),
            })
            .then_state(|state| {
                assert_eq!(
                    state.selection,
                    Selection::FromSelected {
                        from: day("2024-08-01")
                    }
                );
                assert!(state.notice.is_none());
            })
            .run();
    }

    #[test]
    fn out_of_order_check_out_is_rejected_without_state_change() {
        ReducerTest::new(reducer())
            .with_env(env())
            .given_state(VenueViewState::new("v-1"))
            .when_action(VenueViewAction::CheckInPicked {
                date: day("2024-08-01"),
            })
            .when_action(VenueViewAction::CheckOutPicked {
                date: day("2024-07-30"),
            })
            .then_state(|state| {
                assert_eq!(
                    state.selection,
                    Selection::FromSelected {
                        from: day("2024-08-01")
                    }
                );
                assert!(state.notice.is_some());
            })
            .run();
    }

    #[test]
    fn check_out_without_check_in_is_rejected() {
        ReducerTest::new(reducer())
            .with_env(env())
            .given_state(VenueViewState::new("v-1"))
            .when_action(VenueViewAction::CheckOutPicked {
                date: day("2024-08-05"),
            })
            .then_state(|state| {
                assert_eq!(state.selection, Selection::Empty);
                assert!(state.notice.is_some());
            })
            .run();
    }

    #[test]
    fn valid_check_out_completes_the_range() {
        ReducerTest::new(reducer())
            .with_env(env())
            .given_state(VenueViewState::new("v-1"))
            .when_action(VenueViewAction::CheckInPicked {
                date: day("2024-08-01"),
            })
            .when_action(VenueViewAction::CheckOutPicked {
                date: day("2024-08-05"),
            })
            .then_state(|state| {
                assert_eq!(
                    state.selection,
                    Selection::RangeSelected {
                        from: day("2024-08-01"),
                        to: day("2024-08-05"),
                    }
                );
            })
            .run();
    }

    #[test]
    fn new_check_in_keeps_later_check_out() {
        let mut state = VenueViewState::new("v-1");
        state.selection = Selection::RangeSelected {
            from: day("2024-08-01"),
            to: day("2024-08-10"),
        };

        ReducerTest::new(reducer())
            .with_env(env())
            .given_state(state)
            .when_action(VenueViewAction::CheckInPicked {
                date: day("2024-08-05"),
            })
            .then_state(|state| {
                assert_eq!(
                    state.selection,
                    Selection::RangeSelected {
                        from: day("2024-08-05"),
                        to: day("2024-08-10"),
                    }
                );
            })
            .run();
    }

    #[test]
    fn new_check_in_discards_earlier_check_out() {
        let mut state = VenueViewState::new("v-1");
        state.selection = Selection::RangeSelected {
            from: day("2024-08-01"),
            to: day("2024-08-10"),
        };

        ReducerTest::new(reducer())
            .with_env(env())
            .given_state(state)
            .when_action(VenueViewAction::CheckInPicked {
                date: day("2024-08-15"),
            })
            .then_state(|state| {
                assert_eq!(
                    state.selection,
                    Selection::FromSelected {
                        from: day("2024-08-15")
                    }
                );
            })
            .run();
    }

    #[test]
    fn past_check_in_is_rejected() {
        // test_clock is pinned to 2024-06-01
        ReducerTest::new(reducer())
            .with_env(env())
            .given_state(VenueViewState::new("v-1"))
            .when_action(VenueViewAction::CheckInPicked {
                date: day("2024-05-20"),
            })
            .then_state(|state| {
                assert_eq!(state.selection, Selection::Empty);
                assert!(state.notice.is_some());
            })
            .run();
    }

    #[test]
    fn date_change_invalidates_verdict() {
        // the cached verdict dies with the selection that produced it
        let mut state = VenueViewState::new("v-1");
        state.selection = Selection::RangeSelected {
            from: day("2024-08-01"),
            to: day("2024-08-05"),
        };
        state.verdict = Some(AvailabilityVerdict {
            range: DateRange::new(day("2024-08-01"), day("2024-08-05")).unwrap(),
            available: true,
        });

        ReducerTest::new(reducer())
            .with_env(env())
            .given_state(state)
            .when_action(VenueViewAction::CheckInPicked {
                date: day("2024-08-02"),
            })
            .then_state(|state| {
                assert!(state.verdict.is_none());
            })
            .run();
    }

    #[test]
    fn successful_pick_closes_the_open_picker() {
        let mut state = VenueViewState::new("v-1");
        state.open_picker = Some(PickerKind::CheckIn);

        ReducerTest::new(reducer())
            .with_env(env())
            .given_state(state)
            .when_action(VenueViewAction::CheckInPicked {
                date: day("2024-08-01"),
            })
            .then_state(|state| {
                assert!(state.open_picker.is_none());
            })
            .run();
    }

    #[test]
    fn check_availability_records_verdict_against_booked_ranges() {
        let mut state = VenueViewState::new("v-1");
        state.booked = vec![DateRange::new(day("2024-06-10"), day("2024-06-15")).unwrap()];
        state.selection = Selection::RangeSelected {
            from: day("2024-06-15"),
            to: day("2024-06-18"),
        };

        ReducerTest::new(reducer())
            .with_env(env())
            .given_state(state)
            .when_action(VenueViewAction::CheckAvailability)
            .then_state(|state| {
                let verdict = state.verdict.unwrap();
                assert!(!verdict.available);
                // Selection untouched by the check
                assert!(matches!(state.selection, Selection::RangeSelected { .. }));
            })
            .run();
    }

    #[test]
    fn check_availability_without_full_range_is_rejected() {
        ReducerTest::new(reducer())
            .with_env(env())
            .given_state(VenueViewState::new("v-1"))
            .when_action(VenueViewAction::CheckAvailability)
            .then_state(|state| {
                assert!(state.verdict.is_none());
                assert!(state.notice.is_some());
            })
            .run();
    }
}
