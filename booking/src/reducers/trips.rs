//! Trips reducer: the signed-in user's bookings.
//!
//! Owns the one booking-set accessor for the profile: the list is fetched
//! from the API, and any mutating call (a cancellation) invalidates it and
//! refetches rather than editing the local copy.

use venuebook_core::effect::Effect;
use venuebook_core::reducer::Reducer;
use venuebook_core::{Clock, SmallVec, smallvec};

use crate::actions::TripsAction;
use crate::environment::{BookingEnvironment, VenueDirectory};
use crate::error::BookingError;
use crate::session::CredentialStore;
use crate::state::{Notice, TripsState};

/// Trips reducer.
#[derive(Debug, Clone)]
pub struct TripsReducer<D, S, C> {
    _phantom: std::marker::PhantomData<(D, S, C)>,
}

impl<D, S, C> TripsReducer<D, S, C> {
    /// Create a new trips reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<D, S, C> Default for TripsReducer<D, S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, S, C> TripsReducer<D, S, C>
where
    D: VenueDirectory + Clone + 'static,
    S: CredentialStore + 'static,
    C: Clock + Clone + 'static,
{
    /// Fetch the profile's bookings under the given generation.
    fn fetch_effect(
        env: &BookingEnvironment<D, S, C>,
        access_token: String,
        profile_name: String,
        generation: u64,
    ) -> Effect<TripsAction> {
        let directory = env.directory.clone();
        Effect::future(async move {
            match directory
                .bookings_by_profile(&access_token, &profile_name, None, None)
                .await
            {
                Ok(page) => Some(TripsAction::Loaded {
                    generation,
                    bookings: page.data,
                }),
                Err(error) => Some(TripsAction::LoadFailed {
                    generation,
                    error: error.into(),
                }),
            }
        })
    }
}

impl<D, S, C> Reducer for TripsReducer<D, S, C>
where
    D: VenueDirectory + Clone + 'static,
    S: CredentialStore + 'static,
    C: Clock + Clone + 'static,
{
    type State = TripsState;
    type Action = TripsAction;
    type Environment = BookingEnvironment<D, S, C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            TripsAction::Opened => {
                let Some(session) = env.session.get() else {
                    state.notice = Some(Notice::error(BookingError::Unauthenticated.to_string()));
                    return smallvec![Effect::None];
                };

                let generation = state.generation + 1;
                *state = TripsState {
                    generation,
                    loading: true,
                    ..TripsState::default()
                };

                smallvec![Self::fetch_effect(
                    env,
                    session.access_token,
                    session.profile.name,
                    generation,
                )]
            },

            TripsAction::Loaded {
                generation,
                bookings,
            } => {
                if generation != state.generation {
                    tracing::debug!("Dropping stale trips load");
                    return smallvec![Effect::None];
                }

                state.loading = false;
                state.cancelling = None;
                state.bookings = bookings;
                smallvec![Effect::None]
            },

            TripsAction::LoadFailed { generation, error } => {
                if generation != state.generation {
                    return smallvec![Effect::None];
                }

                state.loading = false;
                state.cancelling = None;
                state.notice = Some(Notice::error(error.to_string()));
                smallvec![Effect::None]
            },

            TripsAction::CancelRequested { booking_id } => {
                // One cancellation at a time
                if state.cancelling.is_some() {
                    tracing::debug!("Ignoring cancel while another is in flight");
                    return smallvec![Effect::None];
                }

                let Some(session) = env.session.get() else {
                    state.notice = Some(Notice::error(BookingError::Unauthenticated.to_string()));
                    return smallvec![Effect::None];
                };

                state.cancelling = Some(booking_id.clone());
                state.notice = None;

                let generation = state.generation;
                let directory = env.directory.clone();
                smallvec![Effect::future(async move {
                    match directory
                        .delete_booking(&session.access_token, &booking_id)
                        .await
                    {
                        Ok(()) => Some(TripsAction::Cancelled {
                            generation,
                            booking_id,
                        }),
                        Err(error) => Some(TripsAction::CancelFailed {
                            generation,
                            error: error.into(),
                        }),
                    }
                })]
            },

            TripsAction::Cancelled {
                generation,
                booking_id,
            } => {
                if generation != state.generation {
                    tracing::debug!("Dropping stale cancellation result");
                    return smallvec![Effect::None];
                }

                tracing::info!(%booking_id, "Booking cancelled");
                state.notice = Some(Notice::success("Booking cancelled"));

                // Invalidate and refetch; never edit the local list
                let Some(session) = env.session.get() else {
                    state.cancelling = None;
                    return smallvec![Effect::None];
                };

                state.loading = true;
                smallvec![Self::fetch_effect(
                    env,
                    session.access_token,
                    session.profile.name,
                    generation,
                )]
            },

            TripsAction::CancelFailed { generation, error } => {
                if generation != state.generation {
                    return smallvec![Effect::None];
                }

                // List retained; the user may retry
                state.cancelling = None;
                state.notice = Some(Notice::error(error.to_string()));
                smallvec![Effect::None]
            },
        }
    }
}
