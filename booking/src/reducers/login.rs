//! Login/logout reducer.
//!
//! Thin by design: the API owns the authentication protocol. This reducer
//! calls the login endpoint, hands the resulting credential to the session
//! context, and mirrors the signed-in profile into view state. All
//! credential reads elsewhere go through the session context, never the
//! underlying store.

use venuebook_core::effect::Effect;
use venuebook_core::reducer::Reducer;
use venuebook_core::{Clock, SmallVec, smallvec};

use crate::actions::SessionAction;
use crate::environment::{BookingEnvironment, VenueDirectory};
use crate::session::{CredentialStore, Session};
use crate::state::{Notice, SessionFlowState};

/// Login/logout reducer.
#[derive(Debug, Clone)]
pub struct SessionReducer<D, S, C> {
    _phantom: std::marker::PhantomData<(D, S, C)>,
}

impl<D, S, C> SessionReducer<D, S, C> {
    /// Create a new session reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<D, S, C> Default for SessionReducer<D, S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, S, C> Reducer for SessionReducer<D, S, C>
where
    D: VenueDirectory + Clone + 'static,
    S: CredentialStore + 'static,
    C: Clock + Clone + 'static,
{
    type State = SessionFlowState;
    type Action = SessionAction;
    type Environment = BookingEnvironment<D, S, C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            SessionAction::LoginSubmitted { email, password } => {
                if state.logging_in {
                    tracing::debug!("Ignoring login while one is in flight");
                    return smallvec![Effect::None];
                }

                if email.is_empty() || password.is_empty() {
                    state.notice = Some(Notice::error("Enter both email and password"));
                    return smallvec![Effect::None];
                }

                state.logging_in = true;
                state.notice = None;

                let directory = env.directory.clone();
                let session = std::sync::Arc::clone(&env.session);
                smallvec![Effect::future(async move {
                    match directory.login(&email, &password).await {
                        Ok(profile) => {
                            let profile_name = profile.name.clone();
                            session.set(Session::from(profile));
                            Some(SessionAction::LoginSucceeded { profile_name })
                        },
                        Err(error) => Some(SessionAction::LoginFailed {
                            error: error.into(),
                        }),
                    }
                })]
            },

            SessionAction::LoginSucceeded { profile_name } => {
                tracing::info!(%profile_name, "Signed in");
                state.logging_in = false;
                state.profile_name = Some(profile_name);
                state.notice = None;
                smallvec![Effect::None]
            },

            SessionAction::LoginFailed { error } => {
                tracing::warn!(%error, "Login failed");
                state.logging_in = false;
                state.notice = Some(Notice::error(error.to_string()));
                smallvec![Effect::None]
            },

            SessionAction::LogoutRequested => {
                state.profile_name = None;
                state.notice = None;

                let session = std::sync::Arc::clone(&env.session);
                smallvec![Effect::future(async move {
                    session.clear();
                    None
                })]
            },
        }
    }
}
