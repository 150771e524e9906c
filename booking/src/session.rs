//! Session context.
//!
//! The browser-local credential store of the original is process-wide state
//! read by every authenticated call. Here it sits behind a single
//! [`SessionContext`] with explicit `get`/`set`/`clear` and a subscription
//! mechanism for dependent views - business logic never reads the
//! underlying store directly.
//!
//! The store itself is a trait so tests inject an in-memory implementation.
//! Writes come only from login/logout/profile-update; concurrent writers
//! (two tabs) are out of scope and not guarded against.

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use venuebook_client::{CredentialedProfile, Media};

/// Fixed key for the bearer token.
pub const ACCESS_TOKEN_KEY: &str = "accessToken";

/// Fixed key for the cached profile.
pub const USER_KEY: &str = "user";

/// Synchronous string key-value store holding the session credential.
///
/// The analog of browser local storage: reads are synchronous and cheap,
/// values are opaque strings. Not a designed storage subsystem.
pub trait CredentialStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value.
    fn set(&self, key: &str, value: &str);

    /// Delete a value.
    fn remove(&self, key: &str);
}

/// The profile cached alongside the token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredProfile {
    /// Profile name (used for `/profiles/{name}/...` endpoints).
    pub name: String,

    /// Email address.
    pub email: String,

    /// Avatar image.
    #[serde(default)]
    pub avatar: Option<Media>,

    /// Whether this profile can manage venues.
    #[serde(default)]
    pub venue_manager: bool,
}

/// An authenticated session: bearer token plus cached profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Bearer token for authenticated API calls.
    pub access_token: String,

    /// The signed-in profile.
    pub profile: StoredProfile,
}

impl From<CredentialedProfile> for Session {
    fn from(profile: CredentialedProfile) -> Self {
        Self {
            access_token: profile.access_token,
            profile: StoredProfile {
                name: profile.name,
                email: profile.email,
                avatar: profile.avatar,
                venue_manager: profile.venue_manager,
            },
        }
    }
}

/// Single owner of the session credential.
///
/// Reads hydrate from the credential store once at construction; set/clear
/// write through to the store and notify subscribers.
#[derive(Debug)]
pub struct SessionContext<S: CredentialStore> {
    store: S,
    current: watch::Sender<Option<Session>>,
}

impl<S: CredentialStore> SessionContext<S> {
    /// Create a context, hydrating any persisted session.
    ///
    /// A token without a parseable profile (or vice versa) is treated as
    /// corrupt: both keys are removed and the context starts signed out,
    /// mirroring how the original recovers from invalid stored data.
    #[must_use]
    pub fn new(store: S) -> Self {
        let hydrated = Self::hydrate(&store);
        let (current, _) = watch::channel(hydrated);
        Self { store, current }
    }

    fn hydrate(store: &S) -> Option<Session> {
        let token = store.get(ACCESS_TOKEN_KEY);
        let user = store.get(USER_KEY);

        match (token, user) {
            (Some(access_token), Some(user_json)) => {
                match serde_json::from_str::<StoredProfile>(&user_json) {
                    Ok(profile) => Some(Session {
                        access_token,
                        profile,
                    }),
                    Err(error) => {
                        tracing::error!(%error, "Invalid cached profile, clearing session");
                        store.remove(ACCESS_TOKEN_KEY);
                        store.remove(USER_KEY);
                        None
                    },
                }
            },
            (None, None) => None,
            // Half-written state is corrupt state
            _ => {
                tracing::warn!("Partial session in credential store, clearing");
                store.remove(ACCESS_TOKEN_KEY);
                store.remove(USER_KEY);
                None
            },
        }
    }

    /// Current session, if signed in.
    #[must_use]
    pub fn get(&self) -> Option<Session> {
        self.current.borrow().clone()
    }

    /// Whether a session is present.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Store a session and notify subscribers.
    pub fn set(&self, session: Session) {
        self.store.set(ACCESS_TOKEN_KEY, &session.access_token);
        match serde_json::to_string(&session.profile) {
            Ok(user_json) => self.store.set(USER_KEY, &user_json),
            Err(error) => {
                tracing::error!(%error, "Failed to serialize profile for storage");
            },
        }
        let _ = self.current.send(Some(session));
    }

    /// Clear the session and notify subscribers.
    pub fn clear(&self) {
        self.store.remove(ACCESS_TOKEN_KEY);
        self.store.remove(USER_KEY);
        let _ = self.current.send(None);
    }

    /// Subscribe to session changes.
    ///
    /// The receiver yields the current value immediately and every
    /// subsequent set/clear.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.current.subscribe()
    }
}
