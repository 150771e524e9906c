//! Venue directory reducer: paginated listing and search.
//!
//! Feeds the venue selection that precedes the single-venue view. Search
//! date windows are validated locally (`from ≤ to`) before anything leaves
//! the client, and page/search responses are generation-guarded the same
//! way the venue view guards its completions.

use venuebook_core::effect::Effect;
use venuebook_core::reducer::Reducer;
use venuebook_core::{Clock, SmallVec, smallvec};

use crate::actions::DirectoryAction;
use crate::environment::{BookingEnvironment, VenueDirectory};
use crate::error::ValidationError;
use crate::session::CredentialStore;
use crate::state::{DIRECTORY_PAGE_SIZE, DirectoryState, Notice, SearchQuery};

/// Venue directory reducer.
#[derive(Debug, Clone)]
pub struct DirectoryReducer<D, S, C> {
    _phantom: std::marker::PhantomData<(D, S, C)>,
}

impl<D, S, C> DirectoryReducer<D, S, C> {
    /// Create a new directory reducer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<D, S, C> Default for DirectoryReducer<D, S, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D, S, C> Reducer for DirectoryReducer<D, S, C>
where
    D: VenueDirectory + Clone + 'static,
    S: CredentialStore + 'static,
    C: Clock + Clone + 'static,
{
    type State = DirectoryState;
    type Action = DirectoryAction;
    type Environment = BookingEnvironment<D, S, C>;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            DirectoryAction::PageRequested { page } => {
                let page = page.max(1);
                let generation = state.generation + 1;
                state.generation = generation;
                state.loading = true;
                state.search = None;
                state.notice = None;

                let directory = env.directory.clone();
                smallvec![Effect::future(async move {
                    match directory.list_venues(page, DIRECTORY_PAGE_SIZE).await {
                        Ok(result) => Some(DirectoryAction::PageLoaded {
                            generation,
                            page: Box::new(result),
                        }),
                        Err(error) => Some(DirectoryAction::PageLoadFailed {
                            generation,
                            error: error.into(),
                        }),
                    }
                })]
            },

            DirectoryAction::PageLoaded { generation, page } => {
                if generation != state.generation {
                    tracing::debug!("Dropping stale directory page");
                    return smallvec![Effect::None];
                }

                state.loading = false;
                state.page = page.meta.current_page.max(1);
                state.page_count = page.meta.page_count;
                state.venues = page.data;
                smallvec![Effect::None]
            },

            DirectoryAction::PageLoadFailed { generation, error } => {
                if generation != state.generation {
                    return smallvec![Effect::None];
                }

                state.loading = false;
                state.notice = Some(Notice::error(error.to_string()));
                smallvec![Effect::None]
            },

            DirectoryAction::SearchSubmitted {
                query,
                date_from,
                date_to,
            } => {
                if let (Some(from), Some(to)) = (date_from, date_to) {
                    if to < from {
                        state.notice =
                            Some(Notice::error(ValidationError::OutOfOrderRange.to_string()));
                        return smallvec![Effect::None];
                    }
                }

                let generation = state.generation + 1;
                state.generation = generation;
                state.loading = true;
                state.notice = None;
                state.search = Some(SearchQuery {
                    query: query.clone(),
                    date_from,
                    date_to,
                });

                let directory = env.directory.clone();
                smallvec![Effect::future(async move {
                    match directory.search_venues(&query, date_from, date_to).await {
                        Ok(venues) => Some(DirectoryAction::SearchLoaded { generation, venues }),
                        Err(error) => Some(DirectoryAction::SearchFailed {
                            generation,
                            error: error.into(),
                        }),
                    }
                })]
            },

            DirectoryAction::SearchLoaded { generation, venues } => {
                if generation != state.generation {
                    tracing::debug!("Dropping stale search results");
                    return smallvec![Effect::None];
                }

                state.loading = false;
                state.venues = venues;
                smallvec![Effect::None]
            },

            DirectoryAction::SearchFailed { generation, error } => {
                if generation != state.generation {
                    return smallvec![Effect::None];
                }

                state.loading = false;
                state.notice = Some(Notice::error(error.to_string()));
                smallvec![Effect::None]
            },

            DirectoryAction::SearchCleared => {
                state.search = None;
                state.notice = None;
                // Return to the first listing page
                self.reduce(state, DirectoryAction::PageRequested { page: 1 }, env)
            },
        }
    }
}
