//! Reducer composition utilities.
//!
//! Features are built from small reducers, each owning one concern, and
//! combined into a single reducer over the shared feature state. The venue
//! view, for example, combines a calendar-selection reducer with a
//! booking-flow reducer over one state and one action type.

use crate::effect::Effect;
use crate::reducer::Reducer;
use smallvec::SmallVec;

/// Combines multiple reducers into one that runs them in sequence.
///
/// Each reducer receives the same action and mutates the shared state in
/// turn; effects from all reducers are concatenated in order.
///
/// # Examples
///
/// ```ignore
/// let view = combine_reducers(vec![
///     Box::new(CalendarReducer::new()),
///     Box::new(BookingFlowReducer::new()),
/// ]);
///
/// let mut state = VenueViewState::default();
/// let effects = view.reduce(&mut state, VenueViewAction::ViewClosed, &env);
/// ```
#[must_use]
pub fn combine_reducers<S, A, E>(
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
) -> CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    CombinedReducer { reducers }
}

/// A combined reducer that runs multiple reducers in sequence.
///
/// Created by [`combine_reducers`].
pub struct CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    reducers: Vec<Box<dyn Reducer<State = S, Action = A, Environment = E> + Send + Sync>>,
}

impl<S, A, E> Reducer for CombinedReducer<S, A, E>
where
    S: 'static,
    A: Clone + 'static,
    E: 'static,
{
    type State = S;
    type Action = A;
    type Environment = E;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let mut all_effects = SmallVec::new();

        for reducer in &self.reducers {
            let effects = reducer.reduce(state, action.clone(), env);
            all_effects.extend(effects);
        }

        all_effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::smallvec;

    #[derive(Debug, Default)]
    struct TestState {
        picks: u32,
        notices: u32,
    }

    #[derive(Clone, Debug)]
    enum TestAction {
        Pick,
        Notice,
    }

    struct PickReducer;

    impl Reducer for PickReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if matches!(action, TestAction::Pick) {
                state.picks += 1;
            }
            smallvec![Effect::None]
        }
    }

    struct NoticeReducer;

    impl Reducer for NoticeReducer {
        type State = TestState;
        type Action = TestAction;
        type Environment = ();

        fn reduce(
            &self,
            state: &mut Self::State,
            action: Self::Action,
            _env: &Self::Environment,
        ) -> SmallVec<[Effect<Self::Action>; 4]> {
            if matches!(action, TestAction::Notice) {
                state.notices += 1;
            }
            smallvec![Effect::None]
        }
    }

    #[test]
    fn combined_reducer_runs_all_in_sequence() {
        let combined = combine_reducers(vec![Box::new(PickReducer), Box::new(NoticeReducer)]);

        let mut state = TestState::default();
        combined.reduce(&mut state, TestAction::Pick, &());
        combined.reduce(&mut state, TestAction::Notice, &());

        assert_eq!(state.picks, 1);
        assert_eq!(state.notices, 1);
    }

    #[test]
    fn combined_reducer_concatenates_effects() {
        let combined = combine_reducers(vec![Box::new(PickReducer), Box::new(NoticeReducer)]);

        let mut state = TestState::default();
        let effects = combined.reduce(&mut state, TestAction::Pick, &());

        assert_eq!(effects.len(), 2);
    }
}
