//! # Venuebook Testing
//!
//! Testing utilities and helpers for the venuebook architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A fluent Given-When-Then harness for reducers
//! - Assertion helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use venuebook_testing::{ReducerTest, test_clock};
//!
//! ReducerTest::new(CalendarReducer::new())
//!     .with_env(test_environment())
//!     .given_state(VenueViewState::default())
//!     .when_action(VenueViewAction::CheckInPicked { date })
//!     .then_state(|state| {
//!         assert_eq!(state.selection.from(), Some(date));
//!     })
//!     .run();
//! ```

pub mod reducer_test;

pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};

/// Mock implementations for testing.
pub mod mocks {
    use chrono::{DateTime, Utc};
    use venuebook_core::environment::Clock;

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use venuebook_testing::mocks::FixedClock;
    /// use venuebook_core::environment::Clock;
    /// use chrono::Utc;
    ///
    /// let clock = FixedClock::new(Utc::now());
    /// let time1 = clock.now();
    /// let time2 = clock.now();
    /// assert_eq!(time1, time2); // Always the same!
    /// ```
    #[derive(Debug, Clone)]
    pub struct FixedClock {
        time: DateTime<Utc>,
    }

    impl FixedClock {
        /// Create a new fixed clock with the given time
        #[must_use]
        pub const fn new(time: DateTime<Utc>) -> Self {
            Self { time }
        }
    }

    impl Clock for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.time
        }
    }

    /// Create a default fixed clock for tests (2024-06-01 00:00:00 UTC)
    ///
    /// The date sits safely before every fixture range so "no past
    /// check-ins" rules don't interfere with tests.
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2024-06-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use venuebook_core::environment::Clock;

    #[test]
    fn test_fixed_clock() {
        let clock = test_clock();
        let time1 = clock.now();
        let time2 = clock.now();
        assert_eq!(time1, time2);
    }

    #[test]
    fn test_clock_today_truncates_to_date() {
        let clock = test_clock();
        assert_eq!(clock.today().to_string(), "2024-06-01");
    }
}
