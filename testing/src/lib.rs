//! # Basket Testing
//!
//! Testing utilities and helpers for the Basket architecture.
//!
//! This crate provides:
//! - Mock implementations of Environment traits
//! - A Given-When-Then harness for reducers
//! - Assertion and resolution helpers for effects
//!
//! ## Example
//!
//! ```ignore
//! use basket_testing::{ReducerTest, assertions, test_clock};
//!
//! ReducerTest::new(ShoppingListReducer::new())
//!     .with_env(ShoppingListEnvironment::new(Arc::new(test_clock())))
//!     .given_state(ShoppingListContainer::new())
//!     .when_action(add_list_command())
//!     .then_state(|state| assert_eq!(state.len(), 1))
//!     .then_effects(|effects| assertions::assert_effects_count(effects, 1))
//!     .run();
//! ```

use chrono::{DateTime, Utc};
use basket_core::environment::Clock;

mod reducer_test;

/// Mock implementations of Environment traits
pub mod mocks {
    use super::{Clock, DateTime, Utc};

    /// Fixed clock for deterministic tests
    ///
    /// Always returns the same time, making tests reproducible.
    ///
    /// # Example
    ///
    /// ```
    /// use basket_testing::mocks::FixedClock;
    /// use basket_core::environment::Clock;
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

    /// Create a default fixed clock for tests (2025-01-01 00:00:00 UTC)
    ///
    /// # Panics
    ///
    /// This function will panic if the hardcoded timestamp fails to parse,
    /// which should never happen in practice.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn test_clock() -> FixedClock {
        FixedClock::new(
            DateTime::parse_from_rfc3339("2025-01-01T00:00:00Z")
                .expect("hardcoded timestamp should always parse")
                .with_timezone(&Utc),
        )
    }
}

/// Helpers for driving effects outside a store
pub mod helpers {
    use basket_core::effect::Effect;

    /// Run effects to completion and collect the actions they produce
    ///
    /// Produced actions are NOT fed back into any reducer, which keeps a
    /// reducer test to exactly one step.
    pub async fn resolve_effects<A>(effects: impl IntoIterator<Item = Effect<A>>) -> Vec<A>
    where
        A: Send + 'static,
    {
        let mut actions = Vec::new();
        for effect in effects {
            if let Effect::Future(fut) = effect {
                actions.extend(fut.await);
            }
        }
        actions
    }
}

// Re-export commonly used items
pub use mocks::{FixedClock, test_clock};
pub use reducer_test::{ReducerTest, assertions};
