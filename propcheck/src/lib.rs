#![allow(clippy::too_many_arguments)]
#![allow(clippy::type_complexity)]

//! # propcheck - deterministic property-based testing
//!
//! propcheck builds random test data from a small algebra of pure
//! generators driven by an explicit linear-congruential state, and checks
//! named properties against that data. The same seed always produces the
//! same inputs, so every failure can be replayed.
//!
//! ## Quick Start
//!
//! ```rust
//! use propcheck::{ForAll, choose_int, ensure, expect_success};
//!
//! let property = ForAll::identity("below the bound", choose_int(1, 501))
//!     .assert(|x| ensure(*x <= 500, "Number was too large"))
//!     .build();
//!
//! let result = property.check(200, 42).unwrap();
//! expect_success(&result);
//! ```
//!
//! ## Combining generators
//!
//! ```rust
//! use propcheck::{RandomState, choose_array, choose_int, map2, string};
//!
//! let pairs = map2(choose_int(0, 10), string(5), |n, s| format!("{}:{}", n, s));
//! let lists = choose_array(1, 4, pairs);
//!
//! let (values, _next) = lists.sample(RandomState::new(7));
//! assert!((1..=4).contains(&values.len()));
//! ```

// Public modules
pub mod assertion;
pub mod config;
pub mod error;
pub mod execution;
pub mod generator;
pub mod parallel;
#[cfg(feature = "persistence")]
pub mod persistence;
pub mod primitives;
pub mod property;
pub mod rng;
pub mod test_runner;

// Re-export the main public API
pub use assertion::{Assertion, Outcome, assertion, assertion_and, assertion_or, ensure};
pub use config::{GlobalConfig, RunParameters, SEED_ENV, TRIALS_ENV};
pub use error::{AssertionError, AssertionErrors, ConfigError, GeneratorError};
pub use execution::{ForAll, for_all};
pub use generator::{
    Generator, Zip, flat_map, map, map2, map3, map4, map8, map16, map32, map_n, product, pure,
    sequence, zip_n,
};
pub use parallel::{ParallelConfig, run_parallel};
#[cfg(feature = "persistence")]
pub use persistence::{FailureRecord, FailureSnapshot};
pub use primitives::*;
pub use property::{Falsified, Property, RunResult};
pub use rng::{LcgRng, RandomState, next_int};
pub use test_runner::{TestRunner, expect_failure, expect_success};
