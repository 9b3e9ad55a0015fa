//! Test utilities
//!
//! Manual mock implementations and test fixtures for unit testing.
//!
//! Why manual mocks instead of a mocking framework?
//! - The port traits take `&str` parameters, which generated mocks handle poorly
//! - Manual mocks are more explicit and easier to debug
//! - We control exactly what they return without macro magic
//!
//! `ScriptedTransport`, `RoutedTransport` and `ManualClock` sit below the real
//! `GitHubFetcher`, so pipeline tests exercise retry and pagination logic
//! without network access or real sleeps.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
