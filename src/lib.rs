//! Scoped test fixtures and parametrized sub-tests.
//!
//! This crate is a small extension layer over a sequential test runner: it
//! adds lazily-computed fixtures cached per declared scope (`func` or
//! `class`) with automatic invalidation between tests and suite runs, and a
//! parametrization dispatcher that expands one test body into independently
//! reported sub-tests, one per input binding.

pub mod case;
pub mod error;
pub mod fixture;
pub mod lifecycle;
pub mod params;
pub mod registry;
pub mod scope;
pub mod subtest;
pub mod tracing_setup;

pub use case::FnTestCase;
pub use error::{Result, TestPlusError};
pub use fixture::{Fixture, FixtureHandle, FixtureTemplate, ProduceFixture};
pub use lifecycle::SuiteLifecycle;
pub use params::{Binding, Parametrized, RunSummary};
pub use registry::FixtureRegistry;
pub use scope::FixtureScope;
pub use subtest::{
    ParamMap, RecordingSink, SubTestOutcome, SubTestRecord, SubTestSink, run_sub_test,
};
