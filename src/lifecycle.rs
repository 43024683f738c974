//! Suite lifecycle hook contract.
//!
//! An external, strictly sequential test runner drives these hooks around a
//! suite run: `set_up_class` once before the first test, `tear_down_test`
//! after every test, `tear_down_class` once after the last test. A hook
//! failure is fatal for that suite's run.

use crate::error::Result;
use crate::registry::FixtureRegistry;
use crate::scope::FixtureScope;

/// Zero-argument lifecycle hooks invoked by the test runner.
pub trait SuiteLifecycle {
    /// Runs once before any test method of the suite executes.
    fn set_up_class(&mut self) -> Result<()>;

    /// Runs after every test method.
    fn tear_down_test(&mut self) -> Result<()>;

    /// Runs once after the last test method of the suite.
    fn tear_down_class(&mut self) -> Result<()>;
}

impl SuiteLifecycle for FixtureRegistry {
    /// Pre-resolves every class-scoped descriptor into the class cache so
    /// all tests of the run share one handle per fixture.
    fn set_up_class(&mut self) -> Result<()> {
        tracing::debug!("Suite setup: populating class-scope cache");
        self.populate_class_cache()
    }

    /// Resets func-scoped descriptors so the next test resolves fresh
    /// values. Class-scoped state is untouched mid-run.
    fn tear_down_test(&mut self) -> Result<()> {
        self.reset_scoped(FixtureScope::Func);
        Ok(())
    }

    /// Resets class-scoped descriptors and empties the class cache; a later
    /// independent run of the suite re-invokes every producer.
    fn tear_down_class(&mut self) -> Result<()> {
        self.reset_scoped(FixtureScope::Class);
        self.clear_class_cache();
        Ok(())
    }
}
