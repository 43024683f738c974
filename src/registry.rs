//! Per-suite fixture registry and class-scope cache.
//!
//! The registry is built once per suite run from a declarative list of
//! descriptors (no reflection over suite members) and owns the class-scope
//! cache. Cache population and invalidation happen through the lifecycle
//! hooks in [`crate::lifecycle`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::{Result, TestPlusError};
use crate::fixture::{ClassCache, Fixture, FixtureHandle};
use crate::scope::FixtureScope;

/// Registry of the fixtures declared by one test suite.
#[derive(Debug, Default)]
pub struct FixtureRegistry {
    fixtures: HashMap<String, Fixture>,
    class_cache: ClassCache,
}

impl FixtureRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            fixtures: HashMap::new(),
            class_cache: ClassCache::new(),
        }
    }

    /// Build a registry from the suite's declared descriptors.
    pub fn from_declarations(declarations: impl IntoIterator<Item = Fixture>) -> Result<Self> {
        let mut registry = Self::new();
        for fixture in declarations {
            registry.register(fixture)?;
        }
        Ok(registry)
    }

    /// Register one descriptor under its bound name.
    ///
    /// Duplicate names are rejected rather than silently replaced.
    pub fn register(&mut self, fixture: Fixture) -> Result<()> {
        let name = fixture.name().to_string();
        if self.fixtures.contains_key(&name) {
            return Err(TestPlusError::DuplicateFixture(name));
        }

        tracing::info!(
            fixture = name.as_str(),
            scope = fixture.scope().as_str(),
            "Registered fixture"
        );
        self.fixtures.insert(name, fixture);
        Ok(())
    }

    /// Resolve a fixture for one read access, honoring the class-scope
    /// cache first.
    pub fn fixture(&mut self, name: &str) -> Result<FixtureHandle> {
        let Some(fixture) = self.fixtures.get_mut(name) else {
            return Err(TestPlusError::UnknownFixture(name.to_string()));
        };
        fixture.resolve(&self.class_cache)
    }

    /// Replace a fixture's locally remembered value.
    ///
    /// The write never reaches the class-scope cache; see [`Fixture::set`].
    pub fn set_fixture(&mut self, name: &str, value: serde_json::Value) -> Result<()> {
        let Some(fixture) = self.fixtures.get_mut(name) else {
            return Err(TestPlusError::UnknownFixture(name.to_string()));
        };
        fixture.set(value);
        Ok(())
    }

    /// Descriptors with the given scope.
    pub fn scoped(&self, scope: FixtureScope) -> impl Iterator<Item = &Fixture> {
        self.fixtures.values().filter(move |f| f.scope() == scope)
    }

    pub(crate) fn scoped_mut(&mut self, scope: FixtureScope) -> impl Iterator<Item = &mut Fixture> {
        self.fixtures.values_mut().filter(move |f| f.scope() == scope)
    }

    /// The class-scope cache (for inspection).
    pub fn class_cache(&self) -> &ClassCache {
        &self.class_cache
    }

    /// Eagerly resolve every class-scoped descriptor into the class cache.
    ///
    /// Producer errors propagate; a failure here is fatal for the suite run.
    pub(crate) fn populate_class_cache(&mut self) -> Result<()> {
        for fixture in self
            .fixtures
            .values()
            .filter(|f| f.scope() == FixtureScope::Class)
        {
            let value = fixture.produce()?;
            tracing::debug!(fixture = fixture.name(), "Cached class-scoped fixture");
            self.class_cache
                .insert(fixture.name().to_string(), Rc::new(RefCell::new(value)));
        }
        Ok(())
    }

    pub(crate) fn reset_scoped(&mut self, scope: FixtureScope) {
        for fixture in self.scoped_mut(scope) {
            fixture.reset();
        }
    }

    pub(crate) fn clear_class_cache(&mut self) {
        tracing::debug!(entries = self.class_cache.len(), "Cleared class-scope cache");
        self.class_cache.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fixtures.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fixtures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fixtures.is_empty()
    }
}
