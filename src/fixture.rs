//! Fixture descriptors: lazily-computed, scope-aware test values.
//!
//! A [`Fixture`] owns a producer callable and a declared [`FixtureScope`],
//! and resolves the producer at most once per scope window. Resolution,
//! replacement, and invalidation are explicit operations (`resolve` /
//! `set` / `reset`) rather than implicit attribute interception; the
//! lifecycle controller calls `reset` at the scope boundaries.
//!
//! Two authoring styles yield a descriptor:
//! - implement [`ProduceFixture`] on a type and use [`Fixture::from_source`]
//! - build a reusable [`FixtureTemplate`] around a free producer function
//!   and `bind` it under one or more names

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;

use crate::error::Result;
use crate::scope::FixtureScope;

/// Shared handle to one resolved fixture value.
///
/// Every test that resolves a fixture inside the same scope window receives
/// a clone of the same handle, so in-place mutation through it is visible to
/// later tests of that window.
pub type FixtureHandle = Rc<RefCell<Value>>;

/// Producer callable stored by a descriptor. Single-threaded by contract.
pub type Producer = Rc<dyn Fn() -> Result<Value>>;

/// Class-scope cache: bound name to the handle shared by the whole suite run.
pub type ClassCache = HashMap<String, FixtureHandle>;

/// Base "producer with configurable scope" abstraction.
///
/// Implement this on a type to author a fixture as a unit: override
/// `scope()` to change the default reuse window.
///
/// # Example
/// ```rust
/// use serde_json::json;
/// use testplus::fixture::{Fixture, ProduceFixture};
/// use testplus::scope::FixtureScope;
///
/// struct CharlieFixture;
///
/// impl ProduceFixture for CharlieFixture {
///     fn scope(&self) -> FixtureScope {
///         FixtureScope::Class
///     }
///
///     fn produce(&self) -> testplus::Result<serde_json::Value> {
///         Ok(json!({"name": "Charlie", "age": 1}))
///     }
/// }
///
/// let fixture = Fixture::from_source("charlie", CharlieFixture);
/// assert_eq!(fixture.scope(), FixtureScope::Class);
/// ```
pub trait ProduceFixture {
    /// Reuse scope for descriptors built from this source.
    fn scope(&self) -> FixtureScope {
        FixtureScope::Func
    }

    /// Compute the fixture value.
    fn produce(&self) -> Result<Value>;
}

/// One lazily-computed, scope-aware fixture value.
pub struct Fixture {
    name: String,
    scope: FixtureScope,
    producer: Producer,
    cell: Option<FixtureHandle>,
}

impl Fixture {
    /// Create a descriptor bound to `name` with the default `func` scope.
    pub fn new(name: impl Into<String>, producer: impl Fn() -> Result<Value> + 'static) -> Self {
        Self {
            name: name.into(),
            scope: FixtureScope::default(),
            producer: Rc::new(producer),
            cell: None,
        }
    }

    /// Create a descriptor from a [`ProduceFixture`] implementation,
    /// adopting the source's declared scope.
    pub fn from_source(name: impl Into<String>, source: impl ProduceFixture + 'static) -> Self {
        let scope = source.scope();
        let source = Rc::new(source);
        Self {
            name: name.into(),
            scope,
            producer: Rc::new(move || source.produce()),
            cell: None,
        }
    }

    /// Override the declared scope.
    pub fn with_scope(mut self, scope: FixtureScope) -> Self {
        self.scope = scope;
        self
    }

    /// Override the declared scope from its string form.
    ///
    /// Fails with `TestPlusError::InvalidScope` before a descriptor with an
    /// unrecognized scope can exist.
    pub fn with_scope_str(self, scope: &str) -> Result<Self> {
        Ok(self.with_scope(FixtureScope::parse(scope)?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scope(&self) -> FixtureScope {
        self.scope
    }

    /// Whether a resolved value is currently remembered locally.
    pub fn is_resolved(&self) -> bool {
        self.cell.is_some()
    }

    /// Invoke the producer directly, bypassing the caches.
    ///
    /// Used by the lifecycle controller to eagerly populate the class-scope
    /// cache; producer errors propagate unchanged.
    pub fn produce(&self) -> Result<Value> {
        (self.producer)()
    }

    /// Resolve the fixture value for one read access.
    ///
    /// The class-scope cache is the source of truth and is consulted on
    /// every read, so all tests of a suite run observe the same class-scoped
    /// handle. Func-scoped names never appear in the cache. Absent a cache
    /// entry, the first read invokes the producer once and later reads
    /// return the remembered handle.
    pub fn resolve(&mut self, class_cache: &ClassCache) -> Result<FixtureHandle> {
        if let Some(shared) = class_cache.get(&self.name) {
            let handle = Rc::clone(shared);
            self.cell = Some(Rc::clone(&handle));
            return Ok(handle);
        }

        if let Some(cell) = &self.cell {
            return Ok(Rc::clone(cell));
        }

        let value = (self.producer)()?;
        tracing::debug!(
            fixture = self.name.as_str(),
            scope = self.scope.as_str(),
            "Produced fixture value"
        );
        let handle: FixtureHandle = Rc::new(RefCell::new(value));
        self.cell = Some(Rc::clone(&handle));
        Ok(handle)
    }

    /// Replace the locally remembered value.
    ///
    /// Writes never propagate back into the class-scope cache: for a
    /// class-scoped descriptor the next `resolve` re-reads the cache and the
    /// replacement is discarded.
    pub fn set(&mut self, value: Value) {
        self.cell = Some(Rc::new(RefCell::new(value)));
    }

    /// Clear the locally remembered value so the next read re-resolves.
    pub fn reset(&mut self) {
        tracing::debug!(
            fixture = self.name.as_str(),
            scope = self.scope.as_str(),
            "Reset fixture"
        );
        self.cell = None;
    }
}

/// Reusable producer with a default scope, instantiated into descriptors.
///
/// This is the free-function authoring style: wrap the producer once, then
/// bind it under any number of names, optionally overriding the scope per
/// binding.
#[derive(Clone)]
pub struct FixtureTemplate {
    default_scope: FixtureScope,
    producer: Producer,
}

impl FixtureTemplate {
    /// Wrap a producer with the default `func` scope.
    pub fn new(producer: impl Fn() -> Result<Value> + 'static) -> Self {
        Self {
            default_scope: FixtureScope::default(),
            producer: Rc::new(producer),
        }
    }

    /// Change the scope used by `bind`.
    pub fn with_default_scope(mut self, scope: FixtureScope) -> Self {
        self.default_scope = scope;
        self
    }

    pub fn default_scope(&self) -> FixtureScope {
        self.default_scope
    }

    /// Instantiate a descriptor under `name` with the template's scope.
    pub fn bind(&self, name: impl Into<String>) -> Fixture {
        self.bind_with_scope(name, self.default_scope)
    }

    /// Instantiate a descriptor under `name`, overriding the scope.
    pub fn bind_with_scope(&self, name: impl Into<String>, scope: FixtureScope) -> Fixture {
        Fixture {
            name: name.into(),
            scope,
            producer: Rc::clone(&self.producer),
            cell: None,
        }
    }
}

impl std::fmt::Debug for Fixture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fixture")
            .field("name", &self.name)
            .field("scope", &self.scope)
            .field("resolved", &self.cell.is_some())
            .finish()
    }
}
