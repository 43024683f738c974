//! Tests for the fixture descriptor: lazy resolution, caching, and the
//! explicit resolve/set/reset accessor protocol

use std::cell::Cell;
use std::rc::Rc;

use serde_json::json;

use testplus::error::TestPlusError;
use testplus::fixture::{ClassCache, Fixture, FixtureTemplate, ProduceFixture};
use testplus::scope::FixtureScope;

fn counting_fixture(name: &str, counter: &Rc<Cell<usize>>) -> Fixture {
    let counter = Rc::clone(counter);
    Fixture::new(name, move || {
        counter.set(counter.get() + 1);
        Ok(json!({"name": "Bruce", "age": 8}))
    })
}

#[test]
fn producer_runs_once_for_repeated_reads() {
    let counter = Rc::new(Cell::new(0));
    let mut fixture = counting_fixture("bruce", &counter);
    let cache = ClassCache::new();

    let first = fixture.resolve(&cache).unwrap();
    let second = fixture.resolve(&cache).unwrap();

    assert_eq!(counter.get(), 1);
    assert!(Rc::ptr_eq(&first, &second));
}

#[test]
fn reset_forces_a_fresh_resolution() {
    let counter = Rc::new(Cell::new(0));
    let mut fixture = counting_fixture("bruce", &counter);
    let cache = ClassCache::new();

    let before = fixture.resolve(&cache).unwrap();
    before.borrow_mut()["name"] = json!("lol");
    fixture.reset();
    assert!(!fixture.is_resolved());

    let after = fixture.resolve(&cache).unwrap();
    assert_eq!(counter.get(), 2);
    assert_eq!(after.borrow()["name"], json!("Bruce"));
}

#[test]
fn set_replaces_the_local_value_without_invoking_the_producer() {
    let counter = Rc::new(Cell::new(0));
    let mut fixture = counting_fixture("bruce", &counter);
    let cache = ClassCache::new();

    fixture.set(json!({"name": "Rex"}));
    let handle = fixture.resolve(&cache).unwrap();

    assert_eq!(counter.get(), 0);
    assert_eq!(handle.borrow()["name"], json!("Rex"));
}

#[test]
fn class_cache_is_consulted_on_every_read() {
    let counter = Rc::new(Cell::new(0));
    let mut fixture = counting_fixture("bruce", &counter).with_scope(FixtureScope::Class);

    let mut cache = ClassCache::new();
    let shared = Rc::new(std::cell::RefCell::new(json!({"name": "Cached"})));
    cache.insert("bruce".to_string(), Rc::clone(&shared));

    let handle = fixture.resolve(&cache).unwrap();
    assert!(Rc::ptr_eq(&handle, &shared));
    assert_eq!(counter.get(), 0);

    // A local replacement is invisible as long as the cache entry exists.
    fixture.set(json!({"name": "Local"}));
    let handle = fixture.resolve(&cache).unwrap();
    assert!(Rc::ptr_eq(&handle, &shared));
    assert_eq!(handle.borrow()["name"], json!("Cached"));
}

#[test]
fn producer_errors_propagate_to_the_resolving_caller() {
    let mut fixture = Fixture::new("broken", || {
        Err(TestPlusError::Producer {
            fixture: "broken".to_string(),
            message: "boom".to_string(),
        })
    });

    let err = fixture.resolve(&ClassCache::new()).unwrap_err();
    assert!(matches!(err, TestPlusError::Producer { .. }));
    assert!(!fixture.is_resolved());
}

#[test]
fn with_scope_str_rejects_unrecognized_scopes_at_construction() {
    let err = Fixture::new("bruce", || Ok(json!(1)))
        .with_scope_str("bogus")
        .unwrap_err();
    assert!(matches!(err, TestPlusError::InvalidScope(value) if value == "bogus"));

    let fixture = Fixture::new("bruce", || Ok(json!(1)))
        .with_scope_str("class")
        .unwrap();
    assert_eq!(fixture.scope(), FixtureScope::Class);
}

struct CharlieClassFixture;

impl ProduceFixture for CharlieClassFixture {
    fn scope(&self) -> FixtureScope {
        FixtureScope::Class
    }

    fn produce(&self) -> testplus::Result<serde_json::Value> {
        Ok(json!({"name": "Charlie", "age": 1}))
    }
}

struct CharlieFixture;

impl ProduceFixture for CharlieFixture {
    fn produce(&self) -> testplus::Result<serde_json::Value> {
        Ok(json!({"name": "Charlie", "age": 1}))
    }
}

#[test]
fn source_types_carry_their_declared_scope() {
    let class_scoped = Fixture::from_source("charlie_class", CharlieClassFixture);
    assert_eq!(class_scoped.scope(), FixtureScope::Class);

    // The trait default is func scope.
    let func_scoped = Fixture::from_source("charlie", CharlieFixture);
    assert_eq!(func_scoped.scope(), FixtureScope::Func);

    let mut fixture = class_scoped;
    let handle = fixture.resolve(&ClassCache::new()).unwrap();
    assert_eq!(handle.borrow()["name"], json!("Charlie"));
}

#[test]
fn template_binds_with_default_scope_and_per_binding_override() {
    let template = FixtureTemplate::new(|| Ok(json!({"name": "Penelope", "age": 10})))
        .with_default_scope(FixtureScope::Class);
    assert_eq!(template.default_scope(), FixtureScope::Class);

    let class_bound = template.bind("penelope_class");
    assert_eq!(class_bound.scope(), FixtureScope::Class);

    let func_bound = template.bind_with_scope("penelope_class_to_func", FixtureScope::Func);
    assert_eq!(func_bound.scope(), FixtureScope::Func);
}

#[test]
fn template_bindings_resolve_independently() {
    let counter = Rc::new(Cell::new(0));
    let template = {
        let counter = Rc::clone(&counter);
        FixtureTemplate::new(move || {
            counter.set(counter.get() + 1);
            Ok(json!({"name": "Penelope"}))
        })
    };

    let mut first = template.bind("penelope_a");
    let mut second = template.bind("penelope_b");
    let cache = ClassCache::new();

    first.resolve(&cache).unwrap();
    first.resolve(&cache).unwrap();
    second.resolve(&cache).unwrap();

    // One invocation per descriptor, not per template.
    assert_eq!(counter.get(), 2);
}
