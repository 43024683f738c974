//! Tests for fixture scope parsing and validation

use testplus::error::TestPlusError;
use testplus::scope::FixtureScope;

#[test]
fn parses_both_recognized_scopes() {
    assert_eq!(FixtureScope::parse("func").unwrap(), FixtureScope::Func);
    assert_eq!(FixtureScope::parse("class").unwrap(), FixtureScope::Class);
}

#[test]
fn from_str_matches_parse() {
    let scope: FixtureScope = "class".parse().unwrap();
    assert_eq!(scope, FixtureScope::Class);
}

#[test]
fn bogus_scope_fails_and_never_defaults() {
    let err = FixtureScope::parse("bogus").unwrap_err();
    match err {
        TestPlusError::InvalidScope(value) => assert_eq!(value, "bogus"),
        other => panic!("expected InvalidScope, got {other:?}"),
    }
}

#[test]
fn empty_scope_string_is_rejected() {
    assert!(matches!(
        FixtureScope::parse(""),
        Err(TestPlusError::InvalidScope(_))
    ));
}

#[test]
fn default_scope_is_func() {
    assert_eq!(FixtureScope::default(), FixtureScope::Func);
}

#[test]
fn display_round_trips_through_parse() {
    for scope in [FixtureScope::Func, FixtureScope::Class] {
        assert_eq!(FixtureScope::parse(&scope.to_string()).unwrap(), scope);
    }
}

#[test]
fn serializes_to_lowercase_strings() {
    assert_eq!(
        serde_json::to_value(FixtureScope::Class).unwrap(),
        serde_json::json!("class")
    );
    assert_eq!(
        serde_json::to_value(FixtureScope::Func).unwrap(),
        serde_json::json!("func")
    );
}
