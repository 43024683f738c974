//! Tests for the bare-function test-case adapter

use std::cell::Cell;
use std::rc::Rc;

use testplus::case::FnTestCase;

#[test]
fn unmarked_names_gain_the_test_prefix() {
    let case = FnTestCase::new("dog_age", |_| Ok(()));
    assert_eq!(case.method_name(), "test_dog_age");
    assert_eq!(case.case_name(), "TestCase__dog_age");
}

#[test]
fn names_already_starting_with_the_marker_are_kept() {
    let case = FnTestCase::new("test_dog_age", |_| Ok(()));
    assert_eq!(case.method_name(), "test_dog_age");
}

#[test]
fn names_ending_with_the_marker_are_kept() {
    let case = FnTestCase::new("dog_age_test", |_| Ok(()));
    assert_eq!(case.method_name(), "dog_age_test");
}

#[test]
fn run_invokes_the_function_with_the_case_instance() {
    let calls = Rc::new(Cell::new(0));
    let case = {
        let calls = Rc::clone(&calls);
        FnTestCase::new("dog_age", move |instance| {
            calls.set(calls.get() + 1);
            assert_eq!(instance.method_name(), "test_dog_age");
            Ok(())
        })
    };

    case.run().unwrap();
    assert_eq!(calls.get(), 1);

    case.run().unwrap();
    assert_eq!(calls.get(), 2);
}

#[test]
fn body_failures_propagate_from_run() {
    let case = FnTestCase::new("dog_age", |_| {
        Err(testplus::TestPlusError::Failure("too young".to_string()))
    });
    assert!(case.run().is_err());
}
