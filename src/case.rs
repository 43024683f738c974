//! Bare-function test-case adapter.
//!
//! [`FnTestCase`] turns a free function into a minimal test case exposing
//! exactly one test method that invokes the function with the case
//! instance. Purely cosmetic sugar; no fixture or parametrization behavior.

use std::rc::Rc;

use crate::error::Result;

/// Conventional marker token in test method names.
const TEST_MARKER: &str = "test";

/// Minimal single-method test case synthesized from a free function.
pub struct FnTestCase {
    case_name: String,
    method_name: String,
    body: Rc<dyn Fn(&FnTestCase) -> Result<()>>,
}

impl FnTestCase {
    /// Wrap `body` as the only test method of a synthesized case.
    ///
    /// The method keeps `name` when it already starts or ends with the
    /// `test` marker and is prefixed with `test_` otherwise.
    pub fn new(name: &str, body: impl Fn(&FnTestCase) -> Result<()> + 'static) -> Self {
        Self {
            case_name: format!("TestCase__{name}"),
            method_name: method_name_for(name),
            body: Rc::new(body),
        }
    }

    /// Name of the synthesized case.
    pub fn case_name(&self) -> &str {
        &self.case_name
    }

    /// Name of the single test method.
    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    /// Invoke the wrapped function with this case instance.
    pub fn run(&self) -> Result<()> {
        (self.body)(self)
    }
}

impl std::fmt::Debug for FnTestCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnTestCase")
            .field("case_name", &self.case_name)
            .field("method_name", &self.method_name)
            .finish()
    }
}

fn method_name_for(name: &str) -> String {
    if name.starts_with(TEST_MARKER) || name.ends_with(TEST_MARKER) {
        name.to_string()
    } else {
        format!("test_{name}")
    }
}
