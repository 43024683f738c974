//! Fixture reuse scopes.
//!
//! A scope names the lifetime window over which one resolved fixture value
//! is shared: `func` covers a single test method, `class` covers every test
//! method of one suite run.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::TestPlusError;

/// Reuse scope declared on a fixture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FixtureScope {
    /// Recomputed fresh for every test method.
    #[default]
    Func,

    /// Computed once per suite run and shared by all of its test methods.
    Class,
}

impl FixtureScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixtureScope::Func => "func",
            FixtureScope::Class => "class",
        }
    }

    /// Parse a scope from its string form.
    ///
    /// Unrecognized values fail with [`TestPlusError::InvalidScope`]; a bad
    /// scope never silently falls back to the default.
    pub fn parse(value: &str) -> Result<Self, TestPlusError> {
        match value {
            "func" => Ok(FixtureScope::Func),
            "class" => Ok(FixtureScope::Class),
            other => Err(TestPlusError::InvalidScope(other.to_string())),
        }
    }
}

impl fmt::Display for FixtureScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FixtureScope {
    type Err = TestPlusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FixtureScope::parse(s)
    }
}
