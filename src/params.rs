//! Parametrized test dispatch.
//!
//! [`Parametrized`] wraps a test body and fans one invocation out over an
//! ordered list of [`Binding`]s, executing the body once per binding under
//! its own sub-test record. Bindings run in declaration order and every
//! binding runs, even when an earlier one fails.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::subtest::{ParamMap, SubTestSink, run_sub_test};

/// One parametrization input: a display label (possibly empty) plus a
/// mapping from parameter name to value, consumed by a single iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    label: String,
    params: ParamMap,
}

impl Binding {
    /// A bare parameter mapping with no display label.
    pub fn new(params: ParamMap) -> Self {
        Self {
            label: String::new(),
            params,
        }
    }

    /// A labeled parameter mapping.
    pub fn labeled(label: impl Into<String>, params: ParamMap) -> Self {
        Self {
            label: label.into(),
            params,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn params(&self) -> &ParamMap {
        &self.params
    }
}

impl From<ParamMap> for Binding {
    fn from(params: ParamMap) -> Self {
        Binding::new(params)
    }
}

impl From<(&str, ParamMap)> for Binding {
    fn from((label, params): (&str, ParamMap)) -> Self {
        Binding::labeled(label, params)
    }
}

impl From<(String, ParamMap)> for Binding {
    fn from((label, params): (String, ParamMap)) -> Self {
        Binding::labeled(label, params)
    }
}

/// Counts for one parametrized dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Bindings executed; always the full binding count.
    pub executed: usize,
    /// Bindings whose body returned `Err` or panicked.
    pub failed: usize,
}

/// Dispatcher expanding one test body into per-binding sub-tests.
#[derive(Debug, Clone, Default)]
pub struct Parametrized {
    bindings: Vec<Binding>,
}

impl Parametrized {
    pub fn new<B: Into<Binding>>(bindings: impl IntoIterator<Item = B>) -> Self {
        Self {
            bindings: bindings.into_iter().map(Into::into).collect(),
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Invoke `body` once per binding, in declaration order, each iteration
    /// under its own sub-test record in `sink`.
    ///
    /// `extra` carries externally supplied arguments for the wrapped call;
    /// the binding's parameters win any key collision. A failing binding is
    /// recorded and dispatch continues through the remaining bindings, so
    /// the summary always covers the whole list.
    pub fn run_all<C, F>(
        &self,
        case: &mut C,
        extra: &ParamMap,
        sink: &mut dyn SubTestSink,
        mut body: F,
    ) -> RunSummary
    where
        F: FnMut(&mut C, &ParamMap) -> Result<()>,
    {
        let mut summary = RunSummary::default();
        for binding in &self.bindings {
            let mut call_params = extra.clone();
            for (key, value) in binding.params() {
                call_params.insert(key.clone(), value.clone());
            }

            let outcome = run_sub_test(sink, binding.label(), &call_params, || {
                body(case, &call_params)
            });

            summary.executed += 1;
            if outcome.is_failure() {
                summary.failed += 1;
            }
        }

        tracing::debug!(
            executed = summary.executed,
            failed = summary.failed,
            "Parametrized dispatch complete"
        );
        summary
    }
}
