//! Sub-test reporting primitive.
//!
//! [`run_sub_test`] opens an isolated, independently labeled reporting
//! context for one parametrized iteration: the body runs to completion, and
//! an `Err` return or a panic is recorded against that sub-test's label and
//! parameter map without terminating the parent test method.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Parameter mapping attached to one sub-test for diagnostic display.
pub type ParamMap = Map<String, Value>;

/// Outcome of one sub-test execution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubTestOutcome {
    Passed,
    Failed { message: String },
}

impl SubTestOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, SubTestOutcome::Failed { .. })
    }
}

/// One recorded sub-test result: label, parameters, outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubTestRecord {
    pub label: String,
    pub params: ParamMap,
    pub outcome: SubTestOutcome,
}

/// Receiver for sub-test records.
///
/// The external runner supplies its own sink to route records into its
/// failure channel; [`RecordingSink`] collects them in memory.
pub trait SubTestSink {
    fn record(&mut self, record: SubTestRecord);
}

/// In-memory sink collecting every record in execution order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    records: Vec<SubTestRecord>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[SubTestRecord] {
        &self.records
    }

    pub fn labels(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.label.as_str()).collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &SubTestRecord> {
        self.records.iter().filter(|r| r.outcome.is_failure())
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SubTestSink for RecordingSink {
    fn record(&mut self, record: SubTestRecord) {
        self.records.push(record);
    }
}

/// Run one body under an isolated, labeled sub-test context.
///
/// Both an `Err` return and a panic become a `Failed` outcome carrying the
/// failure text; either way the record lands in the sink and control
/// returns to the caller, which is what keeps one binding's failure from
/// hiding the bindings after it.
pub fn run_sub_test<F>(
    sink: &mut dyn SubTestSink,
    label: &str,
    params: &ParamMap,
    body: F,
) -> SubTestOutcome
where
    F: FnOnce() -> Result<()>,
{
    let outcome = match catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(())) => SubTestOutcome::Passed,
        Ok(Err(err)) => SubTestOutcome::Failed {
            message: err.to_string(),
        },
        Err(payload) => SubTestOutcome::Failed {
            message: panic_message(payload.as_ref()),
        },
    };

    if let SubTestOutcome::Failed { message } = &outcome {
        let params_display = Value::Object(params.clone());
        tracing::warn!(
            label = label,
            params = %params_display,
            error = message.as_str(),
            "Sub-test failed"
        );
    }

    sink.record(SubTestRecord {
        label: label.to_string(),
        params: params.clone(),
        outcome: outcome.clone(),
    });
    outcome
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
