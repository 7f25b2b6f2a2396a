//! Executor that records statements instead of running them.
//!
//! Backs `--dry-run` and lets tests assert on the exact SQL and call order
//! of a report.

use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use super::{DataSource, ExecError, ExecMode, ExecResult, OutputDataset, OutputTarget, SqlExecutor};
use crate::sql::Statement;

/// One recorded `execute` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    pub source: DataSource,
    pub statement: Statement,
    pub mode: ExecMode,
    pub target: OutputTarget,
}

impl RecordedCall {
    /// The statement with bound values inlined.
    pub fn literal_sql(&self) -> String {
        self.statement.to_literal_sql()
    }
}

/// Records every call and returns empty outputs.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<RecordedCall>>,
    fail_at: Option<usize>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject the call with the given zero-based index with a remote error.
    pub fn failing_at(index: usize) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            fail_at: Some(index),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Calls recorded so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock().clone()
    }

    /// Literal SQL of every recorded call, in order.
    pub fn literal_sql(&self) -> Vec<String> {
        self.lock().iter().map(RecordedCall::literal_sql).collect()
    }
}

#[async_trait]
impl SqlExecutor for RecordingExecutor {
    async fn execute(
        &self,
        source: &DataSource,
        statement: &Statement,
        mode: ExecMode,
        target: &OutputTarget,
    ) -> ExecResult<OutputDataset> {
        let mut calls = self.lock();
        let index = calls.len();
        calls.push(RecordedCall {
            source: source.clone(),
            statement: statement.clone(),
            mode,
            target: target.clone(),
        });

        if self.fail_at == Some(index) {
            return Err(ExecError::remote(
                "XX000",
                format!("statement {} rejected", index + 1),
            ));
        }

        Ok(OutputDataset::empty(target))
    }
}
