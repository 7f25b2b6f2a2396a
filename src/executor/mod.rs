//! Statement execution.
//!
//! Reports never talk to the database directly. They hand each statement
//! to an injected [`SqlExecutor`], which runs it against a [`DataSource`]
//! and either captures the rows as a named [`OutputDataset`] or discards
//! them ([`OutputTarget::Placeholder`], used for DDL).
//!
//! # Implementations
//!
//! - [`PgExecutor`] - PostgreSQL/PostGIS via a `sqlx` pool per data source
//! - [`RecordingExecutor`] - records every call without touching a database

mod error;
mod postgres;
mod recording;

pub use error::{ExecError, ExecResult};
pub use postgres::PgExecutor;
pub use recording::{RecordedCall, RecordingExecutor};

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::sql::Statement;

/// Reference to the data source statements run against.
///
/// The name selects a configured connection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataSource {
    name: String,
}

impl DataSource {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// SQL mode flag of the execute capability.
///
/// The numeric codes match the toolbox's dialect flag; the reports always
/// use [`ExecMode::Native`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExecMode {
    /// SQL passed through to the database unchanged.
    #[default]
    Native,
    /// OGR SQL dialect.
    OgrSql,
    /// SQLite dialect.
    Sqlite,
}

impl ExecMode {
    pub fn code(&self) -> u8 {
        match self {
            ExecMode::Native => 0,
            ExecMode::OgrSql => 1,
            ExecMode::Sqlite => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(ExecMode::Native),
            1 => Some(ExecMode::OgrSql),
            2 => Some(ExecMode::Sqlite),
            _ => None,
        }
    }
}

impl fmt::Display for ExecMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExecMode::Native => "native",
            ExecMode::OgrSql => "ogrsql",
            ExecMode::Sqlite => "sqlite",
        };
        write!(f, "{} ({})", name, self.code())
    }
}

/// Where the result of a statement goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Capture the rows as a named output dataset.
    Named(String),
    /// Scratch output for statements run for their side effect.
    Placeholder,
}

impl OutputTarget {
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(name.into())
    }

    pub fn name(&self) -> Option<&str> {
        match self {
            OutputTarget::Named(name) => Some(name),
            OutputTarget::Placeholder => None,
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Named(name) => f.write_str(name),
            OutputTarget::Placeholder => f.write_str("<placeholder>"),
        }
    }
}

/// Result of one executed statement.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OutputDataset {
    /// Output slot name; `None` for placeholder results.
    pub name: Option<String>,
    /// GeoJSON features, one per result row.
    pub features: Vec<serde_json::Value>,
    /// Rows affected, for statements without a result set.
    pub rows_affected: u64,
}

impl OutputDataset {
    /// An empty result for `target`.
    pub fn empty(target: &OutputTarget) -> Self {
        Self {
            name: target.name().map(str::to_string),
            ..Default::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.name.is_none()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// The "execute SQL against a data source" capability.
#[async_trait]
pub trait SqlExecutor: Send + Sync {
    /// Execute one statement and return its output.
    async fn execute(
        &self,
        source: &DataSource,
        statement: &Statement,
        mode: ExecMode,
        target: &OutputTarget,
    ) -> ExecResult<OutputDataset>;
}

#[async_trait]
impl<T: SqlExecutor + ?Sized> SqlExecutor for &T {
    async fn execute(
        &self,
        source: &DataSource,
        statement: &Statement,
        mode: ExecMode,
        target: &OutputTarget,
    ) -> ExecResult<OutputDataset> {
        (**self).execute(source, statement, mode, target).await
    }
}
