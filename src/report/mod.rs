//! The report generator.
//!
//! Four operations over the `greg` schema:
//!
//! | Kind | Parameters | Effect |
//! |---|---|---|
//! | `aendringer` | day count (number) | three output datasets from `f_tot_*` |
//! | `aendringer_specific` | day count (string) | replaces the four `v_aendring_*` views |
//! | `historik` | day, month, year | three output datasets from `f_dato_*` |
//! | `historik_views` | day, month, year | replaces `v_maengder_historik` and the four `v_greg_*_historik` views |
//!
//! A report only plans statements; [`ReportRunner`] hands them to a
//! [`SqlExecutor`] one at a time, in plan order, and stops at the first
//! failure. Nothing already executed is rolled back.

mod historic;
mod recent;

pub use historic::{HistoricChanges, HistoricViews};
pub use recent::{RecentChangeViews, RecentChanges};

pub mod statements {
    //! Statement constructors used by the reports.
    pub use super::historic::{history_statement, history_view, quantities_view};
    pub use super::recent::{changes_statement, changes_view};
}

use std::fmt;

use tracing::{debug, info, warn};

use crate::executor::{DataSource, ExecError, ExecMode, OutputDataset, OutputTarget, SqlExecutor};
use crate::params::{
    HistoricParams, HistoricViewParams, Manifest, ParamError, RecentChangesParams,
    RecentChangesViewParams,
};
use crate::sql::Statement;

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors raised while running a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("invalid parameters: {0}")]
    Params(#[from] ParamError),

    #[error("{report}: statement {index} ({step}) failed: {source}")]
    Statement {
        report: ReportKind,
        step: String,
        /// 1-based position in the plan.
        index: usize,
        #[source]
        source: ExecError,
    },
}

impl ReportError {
    /// The executor error, if a statement failed.
    pub fn exec_error(&self) -> Option<&ExecError> {
        match self {
            ReportError::Statement { source, .. } => Some(source),
            ReportError::Params(_) => None,
        }
    }
}

// =============================================================================
// Report kinds
// =============================================================================

/// The four report operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    /// Recent changes as output datasets.
    RecentChanges,
    /// Recent changes materialized as views.
    RecentChangeViews,
    /// Historical snapshot as output datasets.
    HistoricChanges,
    /// Historical snapshot and quantities materialized as views.
    HistoricViews,
}

impl ReportKind {
    pub const ALL: [ReportKind; 4] = [
        ReportKind::RecentChanges,
        ReportKind::RecentChangeViews,
        ReportKind::HistoricChanges,
        ReportKind::HistoricViews,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportKind::RecentChanges => "aendringer",
            ReportKind::RecentChangeViews => "aendringer_specific",
            ReportKind::HistoricChanges => "historik",
            ReportKind::HistoricViews => "historik_views",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s.trim()))
    }

    /// One-line description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            ReportKind::RecentChanges => "Features changed within the last N days",
            ReportKind::RecentChangeViews => "Replace the v_aendring_* views for the last N days",
            ReportKind::HistoricChanges => "Features as of a given date",
            ReportKind::HistoricViews => {
                "Replace v_maengder_historik and the v_greg_*_historik views for a given date"
            }
        }
    }

    /// Whether the report takes a day count (otherwise a date).
    pub fn takes_day_count(&self) -> bool {
        matches!(self, ReportKind::RecentChanges | ReportKind::RecentChangeViews)
    }

    /// Whether the report only creates views.
    pub fn creates_views(&self) -> bool {
        matches!(self, ReportKind::RecentChangeViews | ReportKind::HistoricViews)
    }

    pub fn manifest(&self) -> Manifest {
        match self {
            ReportKind::RecentChanges => recent::manifest(),
            ReportKind::RecentChangeViews => recent::view_manifest(),
            ReportKind::HistoricChanges => historic::manifest(),
            ReportKind::HistoricViews => historic::view_manifest(),
        }
    }

    /// Validate raw input and build the report.
    pub fn build(&self, input: &ReportInput) -> Result<Box<dyn Report>, ParamError> {
        let source = input.source.clone();
        let report: Box<dyn Report> = match self {
            ReportKind::RecentChanges => {
                let raw = input.require("Antal_dage", &input.days)?;
                let days = raw.trim().parse::<i64>().map_err(|_| ParamError::NotANumber {
                    name: "Antal_dage".to_string(),
                    value: raw.to_string(),
                })?;
                Box::new(RecentChanges::new(RecentChangesParams::new(source, days))?)
            }
            ReportKind::RecentChangeViews => {
                let raw = input.require("Antal_dage", &input.days)?;
                Box::new(RecentChangeViews::new(RecentChangesViewParams::new(
                    source, raw,
                ))?)
            }
            ReportKind::HistoricChanges => {
                let (day, month, year) = input.date_parts()?;
                Box::new(HistoricChanges::new(HistoricParams::new(
                    source, day, month, year,
                ))?)
            }
            ReportKind::HistoricViews => {
                let (day, month, year) = input.date_parts()?;
                Box::new(HistoricViews::new(HistoricViewParams::new(
                    source, day, month, year,
                ))?)
            }
        };
        Ok(report)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw, unvalidated input as supplied by a caller such as the CLI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportInput {
    pub source: DataSource,
    pub days: Option<String>,
    pub day: Option<String>,
    pub month: Option<String>,
    pub year: Option<String>,
}

impl ReportInput {
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            days: None,
            day: None,
            month: None,
            year: None,
        }
    }

    pub fn with_days(mut self, days: impl Into<String>) -> Self {
        self.days = Some(days.into());
        self
    }

    pub fn with_date(
        mut self,
        day: impl Into<String>,
        month: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        self.day = Some(day.into());
        self.month = Some(month.into());
        self.year = Some(year.into());
        self
    }

    fn require<'a>(&self, name: &str, value: &'a Option<String>) -> Result<&'a str, ParamError> {
        value
            .as_deref()
            .ok_or_else(|| ParamError::Missing(name.to_string()))
    }

    fn date_parts(&self) -> Result<(&str, &str, &str), ParamError> {
        Ok((
            self.require("Dag", &self.day)?,
            self.require("Maaned", &self.month)?,
            self.require("Aar", &self.year)?,
        ))
    }
}

// =============================================================================
// Planning and execution
// =============================================================================

/// One statement of a report plan and where its result goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedStatement {
    /// Short step name (`flader`, `maengder`, ...).
    pub step: String,
    pub statement: Statement,
    pub target: OutputTarget,
}

impl PlannedStatement {
    pub fn new(step: impl Into<String>, statement: Statement, target: OutputTarget) -> Self {
        Self {
            step: step.into(),
            statement,
            target,
        }
    }
}

/// A report operation with validated parameters.
pub trait Report: Send + Sync + fmt::Debug {
    fn kind(&self) -> ReportKind;

    /// The reference data source every statement runs against.
    fn source(&self) -> &DataSource;

    /// Statements in execution order. Pure: no I/O.
    fn plan(&self) -> Vec<PlannedStatement>;

    fn manifest(&self) -> Manifest {
        self.kind().manifest()
    }
}

/// Runs reports through an executor.
#[derive(Debug)]
pub struct ReportRunner<E> {
    executor: E,
    mode: ExecMode,
}

impl<E: SqlExecutor> ReportRunner<E> {
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            mode: ExecMode::Native,
        }
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Execute every planned statement in order.
    ///
    /// Returns one output per statement. The first failure aborts the run.
    pub async fn run(&self, report: &dyn Report) -> ReportResult<Vec<OutputDataset>> {
        let kind = report.kind();
        let source = report.source();
        let plan = report.plan();
        info!(report = %kind, source = %source, statements = plan.len(), "running report");

        let mut outputs = Vec::with_capacity(plan.len());
        for (i, planned) in plan.into_iter().enumerate() {
            debug!(
                report = %kind,
                step = %planned.step,
                target = %planned.target,
                sql = %planned.statement,
                "executing statement"
            );

            let output = self
                .executor
                .execute(source, &planned.statement, self.mode, &planned.target)
                .await
                .map_err(|err| {
                    warn!(report = %kind, step = %planned.step, error = %err, "statement failed");
                    ReportError::Statement {
                        report: kind,
                        step: planned.step.clone(),
                        index: i + 1,
                        source: err,
                    }
                })?;
            outputs.push(output);
        }

        info!(report = %kind, outputs = outputs.len(), "report finished");
        Ok(outputs)
    }
}
