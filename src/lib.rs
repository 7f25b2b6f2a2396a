//! # greg-reports
//!
//! Change and history reports over the `greg` PostGIS schema.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │         Raw input (CLI arguments, ReportInput)           │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [params: validate]
//! ┌─────────────────────────────────────────────────────────┐
//! │        Report (DayCount / HistoricDate + source)         │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [plan: pure]
//! ┌─────────────────────────────────────────────────────────┐
//! │   PlannedStatement* (Statement + bound params, target)   │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [ReportRunner → SqlExecutor]
//! ┌─────────────────────────────────────────────────────────┐
//! │     OutputDataset* (GeoJSON features) / greg views       │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use greg_reports::prelude::*;
//!
//! let report = RecentChanges::new(RecentChangesParams::new(DataSource::new("default"), 30))?;
//! let runner = ReportRunner::new(PgExecutor::from_settings(&Settings::load()?)?);
//! let outputs = runner.run(&report).await?;
//! ```

pub mod config;
pub mod executor;
pub mod output;
pub mod params;
pub mod report;
pub mod sql;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::config::{ConnectionConfig, Settings};
    pub use crate::executor::{
        DataSource, ExecError, ExecMode, OutputDataset, OutputTarget, PgExecutor,
        RecordingExecutor, SqlExecutor,
    };
    pub use crate::params::{
        DayCount, HistoricDate, HistoricParams, HistoricViewParams, Manifest, ParamError,
        RecentChangesParams, RecentChangesViewParams,
    };
    pub use crate::report::{
        HistoricChanges, HistoricViews, RecentChangeViews, RecentChanges, Report, ReportError,
        ReportInput, ReportKind, ReportRunner,
    };
    pub use crate::sql::{FeatureKind, Statement};
}

pub use executor::{DataSource, SqlExecutor};
pub use report::{Report, ReportKind, ReportRunner};
pub use sql::Statement;
