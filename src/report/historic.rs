//! Historical changes: snapshots of the `greg` layers as of a calendar date.

use super::{PlannedStatement, Report, ReportKind};
use crate::executor::{DataSource, OutputTarget};
use crate::params::{
    ElementOutputs, HistoricDate, HistoricParams, HistoricViewParams, Manifest, ParamError,
    ParamType,
};
use crate::sql::catalog::{QUANTITIES_FUNCTION, QUANTITIES_VIEW, SCHEMA};
use crate::sql::{CreateView, FeatureKind, FunctionQuery, Statement};

fn date_params(manifest: Manifest) -> Manifest {
    manifest
        .declare("dummy", ParamType::Vector)
        .declare(HistoricDate::DAY, ParamType::String)
        .declare(HistoricDate::MONTH, ParamType::String)
        .declare(HistoricDate::YEAR, ParamType::String)
}

/// Manifest of [`HistoricChanges`].
pub fn manifest() -> Manifest {
    let outputs = ElementOutputs::with_prefix("Historik");
    date_params(Manifest::new().declare("Historik", ParamType::Name))
        .declare(outputs.flader, ParamType::OutputVector)
        .declare(outputs.linier, ParamType::OutputVector)
        .declare(outputs.punkter, ParamType::OutputVector)
}

/// Manifest of [`HistoricViews`].
pub fn view_manifest() -> Manifest {
    date_params(Manifest::new().declare("Historik_views", ParamType::Name))
        .declare("dummy_out", ParamType::OutputVector)
}

/// `SELECT * FROM greg.f_dato_<kind>($1, $2, $3)` bound as (day, month, year).
pub fn history_statement(kind: FeatureKind, date: HistoricDate) -> Statement {
    let query = FunctionQuery::new(kind.history_function())
        .schema(SCHEMA)
        .placeholders(3);
    date.args()
        .into_iter()
        .fold(Statement::new(query.to_sql()), Statement::bind)
}

/// `CREATE OR REPLACE VIEW greg.v_greg_<kind>_historik AS SELECT * FROM greg.f_dato_<kind>(D, M, Y)`
pub fn history_view(kind: FeatureKind, date: HistoricDate) -> CreateView {
    let query = FunctionQuery::new(kind.history_function())
        .schema(SCHEMA)
        .int_args(date.args());
    CreateView::new(kind.history_view(), query)
        .schema(SCHEMA)
        .or_replace()
}

/// `CREATE OR REPLACE VIEW greg.v_maengder_historik AS SELECT * FROM greg.f_maengder(D, M, Y)`
pub fn quantities_view(date: HistoricDate) -> CreateView {
    let query = FunctionQuery::new(QUANTITIES_FUNCTION)
        .schema(SCHEMA)
        .int_args(date.args());
    CreateView::new(QUANTITIES_VIEW, query)
        .schema(SCHEMA)
        .or_replace()
}

// =============================================================================
// Data variant
// =============================================================================

/// Polygons, lines and points as of a date, as three output datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricChanges {
    source: DataSource,
    date: HistoricDate,
    outputs: ElementOutputs,
}

impl HistoricChanges {
    pub fn new(params: HistoricParams) -> Result<Self, ParamError> {
        let date = params.validate()?;
        Ok(Self {
            source: params.source,
            date,
            outputs: params.outputs,
        })
    }

    pub fn date(&self) -> HistoricDate {
        self.date
    }
}

impl Report for HistoricChanges {
    fn kind(&self) -> ReportKind {
        ReportKind::HistoricChanges
    }

    fn source(&self) -> &DataSource {
        &self.source
    }

    fn plan(&self) -> Vec<PlannedStatement> {
        FeatureKind::ELEMENTS
            .into_iter()
            .filter_map(|kind| {
                let output = self.outputs.get(kind)?;
                Some(PlannedStatement::new(
                    kind.as_str(),
                    history_statement(kind, self.date),
                    OutputTarget::named(output),
                ))
            })
            .collect()
    }
}

// =============================================================================
// View variant
// =============================================================================

/// Replaces `greg.v_maengder_historik` and the four `greg.v_greg_*_historik` views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricViews {
    source: DataSource,
    date: HistoricDate,
}

impl HistoricViews {
    pub fn new(params: HistoricViewParams) -> Result<Self, ParamError> {
        let date = params.validate()?;
        Ok(Self {
            source: params.source,
            date,
        })
    }

    pub fn date(&self) -> HistoricDate {
        self.date
    }
}

impl Report for HistoricViews {
    fn kind(&self) -> ReportKind {
        ReportKind::HistoricViews
    }

    fn source(&self) -> &DataSource {
        &self.source
    }

    fn plan(&self) -> Vec<PlannedStatement> {
        let quantities = PlannedStatement::new(
            "maengder",
            quantities_view(self.date).to_statement(),
            OutputTarget::Placeholder,
        );

        std::iter::once(quantities)
            .chain(FeatureKind::ALL.into_iter().map(|kind| {
                PlannedStatement::new(
                    kind.as_str(),
                    history_view(kind, self.date).to_statement(),
                    OutputTarget::Placeholder,
                )
            }))
            .collect()
    }
}
