//! Recent changes: features changed within a trailing window of days.

use super::{PlannedStatement, Report, ReportKind};
use crate::executor::{DataSource, OutputTarget};
use crate::params::{
    DayCount, ElementOutputs, Manifest, ParamError, ParamType, RecentChangesParams,
    RecentChangesViewParams,
};
use crate::sql::catalog::{
    CHANGE_COLUMNS, GEOMETRY_COLUMN, ID_COLUMN, SCHEMA, UNDERELEMENT_COLUMN,
};
use crate::sql::{CreateView, FeatureKind, FunctionQuery, Statement};

/// Manifest of [`RecentChanges`].
pub fn manifest() -> Manifest {
    let outputs = ElementOutputs::with_prefix("AEndringer");
    Manifest::new()
        .declare("AEndringer", ParamType::Name)
        .declare("dummy", ParamType::Vector)
        .declare(DayCount::PARAM, ParamType::Number)
        .declare(outputs.flader, ParamType::OutputVector)
        .declare(outputs.linier, ParamType::OutputVector)
        .declare(outputs.punkter, ParamType::OutputVector)
}

/// Manifest of [`RecentChangeViews`].
pub fn view_manifest() -> Manifest {
    Manifest::new()
        .declare("Aendringer", ParamType::Name)
        .declare("dummy", ParamType::Vector)
        .declare(DayCount::PARAM, ParamType::String)
        .declare("dummy_out", ParamType::OutputVector)
}

/// `SELECT * FROM greg.f_tot_<kind>($1)`
pub fn changes_statement(kind: FeatureKind, days: DayCount) -> Statement {
    let query = FunctionQuery::new(kind.changes_function())
        .schema(SCHEMA)
        .placeholders(1);
    Statement::new(query.to_sql()).bind(days.get())
}

/// `CREATE OR REPLACE VIEW greg.v_aendring_<kind> AS SELECT ... FROM greg.f_tot_<kind>(N)`
pub fn changes_view(kind: FeatureKind, days: DayCount) -> CreateView {
    let mut query = FunctionQuery::new(kind.changes_function())
        .schema(SCHEMA)
        .column(ID_COLUMN)
        .geometry(GEOMETRY_COLUMN, kind.geometry_type())
        .columns(CHANGE_COLUMNS);
    if kind.has_underelement() {
        query = query.column(UNDERELEMENT_COLUMN);
    }

    CreateView::new(kind.changes_view(), query.int_args([days.get()]))
        .schema(SCHEMA)
        .or_replace()
}

// =============================================================================
// Data variant
// =============================================================================

/// Changed polygons, lines and points as three output datasets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentChanges {
    source: DataSource,
    days: DayCount,
    outputs: ElementOutputs,
}

impl RecentChanges {
    pub fn new(params: RecentChangesParams) -> Result<Self, ParamError> {
        let days = params.validate()?;
        Ok(Self {
            source: params.source,
            days,
            outputs: params.outputs,
        })
    }

    pub fn days(&self) -> DayCount {
        self.days
    }
}

impl Report for RecentChanges {
    fn kind(&self) -> ReportKind {
        ReportKind::RecentChanges
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
                    changes_statement(kind, self.days),
                    OutputTarget::named(output),
                ))
            })
            .collect()
    }
}

// =============================================================================
// View variant
// =============================================================================

/// Replaces the four `greg.v_aendring_*` views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentChangeViews {
    source: DataSource,
    days: DayCount,
}

impl RecentChangeViews {
    pub fn new(params: RecentChangesViewParams) -> Result<Self, ParamError> {
        let days = params.validate()?;
        Ok(Self {
            source: params.source,
            days,
        })
    }

    pub fn days(&self) -> DayCount {
        self.days
    }
}

impl Report for RecentChangeViews {
    fn kind(&self) -> ReportKind {
        ReportKind::RecentChangeViews
    }

    fn source(&self) -> &DataSource {
        &self.source
    }

    fn plan(&self) -> Vec<PlannedStatement> {
        FeatureKind::ALL
            .into_iter()
            .map(|kind| {
                PlannedStatement::new(
                    kind.as_str(),
                    changes_view(kind, self.days).to_statement(),
                    OutputTarget::Placeholder,
                )
            })
            .collect()
    }
}
