//! Report parameters.
//!
//! Each operation takes an explicit parameter struct mirroring its
//! [`Manifest`]. Raw values are validated into [`DayCount`] and
//! [`HistoricDate`] before any SQL is built.

mod manifest;

pub use manifest::{Manifest, ManifestError, ParamDecl, ParamType};

use chrono::{Datelike, NaiveDate};

use crate::executor::DataSource;
use crate::sql::FeatureKind;

/// Error type for parameter validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamError {
    #[error("missing parameter: {0}")]
    Missing(String),

    #[error("parameter {name} is not a whole number: {value:?}")]
    NotANumber { name: String, value: String },

    #[error("parameter {name} is out of range: {value}")]
    OutOfRange { name: String, value: i64 },

    #[error("not a calendar date: day {day}, month {month}, year {year}")]
    InvalidDate { day: u32, month: u32, year: i32 },
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, ParamError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ParamError::Missing(name.to_string()));
    }
    trimmed.parse().map_err(|_| ParamError::NotANumber {
        name: name.to_string(),
        value: value.to_string(),
    })
}

// =============================================================================
// Validated values
// =============================================================================

/// A trailing window of days, `0..=i32::MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DayCount(i32);

impl DayCount {
    pub const PARAM: &'static str = "Antal_dage";

    pub fn new(days: i64) -> Result<Self, ParamError> {
        i32::try_from(days)
            .ok()
            .filter(|d| *d >= 0)
            .map(DayCount)
            .ok_or_else(|| ParamError::OutOfRange {
                name: Self::PARAM.to_string(),
                value: days,
            })
    }

    /// Parse a day count given as text.
    pub fn parse(value: &str) -> Result<Self, ParamError> {
        Self::new(parse_number::<i64>(Self::PARAM, value)?)
    }

    pub fn get(&self) -> i32 {
        self.0
    }
}

/// A calendar date given as separate day, month and year parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct HistoricDate(NaiveDate);

impl HistoricDate {
    pub const DAY: &'static str = "Dag";
    pub const MONTH: &'static str = "Maaned";
    pub const YEAR: &'static str = "Aar";

    pub fn new(day: u32, month: u32, year: i32) -> Result<Self, ParamError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(HistoricDate)
            .ok_or(ParamError::InvalidDate { day, month, year })
    }

    /// Parse the three parts from text.
    pub fn parse(day: &str, month: &str, year: &str) -> Result<Self, ParamError> {
        let day = parse_number(Self::DAY, day)?;
        let month = parse_number(Self::MONTH, month)?;
        let year = parse_number(Self::YEAR, year)?;
        Self::new(day, month, year)
    }

    pub fn day(&self) -> i32 {
        self.0.day() as i32
    }

    pub fn month(&self) -> i32 {
        self.0.month() as i32
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// `[day, month, year]`, the argument order of the `greg` date functions.
    pub fn args(&self) -> [i32; 3] {
        [self.day(), self.month(), self.year()]
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

// =============================================================================
// Output slots
// =============================================================================

/// Names of the three element outputs (polygons, lines, points).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementOutputs {
    pub flader: String,
    pub linier: String,
    pub punkter: String,
}

impl ElementOutputs {
    /// `<prefix>_Flader`, `<prefix>_Linier`, `<prefix>_Punkter`.
    pub fn with_prefix(prefix: &str) -> Self {
        let name = |kind: FeatureKind| format!("{}_{}", prefix, kind.label());
        Self {
            flader: name(FeatureKind::Flader),
            linier: name(FeatureKind::Linier),
            punkter: name(FeatureKind::Punkter),
        }
    }

    /// Output name for an element kind. Areas have no output slot.
    pub fn get(&self, kind: FeatureKind) -> Option<&str> {
        match kind {
            FeatureKind::Flader => Some(&self.flader),
            FeatureKind::Linier => Some(&self.linier),
            FeatureKind::Punkter => Some(&self.punkter),
            FeatureKind::Omraader => None,
        }
    }

    fn validate(&self) -> Result<(), ParamError> {
        for kind in FeatureKind::ELEMENTS {
            if self.get(kind).is_some_and(|n| n.trim().is_empty()) {
                return Err(ParamError::Missing(format!("output {}", kind)));
            }
        }
        Ok(())
    }
}

// =============================================================================
// Per-operation parameters
// =============================================================================

fn validate_source(source: &DataSource) -> Result<(), ParamError> {
    if source.name().trim().is_empty() {
        return Err(ParamError::Missing("dummy".to_string()));
    }
    Ok(())
}

/// Parameters of the "recent changes" report (`##Antal_dage=number`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentChangesParams {
    pub source: DataSource,
    pub day_count: i64,
    pub outputs: ElementOutputs,
}

impl RecentChangesParams {
    pub fn new(source: DataSource, day_count: i64) -> Self {
        Self {
            source,
            day_count,
            outputs: ElementOutputs::with_prefix("AEndringer"),
        }
    }

    pub fn validate(&self) -> Result<DayCount, ParamError> {
        validate_source(&self.source)?;
        self.outputs.validate()?;
        DayCount::new(self.day_count)
    }
}

/// Parameters of the view-materializing "recent changes" report.
///
/// The day count is declared `##Antal_dage=string` here, unlike the plain
/// report which declares it as a number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentChangesViewParams {
    pub source: DataSource,
    pub day_count: String,
}

impl RecentChangesViewParams {
    pub fn new(source: DataSource, day_count: impl Into<String>) -> Self {
        Self {
            source,
            day_count: day_count.into(),
        }
    }

    pub fn validate(&self) -> Result<DayCount, ParamError> {
        validate_source(&self.source)?;
        DayCount::parse(&self.day_count)
    }
}

/// Parameters of the "historical changes" report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricParams {
    pub source: DataSource,
    pub day: String,
    pub month: String,
    pub year: String,
    pub outputs: ElementOutputs,
}

impl HistoricParams {
    pub fn new(
        source: DataSource,
        day: impl Into<String>,
        month: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            source,
            day: day.into(),
            month: month.into(),
            year: year.into(),
            outputs: ElementOutputs::with_prefix("Historik"),
        }
    }

    pub fn validate(&self) -> Result<HistoricDate, ParamError> {
        validate_source(&self.source)?;
        self.outputs.validate()?;
        HistoricDate::parse(&self.day, &self.month, &self.year)
    }
}

/// Parameters of the view-materializing "historical changes" report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoricViewParams {
    pub source: DataSource,
    pub day: String,
    pub month: String,
    pub year: String,
}

impl HistoricViewParams {
    pub fn new(
        source: DataSource,
        day: impl Into<String>,
        month: impl Into<String>,
        year: impl Into<String>,
    ) -> Self {
        Self {
            source,
            day: day.into(),
            month: month.into(),
            year: year.into(),
        }
    }

    pub fn validate(&self) -> Result<HistoricDate, ParamError> {
        validate_source(&self.source)?;
        HistoricDate::parse(&self.day, &self.month, &self.year)
    }
}
