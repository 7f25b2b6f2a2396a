//! The `greg` database catalog.
//!
//! Names of the stored functions the reports call and of the views they
//! create or replace. The functions themselves live in the database; this
//! module only knows how they are spelled.

use std::fmt;

/// Schema owning every function and view used by the reports.
pub const SCHEMA: &str = "greg";

/// Spatial reference of all `greg` geometries (ETRS89 / UTM zone 32N).
pub const SRID: u32 = 25832;

/// Quantities as of a historical date.
pub const QUANTITIES_FUNCTION: &str = "f_maengder";

/// View materializing [`QUANTITIES_FUNCTION`].
pub const QUANTITIES_VIEW: &str = "v_maengder_historik";

/// Feature identifier column.
pub const ID_COLUMN: &str = "objekt_id";

/// Geometry column of every function result.
pub const GEOMETRY_COLUMN: &str = "geometri";

/// Change columns following the geometry in the `v_aendring_*` views.
pub const CHANGE_COLUMNS: [&str; 3] = ["handling", "dato", "arbejdssted"];

/// Sub-element column; absent for areas.
pub const UNDERELEMENT_COLUMN: &str = "underelement";

/// Feature layers of the `greg` schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureKind {
    /// Polygon features.
    Flader,
    /// Line features.
    Linier,
    /// Point features.
    Punkter,
    /// Areas (zones).
    Omraader,
}

impl FeatureKind {
    /// Every kind, in the order the view reports execute them.
    pub const ALL: [FeatureKind; 4] = [
        FeatureKind::Flader,
        FeatureKind::Linier,
        FeatureKind::Punkter,
        FeatureKind::Omraader,
    ];

    /// The kinds returned as output datasets by the data reports.
    pub const ELEMENTS: [FeatureKind; 3] =
        [FeatureKind::Flader, FeatureKind::Linier, FeatureKind::Punkter];

    /// Lowercase name used in function and view names.
    pub fn as_str(&self) -> &'static str {
        match self {
            FeatureKind::Flader => "flader",
            FeatureKind::Linier => "linier",
            FeatureKind::Punkter => "punkter",
            FeatureKind::Omraader => "omraader",
        }
    }

    /// Capitalized name used in output dataset names (`Historik_Flader`).
    pub fn label(&self) -> &'static str {
        match self {
            FeatureKind::Flader => "Flader",
            FeatureKind::Linier => "Linier",
            FeatureKind::Punkter => "Punkter",
            FeatureKind::Omraader => "Omraader",
        }
    }

    /// PostGIS geometry type the change views cast `geometri` to.
    pub fn geometry_type(&self) -> &'static str {
        match self {
            FeatureKind::Flader | FeatureKind::Omraader => "MultiPolygon",
            FeatureKind::Linier => "MultiLineString",
            FeatureKind::Punkter => "MultiPoint",
        }
    }

    /// Areas have no sub-element column.
    pub fn has_underelement(&self) -> bool {
        !matches!(self, FeatureKind::Omraader)
    }

    /// Trailing-window change function, e.g. `f_tot_flader`.
    pub fn changes_function(&self) -> String {
        format!("f_tot_{}", self.as_str())
    }

    /// Change view, e.g. `v_aendring_flader`.
    pub fn changes_view(&self) -> String {
        format!("v_aendring_{}", self.as_str())
    }

    /// Historical snapshot function, e.g. `f_dato_flader`.
    pub fn history_function(&self) -> String {
        format!("f_dato_{}", self.as_str())
    }

    /// Historical snapshot view, e.g. `v_greg_flader_historik`.
    pub fn history_view(&self) -> String {
        format!("v_greg_{}_historik", self.as_str())
    }
}

impl fmt::Display for FeatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
