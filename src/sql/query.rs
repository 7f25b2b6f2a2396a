//! SELECT builder for set-returning functions.
//!
//! Every report reads from a `greg` table function, so the builder only
//! needs `SELECT <items> FROM <schema>.<function>(<args>)`.

use super::catalog::SRID;

// =============================================================================
// Select Items
// =============================================================================

/// A SELECT list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectItem {
    /// `*`
    Star,
    /// A bare column.
    Column(String),
    /// `col::public.geometry('<type>', <srid>) AS col`
    GeometryCast {
        column: String,
        geometry_type: String,
        srid: u32,
    },
}

impl SelectItem {
    pub fn to_sql(&self) -> String {
        match self {
            SelectItem::Star => "*".to_string(),
            SelectItem::Column(name) => name.clone(),
            SelectItem::GeometryCast {
                column,
                geometry_type,
                srid,
            } => format!(
                "{column}::public.geometry({}, {srid}) AS {column}",
                quote_string(geometry_type)
            ),
        }
    }
}

// =============================================================================
// Function Arguments
// =============================================================================

/// An argument of the table function call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FunctionArg {
    /// Positional bind parameter, `$n` (1-based).
    Placeholder(usize),
    /// Integer literal. Only for statements that cannot take parameters (DDL).
    Int(i32),
}

impl FunctionArg {
    pub fn to_sql(&self) -> String {
        match self {
            FunctionArg::Placeholder(n) => format!("${n}"),
            FunctionArg::Int(v) => v.to_string(),
        }
    }
}

// =============================================================================
// Function Query
// =============================================================================

/// `SELECT ... FROM schema.function(args)`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "builders have no effect until used"]
pub struct FunctionQuery {
    pub items: Vec<SelectItem>,
    pub schema: Option<String>,
    pub function: String,
    pub args: Vec<FunctionArg>,
}

impl FunctionQuery {
    /// Select from `function`. With no explicit items the query selects `*`.
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            items: Vec::new(),
            schema: None,
            function: function.into(),
            args: Vec::new(),
        }
    }

    /// Set the schema of the function.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Add a plain column.
    pub fn column(mut self, name: impl Into<String>) -> Self {
        self.items.push(SelectItem::Column(name.into()));
        self
    }

    /// Add several plain columns.
    pub fn columns(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.items
            .extend(names.into_iter().map(|n| SelectItem::Column(n.into())));
        self
    }

    /// Add a column cast to a PostGIS geometry type in the `greg` SRID.
    pub fn geometry(mut self, column: impl Into<String>, geometry_type: impl Into<String>) -> Self {
        self.items.push(SelectItem::GeometryCast {
            column: column.into(),
            geometry_type: geometry_type.into(),
            srid: SRID,
        });
        self
    }

    /// Append a function argument.
    pub fn arg(mut self, arg: FunctionArg) -> Self {
        self.args.push(arg);
        self
    }

    /// Append `$1..$n` as arguments.
    pub fn placeholders(mut self, n: usize) -> Self {
        let start = self.args.len();
        self.args
            .extend((start + 1..=start + n).map(FunctionArg::Placeholder));
        self
    }

    /// Append integer literals as arguments.
    pub fn int_args(mut self, values: impl IntoIterator<Item = i32>) -> Self {
        self.args.extend(values.into_iter().map(FunctionArg::Int));
        self
    }

    /// Qualified function name, `schema.function`.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.function),
            None => self.function.clone(),
        }
    }

    pub fn to_sql(&self) -> String {
        let items = if self.items.is_empty() {
            SelectItem::Star.to_sql()
        } else {
            self.items
                .iter()
                .map(SelectItem::to_sql)
                .collect::<Vec<_>>()
                .join(", ")
        };

        let args = self
            .args
            .iter()
            .map(FunctionArg::to_sql)
            .collect::<Vec<_>>()
            .join(", ");

        format!("SELECT {} FROM {}({})", items, self.qualified_name(), args)
    }
}

/// Quote a string literal, doubling embedded quotes.
pub fn quote_string(s: &str) -> String {
    format!("'{}'", s.replace('\'', "''"))
}
