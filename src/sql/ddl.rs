//! Data Definition Language: CREATE VIEW.
//!
//! PostgreSQL does not accept bind parameters inside `CREATE VIEW`, so the
//! body query of a view may only carry literal arguments
//! ([`FunctionArg::Int`]).

use super::query::{FunctionArg, FunctionQuery};
use super::statement::Statement;

// =============================================================================
// CREATE VIEW
// =============================================================================

/// CREATE [OR REPLACE] VIEW statement.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "builders have no effect until used"]
pub struct CreateView {
    pub or_replace: bool,
    pub schema: Option<String>,
    pub name: String,
    pub as_query: Box<FunctionQuery>,
}

impl CreateView {
    /// Create a new CREATE VIEW statement.
    pub fn new(name: impl Into<String>, query: FunctionQuery) -> Self {
        Self {
            or_replace: false,
            schema: None,
            name: name.into(),
            as_query: Box::new(query),
        }
    }

    /// Set the schema.
    pub fn schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Add OR REPLACE clause.
    ///
    /// Replaces the view if it already exists, so running the statement
    /// twice leaves the same view behind.
    pub fn or_replace(mut self) -> Self {
        self.or_replace = true;
        self
    }

    /// Qualified view name, `schema.name`.
    pub fn qualified_name(&self) -> String {
        match &self.schema {
            Some(schema) => format!("{}.{}", schema, self.name),
            None => self.name.clone(),
        }
    }

    /// Whether the body query uses bind parameters.
    pub fn has_placeholders(&self) -> bool {
        self.as_query
            .args
            .iter()
            .any(|a| matches!(a, FunctionArg::Placeholder(_)))
    }

    pub fn to_sql(&self) -> String {
        let mut sql = String::from("CREATE");
        if self.or_replace {
            sql.push_str(" OR REPLACE");
        }
        sql.push_str(" VIEW ");
        sql.push_str(&self.qualified_name());
        sql.push_str(" AS ");
        sql.push_str(&self.as_query.to_sql());
        sql
    }

    /// Convert to an executable statement.
    pub fn to_statement(&self) -> Statement {
        debug_assert!(
            !self.has_placeholders(),
            "CREATE VIEW cannot take bind parameters"
        );
        Statement::new(self.to_sql())
    }
}
