//! SQL statements with bound parameters.

use std::fmt;

/// A SQL statement and the values bound to its `$n` placeholders.
///
/// Parameters are `int4` values. Every value the reports pass to the
/// database is a validated integer, and the `greg` functions take their
/// arguments the way the original toolbox scripts passed them: as bare
/// integer literals.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "statements have no effect until executed"]
pub struct Statement {
    sql: String,
    params: Vec<i32>,
}

impl Statement {
    /// Create a statement without parameters.
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            params: Vec::new(),
        }
    }

    /// Bind the next positional parameter.
    pub fn bind(mut self, value: i32) -> Self {
        self.params.push(value);
        self
    }

    /// The SQL text, with `$n` placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Bound parameters, `$1` first.
    pub fn params(&self) -> &[i32] {
        &self.params
    }

    /// Render the statement with every placeholder replaced by its value.
    ///
    /// Used for logging and dry runs. Placeholders without a bound value
    /// are left untouched.
    pub fn to_literal_sql(&self) -> String {
        let mut out = String::with_capacity(self.sql.len());
        let mut chars = self.sql.char_indices().peekable();

        while let Some((_, c)) = chars.next() {
            if c != '$' {
                out.push(c);
                continue;
            }

            let mut digits = String::new();
            while let Some(&(_, d)) = chars.peek() {
                if d.is_ascii_digit() {
                    digits.push(d);
                    chars.next();
                } else {
                    break;
                }
            }

            let value = digits
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| self.params.get(i));

            match value {
                Some(v) => out.push_str(&v.to_string()),
                None => {
                    out.push('$');
                    out.push_str(&digits);
                }
            }
        }

        out
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_literal_sql())
    }
}
