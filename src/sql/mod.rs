//! SQL generation module.
//!
//! - [`catalog`] - names of the `greg` functions and views
//! - [`query`] - SELECT from a set-returning function
//! - [`ddl`] - CREATE OR REPLACE VIEW
//! - [`statement`] - SQL text plus bound parameters

pub mod catalog;
pub mod ddl;
pub mod query;
pub mod statement;

#[cfg(test)]
pub mod test_utils;

pub use catalog::FeatureKind;
pub use ddl::CreateView;
pub use query::{FunctionArg, FunctionQuery, SelectItem};
pub use statement::Statement;
