//! PostgreSQL/PostGIS executor.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::postgres::PgPool;
use sqlx::{Postgres, Row};
use tracing::debug;

use super::{DataSource, ExecError, ExecMode, ExecResult, OutputDataset, OutputTarget, SqlExecutor};
use crate::config::{ConnectionConfig, Settings, SettingsError};
use crate::sql::Statement;

/// Column holding one GeoJSON feature per row.
const FEATURE_COLUMN: &str = "feature";

/// Wrap a row-returning statement so every row comes back as a GeoJSON
/// feature. `ST_AsGeoJSON(record)` uses the first geometry column and puts
/// the remaining columns into `properties`.
pub(crate) fn feature_query(sql: &str) -> String {
    format!("SELECT ST_AsGeoJSON(t.*)::text AS {FEATURE_COLUMN} FROM ({sql}) AS t")
}

/// Executes statements against PostgreSQL pools, one per data source name.
#[derive(Debug, Clone, Default)]
pub struct PgExecutor {
    pools: HashMap<String, PgPool>,
}

impl PgExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a pool for a data source name.
    pub fn with_pool(mut self, source: impl Into<String>, pool: PgPool) -> Self {
        self.pools.insert(source.into(), pool);
        self
    }

    /// Register a data source from an environment-style connection config.
    pub fn with_config(
        self,
        source: impl Into<String>,
        config: &ConnectionConfig,
        settings: &Settings,
    ) -> Result<Self, SettingsError> {
        let pool = settings
            .pool
            .pool_options()?
            .connect_lazy_with(config.connect_options());
        Ok(self.with_pool(source, pool))
    }

    /// Build lazily connecting pools for every configured connection.
    ///
    /// No connection is opened until a statement runs.
    pub fn from_settings(settings: &Settings) -> Result<Self, SettingsError> {
        let mut executor = Self::new();
        for (name, conn) in &settings.connections {
            let pool = settings
                .pool
                .pool_options()?
                .connect_lazy_with(conn.connect_options()?);
            executor = executor.with_pool(name.clone(), pool);
        }
        Ok(executor)
    }

    pub fn has_source(&self, source: &str) -> bool {
        self.pools.contains_key(source)
    }

    fn pool(&self, source: &DataSource) -> ExecResult<&PgPool> {
        self.pools
            .get(source.name())
            .ok_or_else(|| ExecError::UnknownSource(source.name().to_string()))
    }

    /// Close every pool, waiting for connections to be released.
    pub async fn close(&self) {
        for pool in self.pools.values() {
            pool.close().await;
        }
    }
}

#[async_trait]
impl SqlExecutor for PgExecutor {
    async fn execute(
        &self,
        source: &DataSource,
        statement: &Statement,
        mode: ExecMode,
        target: &OutputTarget,
    ) -> ExecResult<OutputDataset> {
        if mode != ExecMode::Native {
            return Err(ExecError::UnsupportedMode(mode));
        }
        let pool = self.pool(source)?;

        match target {
            OutputTarget::Named(name) => {
                let sql = feature_query(statement.sql());
                let mut query = sqlx::query::<Postgres>(&sql);
                for value in statement.params() {
                    query = query.bind(*value);
                }

                let rows = query.fetch_all(pool).await?;
                let mut features = Vec::with_capacity(rows.len());
                for row in &rows {
                    let feature: Option<String> = row.try_get(FEATURE_COLUMN)?;
                    if let Some(text) = feature {
                        features.push(serde_json::from_str(&text)?);
                    }
                }

                debug!(output = %name, features = features.len(), "captured output");
                Ok(OutputDataset {
                    name: Some(name.clone()),
                    features,
                    rows_affected: 0,
                })
            }
            OutputTarget::Placeholder => {
                let mut query = sqlx::query::<Postgres>(statement.sql());
                for value in statement.params() {
                    query = query.bind(*value);
                }

                let result = query.execute(pool).await?;
                Ok(OutputDataset {
                    name: None,
                    features: Vec::new(),
                    rows_affected: result.rows_affected(),
                })
            }
        }
    }
}
