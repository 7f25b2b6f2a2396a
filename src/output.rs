//! Writing output datasets as GeoJSON.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use tracing::info;

use crate::executor::OutputDataset;

/// Error type for output writing.
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("invalid output name: {0:?}")]
    InvalidName(String),

    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Build a GeoJSON `FeatureCollection` from a dataset.
pub fn feature_collection(dataset: &OutputDataset) -> Value {
    let mut collection = json!({
        "type": "FeatureCollection",
        "features": dataset.features,
    });
    if let Some(name) = &dataset.name {
        collection["name"] = Value::String(name.clone());
    }
    collection
}

/// Output names become file names; reject anything that could escape `dir`.
fn file_name(name: &str) -> Result<String, OutputError> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    if !valid {
        return Err(OutputError::InvalidName(name.to_string()));
    }
    Ok(format!("{}.geojson", name))
}

/// Write one named dataset to `<dir>/<name>.geojson`.
///
/// Returns `None` for placeholder datasets, which are not written.
pub fn write_geojson(dir: &Path, dataset: &OutputDataset) -> Result<Option<PathBuf>, OutputError> {
    let Some(name) = &dataset.name else {
        return Ok(None);
    };

    let path = dir.join(file_name(name)?);
    let body = serde_json::to_string_pretty(&feature_collection(dataset))?;

    fs::create_dir_all(dir).map_err(|source| OutputError::Write {
        path: dir.to_path_buf(),
        source,
    })?;
    fs::write(&path, body).map_err(|source| OutputError::Write {
        path: path.clone(),
        source,
    })?;

    info!(path = %path.display(), features = dataset.len(), "wrote output");
    Ok(Some(path))
}

/// Write every named dataset, skipping placeholders.
pub fn write_all(dir: &Path, datasets: &[OutputDataset]) -> Result<Vec<PathBuf>, OutputError> {
    let mut written = Vec::new();
    for dataset in datasets {
        if let Some(path) = write_geojson(dir, dataset)? {
            written.push(path);
        }
    }
    Ok(written)
}
