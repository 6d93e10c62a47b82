use serde_json::Value;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read dataset {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("dataset {} is not valid JSON", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("dataset {} must be a JSON array of buildings", path.display())]
    NotAnArray { path: PathBuf },
}

/// Reads the study space dataset from disk. Called once per request.
pub async fn load_spaces(path: &Path) -> Result<Vec<Value>, DatasetError> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| DatasetError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    match serde_json::from_str(&raw) {
        Ok(Value::Array(buildings)) => Ok(buildings),
        Ok(_) => Err(DatasetError::NotAnArray {
            path: path.to_path_buf(),
        }),
        Err(source) => Err(DatasetError::Json {
            path: path.to_path_buf(),
            source,
        }),
    }
}
