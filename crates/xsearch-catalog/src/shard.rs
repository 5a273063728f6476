//! JSON shard storage: one object per experiment/variable file.
//!
//! A shard maps absolute dataset paths to flat facet records. Shards are
//! generated offline and read as-is; beyond JSON syntax the only checks are
//! that the top level is an object and every key is an absolute path.

use crate::error::CatalogError;
use serde_json::Value;
use std::fs;
use std::path::Path;
use xsearch_core::Catalog;

/// Parse one shard from raw bytes. `origin` is only used in errors.
pub fn read_shard(bytes: &[u8], origin: &Path) -> Result<Catalog, CatalogError> {
    let value: Value = serde_json::from_slice(bytes).map_err(|e| CatalogError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })?;
    let Value::Object(entries) = &value else {
        return Err(CatalogError::NotAMapping(origin.to_path_buf()));
    };
    if let Some(key) = entries.keys().find(|key| !key.starts_with('/')) {
        return Err(CatalogError::Corrupt(format!(
            "{}: dataset path `{key}` is not absolute",
            origin.display()
        )));
    }
    serde_json::from_value(value).map_err(|e| CatalogError::Parse {
        path: origin.to_path_buf(),
        message: e.to_string(),
    })
}

/// Read one shard file.
pub fn read_shard_from_path(path: impl AsRef<Path>) -> Result<Catalog, CatalogError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| CatalogError::io(path, e))?;
    read_shard(&bytes, path)
}

/// Read and merge shards in order. Later shards win on duplicate paths.
pub fn read_shards<P: AsRef<Path>>(paths: &[P]) -> Result<Catalog, CatalogError> {
    let mut merged = Catalog::new();
    for path in paths {
        let shard = read_shard_from_path(path)?;
        tracing::debug!(
            shard = %path.as_ref().display(),
            entries = shard.len(),
            "loaded catalog shard"
        );
        merged.merge(shard);
    }
    Ok(merged)
}
