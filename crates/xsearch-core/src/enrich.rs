//! Attribute enrichment seam.
//!
//! Some attributes only live in the dataset files themselves (global
//! netCDF attributes). Reading them is I/O and stays outside the core; an
//! [`AttributeReader`] supplies the values and [`enrich_attribute`] copies
//! them into a fresh catalog.

use crate::catalog::{Catalog, FacetValue};
use crate::error::SearchError;

/// Reads one global attribute from the files behind a dataset path.
pub trait AttributeReader {
    /// `Ok(None)` when the dataset does not carry the attribute.
    fn global_attribute(&self, path: &str, name: &str) -> Result<Option<FacetValue>, String>;
}

impl<F> AttributeReader for F
where
    F: Fn(&str, &str) -> Result<Option<FacetValue>, String>,
{
    fn global_attribute(&self, path: &str, name: &str) -> Result<Option<FacetValue>, String> {
        self(path, name)
    }
}

/// Copy of `catalog` with `name` set on every record whose dataset carries
/// it. Records without the attribute are left as they were.
pub fn enrich_attribute(
    catalog: &Catalog,
    name: &str,
    reader: &dyn AttributeReader,
) -> Result<Catalog, SearchError> {
    let mut enriched = catalog.clone();
    let mut added = 0usize;
    for (path, _) in catalog {
        let value = reader
            .global_attribute(path, name)
            .map_err(|message| SearchError::Enrichment {
                path: path.clone(),
                message,
            })?;
        let Some(value) = value else {
            continue;
        };
        let mut record = catalog.get(path).cloned().unwrap_or_default();
        record.insert(name, value);
        enriched.insert(path.clone(), record);
        added += 1;
    }
    tracing::debug!(attribute = name, added, total = catalog.len(), "enriched catalog");
    Ok(enriched)
}
