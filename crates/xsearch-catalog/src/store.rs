//! Filesystem-backed catalog source.

use crate::discovery::discover_shards;
use crate::error::CatalogError;
use crate::shard::read_shards;
use crate::site::Site;
use std::path::PathBuf;
use xsearch_core::{Catalog, CatalogSource, SearchError};

/// Catalog root on the machines the catalogs are generated for.
pub const DEFAULT_CATALOG_ROOT: &str = "/p/user_pub/xclim/persist/xsearch/";

/// Loads `<root>/<experiment>/<variable>.json` shards from disk.
#[derive(Debug, Clone)]
pub struct JsonCatalogStore {
    root: PathBuf,
    site: Site,
}

impl Default for JsonCatalogStore {
    fn default() -> Self {
        Self::new(DEFAULT_CATALOG_ROOT)
    }
}

impl JsonCatalogStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            site: Site::Default,
        }
    }

    pub fn with_site(mut self, site: Site) -> Self {
        self.site = site;
        self
    }

    pub fn site(&self) -> Site {
        self.site
    }

    /// Catalog root after site rewriting.
    pub fn root(&self) -> PathBuf {
        match self.root.to_str() {
            Some(root) => PathBuf::from(self.site.rewrite_root(root)),
            None => self.root.clone(),
        }
    }

    /// Shard files that would be merged for this experiment/variable.
    pub fn shards(&self, experiment: &str, variable: &str) -> Result<Vec<PathBuf>, CatalogError> {
        discover_shards(&self.root(), experiment, variable)
    }

    /// Load and merge all matching shards. `None` when no shard exists.
    pub fn load_catalog(
        &self,
        experiment: &str,
        variable: &str,
    ) -> Result<Option<Catalog>, CatalogError> {
        let shards = self.shards(experiment, variable)?;
        if shards.is_empty() {
            tracing::debug!(
                root = %self.root().display(),
                experiment,
                variable,
                "no catalog shards found"
            );
            return Ok(None);
        }

        let mut catalog = read_shards(&shards)?;
        if self.site.rewrites_dataset_paths() {
            let site = self.site;
            catalog = catalog.map_paths(|path| site.rewrite_dataset_path(path));
        }
        tracing::debug!(
            shards = shards.len(),
            entries = catalog.len(),
            site = %self.site,
            "catalog loaded"
        );
        Ok(Some(catalog))
    }
}

impl CatalogSource for JsonCatalogStore {
    fn load(&self, experiment: &str, variable: &str) -> Result<Catalog, SearchError> {
        self.load_catalog(experiment, variable)?
            .ok_or_else(|| SearchError::CatalogNotFound {
                experiment: experiment.to_string(),
                variable: variable.to_string(),
            })
    }
}
