//! TOML configuration for the CLI.
//!
//! ```toml
//! catalog_root = "/p/user_pub/xclim/persist/xsearch/"
//! site = "lc"
//! criteria = ["version", "timepoints", "nc_creation_date", "esgf_publish", "gr"]
//! advisory_facets = ["activity", "cmipTable", "realm"]
//! ```
//!
//! Every key is optional. Lookup order: `--config`, `$XSEARCH_CONFIG`,
//! `~/.xsearch/config.toml`, built-in defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use xsearch_catalog::{DEFAULT_CATALOG_ROOT, Site};
use xsearch_core::{DEFAULT_ADVISORY_FACETS, DEFAULT_CRITERIA};

pub const CONFIG_ENV: &str = "XSEARCH_CONFIG";
const HOME_CONFIG: &str = ".xsearch/config.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub catalog_root: String,
    pub site: Site,
    pub criteria: Vec<String>,
    pub advisory_facets: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_root: DEFAULT_CATALOG_ROOT.to_string(),
            site: Site::Default,
            criteria: DEFAULT_CRITERIA.iter().map(|c| c.to_string()).collect(),
            advisory_facets: DEFAULT_ADVISORY_FACETS
                .iter()
                .map(|f| f.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{path}: {message}")]
    Io { path: PathBuf, message: String },

    #[error("{path}: invalid config: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl Config {
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Resolve and load the effective configuration.
    ///
    /// An explicitly named file (flag or environment) must exist; the home
    /// file is optional.
    pub fn load(explicit: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_path(Path::new(path));
        }
        if let Ok(path) = std::env::var(CONFIG_ENV)
            && !path.is_empty()
        {
            return Self::from_path(Path::new(&path));
        }
        if let Some(home) = std::env::var_os("HOME") {
            let path = PathBuf::from(home).join(HOME_CONFIG);
            if path.is_file() {
                return Self::from_path(&path);
            }
        }
        Ok(Self::default())
    }
}
