//! Site-specific path layouts.
//!
//! Catalogs are generated with `/p/...` paths. Some machines mount the same
//! tree elsewhere, so both the catalog root and, on some sites, the dataset
//! paths inside the catalog need their prefix rewritten.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const CANONICAL_PREFIX: &str = "/p/";
const LC_PREFIX: &str = "/p/climate/";
const NIMBUS_PREFIX: &str = "/home/jovyan/local-data/";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Site {
    /// Paths used as generated.
    #[default]
    Default,
    /// LC systems: `/p/` is mounted under `/p/climate/`, for the catalog
    /// root and the datasets alike.
    Lc,
    /// Nimbus: catalogs are mirrored under `/home/jovyan/local-data/`;
    /// dataset paths are left alone.
    Nimbus,
}

impl Site {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Lc => "lc",
            Self::Nimbus => "nimbus",
        }
    }

    /// Rewrite the catalog root for this site.
    pub fn rewrite_root(self, root: &str) -> String {
        match self {
            Self::Default => root.to_string(),
            Self::Lc => root.replace(CANONICAL_PREFIX, LC_PREFIX),
            Self::Nimbus => root.replace(CANONICAL_PREFIX, NIMBUS_PREFIX),
        }
    }

    /// Rewrite one dataset path for this site.
    pub fn rewrite_dataset_path(self, path: &str) -> String {
        match self {
            Self::Lc => path.replace(CANONICAL_PREFIX, LC_PREFIX),
            Self::Default | Self::Nimbus => path.to_string(),
        }
    }

    pub fn rewrites_dataset_paths(self) -> bool {
        matches!(self, Self::Lc)
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Site {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Self::Default),
            "lc" => Ok(Self::Lc),
            "nimbus" => Ok(Self::Nimbus),
            other => Err(format!(
                "unknown site `{other}`; expected one of: default, lc, nimbus"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lc_rewrites_root_and_datasets() {
        assert_eq!(
            Site::Lc.rewrite_root("/p/user_pub/xclim/persist/xsearch/"),
            "/p/climate/user_pub/xclim/persist/xsearch/"
        );
        assert_eq!(
            Site::Lc.rewrite_dataset_path("/p/css03/esgf_publish/CMIP6/x/"),
            "/p/climate/css03/esgf_publish/CMIP6/x/"
        );
    }

    #[test]
    fn nimbus_rewrites_root_only() {
        assert_eq!(
            Site::Nimbus.rewrite_root("/p/user_pub/xclim/persist/xsearch/"),
            "/home/jovyan/local-data/user_pub/xclim/persist/xsearch/"
        );
        assert_eq!(Site::Nimbus.rewrite_dataset_path("/p/css03/x/"), "/p/css03/x/");
        assert!(!Site::Nimbus.rewrites_dataset_paths());
    }

    #[test]
    fn parses_known_sites() {
        for site in [Site::Default, Site::Lc, Site::Nimbus] {
            assert_eq!(site.as_str().parse::<Site>(), Ok(site));
        }
        assert!("mars".parse::<Site>().is_err());
    }
}
