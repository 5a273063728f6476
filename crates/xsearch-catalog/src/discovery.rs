//! Shard discovery under a catalog root.
//!
//! Shards live at `<root>/<experiment>/<variable>.json`. The experiment may
//! span several directories (`CMIP6/historical`). Each path component may be
//! a glob (`ssp*`, `t?s`), in which case every matching shard is returned.
//! Wildcards do not match dot-files unless the component itself starts with
//! a dot.

use crate::error::CatalogError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use xsearch_core::GlobPattern;
use xsearch_core::glob::has_magic;

pub const SHARD_EXTENSION: &str = "json";

/// Shard files for `experiment`/`variable`, sorted by path.
///
/// A missing root or experiment directory yields no shards rather than an
/// error.
pub fn discover_shards(
    root: &Path,
    experiment: &str,
    variable: &str,
) -> Result<Vec<PathBuf>, CatalogError> {
    let file_pattern = format!("{experiment}/{variable}.{SHARD_EXTENSION}");
    let components: Vec<&str> = file_pattern
        .split('/')
        .filter(|component| !component.is_empty() && *component != ".")
        .collect();
    let Some((file, dirs)) = components.split_last() else {
        return Ok(Vec::new());
    };

    let mut parents = vec![root.to_path_buf()];
    for dir in dirs {
        let mut next = Vec::new();
        for parent in &parents {
            next.extend(matching_entries(parent, dir, EntryKind::Dir)?);
        }
        parents = next;
    }

    let mut shards = Vec::new();
    for parent in &parents {
        shards.extend(matching_entries(parent, file, EntryKind::File)?);
    }
    shards.sort();
    Ok(shards)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    Dir,
    File,
}

impl EntryKind {
    fn accepts(self, path: &Path) -> bool {
        match self {
            Self::Dir => path.is_dir(),
            Self::File => path.is_file(),
        }
    }
}

fn matching_entries(
    parent: &Path,
    pattern: &str,
    kind: EntryKind,
) -> Result<Vec<PathBuf>, CatalogError> {
    if !has_magic(pattern) {
        let candidate = parent.join(pattern);
        return Ok(if kind.accepts(&candidate) {
            vec![candidate]
        } else {
            Vec::new()
        });
    }

    let glob = GlobPattern::new(pattern)
        .map_err(|e| CatalogError::InvalidPattern(e.to_string()))?;
    let entries = match fs::read_dir(parent) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(CatalogError::io(parent, e)),
    };

    let mut matched = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| CatalogError::io(parent, e))?;
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name.starts_with('.') && !pattern.starts_with('.') {
            continue;
        }
        if !glob.matches(name) {
            continue;
        }
        let path = entry.path();
        if kind.accepts(&path) {
            matched.push(path);
        }
    }
    Ok(matched)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    struct TempDirGuard {
        path: PathBuf,
    }

    impl TempDirGuard {
        fn new(prefix: &str) -> Self {
            let unique = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock should be after unix epoch")
                .as_nanos();
            let path = std::env::temp_dir().join(format!(
                "xsearch-discovery-{prefix}-{}-{unique}",
                std::process::id()
            ));
            fs::create_dir_all(&path).expect("temp dir should be created");
            Self { path }
        }
    }

    impl Drop for TempDirGuard {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.path);
        }
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("parent should be created");
        }
        fs::write(path, "{}").expect("shard should be written");
    }

    #[test]
    fn literal_components_resolve_directly() {
        let tmp = TempDirGuard::new("literal");
        touch(&tmp.path, "historical/tas.json");
        touch(&tmp.path, "historical/pr.json");

        let shards = discover_shards(&tmp.path, "historical", "tas").expect("discovery");
        assert_eq!(shards, vec![tmp.path.join("historical/tas.json")]);
    }

    #[test]
    fn glob_components_expand_sorted() {
        let tmp = TempDirGuard::new("glob");
        touch(&tmp.path, "ssp585/tas.json");
        touch(&tmp.path, "ssp245/tas.json");
        touch(&tmp.path, "ssp245/tasmax.json");
        touch(&tmp.path, "historical/tas.json");

        let shards = discover_shards(&tmp.path, "ssp*", "tas").expect("discovery");
        assert_eq!(
            shards,
            vec![
                tmp.path.join("ssp245/tas.json"),
                tmp.path.join("ssp585/tas.json"),
            ]
        );

        let shards = discover_shards(&tmp.path, "ssp245", "tas*").expect("discovery");
        assert_eq!(shards.len(), 2);
    }

    #[test]
    fn wildcards_skip_hidden_entries() {
        let tmp = TempDirGuard::new("hidden");
        touch(&tmp.path, ".staging/tas.json");
        touch(&tmp.path, "amip/tas.json");

        let shards = discover_shards(&tmp.path, "*", "tas").expect("discovery");
        assert_eq!(shards, vec![tmp.path.join("amip/tas.json")]);
    }

    #[test]
    fn nested_experiments_match_per_component() {
        let tmp = TempDirGuard::new("nested");
        touch(&tmp.path, "CMIP6/historical/tas.json");
        touch(&tmp.path, "CMIP6/ssp585/tas.json");
        touch(&tmp.path, "CMIP5/historical/tas.json");

        let shards = discover_shards(&tmp.path, "CMIP6/hist*", "tas").expect("discovery");
        assert_eq!(shards, vec![tmp.path.join("CMIP6/historical/tas.json")]);

        let shards = discover_shards(&tmp.path, "CMIP?/historical", "tas").expect("discovery");
        assert_eq!(
            shards,
            vec![
                tmp.path.join("CMIP5/historical/tas.json"),
                tmp.path.join("CMIP6/historical/tas.json"),
            ]
        );

        let shards = discover_shards(&tmp.path, "CMIP6/ssp585", "tas").expect("discovery");
        assert_eq!(shards, vec![tmp.path.join("CMIP6/ssp585/tas.json")]);
    }

    #[test]
    fn missing_root_yields_no_shards() {
        let tmp = TempDirGuard::new("missing");
        let absent = tmp.path.join("nope");
        assert!(discover_shards(&absent, "historical", "tas")
            .expect("discovery")
            .is_empty());
        assert!(discover_shards(&absent, "hist*", "tas")
            .expect("discovery")
            .is_empty());
    }
}
