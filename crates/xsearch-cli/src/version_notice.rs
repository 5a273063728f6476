//! `~/.xsearch/version`: tells the user when xsearch was upgraded since their
//! last run. Failures are logged and otherwise ignored.

use std::fs;
use std::io;
use std::path::Path;

const VERSION_FILE: &str = ".xsearch/version";

pub fn run() {
    let Some(home) = std::env::var_os("HOME") else {
        tracing::debug!("HOME unset; skipping version notice");
        return;
    };
    match check(Path::new(&home), env!("CARGO_PKG_VERSION")) {
        Ok(Some(note)) => eprintln!("{note}"),
        Ok(None) => {}
        Err(e) => tracing::debug!(error = %e, "version notice unavailable"),
    }
}

/// Compare the recorded version with `current` and record `current`.
///
/// Returns the note to show when they differ. A missing file is a first
/// run: it is created and nothing is reported.
pub fn check(home: &Path, current: &str) -> io::Result<Option<String>> {
    let path = home.join(VERSION_FILE);
    let last = match fs::read_to_string(&path) {
        Ok(text) => text.lines().next().unwrap_or_default().trim().to_string(),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)?;
            }
            fs::write(&path, current)?;
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    if last == current {
        return Ok(None);
    }
    fs::write(&path, current)?;
    Ok(Some(format!(
        "\nNote that xsearch has been updated to version {current}.\n\
         You were last using version {last}.\n"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
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
                "xsearch-notice-{prefix}-{}-{unique}",
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

    #[test]
    fn first_run_records_version_quietly() {
        let home = TempDirGuard::new("first");
        assert_eq!(check(&home.path, "0.1.0").expect("check"), None);
        let recorded = fs::read_to_string(home.path.join(VERSION_FILE)).expect("version file");
        assert_eq!(recorded, "0.1.0");
    }

    #[test]
    fn same_version_is_silent() {
        let home = TempDirGuard::new("same");
        check(&home.path, "0.1.0").expect("first");
        assert_eq!(check(&home.path, "0.1.0").expect("second"), None);
    }

    #[test]
    fn upgrade_is_reported_once() {
        let home = TempDirGuard::new("upgrade");
        check(&home.path, "0.1.0").expect("first");

        let note = check(&home.path, "0.2.0")
            .expect("second")
            .expect("note after upgrade");
        assert!(note.contains("updated to version 0.2.0"));
        assert!(note.contains("last using version 0.1.0"));

        assert_eq!(check(&home.path, "0.2.0").expect("third"), None);
    }
}
