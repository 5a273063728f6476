//! Version label ranking.

use crate::error::MalformedVersion;

/// Weight applied to single-digit ordinal versions (`v1`..`v9`) so they
/// outrank every eight-digit date version.
pub const ORDINAL_VERSION_SCALE: i64 = 100_000_000;

/// Turn a version label into an ordering weight. Higher is preferred.
///
/// - a trailing `-tmp` is ignored
/// - `latest` weighs `0`
/// - `v<n>` with `n < 10` weighs `n * 100_000_000`
/// - `v<yyyymmdd>` (or any `n >= 10`) weighs `n`
pub fn version_weight(label: &str) -> Result<i64, MalformedVersion> {
    let trimmed = label.strip_suffix("-tmp").unwrap_or(label);
    if trimmed == "latest" {
        return Ok(0);
    }

    let digits = trimmed.strip_prefix('v').unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(MalformedVersion(label.to_string()));
    }
    let n: i64 = digits
        .parse()
        .map_err(|_| MalformedVersion(label.to_string()))?;

    if n < 10 {
        Ok(n * ORDINAL_VERSION_SCALE)
    } else {
        Ok(n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_weighs_zero() {
        assert_eq!(version_weight("latest"), Ok(0));
        assert_eq!(version_weight("latest-tmp"), Ok(0));
    }

    #[test]
    fn tmp_suffix_is_ignored() {
        assert_eq!(version_weight("v2-tmp"), version_weight("v2"));
        assert_eq!(version_weight("v20190829-tmp"), Ok(20190829));
    }

    #[test]
    fn ordinal_versions_outrank_dates() {
        assert_eq!(version_weight("v1"), Ok(100_000_000));
        assert_eq!(version_weight("v9"), Ok(900_000_000));
        let newest_date = version_weight("v99991231").expect("date version");
        let first_ordinal = version_weight("v1").expect("ordinal version");
        assert!(first_ordinal > newest_date);
    }

    #[test]
    fn date_versions_are_monotonic() {
        let older = version_weight("v20190101").expect("date version");
        let newer = version_weight("v20190829").expect("date version");
        assert!(older < newer);
        assert_eq!(version_weight("20190829"), Ok(20190829));
    }

    #[test]
    fn two_digit_versions_are_not_scaled() {
        assert_eq!(version_weight("v10"), Ok(10));
    }

    #[test]
    fn non_numeric_labels_are_malformed() {
        for label in ["", "v", "vX", "v1.2", "draft", "v-1"] {
            assert_eq!(
                version_weight(label),
                Err(MalformedVersion(label.to_string())),
                "label {label:?}"
            );
        }
    }
}
