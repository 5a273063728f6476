//! Catalog and record types.
//!
//! A [`Catalog`] maps dataset paths to [`Record`]s. Records are flat facet
//! mappings read straight from the catalog JSON; the handful of facets the
//! core relies on get typed accessors, everything else stays open.
//!
//! Narrowing never mutates: [`Catalog::retained`] returns a fresh catalog so
//! callers sharing one loaded catalog cannot observe each other's filters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::SearchError;

/// One scalar facet value as it appears in catalog JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FacetValue {
    Flag(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    Null,
    /// Arrays and objects. Carried through untouched, never matched.
    Structured(serde_json::Value),
}

impl FacetValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Parse a command-line style value: integers and `true`/`false` are
    /// typed, anything else is text.
    pub fn parse_loose(raw: &str) -> Self {
        if let Ok(n) = raw.parse::<i64>() {
            return Self::Integer(n);
        }
        match raw {
            "true" => Self::Flag(true),
            "false" => Self::Flag(false),
            _ => Self::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for FacetValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flag(b) => write!(f, "{b}"),
            Self::Integer(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Text(s) => f.write_str(s),
            Self::Null => f.write_str("null"),
            Self::Structured(v) => write!(f, "{v}"),
        }
    }
}

impl From<&str> for FacetValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FacetValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FacetValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<i32> for FacetValue {
    fn from(value: i32) -> Self {
        Self::Integer(i64::from(value))
    }
}

impl From<bool> for FacetValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

/// Facet mapping for one dataset path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    facets: BTreeMap<String, FacetValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, facet: impl Into<String>, value: impl Into<FacetValue>) -> Self {
        self.insert(facet, value);
        self
    }

    /// Insert or replace one facet. Returns the previous value if present.
    pub fn insert(
        &mut self,
        facet: impl Into<String>,
        value: impl Into<FacetValue>,
    ) -> Option<FacetValue> {
        self.facets.insert(facet.into(), value.into())
    }

    pub fn remove(&mut self, facet: &str) -> Option<FacetValue> {
        self.facets.remove(facet)
    }

    pub fn get(&self, facet: &str) -> Option<&FacetValue> {
        self.facets.get(facet)
    }

    pub fn contains(&self, facet: &str) -> bool {
        self.facets.contains_key(facet)
    }

    /// Lookup a facet that must be present on the record at `path`.
    pub fn require(&self, path: &str, facet: &str) -> Result<&FacetValue, SearchError> {
        self.get(facet).ok_or_else(|| SearchError::MissingFacet {
            path: path.to_string(),
            facet: facet.to_string(),
        })
    }

    /// Text value of `facet`, if present and textual.
    pub fn text(&self, facet: &str) -> Option<&str> {
        self.get(facet).and_then(FacetValue::as_str)
    }

    pub fn model(&self) -> Option<&str> {
        self.text("model")
    }

    pub fn member(&self) -> Option<&str> {
        self.text("member")
    }

    pub fn frequency(&self) -> Option<&str> {
        self.text("frequency")
    }

    pub fn version(&self) -> Option<&str> {
        self.text("version")
    }

    /// Iterate facets in name order.
    pub fn facets(&self) -> impl Iterator<Item = (&String, &FacetValue)> {
        self.facets.iter()
    }

    pub fn len(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }
}

impl<K: Into<String>, V: Into<FacetValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (facet, value) in iter {
            record.insert(facet, value);
        }
        record
    }
}

/// Dataset path → record.
///
/// Iteration is in path order. Nothing in the core depends on it for
/// correctness; it only makes tie-break fallbacks reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    entries: BTreeMap<String, Record>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of dataset paths.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, path: &str) -> Option<&Record> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.entries.contains_key(path)
    }

    /// Insert or replace a record. Returns the previous record if present.
    pub fn insert(&mut self, path: impl Into<String>, record: Record) -> Option<Record> {
        self.entries.insert(path.into(), record)
    }

    /// Overlay `other` onto this catalog. Duplicate paths take the value from
    /// `other` (last write wins).
    pub fn merge(&mut self, other: Catalog) {
        self.entries.extend(other.entries);
    }

    /// Iterate entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Record)> {
        self.entries.iter()
    }

    /// Iterate dataset paths in path order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Copy of the entries for which `keep` holds.
    pub fn retained(&self, mut keep: impl FnMut(&str, &Record) -> bool) -> Catalog {
        self.entries
            .iter()
            .filter(|(path, record)| keep(path, record))
            .map(|(path, record)| (path.clone(), record.clone()))
            .collect()
    }

    /// Like [`Catalog::retained`] but the predicate may fail; the first error
    /// aborts the narrowing.
    pub fn try_retained<E>(
        &self,
        mut keep: impl FnMut(&str, &Record) -> Result<bool, E>,
    ) -> Result<Catalog, E> {
        let mut out = Catalog::new();
        for (path, record) in &self.entries {
            if keep(path, record)? {
                out.insert(path.clone(), record.clone());
            }
        }
        Ok(out)
    }

    /// Rewrite every dataset path. Paths that collide after rewriting keep
    /// the record that sorts last before rewriting.
    pub fn map_paths(self, mut rewrite: impl FnMut(&str) -> String) -> Catalog {
        self.entries
            .into_iter()
            .map(|(path, record)| (rewrite(&path), record))
            .collect()
    }
}

impl FromIterator<(String, Record)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (String, Record)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Catalog {
    type Item = (String, Record);
    type IntoIter = std::collections::btree_map::IntoIter<String, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = (&'a String, &'a Record);
    type IntoIter = std::collections::btree_map::Iter<'a, String, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facet_values_deserialize_by_json_shape() {
        let record: Record = serde_json::from_str(
            r#"{"model":"CESM2","retired":0,"scale":1.5,"latest":true,"note":null,"tags":["a"]}"#,
        )
        .expect("record should parse");

        assert_eq!(record.model(), Some("CESM2"));
        assert_eq!(record.get("retired"), Some(&FacetValue::Integer(0)));
        assert_eq!(record.get("scale"), Some(&FacetValue::Float(1.5)));
        assert_eq!(record.get("latest"), Some(&FacetValue::Flag(true)));
        assert_eq!(record.get("note"), Some(&FacetValue::Null));
        assert!(matches!(
            record.get("tags"),
            Some(FacetValue::Structured(serde_json::Value::Array(_)))
        ));
    }

    #[test]
    fn require_reports_path_and_facet() {
        let record = Record::new().with("model", "CESM2");
        let err = record
            .require("/p/a", "member")
            .expect_err("missing facet must error");
        assert!(matches!(
            err,
            SearchError::MissingFacet { path, facet } if path == "/p/a" && facet == "member"
        ));
    }

    #[test]
    fn retained_leaves_source_untouched() {
        let catalog: Catalog = [
            ("/p/a".to_string(), Record::new().with("frequency", "mon")),
            ("/p/b".to_string(), Record::new().with("frequency", "day")),
        ]
        .into_iter()
        .collect();

        let monthly = catalog.retained(|_, record| record.frequency() == Some("mon"));
        assert_eq!(monthly.len(), 1);
        assert!(monthly.contains("/p/a"));
        assert_eq!(catalog.len(), 2);
    }

    #[test]
    fn merge_is_last_write_wins() {
        let mut first: Catalog = [("/p/a".to_string(), Record::new().with("version", "v1"))]
            .into_iter()
            .collect();
        let second: Catalog = [("/p/a".to_string(), Record::new().with("version", "v2"))]
            .into_iter()
            .collect();

        first.merge(second);
        assert_eq!(
            first.get("/p/a").and_then(Record::version),
            Some("v2"),
        );
    }

    #[test]
    fn parse_loose_types_integers_and_flags() {
        assert_eq!(FacetValue::parse_loose("0"), FacetValue::Integer(0));
        assert_eq!(FacetValue::parse_loose("true"), FacetValue::Flag(true));
        assert_eq!(
            FacetValue::parse_loose("gn*"),
            FacetValue::Text("gn*".to_string())
        );
    }
}
