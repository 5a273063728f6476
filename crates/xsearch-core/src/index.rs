//! Read-only facet queries over a catalog.

use crate::catalog::{Catalog, FacetValue};
use crate::error::SearchError;
use crate::glob::GlobPattern;
use crate::natural::natural_sort;

/// Group-by and filter-by-value view over one catalog.
#[derive(Debug, Clone, Copy)]
pub struct FacetIndex<'a> {
    catalog: &'a Catalog,
}

impl<'a> FacetIndex<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Distinct values of `facet`, first-seen order.
    ///
    /// Every record must carry the facet.
    pub fn group_values(&self, facet: &str) -> Result<Vec<FacetValue>, SearchError> {
        let mut values: Vec<FacetValue> = Vec::new();
        for (path, record) in self.catalog {
            let value = record.require(path, facet)?;
            if !values.contains(value) {
                values.push(value.clone());
            }
        }
        Ok(values)
    }

    /// Copy of the catalog holding only records whose `facet` equals `value`.
    /// Records without the facet are dropped.
    pub fn restrict_to_value(&self, facet: &str, value: &FacetValue) -> Catalog {
        self.catalog
            .retained(|_, record| record.get(facet) == Some(value))
    }

    /// Paths grouped by `facet` value. Groups appear in first-seen order,
    /// paths keep catalog order within a group.
    pub fn group_paths(&self, facet: &str) -> Result<Vec<(FacetValue, Vec<&'a str>)>, SearchError> {
        let mut groups: Vec<(FacetValue, Vec<&'a str>)> = Vec::new();
        for (path, record) in self.catalog {
            let value = record.require(path, facet)?;
            match groups.iter_mut().find(|(seen, _)| seen == value) {
                Some((_, paths)) => paths.push(path.as_str()),
                None => groups.push((value.clone(), vec![path.as_str()])),
            }
        }
        Ok(groups)
    }

    /// Paths whose `facet` matches the glob `pattern`, natural-sorted.
    ///
    /// Non-text values are matched through their textual rendering; nulls
    /// never match.
    pub fn match_facet(&self, facet: &str, pattern: &str) -> Result<Vec<String>, SearchError> {
        let glob = GlobPattern::new(pattern)?;
        let mut matched = Vec::new();
        for (path, record) in self.catalog {
            let hit = match record.require(path, facet)? {
                FacetValue::Text(text) => glob.matches(text),
                FacetValue::Null => false,
                other => glob.matches(&other.to_string()),
            };
            if hit {
                matched.push(path.clone());
            }
        }
        natural_sort(&mut matched);
        Ok(matched)
    }
}
