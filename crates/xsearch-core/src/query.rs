//! Query façade: filter a catalog, deduplicate it, shape the output.

use serde::Serialize;

use crate::catalog::{Catalog, FacetValue, Record};
use crate::criterion::{Criterion, default_criteria};
use crate::dedup::{Deduplicator, ResolvedCatalog, ResolvedEntry};
use crate::error::SearchError;
use crate::glob::GlobPattern;

pub const FREQUENCY_FACET: &str = "frequency";
pub const RETIRED_FACET: &str = "retired";
pub const RETRACTED_FACET: &str = "retracted";
pub const IGNORED_FACET: &str = "ignored";

/// Facets worth a hint when a result mixes several of their values.
pub const DEFAULT_ADVISORY_FACETS: [&str; 6] = [
    "activity",
    "cmipTable",
    "realm",
    "variable",
    "experiment",
    "frequency",
];

/// Supplies the catalog for one experiment/variable pair.
pub trait CatalogSource {
    /// Return [`SearchError::CatalogNotFound`] when no catalog exists.
    fn load(&self, experiment: &str, variable: &str) -> Result<Catalog, SearchError>;
}

impl<F> CatalogSource for F
where
    F: Fn(&str, &str) -> Result<Catalog, SearchError>,
{
    fn load(&self, experiment: &str, variable: &str) -> Result<Catalog, SearchError> {
        self(experiment, variable)
    }
}

/// One search request.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub experiment: String,
    pub variable: String,
    pub frequency: String,
    pub criteria: Vec<Criterion>,
    pub deduplicate: bool,
    pub exclude_retired: bool,
    pub exclude_retracted: bool,
    pub exclude_ignored: bool,
    pub full_metadata: bool,
    /// Facet → exact value (numeric/flag facets) or glob (text facets).
    pub filters: Vec<(String, FacetValue)>,
    pub advisory_facets: Vec<String>,
    pub verbose: bool,
}

impl SearchQuery {
    pub fn new(
        experiment: impl Into<String>,
        variable: impl Into<String>,
        frequency: impl Into<String>,
    ) -> Self {
        Self {
            experiment: experiment.into(),
            variable: variable.into(),
            frequency: frequency.into(),
            criteria: default_criteria(),
            deduplicate: true,
            exclude_retired: true,
            exclude_retracted: true,
            exclude_ignored: true,
            full_metadata: false,
            filters: Vec::new(),
            advisory_facets: DEFAULT_ADVISORY_FACETS
                .iter()
                .map(|facet| facet.to_string())
                .collect(),
            verbose: true,
        }
    }

    pub fn with_criteria(mut self, criteria: Vec<Criterion>) -> Self {
        self.criteria = criteria;
        self
    }

    /// Add a facet filter. A later filter on the same facet replaces it.
    pub fn with_filter(mut self, facet: impl Into<String>, value: impl Into<FacetValue>) -> Self {
        let facet = facet.into();
        self.filters.retain(|(existing, _)| *existing != facet);
        self.filters.push((facet, value.into()));
        self
    }

    pub fn deduplicate(mut self, on: bool) -> Self {
        self.deduplicate = on;
        self
    }

    pub fn exclude_retired(mut self, on: bool) -> Self {
        self.exclude_retired = on;
        self
    }

    pub fn exclude_retracted(mut self, on: bool) -> Self {
        self.exclude_retracted = on;
        self
    }

    pub fn exclude_ignored(mut self, on: bool) -> Self {
        self.exclude_ignored = on;
        self
    }

    pub fn full_metadata(mut self, on: bool) -> Self {
        self.full_metadata = on;
        self
    }

    pub fn verbose(mut self, on: bool) -> Self {
        self.verbose = on;
        self
    }

    pub fn with_advisory_facets(mut self, facets: Vec<String>) -> Self {
        self.advisory_facets = facets;
        self
    }

    fn exclusions(&self) -> Vec<&'static str> {
        [
            (self.exclude_retired, RETIRED_FACET),
            (self.exclude_retracted, RETRACTED_FACET),
            (self.exclude_ignored, IGNORED_FACET),
        ]
        .into_iter()
        .filter_map(|(on, facet)| on.then_some(facet))
        .collect()
    }

    fn is_user_filtered(&self, facet: &str) -> bool {
        self.filters.iter().any(|(name, _)| name == facet)
    }
}

/// Search output in the requested shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchResult {
    /// Survivor path → record with `unique` / `alternate_paths`.
    Metadata(ResolvedCatalog),
    /// Survivor paths, sorted.
    Paths(Vec<String>),
}

impl SearchResult {
    fn empty(full_metadata: bool) -> Self {
        if full_metadata {
            Self::Metadata(ResolvedCatalog::new())
        } else {
            Self::Paths(Vec::new())
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Metadata(entries) => entries.len(),
            Self::Paths(paths) => paths.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Result paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        match self {
            Self::Metadata(entries) => entries.keys().cloned().collect(),
            Self::Paths(paths) => paths.clone(),
        }
    }
}

/// A facet left unfiltered that still has several values in the result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacetAdvisory {
    pub facet: String,
    pub values: Vec<FacetValue>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub result: SearchResult,
    pub advisories: Vec<FacetAdvisory>,
}

/// Run `query` against the catalog supplied by `source`.
///
/// A missing catalog is an empty result, not an error. Any other failure
/// aborts the whole query.
pub fn find(source: &dyn CatalogSource, query: &SearchQuery) -> Result<SearchOutcome, SearchError> {
    let catalog = match source.load(&query.experiment, &query.variable) {
        Ok(catalog) => catalog,
        Err(SearchError::CatalogNotFound {
            experiment,
            variable,
        }) => {
            tracing::debug!(%experiment, %variable, "no catalog; returning empty result");
            return Ok(SearchOutcome {
                result: SearchResult::empty(query.full_metadata),
                advisories: Vec::new(),
            });
        }
        Err(error) => return Err(error),
    };

    let filtered = filter_catalog(&catalog, query)?;
    let advisories = facet_advisories(&filtered, query);

    let resolved: ResolvedCatalog = if query.deduplicate {
        Deduplicator::new(query.criteria.clone()).deduplicate(&filtered)?
    } else {
        filtered
            .into_iter()
            .map(|(path, record)| (path, ResolvedEntry::passthrough(record)))
            .collect()
    };

    tracing::info!(
        experiment = %query.experiment,
        variable = %query.variable,
        frequency = %query.frequency,
        loaded = catalog.len(),
        returned = resolved.len(),
        "search complete"
    );

    let result = if query.full_metadata {
        SearchResult::Metadata(resolved)
    } else {
        let mut paths: Vec<String> = resolved.into_keys().collect();
        paths.sort();
        SearchResult::Paths(paths)
    };

    Ok(SearchOutcome { result, advisories })
}

struct FacetFilter<'q> {
    facet: &'q str,
    value: FacetValue,
    glob: Option<GlobPattern>,
    /// Records lacking the facet fail the query rather than pass.
    required: bool,
}

impl FacetFilter<'_> {
    fn accepts(&self, value: &FacetValue) -> bool {
        match (value, &self.glob) {
            (FacetValue::Text(text), Some(glob)) => glob.matches(text),
            _ => *value == self.value,
        }
    }
}

/// Apply the frequency filter, the caller's facet filters, and the
/// retired/retracted/ignored exclusions. Returns a fresh catalog.
pub fn filter_catalog(catalog: &Catalog, query: &SearchQuery) -> Result<Catalog, SearchError> {
    let exclusions = query.exclusions();
    let mut filters = Vec::new();
    for (facet, value) in &query.filters {
        if exclusions.contains(&facet.as_str()) {
            continue;
        }
        let glob = match value {
            FacetValue::Null | FacetValue::Structured(_) => None,
            other => Some(GlobPattern::new(&other.to_string())?),
        };
        filters.push(FacetFilter {
            facet,
            value: value.clone(),
            glob,
            required: true,
        });
    }
    for facet in exclusions {
        filters.push(FacetFilter {
            facet,
            value: FacetValue::Integer(0),
            glob: None,
            required: false,
        });
    }

    let filtered = catalog.try_retained(|path, record| -> Result<bool, SearchError> {
        let frequency = record.require(path, FREQUENCY_FACET)?;
        if frequency.as_str() != Some(query.frequency.as_str()) {
            return Ok(false);
        }
        passes(path, record, &filters)
    })?;

    tracing::debug!(
        before = catalog.len(),
        after = filtered.len(),
        filters = filters.len(),
        "catalog filtered"
    );
    Ok(filtered)
}

fn passes(path: &str, record: &Record, filters: &[FacetFilter<'_>]) -> Result<bool, SearchError> {
    for filter in filters {
        let value = match record.get(filter.facet) {
            Some(value) => value,
            None if filter.required => {
                return Err(SearchError::MissingFacet {
                    path: path.to_string(),
                    facet: filter.facet.to_string(),
                });
            }
            None => continue,
        };
        if !filter.accepts(value) {
            return Ok(false);
        }
    }
    Ok(true)
}

/// Unfiltered advisory facets that still carry several values. Records
/// without the facet are ignored.
fn facet_advisories(catalog: &Catalog, query: &SearchQuery) -> Vec<FacetAdvisory> {
    let mut advisories = Vec::new();
    for facet in &query.advisory_facets {
        if query.is_user_filtered(facet) {
            continue;
        }
        let mut values: Vec<FacetValue> = Vec::new();
        for (_, record) in catalog {
            if let Some(value) = record.get(facet)
                && !values.contains(value)
            {
                values.push(value.clone());
            }
        }
        if values.len() > 1 {
            if query.verbose {
                let listed: Vec<String> = values.iter().map(ToString::to_string).collect();
                tracing::warn!(
                    facet = %facet,
                    values = %listed.join(", "),
                    "multiple values for {facet}; consider filtering by {facet}"
                );
            }
            advisories.push(FacetAdvisory {
                facet: facet.clone(),
                values,
            });
        }
    }
    advisories
}
