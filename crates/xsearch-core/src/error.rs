//! Error types for xsearch core operations.

/// Errors that abort a search query.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// No catalog shard exists for the requested experiment/variable.
    #[error("no catalog for experiment `{experiment}`, variable `{variable}`")]
    CatalogNotFound { experiment: String, variable: String },

    /// A filter or grouping referenced a facet the record does not carry.
    #[error("dataset `{path}` has no facet `{facet}`")]
    MissingFacet { path: String, facet: String },

    /// A facet carried a value of the wrong shape for the operation.
    #[error("facet `{facet}` of dataset `{path}` is not {expected}")]
    FacetType {
        path: String,
        facet: String,
        expected: &'static str,
    },

    /// A criterion name could not be parsed.
    #[error("invalid criterion: {0}")]
    InvalidCriterion(String),

    /// A glob pattern could not be compiled.
    #[error("invalid glob pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// The catalog source failed while loading.
    #[error("catalog source error: {0}")]
    Source(String),

    /// An attribute reader failed for one dataset.
    #[error("enrichment failed for `{path}`: {message}")]
    Enrichment { path: String, message: String },
}

/// A version label that is neither `latest` nor `v<digits>`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed version label `{0}`")]
pub struct MalformedVersion(pub String);

/// Why one criterion could not rank one member group.
///
/// These never escape the deduplication engine: a failing criterion is
/// skipped for the group and the candidates pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CriterionError {
    #[error("dataset `{0}` is not in the catalog")]
    UnknownPath(String),

    #[error("dataset `{path}` has no facet `{facet}`")]
    MissingFacet { path: String, facet: String },

    #[error(transparent)]
    MalformedVersion(#[from] MalformedVersion),

    #[error("facet `{facet}` of dataset `{path}` is not {expected}")]
    TypeMismatch {
        path: String,
        facet: String,
        expected: &'static str,
    },
}
