//! # xsearch core
//!
//! Search over pre-generated climate-model dataset catalogs. A catalog maps
//! each dataset path to a flat record of facets (`model`, `member`,
//! `version`, `frequency`, ...). Several paths frequently describe the same
//! logical dataset: republications, newer versions, regridded variants. The
//! core narrows each model member down to one canonical path and keeps the
//! rest as alternates.
//!
//! This crate is **storage-agnostic**: it never touches the filesystem.
//! Catalogs arrive through the [`CatalogSource`] seam.
//!
//! ## Architecture
//!
//! ```text
//! Catalog / Record          ← path → facets, copy-on-narrow
//!     │
//! FacetIndex                ← group-by, restrict, glob match
//!     │
//! version_weight            ← version label → ordering weight
//!     │
//! Criterion                 ← one narrowing rule over a member group
//!     │
//! Deduplicator              ← ordered criteria per (model, member)
//!     │
//! find / SearchQuery        ← filters, exclusions, output shape
//! ```

pub mod catalog;
pub mod criterion;
pub mod dedup;
pub mod enrich;
pub mod error;
pub mod glob;
pub mod index;
pub mod natural;
pub mod query;
pub mod version;

pub use catalog::{Catalog, FacetValue, Record};
pub use criterion::{Criterion, DEFAULT_CRITERIA, Selection, default_criteria, filter_by_criterion};
pub use dedup::{Deduplicator, GroupResolution, ResolvedCatalog, ResolvedEntry};
pub use enrich::{AttributeReader, enrich_attribute};
pub use error::{CriterionError, MalformedVersion, SearchError};
pub use glob::GlobPattern;
pub use index::FacetIndex;
pub use natural::{natural_cmp, natural_sort};
pub use query::{
    DEFAULT_ADVISORY_FACETS, CatalogSource, FacetAdvisory, SearchOutcome, SearchQuery,
    SearchResult, filter_catalog, find,
};
pub use version::version_weight;
