//! # xsearch-catalog
//!
//! Storage layer for xsearch catalogs.
//!
//! This crate provides:
//! - shard discovery under a catalog root (`<root>/<experiment>/<variable>.json`,
//!   where experiment and variable may be glob patterns)
//! - strict JSON shard reading
//! - last-write-wins merge of multiple shards into one [`Catalog`]
//! - site-specific path prefix rewriting
//!
//! [`JsonCatalogStore`] ties these together as an
//! [`xsearch_core::CatalogSource`].
//!
//! ## Data model
//!
//! ```text
//! <root>/<experiment>/<variable>.json   (one JSON object per shard)
//!     ↓  discover / read / merge
//! Catalog (path → record, in memory)
//! ```
//!
//! [`Catalog`]: xsearch_core::Catalog

pub mod discovery;
pub mod error;
pub mod shard;
pub mod site;
pub mod store;

pub use discovery::discover_shards;
pub use error::CatalogError;
pub use shard::{read_shard, read_shard_from_path, read_shards};
pub use site::Site;
pub use store::{DEFAULT_CATALOG_ROOT, JsonCatalogStore};
