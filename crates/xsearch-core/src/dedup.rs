//! Deduplication: one surviving dataset path per (model, member).
//!
//! Within a model, all paths sharing a `member` describe the same logical
//! dataset. The criteria run in order over that member group, each one
//! narrowing the survivors of the previous. A criterion that cannot score
//! the group is skipped. When the criteria are exhausted the first remaining
//! candidate (catalog order) survives; the group is `unique` only if the
//! criteria alone got it down to one.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::catalog::{Catalog, Record};
use crate::criterion::{Criterion, default_criteria, filter_by_criterion};
use crate::error::{CriterionError, SearchError};
use crate::index::FacetIndex;

pub const MODEL_FACET: &str = "model";
pub const MEMBER_FACET: &str = "member";

/// A record as returned by a search, plus the deduplication outcome.
///
/// `unique` and `alternate_paths` are only present when the search ran with
/// deduplication enabled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedEntry {
    #[serde(flatten)]
    pub record: Record,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_paths: Option<Vec<String>>,
}

impl ResolvedEntry {
    /// Entry for a search without deduplication. The record is kept as is,
    /// including any `unique` / `alternate_paths` facets it already carries.
    pub fn passthrough(record: Record) -> Self {
        Self {
            record,
            unique: None,
            alternate_paths: None,
        }
    }

    /// Derived fields replace same-named facets so the flattened output has
    /// one key each.
    fn resolved(record: Record, unique: bool, alternate_paths: Vec<String>) -> Self {
        Self {
            record: strip_derived(record),
            unique: Some(unique),
            alternate_paths: Some(alternate_paths),
        }
    }
}

fn strip_derived(mut record: Record) -> Record {
    record.remove("unique");
    record.remove("alternate_paths");
    record
}

/// Dataset path → resolved entry.
pub type ResolvedCatalog = BTreeMap<String, ResolvedEntry>;

/// Outcome for one member group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupResolution {
    pub survivor: String,
    pub unique: bool,
    pub alternate_paths: Vec<String>,
    /// Criteria that could not score this group, with the reason.
    pub skipped: Vec<(Criterion, CriterionError)>,
}

/// Applies an ordered list of criteria to every member group.
#[derive(Debug, Clone)]
pub struct Deduplicator {
    criteria: Vec<Criterion>,
}

impl Default for Deduplicator {
    fn default() -> Self {
        Self::new(default_criteria())
    }
}

impl Deduplicator {
    pub fn new(criteria: Vec<Criterion>) -> Self {
        Self { criteria }
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    /// Resolve one member group to a survivor. `None` for an empty group.
    pub fn resolve_group(&self, catalog: &Catalog, group: &[&str]) -> Option<GroupResolution> {
        let first = *group.first()?;
        let mut remaining: Vec<&str> = group.to_vec();
        let mut skipped = Vec::new();

        if remaining.len() > 1 {
            for criterion in &self.criteria {
                match filter_by_criterion(&remaining, catalog, criterion) {
                    Ok(narrowed) => remaining = narrowed,
                    Err(error) => {
                        tracing::debug!(
                            criterion = %criterion,
                            group_head = first,
                            %error,
                            "criterion skipped for member group"
                        );
                        skipped.push((criterion.clone(), error));
                    }
                }
                if remaining.len() == 1 {
                    break;
                }
            }
        }

        let survivor = remaining.first().copied().unwrap_or(first);
        let alternate_paths = group
            .iter()
            .filter(|path| **path != survivor)
            .map(|path| path.to_string())
            .collect();

        Some(GroupResolution {
            survivor: survivor.to_string(),
            unique: remaining.len() == 1,
            alternate_paths,
            skipped,
        })
    }

    /// Resolve every (model, member) group in `catalog`.
    ///
    /// Every record must carry `model` and `member`. The input catalog is not
    /// modified.
    pub fn deduplicate(&self, catalog: &Catalog) -> Result<ResolvedCatalog, SearchError> {
        let index = FacetIndex::new(catalog);
        let mut resolved = ResolvedCatalog::new();

        for model in index.group_values(MODEL_FACET)? {
            let model_catalog = index.restrict_to_value(MODEL_FACET, &model);
            let model_index = FacetIndex::new(&model_catalog);

            for (member, group) in model_index.group_paths(MEMBER_FACET)? {
                let Some(outcome) = self.resolve_group(&model_catalog, &group) else {
                    continue;
                };
                if !outcome.unique {
                    tracing::debug!(
                        model = %model,
                        member = %member,
                        survivor = %outcome.survivor,
                        tied = outcome.alternate_paths.len() + 1,
                        "criteria exhausted without a unique survivor"
                    );
                }

                let Some(record) = model_catalog.get(&outcome.survivor) else {
                    continue;
                };
                resolved.insert(
                    outcome.survivor.clone(),
                    ResolvedEntry::resolved(
                        record.clone(),
                        outcome.unique,
                        outcome.alternate_paths,
                    ),
                );
            }
        }

        Ok(resolved)
    }
}
