//! Narrowing criteria for one member group.
//!
//! A criterion scores each candidate path and keeps the best-scoring ones:
//!
//! | criterion            | score                                  | selection |
//! |----------------------|----------------------------------------|-----------|
//! | `version`            | [`version_weight`] of `record.version` | maximum   |
//! | `nc_creation_date`   | integer parse of the facet             | maximum   |
//! | `esgf_publish`       | 1 if the *path* contains it, else 0    | maximum   |
//! | `gr`                 | 1 if the *path* contains it, else 0    | maximum   |
//! | `is:<facet>`         | flag value of the facet                | presence  |
//! | any other `<facet>`  | raw value of the facet                 | by value  |
//!
//! A plain facet criterion ranks numbers (integers and floats) by maximum
//! and flags by presence, according to the values the group carries. A
//! group mixing numbers and flags, or carrying text, cannot be ranked.
//!
//! Presence keeps the candidates whose flag is `true`; when none is, the
//! group is left as it was.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::{Catalog, FacetValue, Record};
use crate::error::{CriterionError, SearchError};
use crate::version::version_weight;

/// Default criteria order, most significant first.
pub const DEFAULT_CRITERIA: [&str; 5] = [
    "version",
    "timepoints",
    "nc_creation_date",
    "esgf_publish",
    "gr",
];

const PRESENCE_PREFIX: &str = "is:";

/// One narrowing rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Criterion {
    /// Ranked version label.
    Version,
    /// `nc_creation_date`, an integer or integer-like string.
    CreationDate,
    /// Path published through the ESGF staging area.
    EsgfPublish,
    /// Path on a regridded (`gr`) grid.
    Regridded,
    /// Raw facet value: numbers by maximum, flags by presence.
    Facet(String),
    /// Flag facet; `true` wins. Numbers are rejected.
    BooleanPresence(String),
}

/// How a criterion picks the best candidates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Maximum,
    Presence,
}

/// One candidate's value under a criterion.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Score {
    Integer(i64),
    Float(f64),
    Flag(bool),
}

impl Score {
    fn is_flag(self) -> bool {
        matches!(self, Self::Flag(_))
    }

    fn as_f64(self) -> f64 {
        match self {
            Self::Integer(n) => n as f64,
            Self::Float(x) => x,
            Self::Flag(b) => f64::from(u8::from(b)),
        }
    }

    fn as_i64(self) -> i64 {
        match self {
            Self::Integer(n) => n,
            Self::Float(x) => x as i64,
            Self::Flag(b) => i64::from(b),
        }
    }

    /// Integers compare exactly; anything involving a float goes through `f64`.
    fn rank_cmp(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Float(_), _) | (_, Self::Float(_)) => self.as_f64().total_cmp(&other.as_f64()),
            _ => self.as_i64().cmp(&other.as_i64()),
        }
    }
}

impl Criterion {
    /// Name as written in configuration.
    pub fn name(&self) -> String {
        match self {
            Self::Version => "version".to_string(),
            Self::CreationDate => "nc_creation_date".to_string(),
            Self::EsgfPublish => "esgf_publish".to_string(),
            Self::Regridded => "gr".to_string(),
            Self::Facet(facet) => facet.clone(),
            Self::BooleanPresence(facet) => format!("{PRESENCE_PREFIX}{facet}"),
        }
    }

    /// Fixed selection rule, or `None` when the group's values decide.
    pub fn selection(&self) -> Option<Selection> {
        match self {
            Self::BooleanPresence(_) => Some(Selection::Presence),
            Self::Facet(_) => None,
            _ => Some(Selection::Maximum),
        }
    }

    fn score(&self, path: &str, catalog: &Catalog) -> Result<Score, CriterionError> {
        match self {
            Self::EsgfPublish => Ok(Score::Integer(i64::from(path.contains("esgf_publish")))),
            Self::Regridded => Ok(Score::Integer(i64::from(path.contains("gr")))),
            Self::Version => {
                let record = lookup(path, catalog)?;
                let label = text_facet(path, record, "version")?;
                Ok(Score::Integer(version_weight(label)?))
            }
            Self::CreationDate => {
                let record = lookup(path, catalog)?;
                match facet(path, record, "nc_creation_date")? {
                    FacetValue::Integer(n) => Ok(Score::Integer(*n)),
                    FacetValue::Text(raw) => raw
                        .trim()
                        .parse::<i64>()
                        .map(Score::Integer)
                        .map_err(|_| mismatch(path, "nc_creation_date", "an integer")),
                    _ => Err(mismatch(path, "nc_creation_date", "an integer")),
                }
            }
            Self::Facet(name) => {
                let record = lookup(path, catalog)?;
                match facet(path, record, name)? {
                    FacetValue::Integer(n) => Ok(Score::Integer(*n)),
                    FacetValue::Float(x) if x.is_finite() => Ok(Score::Float(*x)),
                    FacetValue::Flag(b) => Ok(Score::Flag(*b)),
                    _ => Err(mismatch(path, name, "a number or a flag")),
                }
            }
            Self::BooleanPresence(name) => {
                let record = lookup(path, catalog)?;
                facet(path, record, name)?
                    .as_flag()
                    .map(Score::Flag)
                    .ok_or_else(|| mismatch(path, name, "a flag"))
            }
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Criterion {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Some(facet) = name.strip_prefix(PRESENCE_PREFIX) {
            if facet.is_empty() {
                return Err(SearchError::InvalidCriterion(s.to_string()));
            }
            return Ok(Self::BooleanPresence(facet.to_string()));
        }
        match name {
            "" => Err(SearchError::InvalidCriterion(s.to_string())),
            "version" => Ok(Self::Version),
            "nc_creation_date" => Ok(Self::CreationDate),
            "esgf_publish" => Ok(Self::EsgfPublish),
            "gr" => Ok(Self::Regridded),
            other => Ok(Self::Facet(other.to_string())),
        }
    }
}

/// The [`DEFAULT_CRITERIA`], parsed.
pub fn default_criteria() -> Vec<Criterion> {
    vec![
        Criterion::Version,
        Criterion::Facet("timepoints".to_string()),
        Criterion::CreationDate,
        Criterion::EsgfPublish,
        Criterion::Regridded,
    ]
}

/// Narrow `candidates` to those sharing the best score under `criterion`.
///
/// Fewer than two candidates are returned untouched without scoring. Any
/// scoring failure fails the whole criterion; the caller decides whether to
/// skip it.
pub fn filter_by_criterion<'p>(
    candidates: &[&'p str],
    catalog: &Catalog,
    criterion: &Criterion,
) -> Result<Vec<&'p str>, CriterionError> {
    if candidates.len() < 2 {
        return Ok(candidates.to_vec());
    }

    let scores = candidates
        .iter()
        .map(|path| criterion.score(path, catalog))
        .collect::<Result<Vec<Score>, _>>()?;

    let selection = match criterion.selection() {
        Some(selection) => selection,
        None => infer_selection(criterion, candidates, &scores)?,
    };

    let keep: Vec<bool> = match selection {
        Selection::Maximum => {
            let Some(best) = scores
                .iter()
                .copied()
                .reduce(|best, s| if s.rank_cmp(best).is_gt() { s } else { best })
            else {
                return Ok(candidates.to_vec());
            };
            scores.iter().map(|s| s.rank_cmp(best).is_eq()).collect()
        }
        Selection::Presence => {
            if !scores.contains(&Score::Flag(true)) {
                return Ok(candidates.to_vec());
            }
            scores.iter().map(|s| *s == Score::Flag(true)).collect()
        }
    };

    Ok(candidates
        .iter()
        .zip(keep)
        .filter(|(_, kept)| *kept)
        .map(|(path, _)| *path)
        .collect())
}

/// Flags select by presence, numbers by maximum. Mixed groups fail.
fn infer_selection(
    criterion: &Criterion,
    candidates: &[&str],
    scores: &[Score],
) -> Result<Selection, CriterionError> {
    let flags = scores.iter().filter(|s| s.is_flag()).count();
    if flags == scores.len() {
        return Ok(Selection::Presence);
    }
    if flags == 0 {
        return Ok(Selection::Maximum);
    }
    let odd = candidates
        .iter()
        .zip(scores)
        .find(|(_, s)| s.is_flag() != scores[0].is_flag())
        .map(|(path, _)| *path)
        .unwrap_or(candidates[0]);
    Err(mismatch(odd, &criterion.name(), "values of one kind"))
}

fn lookup<'c>(path: &str, catalog: &'c Catalog) -> Result<&'c Record, CriterionError> {
    catalog
        .get(path)
        .ok_or_else(|| CriterionError::UnknownPath(path.to_string()))
}

fn facet<'r>(path: &str, record: &'r Record, name: &str) -> Result<&'r FacetValue, CriterionError> {
    record.get(name).ok_or_else(|| CriterionError::MissingFacet {
        path: path.to_string(),
        facet: name.to_string(),
    })
}

fn text_facet<'r>(path: &str, record: &'r Record, name: &str) -> Result<&'r str, CriterionError> {
    facet(path, record, name)?
        .as_str()
        .ok_or_else(|| mismatch(path, name, "text"))
}

fn mismatch(path: &str, facet: &str, expected: &'static str) -> CriterionError {
    CriterionError::TypeMismatch {
        path: path.to_string(),
        facet: facet.to_string(),
        expected,
    }
}
