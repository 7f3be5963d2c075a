//! Search condition documents (`chair_condition.json`, `estate_condition.json`).
//!
//! Each attribute is either a list of numeric buckets or a plain list of values
//! offered to clients (colors, kinds, features). Bucket ids are positions in the
//! `ranges` array and are referenced by clients as `<attr>RangeId`.

use crate::domain::catalog::CatalogError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Sentinel for a missing lower or upper bound.
pub const UNBOUNDED: i64 = -1;

/// Half-open interval `[min, max)`; either side may be [`UNBOUNDED`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bucket {
    pub id: usize,
    pub min: i64,
    pub max: i64,
}

impl Bucket {
    pub fn lower(&self) -> Option<i64> {
        (self.min != UNBOUNDED).then_some(self.min)
    }

    pub fn upper(&self) -> Option<i64> {
        (self.max != UNBOUNDED).then_some(self.max)
    }

    pub fn contains(&self, value: i64) -> bool {
        self.lower().map_or(true, |min| value >= min) && self.upper().map_or(true, |max| value < max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeCondition {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    pub ranges: Vec<Bucket>,
}

impl RangeCondition {
    /// Checks that the buckets tile the whole number line in ascending order.
    pub fn validate(&self, attr: &str) -> Result<(), CatalogError> {
        let invalid = |reason: String| CatalogError::InvalidBuckets {
            attr: attr.to_string(),
            reason,
        };

        let (first, last) = match (self.ranges.first(), self.ranges.last()) {
            (Some(f), Some(l)) => (f, l),
            _ => return Err(invalid("no buckets".into())),
        };
        if first.min != UNBOUNDED {
            return Err(invalid(format!("first bucket must start at {UNBOUNDED}")));
        }
        if last.max != UNBOUNDED {
            return Err(invalid(format!("last bucket must end at {UNBOUNDED}")));
        }

        for (pos, bucket) in self.ranges.iter().enumerate() {
            if bucket.id != pos {
                return Err(invalid(format!("bucket at position {pos} has id {}", bucket.id)));
            }
            if bucket.lower().is_none() && bucket.upper().is_none() {
                return Err(invalid(format!("bucket {pos} is unbounded on both sides")));
            }
            if pos > 0 && bucket.lower().is_none() {
                return Err(invalid(format!("only the first bucket may start at {UNBOUNDED}")));
            }
            if pos + 1 < self.ranges.len() && bucket.upper().is_none() {
                return Err(invalid(format!("only the last bucket may end at {UNBOUNDED}")));
            }
            if let (Some(min), Some(max)) = (bucket.lower(), bucket.upper()) {
                if min >= max {
                    return Err(invalid(format!("bucket {pos} is empty ({min}..{max})")));
                }
            }
        }

        for pair in self.ranges.windows(2) {
            if pair[0].max != pair[1].min {
                return Err(invalid(format!(
                    "gap between bucket {} (max {}) and bucket {} (min {})",
                    pair[0].id, pair[0].max, pair[1].id, pair[1].min
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCondition {
    pub list: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionEntry {
    Range(RangeCondition),
    List(ListCondition),
}

/// Whole condition document for one listing kind; served verbatim to clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchCondition(BTreeMap<String, ConditionEntry>);

impl SearchCondition {
    pub fn from_json(raw: &str, origin: &str) -> Result<Self, CatalogError> {
        serde_json::from_str(raw).map_err(|source| CatalogError::Json {
            path: origin.to_string(),
            source,
        })
    }

    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw, &path.display().to_string())
    }

    pub fn range(&self, attr: &str) -> Option<&RangeCondition> {
        match self.0.get(attr) {
            Some(ConditionEntry::Range(r)) => Some(r),
            _ => None,
        }
    }
}
