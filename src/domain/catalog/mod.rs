//! Read-only search catalogs: range buckets and feature bits per listing kind.
//!
//! A [`Catalog`] is built once at startup from the condition document and the
//! feature table, validated, and then shared immutably by every request.

pub mod bucketing;
pub mod features;
pub mod range;

pub use bucketing::Thresholds;
pub use features::{FeatureBits, FeatureTable};
pub use range::{Bucket, RangeCondition, SearchCondition, UNBOUNDED};

use crate::domain::listing::{ListingKind, RangeAttribute};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("condition document has no range attribute '{0}'")]
    MissingAttribute(String),

    #[error("invalid buckets for '{attr}': {reason}")]
    InvalidBuckets { attr: String, reason: String },

    #[error("feature '{feature}' in '{set}' has weight {weight}, expected a power of two")]
    InvalidFeatureWeight {
        set: String,
        feature: String,
        weight: i64,
    },

    #[error("features '{first}' and '{second}' in '{set}' share a bit")]
    SharedFeatureBit {
        set: String,
        first: String,
        second: String,
    },
}

/// A range attribute joined with its buckets and derived thresholds.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundRange {
    pub attr: &'static RangeAttribute,
    condition: RangeCondition,
    thresholds: Thresholds,
}

impl BoundRange {
    pub fn buckets(&self) -> &[Bucket] {
        &self.condition.ranges
    }

    pub fn bucket(&self, id: usize) -> Option<&Bucket> {
        self.condition.ranges.get(id)
    }

    /// Bucket id for a raw value; always a valid index into [`Self::buckets`].
    pub fn bucket_of(&self, value: i64) -> usize {
        self.thresholds.bucket(value)
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    kind: ListingKind,
    condition: SearchCondition,
    features: FeatureTable,
    ranges: Vec<BoundRange>,
}

impl Catalog {
    pub fn new(
        kind: ListingKind,
        condition: SearchCondition,
        features: FeatureTable,
    ) -> Result<Self, CatalogError> {
        features.validate(kind.feature_set())?;

        let mut ranges = Vec::with_capacity(kind.range_attributes().len());
        for attr in kind.range_attributes() {
            let cond = condition
                .range(attr.condition_key)
                .ok_or_else(|| CatalogError::MissingAttribute(attr.condition_key.to_string()))?;
            cond.validate(attr.condition_key)?;
            ranges.push(BoundRange {
                attr,
                thresholds: Thresholds::from_condition(cond),
                condition: cond.clone(),
            });
        }

        Ok(Self {
            kind,
            condition,
            features,
            ranges,
        })
    }

    pub fn load(
        kind: ListingKind,
        condition_path: &Path,
        bits: &FeatureBits,
    ) -> Result<Self, CatalogError> {
        let condition = SearchCondition::load(condition_path)?;
        let features = match kind {
            ListingKind::Chair => bits.chair.clone(),
            ListingKind::Estate => bits.estate.clone(),
        };
        Self::new(kind, condition, features)
    }

    pub fn kind(&self) -> ListingKind {
        self.kind
    }

    pub fn condition(&self) -> &SearchCondition {
        &self.condition
    }

    pub fn features(&self) -> &FeatureTable {
        &self.features
    }

    pub fn ranges(&self) -> &[BoundRange] {
        &self.ranges
    }

    pub fn range_for_param(&self, param: &str) -> Option<&BoundRange> {
        self.ranges.iter().find(|r| r.attr.param == param)
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_binds_every_range_attribute_of_the_kind() {
        let chair = fixtures::chair_catalog();
        let params: Vec<_> = chair.ranges().iter().map(|r| r.attr.param).collect();
        assert_eq!(params, ["priceRangeId", "heightRangeId", "widthRangeId", "depthRangeId"]);
        assert_eq!(chair.range_for_param("priceRangeId").unwrap().buckets().len(), 6);

        let estate = fixtures::estate_catalog();
        assert_eq!(estate.range_for_param("rentRangeId").unwrap().bucket_of(100_000), 2);
    }

    #[test]
    fn missing_range_attribute_fails_construction() {
        let condition = SearchCondition::from_json(r#"{"kind": {"list": []}}"#, "inline").unwrap();
        let err = Catalog::new(ListingKind::Chair, condition, FeatureTable::default()).unwrap_err();
        assert!(matches!(err, CatalogError::MissingAttribute(ref a) if a == "price"));
    }
}
