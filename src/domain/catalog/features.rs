//! Feature name ↔ bit weight codec (`features_bit.json`).

use crate::domain::catalog::CatalogError;
use crate::domain::search::SearchError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Feature name → power-of-two weight for one listing kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureTable(BTreeMap<String, i64>);

impl FeatureTable {
    pub fn validate(&self, set: &str) -> Result<(), CatalogError> {
        let mut seen: BTreeMap<i64, &str> = BTreeMap::new();
        for (name, &weight) in &self.0 {
            if weight <= 0 || weight.count_ones() != 1 {
                return Err(CatalogError::InvalidFeatureWeight {
                    set: set.to_string(),
                    feature: name.clone(),
                    weight,
                });
            }
            if let Some(other) = seen.insert(weight, name) {
                return Err(CatalogError::SharedFeatureBit {
                    set: set.to_string(),
                    first: other.to_string(),
                    second: name.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn weight(&self, name: &str) -> Option<i64> {
        self.0.get(name).copied()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// ORs the weights of `names`. Empty names are skipped; unknown names fail.
    pub fn encode<'a, I>(&self, names: I) -> Result<i64, SearchError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        names
            .into_iter()
            .filter(|n| !n.is_empty())
            .try_fold(0i64, |mask, name| {
                self.weight(name)
                    .map(|w| mask | w)
                    .ok_or_else(|| SearchError::InvalidFeature(name.to_string()))
            })
    }

    /// Encodes the comma-joined form stored in the `features` column.
    pub fn encode_joined(&self, joined: &str) -> Result<i64, SearchError> {
        self.encode(joined.split(','))
    }
}

/// True iff every requested bit is set in `stored`.
pub fn matches(stored: i64, requested: i64) -> bool {
    !stored & requested == 0
}

/// Whole `features_bit.json` document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FeatureBits {
    pub chair: FeatureTable,
    pub estate: FeatureTable,
}

impl FeatureBits {
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let bits: FeatureBits =
            serde_json::from_str(&raw).map_err(|source| CatalogError::Json {
                path: path.display().to_string(),
                source,
            })?;
        bits.chair.validate("chair")?;
        bits.estate.validate("estate")?;
        Ok(bits)
    }
}
