//! Raw query parameters → closed set of filter intents.

use crate::domain::catalog::{BoundRange, Bucket, Catalog};
use crate::domain::listing::ExactAttribute;
use crate::domain::search::SearchError;
use std::collections::HashMap;

/// Query string as received; only recognized keys are ever read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams(HashMap<String, String>);

impl SearchParams {
    pub fn new(raw: HashMap<String, String>) -> Self {
        Self(raw)
    }

    /// Empty values count as absent.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str).filter(|v| !v.is_empty())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchParams {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// One validated filter. Bucket references point into the catalog, so an
/// intent can only exist for a bucket that exists.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterIntent<'a> {
    Range {
        range: &'a BoundRange,
        bucket: Bucket,
    },
    Exact {
        attr: &'static ExactAttribute,
        value: String,
    },
    Features {
        names: Vec<String>,
    },
}

impl<'a> FilterIntent<'a> {
    /// Collects intents in a fixed order: ranges, exact matches, then features.
    pub fn collect(catalog: &'a Catalog, params: &SearchParams) -> Result<Vec<Self>, SearchError> {
        let mut intents = Vec::new();

        for range in catalog.ranges() {
            let Some(raw) = params.get(range.attr.param) else {
                continue;
            };
            let bucket = raw
                .parse::<usize>()
                .ok()
                .and_then(|id| range.bucket(id))
                .ok_or_else(|| SearchError::InvalidRange {
                    param: range.attr.param,
                    value: raw.to_string(),
                })?;
            intents.push(FilterIntent::Range {
                range,
                bucket: *bucket,
            });
        }

        for attr in catalog.kind().exact_attributes() {
            if let Some(value) = params.get(attr.param) {
                intents.push(FilterIntent::Exact {
                    attr,
                    value: value.to_string(),
                });
            }
        }

        if let Some(raw) = params.get("features") {
            let names: Vec<String> = raw
                .split(',')
                .filter(|n| !n.is_empty())
                .map(str::to_string)
                .collect();
            if !names.is_empty() {
                intents.push(FilterIntent::Features { names });
            }
        }

        Ok(intents)
    }
}
