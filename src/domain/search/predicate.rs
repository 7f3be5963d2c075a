//! Lowering of filter intents to parameterized SQL predicates.
//!
//! Column names come from the static listing schema; every client-supplied
//! value goes through `push_bind`.

use crate::domain::catalog::Catalog;
use crate::domain::search::filter::{FilterIntent, SearchParams};
use crate::domain::search::{Pagination, SearchError};
use sqlx::{Postgres, QueryBuilder};
use std::fmt;
use std::str::FromStr;

/// How `<attr>RangeId` filters reach the database.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RangeStrategy {
    /// Compare the raw column against the bucket's bounds.
    #[default]
    Interval,
    /// Compare the precomputed `*_range` column against the bucket id.
    Bucketed,
}

impl FromStr for RangeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "interval" => Ok(RangeStrategy::Interval),
            "bucketed" => Ok(RangeStrategy::Bucketed),
            other => Err(format!("unknown search strategy '{other}' (expected interval|bucketed)")),
        }
    }
}

impl fmt::Display for RangeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeStrategy::Interval => f.write_str("interval"),
            RangeStrategy::Bucketed => f.write_str("bucketed"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    AtLeast { column: &'static str, bound: i64 },
    Below { column: &'static str, bound: i64 },
    BucketIs { column: &'static str, bucket_id: i64 },
    Equals { column: &'static str, value: String },
    HasAllFeatures { mask: i64 },
    InStock,
}

impl Predicate {
    fn push_to(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        match self {
            Predicate::AtLeast { column, bound } => {
                qb.push(*column).push(" >= ").push_bind(*bound);
            }
            Predicate::Below { column, bound } => {
                qb.push(*column).push(" < ").push_bind(*bound);
            }
            Predicate::BucketIs { column, bucket_id } => {
                qb.push(*column).push(" = ").push_bind(*bucket_id);
            }
            Predicate::Equals { column, value } => {
                qb.push(*column).push(" = ").push_bind(value.clone());
            }
            Predicate::HasAllFeatures { mask } => {
                qb.push("((~features_bit) & ").push_bind(*mask).push(") = 0");
            }
            Predicate::InStock => {
                qb.push("stock > 0");
            }
        }
    }
}

/// AND-joined predicates, owned by a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PredicateSet(Vec<Predicate>);

impl PredicateSet {
    pub fn predicates(&self) -> &[Predicate] {
        &self.0
    }

    /// Appends ` WHERE p1 AND p2 ...`; nothing for an empty set.
    pub fn push_where(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        for (i, predicate) in self.0.iter().enumerate() {
            qb.push(if i == 0 { " WHERE " } else { " AND " });
            predicate.push_to(qb);
        }
    }
}

/// Fully validated search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub predicates: PredicateSet,
    pub pagination: Pagination,
}

pub struct PredicateBuilder<'a> {
    catalog: &'a Catalog,
    strategy: RangeStrategy,
}

impl<'a> PredicateBuilder<'a> {
    pub fn new(catalog: &'a Catalog, strategy: RangeStrategy) -> Self {
        Self { catalog, strategy }
    }

    /// Validates `params` and lowers them. Checks run in order: filters,
    /// non-empty filter set, pagination.
    pub fn build(&self, params: &SearchParams) -> Result<SearchQuery, SearchError> {
        let intents = FilterIntent::collect(self.catalog, params)?;
        let predicates = self.lower(&intents)?;
        let pagination = Pagination::parse(params.get("page"), params.get("perPage"))?;
        Ok(SearchQuery {
            predicates,
            pagination,
        })
    }

    pub fn lower(&self, intents: &[FilterIntent<'_>]) -> Result<PredicateSet, SearchError> {
        let mut out = Vec::new();

        for intent in intents {
            match intent {
                FilterIntent::Range { range, bucket } => match self.strategy {
                    RangeStrategy::Interval => {
                        if let Some(min) = bucket.lower() {
                            out.push(Predicate::AtLeast {
                                column: range.attr.column,
                                bound: min,
                            });
                        }
                        if let Some(max) = bucket.upper() {
                            out.push(Predicate::Below {
                                column: range.attr.column,
                                bound: max,
                            });
                        }
                    }
                    RangeStrategy::Bucketed => out.push(Predicate::BucketIs {
                        column: range.attr.range_column,
                        bucket_id: bucket.id as i64,
                    }),
                },
                FilterIntent::Exact { attr, value } => out.push(Predicate::Equals {
                    column: attr.column,
                    value: value.clone(),
                }),
                FilterIntent::Features { names } => {
                    let mask = self
                        .catalog
                        .features()
                        .encode(names.iter().map(String::as_str))?;
                    out.push(Predicate::HasAllFeatures { mask });
                }
            }
        }

        if out.is_empty() {
            return Err(SearchError::EmptySearch);
        }
        if self.catalog.kind().requires_stock() {
            out.push(Predicate::InStock);
        }
        Ok(PredicateSet(out))
    }
}
