//! Search & filter engine: raw query parameters → validated filters →
//! parameterized predicates → paginated query.

pub mod error;
pub mod filter;
pub mod pagination;
pub mod predicate;

pub use error::SearchError;
pub use filter::{FilterIntent, SearchParams};
pub use pagination::Pagination;
pub use predicate::{Predicate, PredicateBuilder, PredicateSet, RangeStrategy, SearchQuery};
