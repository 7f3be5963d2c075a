pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{ListingService, Purchase, ServiceError};
pub use domain::catalog::{Catalog, CatalogError, FeatureBits};
pub use domain::search::{RangeStrategy, SearchError};
