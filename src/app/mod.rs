pub mod error;
pub mod ingest;
pub mod listing_service;

pub use error::ServiceError;
pub use listing_service::{load_catalogs, ListingService, Purchase};
