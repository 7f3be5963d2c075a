//! Pure domain logic: catalogs, listing schema, search lowering, geometry.

pub mod catalog;
pub mod geo;
pub mod listing;
pub mod search;

pub use catalog::{Catalog, CatalogError};
pub use listing::{Chair, ChairRecord, Estate, EstateRecord, ListingKind};
