pub mod paginator;
pub mod schema;

pub use paginator::{fetch_page, Page, POPULARITY_ORDER};
pub use schema::ensure_schema;
