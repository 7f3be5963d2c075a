//! COUNT + page SELECT over one predicate set.

use crate::domain::listing::ListingKind;
use crate::domain::search::SearchQuery;
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection, Postgres, QueryBuilder, Row};

/// Fixed result order for every popularity-ranked listing query.
pub const POPULARITY_ORDER: &str = " ORDER BY popularity DESC, id ASC";

#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Rows matching the predicates, independent of the requested page.
    pub count: i64,
    pub items: Vec<T>,
}

/// Runs the count and the page query on the same connection with the same
/// predicates, so the total and the page cannot disagree about the filter.
pub async fn fetch_page<T>(
    conn: &mut PgConnection,
    kind: ListingKind,
    query: &SearchQuery,
) -> Result<Page<T>, sqlx::Error>
where
    T: for<'r> FromRow<'r, PgRow> + Send + Unpin,
{
    let mut count_qb: QueryBuilder<Postgres> =
        QueryBuilder::new(format!("SELECT COUNT(*) FROM {}", kind.table()));
    query.predicates.push_where(&mut count_qb);
    let count: i64 = count_qb.build().fetch_one(&mut *conn).await?.try_get(0)?;

    let mut page_qb: QueryBuilder<Postgres> = QueryBuilder::new(format!(
        "SELECT {} FROM {}",
        kind.select_fields(),
        kind.table()
    ));
    query.predicates.push_where(&mut page_qb);
    page_qb
        .push(POPULARITY_ORDER)
        .push(" LIMIT ")
        .push_bind(query.pagination.limit())
        .push(" OFFSET ")
        .push_bind(query.pagination.offset());
    let items = page_qb.build_query_as::<T>().fetch_all(&mut *conn).await?;

    Ok(Page { count, items })
}
