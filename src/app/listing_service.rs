//! The listing service.
//!
//! Owns the connection pool and both catalogs. Every public operation checks
//! out at most one pooled connection (or one transaction) and gives it back on
//! every exit path by dropping it.

use crate::app::ingest::{self, DerivedColumns};
use crate::app::ServiceError;
use crate::domain::catalog::{Catalog, FeatureBits};
use crate::domain::geo::{Polygon, NAZOTTE_LIMIT};
use crate::domain::listing::{
    Chair, ChairRecord, Estate, EstateRecord, ListingKind, CHAIR_SELECT_FIELDS,
    ESTATE_SELECT_FIELDS,
};
use crate::domain::search::{PredicateBuilder, RangeStrategy, SearchError, SearchParams, SearchQuery};
use crate::infra::config;
use crate::storage::{self, Page, POPULARITY_ORDER};
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info, warn};

/// Row cap for the low-priced and recommendation listings.
pub const LIST_LIMIT: i64 = 20;

/// Outcome of a purchase attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purchase {
    Completed,
    /// No such chair, or no stock left.
    NotFound,
}

pub struct ListingService {
    pool: PgPool,
    chairs: Catalog,
    estates: Catalog,
    strategy: RangeStrategy,
}

impl ListingService {
    pub fn new(pool: PgPool, chairs: Catalog, estates: Catalog, strategy: RangeStrategy) -> Self {
        Self {
            pool,
            chairs,
            estates,
            strategy,
        }
    }

    /// Loads catalogs, connects to the database and ensures the schema, all
    /// from environment configuration.
    pub async fn connect() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();

        let (chairs, estates) = load_catalogs()?;
        let strategy = config::search_strategy()?;
        let pool = PgPoolOptions::new()
            .max_connections(config::db_max_connections()?)
            .connect(&config::database_url()?)
            .await?;
        storage::ensure_schema(&pool).await?;

        info!(%strategy, "listing service connected");
        Ok(Self::new(pool, chairs, estates, strategy))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn strategy(&self) -> RangeStrategy {
        self.strategy
    }

    pub fn catalog(&self, kind: ListingKind) -> &Catalog {
        match kind {
            ListingKind::Chair => &self.chairs,
            ListingKind::Estate => &self.estates,
        }
    }

    /// Validates and lowers raw query parameters; touches no connection.
    pub fn prepare_search(
        &self,
        kind: ListingKind,
        params: &SearchParams,
    ) -> Result<SearchQuery, SearchError> {
        PredicateBuilder::new(self.catalog(kind), self.strategy).build(params)
    }

    pub async fn search_chairs(&self, query: &SearchQuery) -> Result<Page<Chair>, ServiceError> {
        self.search(ListingKind::Chair, query).await
    }

    pub async fn search_estates(&self, query: &SearchQuery) -> Result<Page<Estate>, ServiceError> {
        self.search(ListingKind::Estate, query).await
    }

    async fn search<T>(&self, kind: ListingKind, query: &SearchQuery) -> Result<Page<T>, ServiceError>
    where
        T: for<'r> sqlx::FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
    {
        let mut conn = self.pool.acquire().await?;
        let page = storage::fetch_page(&mut conn, kind, query).await?;
        debug!(
            table = kind.table(),
            predicates = query.predicates.predicates().len(),
            count = page.count,
            returned = page.items.len(),
            "search executed"
        );
        Ok(page)
    }

    /// A chair is only visible while it has stock.
    pub async fn chair(&self, id: i64) -> Result<Option<Chair>, ServiceError> {
        let sql = format!("SELECT {CHAIR_SELECT_FIELDS} FROM chair WHERE id = $1");
        let chair: Option<Chair> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(chair.filter(|c| c.stock > 0))
    }

    pub async fn estate(&self, id: i64) -> Result<Option<Estate>, ServiceError> {
        let sql = format!("SELECT {ESTATE_SELECT_FIELDS} FROM estate WHERE id = $1");
        Ok(sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
    }

    pub async fn low_priced_chairs(&self) -> Result<Vec<Chair>, ServiceError> {
        let sql = format!(
            "SELECT {CHAIR_SELECT_FIELDS} FROM chair WHERE stock > 0 ORDER BY price ASC, id ASC LIMIT $1"
        );
        Ok(sqlx::query_as(&sql)
            .bind(LIST_LIMIT)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn low_priced_estates(&self) -> Result<Vec<Estate>, ServiceError> {
        let sql =
            format!("SELECT {ESTATE_SELECT_FIELDS} FROM estate ORDER BY rent ASC, id ASC LIMIT $1");
        Ok(sqlx::query_as(&sql)
            .bind(LIST_LIMIT)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Estates whose door fits the chair's two smallest dimensions in either
    /// orientation. `None` when the chair does not exist.
    pub async fn recommended_estates(&self, chair_id: i64) -> Result<Option<Vec<Estate>>, ServiceError> {
        let mut conn = self.pool.acquire().await?;

        let sql = format!("SELECT {CHAIR_SELECT_FIELDS} FROM chair WHERE id = $1");
        let chair: Option<Chair> = sqlx::query_as(&sql)
            .bind(chair_id)
            .fetch_optional(&mut *conn)
            .await?;
        let Some(chair) = chair else {
            return Ok(None);
        };

        let mut dims = [chair.width, chair.height, chair.depth];
        dims.sort_unstable();
        let (short, mid) = (dims[0], dims[1]);

        let sql = format!(
            "SELECT {ESTATE_SELECT_FIELDS} FROM estate \
             WHERE (door_width >= $1 AND door_height >= $2) OR (door_width >= $2 AND door_height >= $1)\
             {POPULARITY_ORDER} LIMIT $3"
        );
        let estates = sqlx::query_as(&sql)
            .bind(short)
            .bind(mid)
            .bind(LIST_LIMIT)
            .fetch_all(&mut *conn)
            .await?;
        Ok(Some(estates))
    }

    /// Estates whose location lies inside `polygon` (edges and vertices
    /// included), most popular first, at most [`NAZOTTE_LIMIT`].
    pub async fn estates_in_polygon(&self, polygon: &Polygon) -> Result<Vec<Estate>, ServiceError> {
        let sql = format!(
            "SELECT {ESTATE_SELECT_FIELDS} FROM estate \
             WHERE latitude_longitude <@ $1::polygon{POPULARITY_ORDER} LIMIT $2"
        );
        let estates: Vec<Estate> = sqlx::query_as(&sql)
            .bind(polygon.to_pg_literal())
            .bind(NAZOTTE_LIMIT)
            .fetch_all(&self.pool)
            .await?;
        debug!(
            vertices = polygon.vertices().len(),
            returned = estates.len(),
            "containment search executed"
        );
        Ok(estates)
    }

    /// Decrements a chair's stock by one under a row lock.
    pub async fn buy_chair(&self, id: i64) -> Result<Purchase, ServiceError> {
        let mut tx = self.pool.begin().await?;

        let outcome = decrement_stock(&mut tx, id).await;
        match outcome {
            Ok(true) => {
                tx.commit().await?;
                info!(chair_id = id, "chair purchased");
                Ok(Purchase::Completed)
            }
            Ok(false) => {
                tx.rollback().await?;
                Ok(Purchase::NotFound)
            }
            Err(e) => {
                if let Err(rollback_err) = tx.rollback().await {
                    warn!(chair_id = id, error = %rollback_err, "rollback after failed purchase failed");
                }
                Err(e.into())
            }
        }
    }

    /// Inserts all rows in one transaction; nothing is written if any row fails.
    pub async fn import_chairs(&self, records: &[ChairRecord]) -> Result<usize, ServiceError> {
        let rows = records
            .iter()
            .map(|r| DerivedColumns::chair(&self.chairs, r).map(|d| (r, d)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.pool.begin().await?;
        for (record, derived) in &rows {
            let inserted = ingest::insert_chair(&mut tx, record, derived).await;
            if let Err(e) = inserted {
                rollback_import(tx, ListingKind::Chair).await;
                return Err(e.into());
            }
        }
        tx.commit().await?;
        info!(rows = rows.len(), "chairs imported");
        Ok(rows.len())
    }

    pub async fn import_estates(&self, records: &[EstateRecord]) -> Result<usize, ServiceError> {
        let rows = records
            .iter()
            .map(|r| DerivedColumns::estate(&self.estates, r).map(|d| (r, d)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut tx = self.pool.begin().await?;
        for (record, derived) in &rows {
            let inserted = ingest::insert_estate(&mut tx, record, derived).await;
            if let Err(e) = inserted {
                rollback_import(tx, ListingKind::Estate).await;
                return Err(e.into());
            }
        }
        tx.commit().await?;
        info!(rows = rows.len(), "estates imported");
        Ok(rows.len())
    }
}

/// Reads both catalogs from the configured paths.
pub fn load_catalogs() -> anyhow::Result<(Catalog, Catalog)> {
    let bits = FeatureBits::load(&config::features_bit_path())?;
    let chairs = Catalog::load(ListingKind::Chair, &config::chair_condition_path(), &bits)?;
    let estates = Catalog::load(ListingKind::Estate, &config::estate_condition_path(), &bits)?;
    Ok((chairs, estates))
}

/// `true` if a unit was taken; `false` if the chair is missing or sold out.
async fn decrement_stock(conn: &mut PgConnection, id: i64) -> Result<bool, sqlx::Error> {
    let locked: Option<i64> =
        sqlx::query_scalar("SELECT id FROM chair WHERE id = $1 AND stock > 0 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
    if locked.is_none() {
        return Ok(false);
    }
    sqlx::query("UPDATE chair SET stock = stock - 1 WHERE id = $1")
        .bind(id)
        .execute(&mut *conn)
        .await?;
    Ok(true)
}

async fn rollback_import(tx: sqlx::Transaction<'_, sqlx::Postgres>, kind: ListingKind) {
    if let Err(e) = tx.rollback().await {
        warn!(table = kind.table(), error = %e, "rollback after failed import failed");
    }
}
