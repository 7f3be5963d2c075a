//! Idempotent table setup for the listing catalogs.

use sqlx::PgPool;
use tracing::debug;

const STATEMENTS: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS chair (
        id BIGINT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        thumbnail TEXT NOT NULL,
        price BIGINT NOT NULL,
        height BIGINT NOT NULL,
        width BIGINT NOT NULL,
        depth BIGINT NOT NULL,
        color TEXT NOT NULL,
        features TEXT NOT NULL,
        kind TEXT NOT NULL,
        popularity BIGINT NOT NULL,
        stock BIGINT NOT NULL CHECK (stock >= 0),
        features_bit BIGINT NOT NULL DEFAULT 0,
        price_range BIGINT NOT NULL,
        height_range BIGINT NOT NULL,
        width_range BIGINT NOT NULL,
        depth_range BIGINT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS estate (
        id BIGINT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL,
        thumbnail TEXT NOT NULL,
        address TEXT NOT NULL,
        latitude_longitude POINT NOT NULL,
        rent BIGINT NOT NULL,
        door_height BIGINT NOT NULL,
        door_width BIGINT NOT NULL,
        features TEXT NOT NULL,
        popularity BIGINT NOT NULL,
        features_bit BIGINT NOT NULL DEFAULT 0,
        rent_range BIGINT NOT NULL,
        door_height_range BIGINT NOT NULL,
        door_width_range BIGINT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS chair_popularity_idx ON chair (popularity DESC, id ASC)",
    "CREATE INDEX IF NOT EXISTS chair_price_idx ON chair (price, id)",
    "CREATE INDEX IF NOT EXISTS chair_price_range_idx ON chair (price_range)",
    "CREATE INDEX IF NOT EXISTS chair_height_range_idx ON chair (height_range)",
    "CREATE INDEX IF NOT EXISTS chair_width_range_idx ON chair (width_range)",
    "CREATE INDEX IF NOT EXISTS chair_depth_range_idx ON chair (depth_range)",
    "CREATE INDEX IF NOT EXISTS estate_popularity_idx ON estate (popularity DESC, id ASC)",
    "CREATE INDEX IF NOT EXISTS estate_rent_idx ON estate (rent, id)",
    "CREATE INDEX IF NOT EXISTS estate_rent_range_idx ON estate (rent_range)",
    "CREATE INDEX IF NOT EXISTS estate_door_height_range_idx ON estate (door_height_range)",
    "CREATE INDEX IF NOT EXISTS estate_door_width_range_idx ON estate (door_width_range)",
    "CREATE INDEX IF NOT EXISTS estate_location_idx ON estate USING gist (latitude_longitude)",
];

/// Creates the `chair` and `estate` tables and their indexes if missing.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    for statement in STATEMENTS {
        sqlx::query(statement).execute(pool).await?;
    }
    debug!(statements = STATEMENTS.len(), "listing schema ensured");
    Ok(())
}
