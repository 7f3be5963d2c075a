//! Bulk import: derived columns and transactional inserts.
//!
//! `features_bit` and every `*_range` column are computed here, once, from the
//! same catalog the search path uses. Range columns are bound by column name.

use crate::app::ServiceError;
use crate::domain::catalog::Catalog;
use crate::domain::listing::{ChairRecord, EstateRecord};
use sqlx::{PgConnection, Postgres, QueryBuilder};

/// Columns computed at import time for one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedColumns {
    pub features_bit: i64,
    /// `(range column, bucket id)` in catalog order.
    pub ranges: Vec<(&'static str, i64)>,
}

impl DerivedColumns {
    pub fn compute<F>(catalog: &Catalog, features: &str, numeric: F) -> Result<Self, ServiceError>
    where
        F: Fn(&str) -> Option<i64>,
    {
        let features_bit = catalog.features().encode_joined(features)?;
        let ranges = catalog
            .ranges()
            .iter()
            .map(|range| {
                let value = numeric(range.attr.column)
                    .ok_or(ServiceError::MissingColumn(range.attr.column))?;
                Ok((range.attr.range_column, range.bucket_of(value) as i64))
            })
            .collect::<Result<Vec<_>, ServiceError>>()?;
        Ok(Self {
            features_bit,
            ranges,
        })
    }

    pub fn chair(catalog: &Catalog, record: &ChairRecord) -> Result<Self, ServiceError> {
        Self::compute(catalog, &record.features, |c| record.numeric(c))
    }

    pub fn estate(catalog: &Catalog, record: &EstateRecord) -> Result<Self, ServiceError> {
        Self::compute(catalog, &record.features, |c| record.numeric(c))
    }

    fn push_column_names(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(", features_bit");
        for (column, _) in &self.ranges {
            qb.push(", ").push(*column);
        }
    }

    fn push_values(&self, qb: &mut QueryBuilder<'_, Postgres>) {
        qb.push(", ").push_bind(self.features_bit);
        for (_, bucket) in &self.ranges {
            qb.push(", ").push_bind(*bucket);
        }
    }
}

pub(crate) async fn insert_chair(
    conn: &mut PgConnection,
    record: &ChairRecord,
    derived: &DerivedColumns,
) -> Result<(), sqlx::Error> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO chair (id, name, description, thumbnail, price, height, width, depth, \
         color, features, kind, popularity, stock",
    );
    derived.push_column_names(&mut qb);
    qb.push(") VALUES (");
    {
        let mut values = qb.separated(", ");
        values
            .push_bind(record.id)
            .push_bind(record.name.clone())
            .push_bind(record.description.clone())
            .push_bind(record.thumbnail.clone())
            .push_bind(record.price)
            .push_bind(record.height)
            .push_bind(record.width)
            .push_bind(record.depth)
            .push_bind(record.color.clone())
            .push_bind(record.features.clone())
            .push_bind(record.kind.clone())
            .push_bind(record.popularity)
            .push_bind(record.stock);
    }
    derived.push_values(&mut qb);
    qb.push(")");
    qb.build().execute(&mut *conn).await?;
    Ok(())
}

pub(crate) async fn insert_estate(
    conn: &mut PgConnection,
    record: &EstateRecord,
    derived: &DerivedColumns,
) -> Result<(), sqlx::Error> {
    let mut qb: QueryBuilder<Postgres> = QueryBuilder::new(
        "INSERT INTO estate (id, name, description, thumbnail, address, latitude_longitude, \
         rent, door_height, door_width, features, popularity",
    );
    derived.push_column_names(&mut qb);
    qb.push(") VALUES (")
        .push_bind(record.id)
        .push(", ")
        .push_bind(record.name.clone())
        .push(", ")
        .push_bind(record.description.clone())
        .push(", ")
        .push_bind(record.thumbnail.clone())
        .push(", ")
        .push_bind(record.address.clone())
        .push(", point(")
        .push_bind(record.latitude)
        .push(", ")
        .push_bind(record.longitude)
        .push("), ")
        .push_bind(record.rent)
        .push(", ")
        .push_bind(record.door_height)
        .push(", ")
        .push_bind(record.door_width)
        .push(", ")
        .push_bind(record.features.clone())
        .push(", ")
        .push_bind(record.popularity);
    derived.push_values(&mut qb);
    qb.push(")");
    qb.build().execute(&mut *conn).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::fixtures::{chair_catalog, estate_catalog};
    use crate::domain::search::SearchError;

    fn chair(price: i64, height: i64, width: i64, depth: i64, features: &str) -> ChairRecord {
        ChairRecord {
            id: 1,
            name: "chair".into(),
            description: String::new(),
            thumbnail: String::new(),
            price,
            height,
            width,
            depth,
            color: "黒".into(),
            features: features.into(),
            kind: "座椅子".into(),
            popularity: 0,
            stock: 1,
        }
    }

    #[test]
    fn range_ids_are_bound_to_their_own_columns() {
        let catalog = chair_catalog();
        // Every dimension lands in a different bucket so a swapped binding would show.
        let derived = DerivedColumns::chair(&catalog, &chair(15000, 50, 90, 120, "")).unwrap();
        assert_eq!(
            derived.ranges,
            vec![
                ("price_range", 5),
                ("height_range", 0),
                ("width_range", 1),
                ("depth_range", 2)
            ]
        );
    }

    #[test]
    fn written_ids_equal_the_bucket_of_each_field() {
        let catalog = estate_catalog();
        let record = EstateRecord {
            id: 9,
            name: "estate".into(),
            description: String::new(),
            thumbnail: String::new(),
            address: String::new(),
            latitude: 35.0,
            longitude: 139.0,
            rent: 99_999,
            door_height: 150,
            door_width: 79,
            features: "駅近".into(),
            popularity: 3,
        };
        let derived = DerivedColumns::estate(&catalog, &record).unwrap();
        for (column, bucket) in &derived.ranges {
            let range = catalog
                .ranges()
                .iter()
                .find(|r| r.attr.range_column == *column)
                .unwrap();
            let value = record.numeric(range.attr.column).unwrap();
            assert_eq!(*bucket, range.bucket_of(value) as i64, "{column}");
            assert!(range.buckets()[*bucket as usize].contains(value));
        }
        assert_eq!(derived.features_bit, 2);
    }

    #[test]
    fn unknown_feature_fails_the_row() {
        let catalog = chair_catalog();
        let err = DerivedColumns::chair(&catalog, &chair(1, 1, 1, 1, "肘掛け,空飛ぶ")).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Search(SearchError::InvalidFeature(ref f)) if f == "空飛ぶ"
        ));
    }

    #[test]
    fn insert_statement_names_every_derived_column() {
        let catalog = chair_catalog();
        let derived = DerivedColumns::chair(&catalog, &chair(1, 1, 1, 1, "キャスター")).unwrap();
        let mut qb: QueryBuilder<Postgres> = QueryBuilder::new("INSERT INTO chair (id");
        derived.push_column_names(&mut qb);
        qb.push(") VALUES ($0");
        derived.push_values(&mut qb);
        qb.push(")");
        assert_eq!(
            qb.sql(),
            "INSERT INTO chair (id, features_bit, price_range, height_range, width_range, depth_range) \
             VALUES ($0, $1, $2, $3, $4, $5)"
        );
    }
}
