//! Listing kinds (chair / estate), their row types, and the static description
//! of which query parameters map onto which columns.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A numeric attribute that is filtered through the range catalog.
#[derive(Debug, PartialEq, Eq)]
pub struct RangeAttribute {
    /// Query parameter carrying the bucket id, e.g. `priceRangeId`.
    pub param: &'static str,
    /// Key of the attribute in the condition document, e.g. `doorHeight`.
    pub condition_key: &'static str,
    /// Raw numeric column.
    pub column: &'static str,
    /// Precomputed bucket id column.
    pub range_column: &'static str,
}

/// A text attribute matched by plain equality.
#[derive(Debug, PartialEq, Eq)]
pub struct ExactAttribute {
    pub param: &'static str,
    pub column: &'static str,
}

const CHAIR_RANGES: &[RangeAttribute] = &[
    RangeAttribute {
        param: "priceRangeId",
        condition_key: "price",
        column: "price",
        range_column: "price_range",
    },
    RangeAttribute {
        param: "heightRangeId",
        condition_key: "height",
        column: "height",
        range_column: "height_range",
    },
    RangeAttribute {
        param: "widthRangeId",
        condition_key: "width",
        column: "width",
        range_column: "width_range",
    },
    RangeAttribute {
        param: "depthRangeId",
        condition_key: "depth",
        column: "depth",
        range_column: "depth_range",
    },
];

const ESTATE_RANGES: &[RangeAttribute] = &[
    RangeAttribute {
        param: "doorHeightRangeId",
        condition_key: "doorHeight",
        column: "door_height",
        range_column: "door_height_range",
    },
    RangeAttribute {
        param: "doorWidthRangeId",
        condition_key: "doorWidth",
        column: "door_width",
        range_column: "door_width_range",
    },
    RangeAttribute {
        param: "rentRangeId",
        condition_key: "rent",
        column: "rent",
        range_column: "rent_range",
    },
];

const CHAIR_EXACT: &[ExactAttribute] = &[
    ExactAttribute {
        param: "kind",
        column: "kind",
    },
    ExactAttribute {
        param: "color",
        column: "color",
    },
];

pub const CHAIR_SELECT_FIELDS: &str = "id, name, description, thumbnail, price, height, width, depth, \
     color, features, kind, popularity, stock";

pub const ESTATE_SELECT_FIELDS: &str = "id, thumbnail, latitude_longitude[0] AS latitude, \
     latitude_longitude[1] AS longitude, name, address, rent, door_height, door_width, \
     popularity, description, features";

/// The two catalogs served by this service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListingKind {
    Chair,
    Estate,
}

impl ListingKind {
    pub fn table(self) -> &'static str {
        match self {
            ListingKind::Chair => "chair",
            ListingKind::Estate => "estate",
        }
    }

    /// Key of this kind's table in `features_bit.json`.
    pub fn feature_set(self) -> &'static str {
        self.table()
    }

    pub fn range_attributes(self) -> &'static [RangeAttribute] {
        match self {
            ListingKind::Chair => CHAIR_RANGES,
            ListingKind::Estate => ESTATE_RANGES,
        }
    }

    pub fn exact_attributes(self) -> &'static [ExactAttribute] {
        match self {
            ListingKind::Chair => CHAIR_EXACT,
            ListingKind::Estate => &[],
        }
    }

    /// Chairs are only listed while there is stock left to sell.
    pub fn requires_stock(self) -> bool {
        matches!(self, ListingKind::Chair)
    }

    pub fn select_fields(self) -> &'static str {
        match self {
            ListingKind::Chair => CHAIR_SELECT_FIELDS,
            ListingKind::Estate => ESTATE_SELECT_FIELDS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Chair {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub price: i64,
    pub height: i64,
    pub width: i64,
    pub depth: i64,
    pub color: String,
    pub features: String,
    pub kind: String,
    pub popularity: i64,
    pub stock: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Estate {
    pub id: i64,
    pub thumbnail: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rent: i64,
    pub door_height: i64,
    pub door_width: i64,
    pub popularity: i64,
    pub features: String,
}

/// One chair row as handed over by the bulk importer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChairRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub price: i64,
    pub height: i64,
    pub width: i64,
    pub depth: i64,
    pub color: String,
    #[serde(default)]
    pub features: String,
    pub kind: String,
    pub popularity: i64,
    pub stock: i64,
}

impl ChairRecord {
    /// Value of a ranged numeric column, looked up by column name.
    pub fn numeric(&self, column: &str) -> Option<i64> {
        match column {
            "price" => Some(self.price),
            "height" => Some(self.height),
            "width" => Some(self.width),
            "depth" => Some(self.depth),
            _ => None,
        }
    }
}

/// One estate row as handed over by the bulk importer.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EstateRecord {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub thumbnail: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub rent: i64,
    pub door_height: i64,
    pub door_width: i64,
    #[serde(default)]
    pub features: String,
    pub popularity: i64,
}

impl EstateRecord {
    pub fn numeric(&self, column: &str) -> Option<i64> {
        match column {
            "rent" => Some(self.rent),
            "door_height" => Some(self.door_height),
            "door_width" => Some(self.door_width),
            _ => None,
        }
    }
}
