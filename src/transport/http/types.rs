use crate::app::ListingService;
use crate::domain::geo::Coordinate;
use crate::domain::listing::{Chair, ChairRecord, Estate, EstateRecord};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<ListingService>,
}

impl AppState {
    pub fn new(service: ListingService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Envelope used for health and error responses.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ChairSearchResponse {
    /// Total matches across all pages.
    pub count: i64,
    pub chairs: Vec<Chair>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct EstateSearchResponse {
    pub count: i64,
    pub estates: Vec<Estate>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct ChairsResponse {
    pub chairs: Vec<Chair>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct EstatesResponse {
    pub estates: Vec<Estate>,
}

#[derive(Serialize, Debug, ToSchema)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct NazotteRequest {
    /// Polygon vertices in order; the ring is closed implicitly.
    pub coordinates: Vec<Coordinate>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct ChairImportRequest {
    pub chairs: Vec<ChairRecord>,
}

#[derive(Deserialize, Debug, ToSchema)]
pub struct EstateImportRequest {
    pub estates: Vec<EstateRecord>,
}
