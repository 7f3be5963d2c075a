use crate::app::Purchase;
use crate::domain::catalog::SearchCondition;
use crate::domain::listing::{Chair, ListingKind};
use crate::domain::search::SearchParams;
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{json_body, parse_id};
use crate::transport::http::types::{
    ApiResponse, AppState, ChairImportRequest, ChairSearchResponse, ChairsResponse, OkResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::collections::HashMap;

#[utoipa::path(
    get,
    path = "/api/chair/search",
    params(
        ("priceRangeId" = Option<String>, Query, description = "Bucket id from the price ranges"),
        ("heightRangeId" = Option<String>, Query, description = "Bucket id from the height ranges"),
        ("widthRangeId" = Option<String>, Query, description = "Bucket id from the width ranges"),
        ("depthRangeId" = Option<String>, Query, description = "Bucket id from the depth ranges"),
        ("kind" = Option<String>, Query, description = "Exact kind"),
        ("color" = Option<String>, Query, description = "Exact color"),
        ("features" = Option<String>, Query, description = "Comma separated feature names, all required"),
        ("page" = u64, Query, description = "Zero based page"),
        ("perPage" = u64, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Matching chairs in stock", body = ChairSearchResponse),
        (status = 400, description = "Invalid or empty search", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn search_chairs_handler(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<ChairSearchResponse>, ApiError> {
    let query = state
        .service
        .prepare_search(ListingKind::Chair, &SearchParams::new(raw))?;
    let page = state.service.search_chairs(&query).await?;
    Ok(Json(ChairSearchResponse {
        count: page.count,
        chairs: page.items,
    }))
}

#[utoipa::path(
    get,
    path = "/api/chair/search/condition",
    responses((status = 200, description = "Chair condition document"))
)]
pub async fn chair_condition_handler(State(state): State<AppState>) -> Json<SearchCondition> {
    Json(state.service.catalog(ListingKind::Chair).condition().clone())
}

#[utoipa::path(
    get,
    path = "/api/chair/low_priced",
    responses(
        (status = 200, description = "Cheapest chairs in stock", body = ChairsResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn low_priced_chairs_handler(
    State(state): State<AppState>,
) -> Result<Json<ChairsResponse>, ApiError> {
    let chairs = state.service.low_priced_chairs().await?;
    Ok(Json(ChairsResponse { chairs }))
}

#[utoipa::path(
    get,
    path = "/api/chair/{id}",
    params(("id" = i64, Path, description = "Chair id")),
    responses(
        (status = 200, description = "Chair", body = Chair),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 404, description = "Unknown or sold out", body = ApiResponse)
    )
)]
pub async fn chair_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Chair>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .chair(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[utoipa::path(
    post,
    path = "/api/chair/buy/{id}",
    params(("id" = i64, Path, description = "Chair id")),
    responses(
        (status = 200, description = "One unit purchased", body = OkResponse),
        (status = 404, description = "Unknown or sold out", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn buy_chair_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let id = parse_id(&id)?;
    match state.service.buy_chair(id).await? {
        Purchase::Completed => Ok(Json(OkResponse::ok())),
        Purchase::NotFound => Err(ApiError::NotFound),
    }
}

#[utoipa::path(
    post,
    path = "/api/chair",
    request_body = ChairImportRequest,
    responses(
        (status = 201, description = "All rows imported", body = OkResponse),
        (status = 400, description = "Unknown feature", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn import_chairs_handler(
    State(state): State<AppState>,
    request: Result<Json<ChairImportRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OkResponse>), ApiError> {
    let request = json_body(request, "{\"chairs\": [...]}")?;
    state.service.import_chairs(&request.chairs).await?;
    Ok((StatusCode::CREATED, Json(OkResponse::ok())))
}
