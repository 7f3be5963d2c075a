use crate::domain::catalog::SearchCondition;
use crate::domain::geo::Polygon;
use crate::domain::listing::{Estate, ListingKind};
use crate::domain::search::SearchParams;
use crate::transport::http::error::ApiError;
use crate::transport::http::handlers::common::{json_body, parse_id};
use crate::transport::http::types::{
    ApiResponse, AppState, EstateImportRequest, EstateSearchResponse, EstatesResponse,
    NazotteRequest, OkResponse,
};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use std::collections::HashMap;

#[utoipa::path(
    get,
    path = "/api/estate/search",
    params(
        ("doorHeightRangeId" = Option<String>, Query, description = "Bucket id from the door height ranges"),
        ("doorWidthRangeId" = Option<String>, Query, description = "Bucket id from the door width ranges"),
        ("rentRangeId" = Option<String>, Query, description = "Bucket id from the rent ranges"),
        ("features" = Option<String>, Query, description = "Comma separated feature names, all required"),
        ("page" = u64, Query, description = "Zero based page"),
        ("perPage" = u64, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Matching estates", body = EstateSearchResponse),
        (status = 400, description = "Invalid or empty search", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn search_estates_handler(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> Result<Json<EstateSearchResponse>, ApiError> {
    let query = state
        .service
        .prepare_search(ListingKind::Estate, &SearchParams::new(raw))?;
    let page = state.service.search_estates(&query).await?;
    Ok(Json(EstateSearchResponse {
        count: page.count,
        estates: page.items,
    }))
}

#[utoipa::path(
    get,
    path = "/api/estate/search/condition",
    responses((status = 200, description = "Estate condition document"))
)]
pub async fn estate_condition_handler(State(state): State<AppState>) -> Json<SearchCondition> {
    Json(state.service.catalog(ListingKind::Estate).condition().clone())
}

#[utoipa::path(
    get,
    path = "/api/estate/low_priced",
    responses(
        (status = 200, description = "Cheapest estates", body = EstatesResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn low_priced_estates_handler(
    State(state): State<AppState>,
) -> Result<Json<EstatesResponse>, ApiError> {
    let estates = state.service.low_priced_estates().await?;
    Ok(Json(EstatesResponse { estates }))
}

#[utoipa::path(
    get,
    path = "/api/estate/{id}",
    params(("id" = i64, Path, description = "Estate id")),
    responses(
        (status = 200, description = "Estate", body = Estate),
        (status = 400, description = "Malformed id", body = ApiResponse),
        (status = 404, description = "Unknown estate", body = ApiResponse)
    )
)]
pub async fn estate_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Estate>, ApiError> {
    let id = parse_id(&id)?;
    state
        .service
        .estate(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

#[utoipa::path(
    post,
    path = "/api/estate/req_doc/{id}",
    params(("id" = i64, Path, description = "Estate id")),
    responses(
        (status = 200, description = "Document request accepted", body = OkResponse),
        (status = 404, description = "Unknown estate", body = ApiResponse)
    )
)]
pub async fn request_document_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, ApiError> {
    let id = parse_id(&id)?;
    match state.service.estate(id).await? {
        Some(_) => Ok(Json(OkResponse::ok())),
        None => Err(ApiError::NotFound),
    }
}

#[utoipa::path(
    post,
    path = "/api/estate/nazotte",
    request_body = NazotteRequest,
    responses(
        (status = 200, description = "Estates inside the polygon, at most 50", body = EstateSearchResponse),
        (status = 400, description = "Fewer than three coordinates", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse)
    )
)]
pub async fn nazotte_handler(
    State(state): State<AppState>,
    request: Result<Json<NazotteRequest>, JsonRejection>,
) -> Result<Json<EstateSearchResponse>, ApiError> {
    let request = json_body(request, "{\"coordinates\": [{\"latitude\": .., \"longitude\": ..}]}")?;
    let polygon = Polygon::new(request.coordinates)?;
    let estates = state.service.estates_in_polygon(&polygon).await?;
    Ok(Json(EstateSearchResponse {
        count: estates.len() as i64,
        estates,
    }))
}

#[utoipa::path(
    post,
    path = "/api/estate",
    request_body = EstateImportRequest,
    responses(
        (status = 201, description = "All rows imported", body = OkResponse),
        (status = 400, description = "Unknown feature", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn import_estates_handler(
    State(state): State<AppState>,
    request: Result<Json<EstateImportRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OkResponse>), ApiError> {
    let request = json_body(request, "{\"estates\": [...]}")?;
    state.service.import_estates(&request.estates).await?;
    Ok((StatusCode::CREATED, Json(OkResponse::ok())))
}

#[utoipa::path(
    get,
    path = "/api/recommended_estate/{id}",
    params(("id" = i64, Path, description = "Chair id")),
    responses(
        (status = 200, description = "Estates whose door fits the chair", body = EstatesResponse),
        (status = 404, description = "Unknown chair", body = ApiResponse)
    )
)]
pub async fn recommended_estates_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<EstatesResponse>, ApiError> {
    let id = parse_id(&id)?;
    let estates = state
        .service
        .recommended_estates(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(EstatesResponse { estates }))
}
