use crate::domain::geo::Coordinate;
use crate::domain::listing::{Chair, ChairRecord, Estate, EstateRecord};
use crate::transport::http::handlers::{chair, estate, health};
use crate::transport::http::types::{
    ApiResponse, AppState, ChairImportRequest, ChairSearchResponse, ChairsResponse,
    EstateImportRequest, EstateSearchResponse, EstatesResponse, NazotteRequest, OkResponse,
};
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health::healthcheck_handler,
        chair::search_chairs_handler,
        chair::chair_condition_handler,
        chair::low_priced_chairs_handler,
        chair::chair_detail_handler,
        chair::buy_chair_handler,
        chair::import_chairs_handler,
        estate::search_estates_handler,
        estate::estate_condition_handler,
        estate::low_priced_estates_handler,
        estate::estate_detail_handler,
        estate::request_document_handler,
        estate::nazotte_handler,
        estate::import_estates_handler,
        estate::recommended_estates_handler
    ),
    components(schemas(
        ApiResponse,
        Chair,
        Estate,
        ChairRecord,
        EstateRecord,
        Coordinate,
        ChairSearchResponse,
        EstateSearchResponse,
        ChairsResponse,
        EstatesResponse,
        OkResponse,
        NazotteRequest,
        ChairImportRequest,
        EstateImportRequest
    ))
)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::healthcheck_handler))
        .route("/api/chair", post(chair::import_chairs_handler))
        .route("/api/chair/search", get(chair::search_chairs_handler))
        .route("/api/chair/search/condition", get(chair::chair_condition_handler))
        .route("/api/chair/low_priced", get(chair::low_priced_chairs_handler))
        .route("/api/chair/buy/:id", post(chair::buy_chair_handler))
        .route("/api/chair/:id", get(chair::chair_detail_handler))
        .route("/api/estate", post(estate::import_estates_handler))
        .route("/api/estate/search", get(estate::search_estates_handler))
        .route("/api/estate/search/condition", get(estate::estate_condition_handler))
        .route("/api/estate/low_priced", get(estate::low_priced_estates_handler))
        .route("/api/estate/nazotte", post(estate::nazotte_handler))
        .route("/api/estate/req_doc/:id", post(estate::request_document_handler))
        .route("/api/estate/:id", get(estate::estate_detail_handler))
        .route(
            "/api/recommended_estate/:id",
            get(estate::recommended_estates_handler),
        )
        .with_state(app_state)
}

/// Router plus Swagger UI, CORS and request tracing.
pub fn build_app(app_state: AppState) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
