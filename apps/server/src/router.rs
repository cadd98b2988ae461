use axum::Router;
use fitclass::server::{ApiState, not_found, prediction_router};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(info(
    title = "Fitness Membership Classifier",
    description = "Predicts a fitness membership category from user attributes"
))]
struct ApiDoc;

pub(crate) fn init(state: ApiState) -> Router {
    let api = ApiDoc::openapi();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(prediction_router())
        .with_state(state)
        .split_for_parts();

    let scalar_routes = Scalar::with_url("/docs", api_doc);

    Router::new()
        .merge(openapi_routes)
        .merge(scalar_routes)
        .fallback(not_found)
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
}
