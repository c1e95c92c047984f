pub mod docs;
pub mod extract;
pub mod handlers;
pub mod state;

use axum::{
    Router,
    routing::get,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    trace::TraceLayer,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::service::ServiceContext;
use docs::ApiDoc;
use state::AppState;

pub fn create_app(service_context: Arc<ServiceContext>) -> Router {
    let app_state = AppState::new(service_context);

    Router::new()
        // Root and health endpoints
        .route("/", get(handlers::root::root))
        .route("/health", get(handlers::root::health_check))

        // Registration API
        .merge(member_routes())

        // OpenAPI document and Swagger UI
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))

        // Add state to the router
        .with_state(app_state)

        // Middleware
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive()) // The admin UI is served from another origin
        .layer(TraceLayer::new_for_http())
}

fn member_routes() -> Router<AppState> {
    use handlers::members;

    Router::new()
        .route("/registered", get(members::list).post(members::create))
        .route("/registered/", get(members::list).post(members::create))
        .route("/registered/summary", get(members::summary))
        .route(
            "/registered/:id",
            get(members::get).put(members::update).delete(members::delete),
        )
}
