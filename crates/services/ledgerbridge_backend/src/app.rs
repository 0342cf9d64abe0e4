// File: services/ledgerbridge_backend/src/app.rs
use axum::Router;
use http::HeaderValue;
use ledgerbridge_config::CorsConfig;
use ledgerbridge_quickbooks::{routes as quickbooks_routes, QuickBooksState};
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

/// Browser access for the configured front-end origins. Methods and headers
/// are echoed back from the preflight request, and credentials are allowed.
pub fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Assemble the full application router from an already built state.
pub fn build_app(state: Arc<QuickBooksState>) -> Router {
    let cors = cors_layer(&state.config.cors);

    #[allow(unused_mut)] // mutated only with the openapi feature
    let mut app = quickbooks_routes(state);

    #[cfg(feature = "openapi")]
    {
        use ledgerbridge_quickbooks::doc::QuickBooksApiDoc;
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        #[derive(OpenApi)]
        #[openapi(
            info(
                title = "Ledgerbridge API",
                version = "0.1.0",
                description = "Thin proxy over the QuickBooks Online accounting API",
                license(name = "MIT", url = "https://opensource.org/licenses/MIT")
            ),
            tags( (name = "Ledgerbridge", description = "Core service endpoints")),
        )]
        struct ApiDoc;

        let mut openapi_doc = ApiDoc::openapi();
        openapi_doc.merge(QuickBooksApiDoc::openapi());
        tracing::info!("Adding Swagger UI at /docs");

        app = app.merge(SwaggerUi::new("/docs").url("/docs/openapi.json", openapi_doc));
    }

    app.layer(TraceLayer::new_for_http()).layer(cors)
}
