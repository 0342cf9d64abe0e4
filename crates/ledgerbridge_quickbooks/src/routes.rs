// --- File: crates/ledgerbridge_quickbooks/src/routes.rs ---

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::handlers::{
    company_info_handler, create_invoice_handler, customer_invoices_handler, customers_handler,
    inventory_handler, invoices_handler, refresh_handler, QuickBooksState,
};

/// Creates a router containing all QuickBooks proxy routes.
///
/// The state is built by the caller so tests can hand in an in-memory token
/// store and a mock provider.
pub fn routes(state: Arc<QuickBooksState>) -> Router {
    Router::new()
        .route("/customer-info", get(company_info_handler))
        .route("/refresh", get(refresh_handler))
        .route("/customers", get(customers_handler))
        .route("/invoices", get(invoices_handler))
        .route("/customer-invoices", get(customer_invoices_handler))
        .route("/create-invoice", post(create_invoice_handler))
        .route("/inventory", get(inventory_handler))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryTokenStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use ledgerbridge_config::AppConfig;
    use tower::ServiceExt;

    fn test_router() -> Router {
        let state = QuickBooksState::new(
            Arc::new(AppConfig::default()),
            Arc::new(InMemoryTokenStore::new()),
            reqwest::Client::new(),
        );
        routes(Arc::new(state))
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let response = test_router()
            .oneshot(Request::builder().uri("/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_create_invoice_rejects_get() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/create-invoice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
