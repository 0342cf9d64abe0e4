// --- File: crates/ledgerbridge_quickbooks/src/handlers.rs ---
use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};
use ledgerbridge_common::create_client;
use ledgerbridge_config::AppConfig;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;
use validator::Validate;

use crate::client::QuickBooksClient;
use crate::error::QuickBooksError;
use crate::logic;
use crate::models::{
    CompanyInfoResponse, CustomerInvoicesResponse, CustomersResponse, InventoryResponse,
    InvoiceCreateRequest, InvoicesResponse, RefreshResponse,
};
use crate::oauth::refresh_tokens;
use crate::store::{FileTokenStore, TokenStore};

/// Shared state for the QuickBooks handlers.
#[derive(Clone)]
pub struct QuickBooksState {
    pub config: Arc<AppConfig>,
    pub store: Arc<dyn TokenStore>,
    pub http: reqwest::Client,
}

impl QuickBooksState {
    /// File-backed store at `quickbooks.tokens_file` and an HTTP client with
    /// the configured timeout.
    pub fn from_config(config: Arc<AppConfig>) -> Result<Self, QuickBooksError> {
        let store = Arc::new(FileTokenStore::new(&config.quickbooks.tokens_file));
        let http = create_client(config.quickbooks.timeout_secs, true)?;
        Ok(Self::new(config, store, http))
    }

    pub fn new(config: Arc<AppConfig>, store: Arc<dyn TokenStore>, http: reqwest::Client) -> Self {
        Self {
            config,
            store,
            http,
        }
    }

    /// Authenticated client for the current token record.
    pub async fn client(&self) -> Result<QuickBooksClient, QuickBooksError> {
        let qb = &self.config.quickbooks;
        logic::client_from_store(
            self.store.as_ref(),
            qb.company_id.as_deref(),
            self.http.clone(),
            &qb.api_base,
        )
        .await
    }
}

pub async fn company_info_handler(
    State(state): State<Arc<QuickBooksState>>,
) -> Result<Json<CompanyInfoResponse>, QuickBooksError> {
    let client = state.client().await?;
    Ok(Json(logic::fetch_company_info(&client).await?))
}

pub async fn refresh_handler(
    State(state): State<Arc<QuickBooksState>>,
) -> Result<Json<RefreshResponse>, QuickBooksError> {
    let tokens = refresh_tokens(
        &state.http,
        &state.config.quickbooks,
        state.store.as_ref(),
    )
    .await?;
    Ok(Json(RefreshResponse {
        success: true,
        tokens,
    }))
}

pub async fn customers_handler(
    State(state): State<Arc<QuickBooksState>>,
) -> Result<Json<CustomersResponse>, QuickBooksError> {
    let client = state.client().await?;
    let customers = logic::fetch_customers(&client).await?;
    Ok(Json(CustomersResponse { customers }))
}

pub async fn invoices_handler(
    State(state): State<Arc<QuickBooksState>>,
) -> Result<Json<InvoicesResponse>, QuickBooksError> {
    let client = state.client().await?;
    let invoices = logic::fetch_invoices(&client).await?;
    Ok(Json(InvoicesResponse { invoices }))
}

pub async fn customer_invoices_handler(
    State(state): State<Arc<QuickBooksState>>,
) -> Result<Json<CustomerInvoicesResponse>, QuickBooksError> {
    let client = state.client().await?;
    let customer_invoices = logic::fetch_customer_invoices(&client).await?;
    Ok(Json(CustomerInvoicesResponse { customer_invoices }))
}

pub async fn inventory_handler(
    State(state): State<Arc<QuickBooksState>>,
) -> Result<Json<InventoryResponse>, QuickBooksError> {
    let client = state.client().await?;
    let inventory = logic::fetch_inventory(&client).await?;
    Ok(Json(InventoryResponse { inventory }))
}

/// The payload is checked before the token record is consulted, so a bad
/// body is rejected with 422 even when not authenticated.
pub async fn create_invoice_handler(
    State(state): State<Arc<QuickBooksState>>,
    payload: Result<Json<InvoiceCreateRequest>, JsonRejection>,
) -> Result<Json<Value>, QuickBooksError> {
    let Json(payload) = payload.map_err(|e| QuickBooksError::Validation(e.body_text()))?;
    payload
        .validate()
        .map_err(|e| QuickBooksError::Validation(e.to_string()))?;

    let client = state.client().await?;
    let created = logic::create_invoice(&client, &payload).await?;
    info!("Invoice created in realm {}", client.realm_id());
    Ok(Json(created))
}
