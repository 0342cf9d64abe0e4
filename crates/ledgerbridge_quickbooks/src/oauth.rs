// --- File: crates/ledgerbridge_quickbooks/src/oauth.rs ---
//! OAuth2 refresh against the Intuit token endpoint.

use ledgerbridge_config::QuickBooksConfig;
use reqwest::{header, Client, StatusCode};
use tracing::{info, warn};

use crate::error::QuickBooksError;
use crate::models::TokenRecord;
use crate::store::TokenStore;

/// The token endpoint does not echo the realm id, so the previous `realmId`
/// value is copied into the fresh payload whenever the key was stored.
pub fn carry_forward_realm(mut fresh: TokenRecord, previous: &TokenRecord) -> TokenRecord {
    if let Some(realm_id) = previous.realm_id() {
        fresh.set_realm_id(realm_id.clone());
    }
    fresh
}

/// Exchange the configured refresh token for a new token payload, persist it
/// and return what was saved.
///
/// The refresh token comes from configuration (`REFRESH_TOKEN`), not from the
/// store.
pub async fn refresh_tokens(
    http: &Client,
    config: &QuickBooksConfig,
    store: &dyn TokenStore,
) -> Result<TokenRecord, QuickBooksError> {
    let refresh_token = config
        .refresh_token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or(QuickBooksError::MissingRefreshToken)?;

    if config.client_id.is_none() || config.client_secret.is_none() {
        warn!("CLIENT_ID or CLIENT_SECRET is not configured; refresh will likely be rejected");
    }
    let client_id = config.client_id.as_deref().unwrap_or_default();
    let client_secret = config.client_secret.as_deref().unwrap_or_default();

    info!("Refreshing QuickBooks access token");
    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", refresh_token),
    ];
    let response = http
        .post(&config.token_url)
        .basic_auth(client_id, Some(client_secret))
        .header(header::ACCEPT, "application/json")
        .form(&params)
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;
    if status != StatusCode::OK {
        return Err(QuickBooksError::Upstream {
            status: status.as_u16(),
            body,
        });
    }

    let fresh: TokenRecord = serde_json::from_str(&body)?;
    let previous = store.load().await?;
    let tokens = carry_forward_realm(fresh, &previous);
    store.save(&tokens).await?;

    info!(
        "Persisted refreshed tokens (realm carried forward: {})",
        tokens.realm_id().is_some()
    );
    Ok(tokens)
}
