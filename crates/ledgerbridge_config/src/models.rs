// --- File: crates/ledgerbridge_config/src/models.rs ---

use serde::{Deserialize, Serialize};

pub const DEFAULT_QBO_API_BASE: &str = "https://sandbox-quickbooks.api.intuit.com/v3/company";
pub const DEFAULT_QBO_TOKEN_URL: &str =
    "https://oauth.platform.intuit.com/oauth2/v1/tokens/bearer";
pub const DEFAULT_TOKENS_FILE: &str = "tokens.json";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

// --- CORS Config ---
// The two local frontends (Angular dev server and a React/Next dev server).
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CorsConfig {
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

// --- QuickBooks Config ---
// Secrets are usually supplied through the flat legacy env names
// (CLIENT_ID, CLIENT_SECRET, REFRESH_TOKEN), see env_vars.rs.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct QuickBooksConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub redirect_uri: Option<String>,
    /// Base of the accounting API, without the realm segment.
    #[serde(default = "default_api_base")]
    pub api_base: String,
    #[serde(default = "default_token_url")]
    pub token_url: String,
    /// Fallback realm id when the token file does not carry one.
    pub company_id: Option<String>,
    pub refresh_token: Option<String>,
    #[serde(default = "default_tokens_file")]
    pub tokens_file: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for QuickBooksConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            redirect_uri: None,
            api_base: default_api_base(),
            token_url: default_token_url(),
            company_id: None,
            refresh_token: None,
            tokens_file: default_tokens_file(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub quickbooks: QuickBooksConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:4200".to_string(),
        "http://localhost:3000".to_string(),
    ]
}

fn default_api_base() -> String {
    DEFAULT_QBO_API_BASE.to_string()
}

fn default_token_url() -> String {
    DEFAULT_QBO_TOKEN_URL.to_string()
}

fn default_tokens_file() -> String {
    DEFAULT_TOKENS_FILE.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
