//! Environment variable handling for the Ledgerbridge service.
//!
//! Two naming schemes are understood. The structured one follows the
//! `config` crate layout (`LEDGERBRIDGE__QUICKBOOKS__API_BASE`). The legacy
//! one is the flat set of names older `.env` files use
//! (`CLIENT_ID`, `QBO_BASE`, `REFRESH_TOKEN`, ...).

use std::env;

/// The default prefix for configuration environment variables
pub const DEFAULT_PREFIX: &str = "LEDGERBRIDGE";

/// The separator for configuration environment variables
pub const CONFIG_SEPARATOR: &str = "__";

/// Flat environment names mapped onto their configuration paths.
pub const LEGACY_ENV_VARS: &[(&str, &str)] = &[
    ("quickbooks.client_id", "CLIENT_ID"),
    ("quickbooks.client_secret", "CLIENT_SECRET"),
    ("quickbooks.redirect_uri", "REDIRECT_URI"),
    ("quickbooks.api_base", "QBO_BASE"),
    ("quickbooks.token_url", "QBO_TOKEN_URL"),
    ("quickbooks.company_id", "COMPANY_ID"),
    ("quickbooks.refresh_token", "REFRESH_TOKEN"),
    ("quickbooks.tokens_file", "TOKENS_FILE"),
];

const REDACTED: &str = "***";

/// Get the prefix for configuration environment variables
pub fn get_config_prefix() -> String {
    env::var("PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// Convert a configuration path to an environment variable name
///
/// `quickbooks.api_base` becomes `LEDGERBRIDGE__QUICKBOOKS__API_BASE`.
pub fn config_path_to_env_var(path: &str) -> String {
    let prefix = get_config_prefix();
    let path = path.replace('.', CONFIG_SEPARATOR);
    format!("{}{}{}", prefix, CONFIG_SEPARATOR, path).to_uppercase()
}

/// The flat legacy name for a configuration path, if it has one.
pub fn legacy_env_var(path: &str) -> Option<&'static str> {
    LEGACY_ENV_VARS
        .iter()
        .find(|(config_path, _)| *config_path == path)
        .map(|(_, name)| *name)
}

/// Collect the legacy overrides currently present in the environment.
///
/// Empty values are treated as unset so a blank line in `.env` does not
/// clobber a value coming from a config file.
pub fn legacy_overrides() -> Vec<(&'static str, String)> {
    LEGACY_ENV_VARS
        .iter()
        .filter_map(|(path, name)| {
            env::var(name)
                .ok()
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*path, value))
        })
        .collect()
}

/// Check if a path is a secret path
///
/// Paths containing "secret", "password" or "token" (but not a URL or file
/// name) are considered secret.
pub fn is_secret_path(path: &str) -> bool {
    let path_lower = path.to_lowercase();
    if path_lower.ends_with("_url") || path_lower.ends_with("_file") {
        return false;
    }
    path_lower.contains("secret") || path_lower.contains("password") || path_lower.contains("token")
}

/// Mask every secret value in a serialized configuration tree.
///
/// Returns `true` if anything was masked. Used before logging the effective
/// configuration.
pub fn redact_secrets(value: &mut serde_json::Value) -> bool {
    use serde_json::Value;

    fn walk(path: Vec<String>, obj: &mut Value) -> bool {
        let mut replaced = false;

        match obj {
            Value::Object(map) => {
                for (k, v) in map.iter_mut() {
                    let mut new_path = path.clone();
                    new_path.push(k.to_string());
                    replaced |= walk(new_path, v);
                }
            }
            Value::String(s) if is_secret_path(&path.join(".")) => {
                *s = REDACTED.to_string();
                replaced = true;
            }
            _ => {}
        }

        replaced
    }

    walk(vec![], value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_config_path_to_env_var() {
        assert_eq!(
            config_path_to_env_var("server.host"),
            "LEDGERBRIDGE__SERVER__HOST"
        );
        assert_eq!(
            config_path_to_env_var("quickbooks.api_base"),
            "LEDGERBRIDGE__QUICKBOOKS__API_BASE"
        );
    }

    #[test]
    fn test_legacy_env_var() {
        assert_eq!(legacy_env_var("quickbooks.api_base"), Some("QBO_BASE"));
        assert_eq!(legacy_env_var("quickbooks.company_id"), Some("COMPANY_ID"));
        assert_eq!(legacy_env_var("server.port"), None);
    }

    #[test]
    fn test_is_secret_path() {
        assert!(is_secret_path("quickbooks.client_secret"));
        assert!(is_secret_path("quickbooks.refresh_token"));
        assert!(!is_secret_path("quickbooks.token_url"));
        assert!(!is_secret_path("quickbooks.tokens_file"));
        assert!(!is_secret_path("server.host"));
    }

    #[test]
    fn test_redact_secrets() {
        let mut value = json!({
            "quickbooks": {
                "client_id": "abc",
                "client_secret": "shh",
                "refresh_token": "rt",
                "token_url": "https://example.com/token",
                "company_id": null
            }
        });

        assert!(redact_secrets(&mut value));
        assert_eq!(value["quickbooks"]["client_secret"], "***");
        assert_eq!(value["quickbooks"]["refresh_token"], "***");
        assert_eq!(value["quickbooks"]["client_id"], "abc");
        assert_eq!(value["quickbooks"]["token_url"], "https://example.com/token");
        assert!(value["quickbooks"]["company_id"].is_null());
    }
}
