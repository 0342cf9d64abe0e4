// --- File: crates/ledgerbridge_quickbooks/src/lib.rs ---
pub mod client;
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
pub mod models;
pub mod oauth;
pub mod routes;
pub mod store;

pub use error::QuickBooksError;
pub use handlers::QuickBooksState;
pub use routes::routes;
pub use store::{FileTokenStore, InMemoryTokenStore, StoreError, TokenStore};
