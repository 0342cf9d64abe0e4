// File: services/ledgerbridge_backend/src/lib.rs
pub mod app;

pub use app::{build_app, cors_layer};
