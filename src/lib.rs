//! DocuDash client - typed access to the DocuDash test management API.
//!
//! The library wraps the dashboard's REST API: an authenticated HTTP client
//! ([`ApiClient`]), one resource module per entity ([`api`]), the session
//! context the client reads its token from ([`SessionContext`]) and the
//! route guards deciding where a user may go ([`guard`]).

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod guard;
pub mod models;
pub mod services;

pub use config::ClientConfig;
pub use error::{AppError, AppResult};
pub use services::{ApiClient, FileSessionStore, KeyringSessionStore, Session, SessionContext};
