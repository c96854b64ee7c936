//! Client services.
//!
//! The HTTP client, the session it authenticates with, and where that
//! session is persisted. Nothing here knows about individual endpoints;
//! those live in [`crate::api`].

pub mod api_client;
pub mod session;
pub mod session_store;

pub use api_client::ApiClient;
pub use session::{Session, SessionContext, SessionSnapshot};
pub use session_store::{FileSessionStore, KeyringSessionStore, SessionPersistence};
