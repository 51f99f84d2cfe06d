//! # Shelf Gateway
//!
//! Minimal HTTP gateway in front of an object store.
//!
//! This crate provides:
//! - **Uploads**: `POST /` with a multipart `file` and optional `catalog`
//! - **Listings**: `GET /list?catalog=` one directory level at a time
//! - **Size Guard**: 1 MiB ceiling enforced before the body is buffered
//! - **Envelopes**: uniform JSON results for every outcome
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │                   HTTP Clients                      │
//! │              (browsers, curl, etc.)                 │
//! └─────────────────────────┬───────────────────────────┘
//!                           │
//! ┌─────────────────────────▼───────────────────────────┐
//! │                   Shelf Gateway                     │
//! ├─────────────────────────────────────────────────────┤
//! │  CORS │ Request ID │ Logging │ Size Guard           │
//! ├─────────────────────────────────────────────────────┤
//! │      Handlers (hello, upload, list) + Envelopes     │
//! ├─────────────────────────────────────────────────────┤
//! │                    shelf-store                      │
//! │          (ObjectStore: memory, local disk)          │
//! └─────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod envelope;
pub mod error;
pub mod form;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::GatewayConfig;
pub use envelope::{ListEnvelope, Outcome, UploadEnvelope, UploadedObject};
pub use error::ApiError;
pub use server::run_server_with_shutdown;
pub use state::AppState;
